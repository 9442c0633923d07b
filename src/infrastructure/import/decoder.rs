// ============================================================
// DECODER
// ============================================================
// Byte-order-mark sniffing and per-encoding decoding

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

use crate::domain::import::TextEncoding;

/// What a byte-order mark at the start of the input tells us
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BomSniff {
    /// Encoding named by the mark, if any
    pub encoding: Option<TextEncoding>,

    /// Number of bytes to skip before decoding
    pub len: usize,
}

pub(crate) fn sniff_bom(bytes: &[u8]) -> BomSniff {
    match Encoding::for_bom(bytes) {
        Some((encoding, len)) if encoding == UTF_8 => BomSniff {
            encoding: Some(TextEncoding::Utf8),
            len,
        },
        Some((encoding, len)) if encoding == UTF_16LE => BomSniff {
            encoding: Some(TextEncoding::Utf16Le),
            len,
        },
        Some((encoding, len)) if encoding == UTF_16BE => BomSniff {
            encoding: Some(TextEncoding::Utf16Be),
            len,
        },
        _ => BomSniff {
            encoding: None,
            len: 0,
        },
    }
}

/// Decode `bytes` (BOM already stripped) under `encoding`.
///
/// UTF-8 and UTF-16 are strict: malformed input is an `Err` with the reason.
/// Latin-1 maps every byte and cannot fail.
pub(crate) fn decode(bytes: &[u8], encoding: TextEncoding) -> Result<String, String> {
    let strict = match encoding {
        TextEncoding::Utf8 => UTF_8,
        TextEncoding::Utf16Le => UTF_16LE,
        TextEncoding::Utf16Be => UTF_16BE,
        TextEncoding::Latin1 => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            return Ok(text.into_owned());
        }
    };

    strict
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| format!("bytes are not valid {}", encoding))
}
