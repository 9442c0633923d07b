// ============================================================
// RAW IMPORT
// ============================================================
// Uploaded bytes as handed over by the caller

use std::borrow::Cow;

/// An uploaded file: bytes plus the name the uploader declared, if any.
///
/// The resolver only borrows a `RawImport` for the duration of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImport<'a> {
    bytes: Cow<'a, [u8]>,
    file_name: Option<String>,
}

impl<'a> RawImport<'a> {
    /// Borrow an in-memory upload
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self {
            bytes: Cow::Borrowed(bytes),
            file_name: None,
        }
    }

    /// Take ownership of an upload (e.g. a file read from disk)
    pub fn owned(bytes: Vec<u8>) -> RawImport<'static> {
        RawImport {
            bytes: Cow::Owned(bytes),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borrowed_and_owned_agree() {
        let data = b"a,b\n1,2\n";
        let borrowed = RawImport::from_bytes(data).with_file_name("ga4.csv");
        let owned = RawImport::owned(data.to_vec()).with_file_name("ga4.csv");

        assert_eq!(borrowed, owned);
        assert_eq!(borrowed.len(), 8);
        assert_eq!(owned.file_name(), Some("ga4.csv"));
        assert!(!owned.is_empty());
    }
}
