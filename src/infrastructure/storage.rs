use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::{AppError, Result};
use crate::domain::import::RawImport;
use crate::domain::summary::Summary;

/// Read an uploaded export from disk, keeping its file name
pub fn read_upload(path: &Path) -> Result<RawImport<'static>> {
    let bytes = fs::read(path).map_err(|e| {
        AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let raw = RawImport::owned(bytes);
    Ok(match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => raw.with_file_name(name),
        None => raw,
    })
}

/// Write the plain-text summary download into `dir`
pub fn save_summary(dir: &Path, summary: &Summary) -> std::io::Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(summary.download_file_name());
    fs::write(&path, &summary.text)?;
    Ok(path)
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::import::ReportType;
    use chrono::NaiveDate;

    #[test]
    fn test_save_summary_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("downloads");
        let summary = Summary {
            business_name: "Acme".to_string(),
            report_type: ReportType::GSC,
            text: "Clicks are up.".to_string(),
            generated_on: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        };

        let path = save_summary(&dir, &summary).unwrap();
        assert_eq!(path, dir.join("Acme_Insights_2024-02-01.txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), "Clicks are up.");
    }

    #[test]
    fn test_read_upload_keeps_file_name() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("gsc.csv");
        fs::write(&path, "query,clicks\nfoo,1\n").unwrap();

        let raw = read_upload(&path).unwrap();
        assert_eq!(raw.file_name(), Some("gsc.csv"));
        assert_eq!(raw.len(), 19);
    }

    #[test]
    fn test_read_upload_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = read_upload(&tmp.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
    }
}
