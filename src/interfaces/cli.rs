//! Command-line surface
//!
//! This module provides:
//! - `inspect`: resolve an export, show the detected report type and a preview
//! - `summarize`: ask the configured model for insights and optionally save them

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::application::{ImportReportUseCase, ImportedReport, SummarizeReportUseCase};
use crate::domain::error::{AppError, ImportError, Result};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::storage::{read_upload, save_summary};

#[derive(Parser, Debug)]
#[command(
    name = "sitepulse",
    version,
    about = "Website health monitor for GA4 and Search Console CSV exports"
)]
pub struct Cli {
    #[arg(long, global = true, help = "TOML config file (default: ./sitepulse.toml if present)")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an export and preview it
    Inspect {
        file: PathBuf,
        #[arg(long, default_value_t = 10, help = "Rows to preview")]
        rows: usize,
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
    },
    /// Generate an AI summary of an export
    Summarize {
        file: PathBuf,
        #[arg(long, help = "Business or brand name")]
        business: String,
        #[arg(long, help = "Directory to save the plain-text summary into")]
        save: Option<PathBuf>,
    },
}

pub fn inspect(
    config: &AppConfig,
    file: &Path,
    rows: usize,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let raw = read_upload(file)?;
    let use_case = ImportReportUseCase::new(config.import.clone())?;

    let report = match use_case.execute(&raw) {
        Ok(report) => report,
        Err(AppError::Import(ImportError::EmptyAfterHeader { columns })) => {
            writeln!(out, "⚠️ The file has a header but no data rows.")?;
            writeln!(out, "{}", columns.join("  "))?;
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    if json {
        let body = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::Internal(format!("Failed to serialize report: {}", e)))?;
        writeln!(out, "{}", body)?;
        return Ok(());
    }

    write_report(&report, rows, out)
}

fn write_report(report: &ImportedReport, rows: usize, out: &mut dyn Write) -> Result<()> {
    if report.report_type.is_known() {
        writeln!(
            out,
            "✅ Detected report type: {} ({})",
            report.report_type,
            report.report_type.description()
        )?;
    } else {
        writeln!(
            out,
            "⚠️ Unsupported report format: expected a GA4 or Search Console export. Showing a generic preview."
        )?;
    }

    let resolved = &report.resolved;
    writeln!(
        out,
        "Parsed as {} with {} columns and {} rows",
        resolved.attempt,
        resolved.table.column_count(),
        resolved.table.row_count()
    )?;
    if !resolved.dropped_columns.is_empty() {
        writeln!(out, "Dropped columns: {:?}", resolved.dropped_columns)?;
    }
    if resolved.section_truncated {
        writeln!(out, "Only the first section of a multi-section export was read")?;
    }

    writeln!(out)?;
    writeln!(out, "{}", resolved.table.to_text_preview(rows))?;
    Ok(())
}

pub async fn summarize(
    config: &AppConfig,
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    file: &Path,
    business: &str,
    save: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let raw = read_upload(file)?;
    let report = ImportReportUseCase::new(config.import.clone())?.execute(&raw)?;
    write_report(&report, config.summary.effective_preview_rows(), out)?;

    let use_case =
        SummarizeReportUseCase::new(llm_client, config.llm.clone(), config.summary.clone());
    let summary = use_case.execute(&report, business).await?;

    writeln!(out)?;
    writeln!(out, "💡 AI-Generated Insights")?;
    writeln!(out, "{}", summary.text)?;

    if let Some(dir) = save {
        let path = save_summary(dir, &summary)?;
        writeln!(out)?;
        writeln!(out, "📄 Saved summary to {}", path.display())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm_config::LLMConfig;
    use async_trait::async_trait;
    use std::fs;

    struct CannedClient;

    #[async_trait]
    impl LLMClient for CannedClient {
        async fn generate(&self, _config: &LLMConfig, _system: &str, _user: &str) -> Result<String> {
            Ok("Organic clicks are growing.".to_string())
        }
    }

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_summarize_args() {
        let cli = Cli::try_parse_from([
            "sitepulse",
            "--config",
            "custom.toml",
            "summarize",
            "gsc.csv",
            "--business",
            "Acme",
            "--save",
            "out",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Summarize { business, save, .. } => {
                assert_eq!(business, "Acme");
                assert_eq!(save, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_summarize_requires_business() {
        assert!(Cli::try_parse_from(["sitepulse", "summarize", "gsc.csv"]).is_err());
    }

    #[test]
    fn test_inspect_prints_preview() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "ga4.csv", b"# GA4 export\nsessions,users\n10,5\n");
        let mut out = Vec::new();

        inspect(&AppConfig::default(), &path, 10, false, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Detected report type: GA4"));
        assert!(text.contains("header on line 1"));
        assert!(text.contains("sessions  users"));
    }

    #[test]
    fn test_inspect_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "gsc.csv", b"query,clicks\nfoo,3\n");
        let mut out = Vec::new();

        inspect(&AppConfig::default(), &path, 10, true, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["report_type"], "GSC");
        assert_eq!(value["resolved"]["table"]["columns"][1], "clicks");
    }

    #[test]
    fn test_inspect_header_only_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "empty.csv", b"query,clicks\n");
        let mut out = Vec::new();

        inspect(&AppConfig::default(), &path, 10, false, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("no data rows"));
    }

    #[test]
    fn test_inspect_unparseable_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "blob.csv", b"\x00\x01\x02");
        let mut out = Vec::new();

        let err = inspect(&AppConfig::default(), &path, 10, false, &mut out).unwrap_err();
        assert!(err.to_string().contains("Could not parse this file"));
    }

    #[tokio::test]
    async fn test_summarize_saves_download() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "gsc.csv", b"query,clicks\nshoes,8\nboots,3\n");
        let save_dir = dir.path().join("downloads");
        let mut out = Vec::new();

        summarize(
            &AppConfig::default(),
            Arc::new(CannedClient),
            &path,
            "Acme",
            Some(save_dir.as_path()),
            &mut out,
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Organic clicks are growing."));

        let saved: Vec<_> = fs::read_dir(&save_dir).unwrap().collect();
        assert_eq!(saved.len(), 1);
    }
}
