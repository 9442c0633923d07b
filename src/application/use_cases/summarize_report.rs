use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::info;
use validator::Validate;

use super::import_report::ImportedReport;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::summary::{Summary, SummaryConfig, SummaryRequest};
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::clean_summary_text;

pub struct SummarizeReportUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    llm_config: LLMConfig,
    summary_config: SummaryConfig,
}

impl SummarizeReportUseCase {
    pub fn new(
        llm_client: Arc<dyn LLMClient + Send + Sync>,
        llm_config: LLMConfig,
        summary_config: SummaryConfig,
    ) -> Self {
        Self {
            llm_client,
            llm_config,
            summary_config,
        }
    }

    /// The request that would be sent for `report`, without sending it
    pub fn build_request(&self, report: &ImportedReport, business_name: &str) -> Result<SummaryRequest> {
        if !report.report_type.is_known() {
            return Err(AppError::ValidationError(
                "Unsupported report format. Please upload a GA4 or Search Console CSV export."
                    .to_string(),
            ));
        }

        let preview = report
            .table()
            .to_text_preview(self.summary_config.effective_preview_rows());
        let request = SummaryRequest::new(business_name, report.report_type, preview);
        request.validate()?;

        Ok(request)
    }

    pub async fn execute(&self, report: &ImportedReport, business_name: &str) -> Result<Summary> {
        self.execute_on(report, business_name, Local::now().date_naive())
            .await
    }

    pub async fn execute_on(
        &self,
        report: &ImportedReport,
        business_name: &str,
        generated_on: NaiveDate,
    ) -> Result<Summary> {
        let request = self.build_request(report, business_name)?;

        info!(
            report_type = %request.report_type,
            model = %self.llm_config.model,
            "Requesting summary"
        );

        let raw = self
            .llm_client
            .generate(
                &self.llm_config,
                &self.summary_config.system_prompt,
                &request.to_prompt(),
            )
            .await?;

        Ok(Summary {
            business_name: request.business_name,
            report_type: request.report_type,
            text: clean_summary_text(&raw),
            generated_on,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ImportReportUseCase;
    use crate::domain::import::{RawImport, ReportType, ResolverConfig};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeClient {
        prompts: Mutex<Vec<String>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl LLMClient for FakeClient {
        async fn generate(&self, _config: &LLMConfig, _system: &str, user: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(user.to_string());
            match &self.fail_with {
                Some(reason) => Err(AppError::LLMError(reason.clone())),
                None => Ok("<think>draft</think>\n- Clicks grew\n\n\n\n- Keep posting".to_string()),
            }
        }
    }

    fn report(csv: &str) -> ImportedReport {
        ImportReportUseCase::new(ResolverConfig::default())
            .unwrap()
            .execute(&RawImport::from_bytes(csv.as_bytes()))
            .unwrap()
    }

    fn gsc_report(rows: usize) -> ImportedReport {
        let mut csv = String::from("query,clicks,impressions\n");
        for n in 0..rows {
            csv.push_str(&format!("term {},{},{}\n", n, n * 2, n * 10));
        }
        report(&csv)
    }

    #[tokio::test]
    async fn test_summary_uses_preview_and_cleans_text() {
        let client = Arc::new(FakeClient::default());
        let use_case = SummarizeReportUseCase::new(
            client.clone(),
            LLMConfig::default(),
            SummaryConfig::default(),
        );
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let summary = use_case
            .execute_on(&gsc_report(20), " Acme ", date)
            .await
            .unwrap();

        assert_eq!(summary.text, "- Clicks grew\n\n- Keep posting");
        assert_eq!(summary.report_type, ReportType::GSC);
        assert_eq!(summary.download_file_name(), "Acme_Insights_2024-03-01.txt");

        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("term 6"));
        assert!(!prompts[0].contains("term 7"));
    }

    #[tokio::test]
    async fn test_unknown_report_is_not_summarized() {
        let client = Arc::new(FakeClient::default());
        let use_case = SummarizeReportUseCase::new(
            client.clone(),
            LLMConfig::default(),
            SummaryConfig::default(),
        );

        let err = use_case
            .execute(&report("country,revenue\nNL,10\n"), "Acme")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(client.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_business_name_is_rejected() {
        let use_case = SummarizeReportUseCase::new(
            Arc::new(FakeClient::default()),
            LLMConfig::default(),
            SummaryConfig::default(),
        );

        let err = use_case.execute(&gsc_report(3), "   ").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_client_failure_passes_through() {
        let use_case = SummarizeReportUseCase::new(
            Arc::new(FakeClient {
                fail_with: Some("Rate limited (429 Too Many Requests): quota".to_string()),
                ..Default::default()
            }),
            LLMConfig::default(),
            SummaryConfig::default(),
        );

        match use_case.execute(&gsc_report(3), "Acme").await {
            Err(AppError::LLMError(reason)) => assert!(reason.starts_with("Rate limited")),
            other => panic!("expected LLMError, got {:?}", other),
        }
    }
}
