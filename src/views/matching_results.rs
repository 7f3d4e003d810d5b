use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use super::{toast_err, Notifier};
use crate::error::Result;
use crate::models::matching::{MatchingFilter, MatchingResult};
use crate::services::export_service::ExportService;
use crate::services::matching_service::MatchingService;
use crate::utils::files::save_to_dir;
use crate::utils::time::now;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

pub struct MatchingResults {
    service: MatchingService,
    notifier: Arc<dyn Notifier>,
    results: Vec<MatchingResult>,
    filter: MatchingFilter,
}

impl MatchingResults {
    pub fn new(service: MatchingService, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            results: Vec::new(),
            filter: MatchingFilter::default(),
        }
    }

    /// Results passing the current filter.
    pub fn visible(&self) -> Vec<&MatchingResult> {
        self.filter.apply(&self.results)
    }

    pub async fn load(&mut self, filter: MatchingFilter) -> Result<Vec<&MatchingResult>> {
        self.filter = filter;
        self.refresh().await?;
        Ok(self.visible())
    }

    pub async fn refresh(&mut self) -> Result<()> {
        let position = self.filter.position.as_deref();
        self.results = toast_err(&*self.notifier, self.service.results(position).await)?;
        Ok(())
    }

    pub async fn shortlisted(&self, position_id: Option<&str>) -> Result<Vec<MatchingResult>> {
        toast_err(&*self.notifier, self.service.shortlisted(position_id).await)
    }

    /// Starts a backend matching run, then re-reads the results once. The run
    /// may still be going on the backend after that single refetch.
    pub async fn match_now(&mut self, position_id: Option<&str>) -> Result<()> {
        let summary = toast_err(&*self.notifier, self.service.match_all(position_id).await)?;
        info!(
            processed = summary.total_processed,
            shortlisted = summary.shortlisted_count,
            "matching run accepted"
        );
        self.notifier.success(&format!(
            "AI matching completed: {} application(s) processed, {} shortlisted",
            summary.total_processed, summary.shortlisted_count
        ));
        self.refresh().await
    }

    /// Writes the visible results to `dir` and returns the file path.
    pub async fn export(&self, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
        let visible = self.visible();
        if visible.is_empty() {
            self.notifier.info("No results to export");
        }
        let today = now().date_naive();
        let (name, bytes) = match format {
            ExportFormat::Csv => (
                ExportService::matching_csv_filename(today),
                toast_err(&*self.notifier, ExportService::matching_csv(&visible))?,
            ),
            ExportFormat::Xlsx => (
                ExportService::matching_xlsx_filename(today),
                toast_err(&*self.notifier, ExportService::matching_xlsx(&visible))?,
            ),
        };
        let path = toast_err(&*self.notifier, save_to_dir(dir, &name, &bytes).await)?;
        self.notifier
            .success(&format!("Exported {} result(s) to {}", visible.len(), path.display()));
        Ok(path)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = crate::error::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            other => Err(crate::error::Error::Validation(format!(
                "Unknown export format '{}', expected csv or xlsx",
                other
            ))),
        }
    }
}
