// Report downloader - Fetches the latest PDF report and saves it locally
use crate::application::auth_controller::AuthController;
use crate::application::dashboard_sync::DashboardSync;
use crate::application::errors::ClientError;
use crate::infrastructure::api_client::ApiClient;
use crate::infrastructure::report_sink::FileReportSink;
use std::path::PathBuf;
use std::sync::Arc;

const REPORT_PATH: &str = "/report/latest/";
pub const REPORT_FILE_NAME: &str = "latest_equipment_report.pdf";

pub struct ReportDownloader {
    api: Arc<ApiClient>,
    auth: Arc<AuthController>,
    dashboard: Arc<DashboardSync>,
    sink: FileReportSink,
}

impl ReportDownloader {
    pub fn new(
        api: Arc<ApiClient>,
        auth: Arc<AuthController>,
        dashboard: Arc<DashboardSync>,
        sink: FileReportSink,
    ) -> Self {
        Self {
            api,
            auth,
            dashboard,
            sink,
        }
    }

    /// Errors go to the dashboard's error line; displayed data is kept.
    pub async fn download_latest_report(&self) -> Result<PathBuf, ClientError> {
        self.dashboard.set_error(None);

        let result = self.fetch_and_save().await;
        if let Err(e) = &result {
            tracing::warn!("Report download failed: {}", e);
            self.dashboard.set_error(Some(e.to_string()));
        }
        result
    }

    async fn fetch_and_save(&self) -> Result<PathBuf, ClientError> {
        if !self.auth.is_authenticated() {
            return Err(ClientError::login_required());
        }

        let payload = match self.api.get_binary(REPORT_PATH).await {
            Ok(payload) => payload,
            Err(e) if e.is_not_found() => return Err(ClientError::NotFound(e.to_string())),
            Err(e) => return Err(e.into()),
        };

        let path = self
            .sink
            .save(REPORT_FILE_NAME, &payload)
            .map_err(ClientError::SaveFailed)?;

        tracing::info!("Saved report ({} bytes) to {}", payload.len(), path.display());
        Ok(path)
    }
}
