// Application root - Owns the controllers and wires cross-controller transitions
use crate::application::auth_controller::AuthController;
use crate::application::dashboard_sync::DashboardSync;
use crate::application::report_downloader::ReportDownloader;
use crate::application::token_store::TokenStore;
use crate::infrastructure::api_client::{ApiClient, HttpTransport};
use crate::infrastructure::report_sink::FileReportSink;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthController>,
    pub dashboard: Arc<DashboardSync>,
    pub reports: Arc<ReportDownloader>,
}

impl AppState {
    /// Auth is bootstrapped here, before any controller that reads data exists.
    pub fn new(
        base_url: &str,
        transport: Arc<dyn HttpTransport>,
        token_store: Arc<dyn TokenStore>,
        report_sink: FileReportSink,
    ) -> Self {
        let api = Arc::new(ApiClient::new(base_url, transport));
        let auth = Arc::new(AuthController::new(api.clone(), token_store));
        let dashboard = Arc::new(DashboardSync::new(api.clone(), auth.clone()));
        let reports = Arc::new(ReportDownloader::new(
            api,
            auth.clone(),
            dashboard.clone(),
            report_sink,
        ));

        Self {
            auth,
            dashboard,
            reports,
        }
    }

    pub async fn logout(&self) {
        self.auth.logout().await;
        self.dashboard.reset();
    }
}
