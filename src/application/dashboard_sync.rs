// Dashboard sync - Coordinates the dashboard reads into one consistent view state
use crate::application::auth_controller::AuthController;
use crate::application::errors::ClientError;
use crate::application::fetch::Fetch;
use crate::domain::dashboard::DashboardViewState;
use crate::domain::dataset::{DatasetSummary, HistoryPage, RawRowsView, UploadFile, UploadReceipt};
use crate::infrastructure::api_client::{ApiClient, ApiError};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

const SUMMARY_PATH: &str = "/summary/latest/";
const HISTORY_PATH: &str = "/history/";
const RAW_ROWS_PATH: &str = "/dataset/latest/rows/";
const UPLOAD_PATH: &str = "/upload/";
const UPLOAD_FIELD: &str = "file";

/// Each `refresh()` is a numbered cycle. A cycle only commits while it is the
/// most recently started one, so a slow superseded cycle can never overwrite
/// a newer snapshot.
pub struct DashboardSync {
    api: Arc<ApiClient>,
    auth: Arc<AuthController>,
    view: watch::Sender<DashboardViewState>,
    generation: AtomicU64,
}

impl DashboardSync {
    pub fn new(api: Arc<ApiClient>, auth: Arc<AuthController>) -> Self {
        let (view, _) = watch::channel(DashboardViewState::default());
        Self {
            api,
            auth,
            view,
            generation: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> DashboardViewState {
        self.view.borrow().clone()
    }

    /// Summary and history are fetched together and committed together; raw
    /// rows follow as a second phase and only touch their own field.
    ///
    /// A 404 on summary or raw rows means no dataset yet. Any other failure is
    /// returned and shown in `error`, while fields that did resolve are still
    /// applied and fields that failed keep their previous value.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let cycle = self.start_cycle();

        if !self.auth.is_authenticated() {
            tracing::debug!("Refresh #{} while anonymous, clearing view", cycle);
            self.commit(cycle, |view| *view = DashboardViewState::default());
            return Ok(());
        }

        let (summary, history) = futures::join!(self.fetch_summary(), self.fetch_history());
        let summary = summary.resolve();
        let history = history.resolve();

        let mut failure = first_failure([summary.as_ref().err(), history.as_ref().err()]);
        let message = failure.as_ref().map(ToString::to_string);

        let applied = self.commit(cycle, move |view| {
            view.error = message;
            if let Ok(summary) = summary {
                view.summary = summary;
            }
            if let Ok(history) = history {
                view.history = history.map(|page| page.items).unwrap_or_default();
            }
        });
        if !applied {
            tracing::debug!("Refresh #{} superseded, discarding results", cycle);
            return Ok(());
        }

        if !self.auth.is_authenticated() {
            tracing::debug!("Session ended during refresh #{}, skipping raw rows", cycle);
            return finish(failure);
        }

        let rows = self.fetch_raw_rows().await.resolve();
        if let Err(e) = &rows {
            failure.get_or_insert_with(|| e.clone());
        }
        let row_error = rows.as_ref().err().map(ToString::to_string);

        let applied = self.commit(cycle, move |view| match rows {
            Ok(rows) => view.raw_rows = rows.unwrap_or_default(),
            Err(_) => {
                if view.error.is_none() {
                    view.error = row_error;
                }
            }
        });
        if !applied {
            tracing::debug!("Refresh #{} superseded before raw rows landed", cycle);
            return Ok(());
        }

        finish(failure)
    }

    /// Upload a CSV and, only if the server accepted it, run one refresh.
    /// A failed upload leaves the view untouched.
    pub async fn upload_then_refresh(
        &self,
        file: Option<UploadFile>,
    ) -> Result<UploadReceipt, ClientError> {
        let file = file.ok_or_else(|| ClientError::validation("Please choose a CSV file."))?;
        if !self.auth.is_authenticated() {
            return Err(ClientError::login_required());
        }

        tracing::info!("Uploading {} ({} bytes)", file.filename, file.bytes.len());
        let receipt: UploadReceipt = self
            .api
            .post_multipart(UPLOAD_PATH, UPLOAD_FIELD, &file)
            .await?;
        tracing::info!("Upload accepted as dataset {}", receipt.dataset_id);

        if let Err(e) = self.refresh().await {
            tracing::warn!("Refresh after upload failed: {}", e);
        }

        Ok(receipt)
    }

    /// Drop everything displayed and invalidate in-flight cycles.
    pub fn reset(&self) {
        let cycle = self.start_cycle();
        self.commit(cycle, |view| *view = DashboardViewState::default());
    }

    /// Set or clear the error line without touching data or cycles.
    pub fn set_error(&self, error: Option<String>) {
        self.view.send_if_modified(|view| {
            if view.error == error {
                return false;
            }
            view.error = error;
            true
        });
    }

    async fn fetch_summary(&self) -> Fetch<DatasetSummary> {
        Fetch::missing_on_404(self.api.get_json(SUMMARY_PATH).await)
    }

    async fn fetch_history(&self) -> Fetch<HistoryPage> {
        Fetch::strict(self.api.get_json(HISTORY_PATH).await)
    }

    async fn fetch_raw_rows(&self) -> Fetch<RawRowsView> {
        Fetch::missing_on_404(self.api.get_json(RAW_ROWS_PATH).await)
    }

    fn start_cycle(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn commit(&self, cycle: u64, apply: impl FnOnce(&mut DashboardViewState)) -> bool {
        self.view.send_if_modified(|view| {
            if self.generation.load(Ordering::SeqCst) != cycle {
                return false;
            }
            apply(view);
            true
        })
    }
}

fn first_failure<const N: usize>(errors: [Option<&ApiError>; N]) -> Option<ApiError> {
    errors.into_iter().flatten().next().cloned()
}

fn finish(failure: Option<ApiError>) -> Result<(), ClientError> {
    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
