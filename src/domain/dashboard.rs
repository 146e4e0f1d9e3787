// Dashboard view state
use super::dataset::{DatasetSummary, HistoryEntry, RawRowsView};

/// One consistent snapshot of everything the dashboard displays.
///
/// `summary == None` means no dataset has been uploaded yet, which is not the
/// same thing as a dataset with zero rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardViewState {
    pub summary: Option<DatasetSummary>,
    pub history: Vec<HistoryEntry>,
    pub raw_rows: RawRowsView,
    pub error: Option<String>,
}
