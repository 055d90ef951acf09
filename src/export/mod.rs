//! Export functionality for analysis
//!
//! Currently supports CSV export of per-epoch self-play training history.

mod history_csv;

pub use history_csv::{HistoryCsvExporter, HistoryRecord};
