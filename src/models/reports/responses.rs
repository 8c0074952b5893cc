use serde::Serialize;
use ts_rs::TS;

use super::entities::{ReportCell, ReportType};

// JSON 报表，供前端打印
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct ReportData {
    pub report_type: ReportType,
    pub title: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<ReportCell>>,
}
