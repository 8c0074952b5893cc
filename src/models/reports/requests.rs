use serde::Deserialize;
use ts_rs::TS;

use super::entities::ExportFormat;

// 报表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct ReportParams {
    pub format: Option<ExportFormat>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub teacher_id: Option<i64>,
    pub department_id: Option<i64>,
}
