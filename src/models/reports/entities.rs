use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::string_enum::string_enum;

string_enum! {
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
    ReportType("report type") {
        Attendance => "attendance",
        Evaluations => "evaluations",
        Summary => "summary",
    }
}

string_enum! {
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
    ExportFormat("export format") {
        Json => "json",
        Xlsx => "xlsx",
    }
}

impl ReportType {
    /// 报表标题
    pub fn title(&self) -> &'static str {
        match self {
            ReportType::Attendance => "تقرير الحضور",
            ReportType::Evaluations => "تقرير التقييمات",
            ReportType::Summary => "التقرير الشامل",
        }
    }

    /// 表头，按报表类型固定
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            ReportType::Attendance => &[
                "اسم المعلم",
                "الرقم الوظيفي",
                "القسم",
                "أيام الحضور",
                "أيام الغياب",
                "أيام التأخير",
                "أيام الإذن",
                "نسبة الحضور",
            ],
            ReportType::Evaluations => &[
                "اسم المعلم",
                "الرقم الوظيفي",
                "القسم",
                "عدد التقييمات",
                "متوسط جودة التدريس",
                "متوسط الانضباط",
                "متوسط التفاعل مع الطلاب",
                "متوسط الالتزام بالمنهج",
                "متوسط التقييم العام",
            ],
            ReportType::Summary => &[
                "اسم المعلم",
                "الرقم الوظيفي",
                "القسم",
                "المادة",
                "نسبة الحضور",
                "متوسط التقييم",
                "عدد الملاحظات",
            ],
        }
    }
}

// 报表单元格
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub enum ReportCell {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl From<&str> for ReportCell {
    fn from(value: &str) -> Self {
        ReportCell::Text(value.to_string())
    }
}

impl From<String> for ReportCell {
    fn from(value: String) -> Self {
        ReportCell::Text(value)
    }
}

impl From<i64> for ReportCell {
    fn from(value: i64) -> Self {
        ReportCell::Integer(value)
    }
}

impl From<f64> for ReportCell {
    fn from(value: f64) -> Self {
        ReportCell::Decimal(value)
    }
}
