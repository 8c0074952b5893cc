//! 报表生成与导出
//!
//! 报表按教师逐行统计，支持 JSON（前端打印）与 xlsx 两种格式。

pub mod build;
pub mod xlsx;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{Result, SchoolError};
use crate::models::ApiResponse;
use crate::models::auth::entities::Principal;
use crate::models::reports::{
    entities::{ExportFormat, ReportType},
    requests::ReportParams,
};
use crate::services::{ServiceContext, resolve_context};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 路径中的报表类型，未知类型视为不存在
pub fn parse_report_type(value: &str) -> Result<ReportType> {
    value
        .parse::<ReportType>()
        .map_err(|_| SchoolError::not_found("Report type not found"))
}

pub struct ReportService {
    context: Option<ServiceContext>,
}

impl ReportService {
    pub fn new_lazy() -> Self {
        Self { context: None }
    }

    pub(crate) fn get_context(&self, request: &HttpRequest) -> Result<ServiceContext> {
        resolve_context(&self.context, request)
    }

    pub async fn generate_report(
        &self,
        request: &HttpRequest,
        principal: Option<&Principal>,
        report_type: &str,
        params: ReportParams,
    ) -> ActixResult<HttpResponse> {
        let ctx = self.get_context(request)?;
        let report_type = parse_report_type(report_type)?;
        let format = params.format.unwrap_or(ExportFormat::Json);
        let report = build::build_report(&ctx, principal, report_type, params).await?;

        match format {
            ExportFormat::Json => Ok(HttpResponse::Ok().json(ApiResponse::success(
                report,
                "Report generated successfully",
            ))),
            ExportFormat::Xlsx => {
                let buffer = xlsx::write_workbook(&report)?;
                let filename = format!(
                    "{}-report-{}.xlsx",
                    report.report_type,
                    report.generated_at.format("%Y%m%d")
                );
                Ok(HttpResponse::Ok()
                    .content_type(XLSX_CONTENT_TYPE)
                    .insert_header((
                        "Content-Disposition",
                        format!("attachment; filename=\"{filename}\""),
                    ))
                    .body(buffer))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_type() {
        assert_eq!(parse_report_type("summary").unwrap(), ReportType::Summary);
        assert_eq!(parse_report_type("payroll").unwrap_err().code(), "E004");
    }
}
