use rust_xlsxwriter::{Format, Workbook};

use crate::errors::Result;
use crate::models::reports::{entities::ReportCell, responses::ReportData};

/// 单个工作表：首行为加粗表头，其后每位教师一行
pub fn write_workbook(report: &ReportData) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(report.report_type.as_str())?;
    worksheet.set_right_to_left(true);

    let header_format = Format::new().set_bold();
    for (col, header) in report.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
        worksheet.set_column_width(col as u16, 18)?;
    }

    for (index, row) in report.rows.iter().enumerate() {
        let row_num = (index + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                ReportCell::Text(text) => worksheet.write_string(row_num, col, text)?,
                ReportCell::Integer(n) => worksheet.write_number(row_num, col, *n as f64)?,
                ReportCell::Decimal(n) => worksheet.write_number(row_num, col, *n)?,
            };
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reports::entities::ReportType;

    #[test]
    fn test_workbook_is_a_zip_archive() {
        let report = ReportData {
            report_type: ReportType::Attendance,
            title: ReportType::Attendance.title().to_string(),
            generated_at: chrono::Utc::now(),
            start_date: None,
            end_date: None,
            headers: ReportType::Attendance
                .headers()
                .iter()
                .map(|h| h.to_string())
                .collect(),
            rows: vec![vec![
                "Teacher".into(),
                "T-1".into(),
                "".into(),
                ReportCell::Integer(3),
                ReportCell::Integer(0),
                ReportCell::Integer(1),
                ReportCell::Integer(0),
                ReportCell::Decimal(100.0),
            ]],
        };
        let buffer = write_workbook(&report).unwrap();
        assert!(buffer.starts_with(b"PK"));
    }
}
