use log::{debug, trace};
use serde::Serialize;

use crate::companies::{CompanyNormalizer, UNKNOWN_COMPANY};
use crate::formats::xls::{Cell, Grid, as_date_time, as_text, is_empty_cell};
use crate::time::{self, DateTime};

const REPORT_DATE_MARKER: &str = "Информация по состоянию за:";
const EXECUTOR_MARKER: &str = "Исполнитель:";
const PHONE_MARKER: &str = "Контактный телефон:";
const REGION_MARKER: &str = "Субъект Российской Федерации";

const MARKERS: [&str; 4] = [REPORT_DATE_MARKER, EXECUTOR_MARKER, PHONE_MARKER, REGION_MARKER];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub filename: String,
    pub report_date: DateTime,
    pub company: String,
    pub executor: String,
    pub phone: String,
    pub region: String,
}

/// Reads the report header. `grid` is the sheet holding the header block (the structure sheet or the
/// first one), and it is also scanned for the company name when the file name doesn't identify it.
pub fn extract_metadata(
    grid: Option<&Grid>, filename: &str, normalizer: &CompanyNormalizer, scan_rows: usize,
) -> ReportMetadata {
    let report_date = grid
        .and_then(|grid| find_marker(grid, REPORT_DATE_MARKER))
        .and_then(|value| match value {
            MarkerValue::Cell(cell) => as_date_time(Some(cell)),
            MarkerValue::Inline(text) => time::parse_report_date(&text),
        })
        .unwrap_or_else(|| {
            debug!("{filename}: The report has no valid report date. Using the current time.");
            time::now()
        });

    let text = |marker: &str| grid.and_then(|grid| find_marker(grid, marker)).map(MarkerValue::into_text).unwrap_or_default();

    ReportMetadata {
        filename: filename.to_owned(),
        report_date,
        company: find_company(grid, filename, normalizer, scan_rows),
        executor: text(EXECUTOR_MARKER),
        phone: text(PHONE_MARKER),
        region: text(REGION_MARKER),
    }
}

fn find_company(grid: Option<&Grid>, filename: &str, normalizer: &CompanyNormalizer, scan_rows: usize) -> String {
    if let Some(company) = normalizer.find(filename) {
        trace!("{filename}: The company is determined by the file name: {company}.");
        return company.to_owned();
    }

    if let Some(grid) = grid {
        for row_id in 0..grid.height().min(scan_rows) {
            let row = grid.row(row_id);

            // The header values (region in particular) may contain words that look like company names
            if is_marker_row(row) {
                continue;
            }

            for cell in row {
                let value = as_text(Some(cell));
                if value.is_empty() {
                    continue;
                }

                if let Some(company) = normalizer.find(&value) {
                    trace!("{filename}: The company is determined by {value:?} cell: {company}.");
                    return company.to_owned();
                }
            }
        }
    }

    debug!("{filename}: Unable to determine the report company.");
    UNKNOWN_COMPANY.to_owned()
}

enum MarkerValue<'a> {
    Cell(&'a Cell),
    Inline(String),
}

impl MarkerValue<'_> {
    fn into_text(self) -> String {
        match self {
            MarkerValue::Cell(cell) => as_text(Some(cell)),
            MarkerValue::Inline(text) => text,
        }
    }
}

/// Finds a column 0 marker and returns the first non-empty cell to the right of it or, when the
/// value is typed into the marker cell itself, the text following the marker.
fn find_marker<'a>(grid: &'a Grid, marker: &str) -> Option<MarkerValue<'a>> {
    for row_id in 0..grid.height() {
        let row = grid.row(row_id);

        let title = as_text(row.first());
        let Some(position) = title.find(marker) else {
            continue;
        };

        if let Some(cell) = row.iter().skip(1).find(|cell| !is_empty_cell(Some(cell))) {
            return Some(MarkerValue::Cell(cell));
        }

        let inline = title[position + marker.len()..].trim_start_matches(':').trim();
        if !inline.is_empty() {
            return Some(MarkerValue::Inline(inline.to_owned()));
        }

        return None;
    }

    None
}

fn is_marker_row(row: &[Cell]) -> bool {
    let title = as_text(row.first());
    MARKERS.iter().any(|marker| title.contains(marker))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use super::*;

    fn text(value: &str) -> Cell {
        Cell::String(value.to_owned())
    }

    fn header(date: Cell) -> Grid {
        Grid::from_rows(vec![
            vec![text("Субъект Российской Федерации"), text("Республика Саха (Якутия)")],
            vec![text("Информация по состоянию за:"), Cell::Empty, date],
            vec![text("Исполнитель:"), text("Иванов И.И.")],
            vec![text("Контактный телефон:"), Cell::Int(84112000000)],
            Vec::new(),
            vec![text("Таблица №1 Структура")],
            vec![text("Собственная"), text("ООО «Туймаада-Нефть»"), Cell::Int(2)],
        ])
    }

    #[test]
    fn extract() {
        let grid = header(text("15.12.2025"));
        let metadata = extract_metadata(Some(&grid), "report.xlsx", &CompanyNormalizer::default(), 50);

        assert_eq!(metadata, ReportMetadata {
            filename: s!("report.xlsx"),
            report_date: date!(2025, 12, 15).and_hms_opt(0, 0, 0).unwrap(),
            company: s!("Туймаада-Нефть"),
            executor: s!("Иванов И.И."),
            phone: s!("84112000000"),
            region: s!("Республика Саха (Якутия)"),
        });
    }

    #[rstest(date, expected,
        case(text("2025-12-15 08:30:00"), date!(2025, 12, 15).and_hms_opt(8, 30, 0).unwrap()),
        case(text("2025-12-15"), date!(2025, 12, 15).and_hms_opt(0, 0, 0).unwrap()),
        case(text("15/12/2025"), date!(2025, 12, 15).and_hms_opt(0, 0, 0).unwrap()),
        case(Cell::DateTimeIso(s!("2025-12-15T10:00:00")), date!(2025, 12, 15).and_hms_opt(10, 0, 0).unwrap()),
    )]
    fn report_date(date: Cell, expected: DateTime) {
        let grid = header(date);
        let metadata = extract_metadata(Some(&grid), "report.xlsx", &CompanyNormalizer::default(), 50);
        assert_eq!(metadata.report_date, expected);
    }

    #[test]
    fn inline_values() {
        let grid = Grid::from_rows(vec![
            vec![text("Информация по состоянию за: 01.02.2026")],
            vec![text("Исполнитель: Петров П.П.")],
        ]);

        let metadata = extract_metadata(Some(&grid), "report.xlsx", &CompanyNormalizer::default(), 50);
        assert_eq!(metadata.report_date, date!(2026, 2, 1).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(metadata.executor, "Петров П.П.");
        assert_eq!(metadata.phone, "");
    }

    #[test]
    fn company_from_filename() {
        let grid = header(text("15.12.2025"));
        let metadata = extract_metadata(
            Some(&grid), "Отчет Сибойл 15.12.xlsx", &CompanyNormalizer::default(), 50);
        assert_eq!(metadata.company, "Сибойл");
    }

    #[test]
    fn region_is_not_a_company() {
        let grid = Grid::from_rows(vec![
            vec![text("Субъект Российской Федерации"), text("Республика Саха (Якутия)")],
            vec![text("Информация по состоянию за:"), text("15.12.2025")],
        ]);

        let metadata = extract_metadata(Some(&grid), "report.xlsx", &CompanyNormalizer::default(), 50);
        assert_eq!(metadata.company, UNKNOWN_COMPANY);
        assert_eq!(metadata.region, "Республика Саха (Якутия)");
    }

    #[test]
    fn scan_limit() {
        let grid = header(text("15.12.2025"));
        let metadata = extract_metadata(Some(&grid), "report.xlsx", &CompanyNormalizer::default(), 5);
        assert_eq!(metadata.company, UNKNOWN_COMPANY);
    }

    #[test]
    fn no_header() {
        let metadata = extract_metadata(None, "report.xlsx", &CompanyNormalizer::default(), 50);
        assert_eq!(metadata.company, UNKNOWN_COMPANY);
        assert_eq!(metadata.executor, "");
        assert_eq!(metadata.region, "");
    }
}
