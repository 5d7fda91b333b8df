use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use serde::Serialize;

use crate::formats::xls::{ColumnsMapping, Grid, TableColumn, TableRow, as_text, is_formula};
use crate::types::Decimal;

use super::common::FuelVolumes;

pub const SHEET_NAME: &str = "2-Потребность";

/// Data may be placed right on the label row or on one of the following rows.
const DATA_ROWS_LOOKAHEAD: usize = 3;

const COLUMNS: &[TableColumn] = &[
    TableColumn::new(0, "Период"),
    TableColumn::new(1, "Бензины всего"),
    TableColumn::new(2, "АИ-76/80"),
    TableColumn::new(3, "АИ-92"),
    TableColumn::new(4, "АИ-95"),
    TableColumn::new(5, "АИ-98/100"),
    TableColumn::new(6, "Дизельное топливо всего"),
    TableColumn::new(7, "ДТ зимнее"),
    TableColumn::new(8, "ДТ арктическое"),
    TableColumn::new(9, "ДТ летнее"),
    TableColumn::new(10, "ДТ межсезонное"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum DemandPeriod {
    #[strum(serialize = "year")]
    Year,
    #[strum(serialize = "month")]
    Month,
}

impl DemandPeriod {
    fn classify(label: &str) -> Option<DemandPeriod> {
        lazy_static! {
            static ref YEAR_REGEX: Regex = Regex::new(r"(?i)\bгод").unwrap();
        }

        // Monthly labels often mention the year as well
        if label.to_lowercase().contains("месяц") {
            Some(DemandPeriod::Month)
        } else if YEAR_REGEX.is_match(label) {
            Some(DemandPeriod::Year)
        } else {
            None
        }
    }
}

/// Planned fuel demand for a year or a month.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DemandRecord {
    pub company: Option<String>,
    pub period: DemandPeriod,
    pub label: String,
    pub year: i32,
    pub month: Option<String>,
    pub gasoline_total: Decimal,
    pub diesel_total: Decimal,
    pub volumes: FuelVolumes,
}

impl DemandRecord {
    fn parse(period: DemandPeriod, label: &str, row: &TableRow, default_year: i32) -> DemandRecord {
        DemandRecord {
            company: None,
            period,
            label: label.to_owned(),
            year: parse_year(label).unwrap_or(default_year),
            month: match period {
                DemandPeriod::Year => None,
                DemandPeriod::Month => parse_month(label),
            },
            gasoline_total: row.decimal(1),
            diesel_total: row.decimal(6),
            volumes: FuelVolumes::read(row, 2, 7),
        }
    }

    fn is_signal(&self) -> bool {
        [self.gasoline_total, self.diesel_total, self.volumes.ai92, self.volumes.ai95]
            .iter().any(|value| value.is_sign_positive() && !value.is_zero())
    }
}

/// Reads at most one record per period. The year defaults to the report date's one.
pub fn read_demand(grid: &Grid, default_year: i32) -> Vec<DemandRecord> {
    let mapping = ColumnsMapping::positional(COLUMNS);

    [DemandPeriod::Year, DemandPeriod::Month].into_iter()
        .filter_map(|period| find_period(grid, &mapping, period, default_year))
        .collect()
}

fn find_period(grid: &Grid, mapping: &ColumnsMapping, period: DemandPeriod, default_year: i32) -> Option<DemandRecord> {
    for label_row_id in 0..grid.height() {
        let label = as_text(grid.cell(label_row_id, 0));
        if DemandPeriod::classify(&label) != Some(period) {
            continue;
        }

        trace!("Found {} demand label at #{} row: {:?}.", period, label_row_id + 1, label);

        for row_id in label_row_id..=label_row_id + DATA_ROWS_LOOKAHEAD {
            let row = TableRow::new(row_id, mapping.map(grid, row_id));

            if row_id != label_row_id && DemandPeriod::classify(&row.text(0)).is_some() {
                break;
            } else if is_formula(row.cell(0)) || row.is_column_index_row() {
                continue;
            }

            let record = DemandRecord::parse(period, &label, &row, default_year);
            if record.is_signal() {
                return Some(record);
            }
        }
    }

    debug!("There is no {} demand data.", period);
    None
}

fn parse_year(label: &str) -> Option<i32> {
    lazy_static! {
        static ref YEAR_REGEX: Regex = Regex::new(r"\b(\d{4})\b").unwrap();
    }

    YEAR_REGEX.captures(label).and_then(|captures| captures[1].parse().ok())
}

fn parse_month(label: &str) -> Option<String> {
    lazy_static! {
        static ref MONTH_REGEX: Regex = Regex::new(
            r"(?i)\b(январ|феврал|март|апрел|ма[йя]|июн|июл|август|сентябр|октябр|ноябр|декабр)\w*").unwrap();
        static ref LAST_WORD_REGEX: Regex = Regex::new(r"(\w+)\s*(?:,|$)").unwrap();
    }

    if let Some(month) = MONTH_REGEX.find(label) {
        return Some(month.as_str().to_owned());
    }

    LAST_WORD_REGEX.captures_iter(label)
        .map(|captures| captures[1].to_owned())
        .find(|word| !word.chars().all(|c| c.is_ascii_digit()) && word.to_lowercase() != "месяц")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use crate::formats::xls::Cell;
    use super::*;

    fn text(value: &str) -> Cell {
        Cell::String(value.to_owned())
    }

    fn data(label: &str, first: i64) -> Vec<Cell> {
        let mut row = vec![text(label)];
        row.extend((0..10).map(|id| Cell::Int(first + id)));
        row
    }

    #[rstest(label, expected,
        case("ГОД 2025", Some(DemandPeriod::Year)),
        case("Годовая потребность", Some(DemandPeriod::Year)),
        case("МЕСЯЦ декабрь 2025 года", Some(DemandPeriod::Month)),
        case("Потребность на месяц", Some(DemandPeriod::Month)),
        case("Пригодность", None),
        case("", None),
    )]
    fn classification(label: &str, expected: Option<DemandPeriod>) {
        assert_eq!(DemandPeriod::classify(label), expected);
    }

    #[rstest(label, expected,
        case("МЕСЯЦ декабрь", Some("декабрь")),
        case("Потребность на МЕСЯЦ (Январь 2026 г.)", Some("Январь")),
        case("МЕСЯЦ текущий, т", Some("текущий")),
        case("МЕСЯЦ 2025", None),
    )]
    fn month(label: &str, expected: Option<&str>) {
        assert_eq!(parse_month(label).as_deref(), expected);
    }

    #[test]
    fn read() {
        let grid = Grid::from_rows(vec![
            vec![text("Потребность в моторном топливе")],
            data("ГОД 2025", 100),
            Vec::new(),
            vec![text("МЕСЯЦ декабрь")],
            (1..=11).map(Cell::Int).collect(),
            vec![text("=B2/12"), Cell::Int(1), Cell::Int(1), Cell::Int(1)],
            data("", 10),
        ]);

        let records = read_demand(&grid, 2024);
        assert_eq!(records.len(), 2);

        let yearly = &records[0];
        assert_eq!(yearly.period, DemandPeriod::Year);
        assert_eq!(yearly.year, 2025);
        assert_eq!(yearly.month, None);
        assert_eq!(yearly.gasoline_total, dec!(100));
        assert_eq!(yearly.volumes.ai92, dec!(102));
        assert_eq!(yearly.diesel_total, dec!(105));
        assert_eq!(yearly.volumes.diesel_intermediate, dec!(109));

        let monthly = &records[1];
        assert_eq!(monthly.period, DemandPeriod::Month);
        assert_eq!(monthly.label, "МЕСЯЦ декабрь");
        assert_eq!(monthly.year, 2024);
        assert_eq!(monthly.month.as_deref(), Some("декабрь"));
        assert_eq!(monthly.gasoline_total, dec!(10));
        assert_eq!(monthly.volumes.ai76_80, dec!(11));
    }

    #[test]
    fn no_data() {
        let grid = Grid::from_rows(vec![
            vec![text("ГОД 2025")],
            vec![text("Бензины"), text("АИ-92")],
            Vec::new(),
            Vec::new(),
            Vec::new(),
            data("", 1),
        ]);
        assert!(read_demand(&grid, 2025).is_empty());
    }
}
