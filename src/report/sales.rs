use serde::Serialize;

use crate::core::GenericResult;
use crate::formats::xls::{TableColumn, TableLayout, TableRecord, TableRow};

use super::common::{FuelVolumes, LocationType, fuel_table_columns, parse_company_name};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SalesRecord {
    pub company: Option<String>,
    pub affiliation: String,
    pub company_name: String,
    pub location_type: LocationType,
    pub location_name: String,
    pub daily: FuelVolumes,
    pub month_to_date: FuelVolumes,
}

const COLUMNS: [TableColumn; 19] = fuel_table_columns(&[
    TableColumn::new(0, "Принадлежность"),
    TableColumn::new(1, "Наименование").aliases(&["Организация", "Компания"]),
    TableColumn::new(2, "Местонахождение").aliases(&["Нефтебаза", "АЗС", "Объект"]),
], 2);

pub const LAYOUT: TableLayout = TableLayout {
    name: "Sales",
    sheet: "5-Реализация",
    marker: "Таблица №7",
    max_rows: 100,
    leading_column: 0,
    columns: &COLUMNS,
};

impl TableRecord for SalesRecord {
    fn parse(row: &TableRow) -> GenericResult<SalesRecord> {
        let location_name = row.text(2);

        Ok(SalesRecord {
            company: None,
            affiliation: row.text(0),
            company_name: parse_company_name(row, 1, 0)?,
            location_type: LocationType::detect(&location_name),
            location_name,
            daily: FuelVolumes::read_contiguous(row, 3),
            month_to_date: FuelVolumes::read_contiguous(row, 11),
        })
    }

    fn is_signal(&self) -> bool {
        self.daily.has_signal() || self.month_to_date.has_signal()
    }
}
