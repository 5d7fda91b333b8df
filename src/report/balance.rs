use serde::Serialize;

use crate::core::GenericResult;
use crate::formats::xls::{TableColumn, TableLayout, TableRecord, TableRow};

use super::common::{FuelVolumes, LocationType, fuel_table_columns, parse_company_name};

/// Fuel stock, fuel in transit and storage capacity of an oil depot or a fuel station.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BalanceRecord {
    pub company: Option<String>,
    pub affiliation: String,
    pub company_name: String,
    pub location_type: LocationType,
    pub location_name: String,
    pub stock: FuelVolumes,
    pub transit: FuelVolumes,
    pub capacity: FuelVolumes,
}

const COLUMNS: [TableColumn; 27] = fuel_table_columns(&[
    TableColumn::new(0, "Принадлежность"),
    TableColumn::new(1, "Наименование").aliases(&["Организация", "Компания"]),
    TableColumn::new(2, "Местонахождение").aliases(&["Нефтебаза", "АЗС", "Объект"]),
], 3);

pub const LAYOUT: TableLayout = TableLayout {
    name: "Balance",
    sheet: "3-Остатки",
    marker: "Таблица №5",
    max_rows: 100,
    leading_column: 0,
    columns: &COLUMNS,
};

impl TableRecord for BalanceRecord {
    fn parse(row: &TableRow) -> GenericResult<BalanceRecord> {
        let location_name = row.text(2);

        Ok(BalanceRecord {
            company: None,
            affiliation: row.text(0),
            company_name: parse_company_name(row, 1, 0)?,
            location_type: LocationType::detect(&location_name),
            location_name,
            stock: FuelVolumes::read_contiguous(row, 3),
            transit: FuelVolumes::read_contiguous(row, 11),
            capacity: FuelVolumes::read_contiguous(row, 19),
        })
    }

    fn is_signal(&self) -> bool {
        self.stock.has_signal()
    }
}
