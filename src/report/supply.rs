use serde::Serialize;

use crate::core::GenericResult;
use crate::formats::xls::{TableColumn, TableLayout, TableRecord, TableRow};
use crate::time::Date;

use super::common::{FuelVolumes, fuel_table_columns, parse_company_name};

/// Expected fuel delivery to an oil depot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SupplyRecord {
    pub company: Option<String>,
    pub affiliation: String,
    pub company_name: String,
    pub oil_depot_name: String,
    pub supply_date: Option<Date>,
    pub volumes: FuelVolumes,
}

const COLUMNS: [TableColumn; 12] = fuel_table_columns(&[
    TableColumn::new(0, "Принадлежность"),
    TableColumn::new(1, "Наименование").aliases(&["Поставщик", "Организация"]),
    TableColumn::new(2, "Нефтебаза").aliases(&["НБ", "Пункт назначения"]),
    TableColumn::new(3, "Дата").aliases(&["Срок"]).optional(),
], 1);

pub const LAYOUT: TableLayout = TableLayout {
    name: "Supply",
    sheet: "4-Поставка",
    marker: "Таблица №6",
    max_rows: 50,
    leading_column: 0,
    columns: &COLUMNS,
};

impl TableRecord for SupplyRecord {
    fn parse(row: &TableRow) -> GenericResult<SupplyRecord> {
        Ok(SupplyRecord {
            company: None,
            affiliation: row.text(0),
            company_name: parse_company_name(row, 1, 0)?,
            oil_depot_name: row.text(2),
            supply_date: row.date(3),
            volumes: FuelVolumes::read_contiguous(row, 4),
        })
    }

    fn is_signal(&self) -> bool {
        self.volumes.has_signal()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::formats::xls::{Cell, Grid, read_table};
    use super::*;

    fn text(value: &str) -> Cell {
        Cell::String(value.to_owned())
    }

    #[test]
    fn parse() {
        let grid = Grid::from_rows(vec![
            vec![text("Таблица №6 Поставка моторного топлива")],
            (1..=12).map(Cell::Int).collect(),
            vec![text("Принадлежность"), text("Наименование"), text("Нефтебаза"), text("Дата")],
            vec![
                text("Туймаада-Нефть"), text("ООО Туймаада-Нефть"), text("НБ Нижний Бестях"),
                text("05.12.2025"), Cell::Empty, Cell::Float(250.0), text("=F4*2"),
            ],
            vec![
                text("Туймаада-Нефть"), Cell::Empty, text("НБ Хандыга"), text("в течение недели"),
                Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty, text("1 200,5"),
            ],
            vec![Cell::Empty, Cell::Empty, text("НБ Зырянка"), Cell::Empty, Cell::Empty, Cell::Int(100)],
        ]);

        let records: Vec<SupplyRecord> = read_table(&grid, &LAYOUT).unwrap();
        assert_eq!(records, vec![
            SupplyRecord {
                company: None,
                affiliation: s!("Туймаада-Нефть"),
                company_name: s!("ООО Туймаада-Нефть"),
                oil_depot_name: s!("НБ Нижний Бестях"),
                supply_date: Some(date!(2025, 12, 5)),
                volumes: FuelVolumes {ai92: dec!(250), ..Default::default()},
            },
            SupplyRecord {
                company: None,
                affiliation: s!("Туймаада-Нефть"),
                company_name: s!("Туймаада-Нефть"),
                oil_depot_name: s!("НБ Хандыга"),
                supply_date: None,
                volumes: FuelVolumes {diesel_winter: dec!(1200.5), ..Default::default()},
            },
        ]);
    }
}
