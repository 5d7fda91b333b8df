use serde::Serialize;

use crate::core::GenericResult;
use crate::formats::xls::{TableColumn, TableLayout, TableRecord, TableRow};

use super::common::is_total;

/// Oil depots and fuel stations of a company and its affiliates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StructureRecord {
    pub company: Option<String>,
    pub affiliation: String,
    pub company_name: String,
    pub oil_depots_count: i64,
    pub azs_count: i64,
    pub working_azs_count: i64,
}

pub const LAYOUT: TableLayout = TableLayout {
    name: "Structure",
    sheet: "1-Структура",
    marker: "Таблица №1",
    max_rows: 50,
    leading_column: 0,
    columns: &[
        TableColumn::new(0, "Принадлежность").aliases(&["Аффилированность", "Группа"]),
        TableColumn::new(1, "Наименование").aliases(&["Организация", "Компания"]),
        TableColumn::new(2, "Нефтебаз").aliases(&["НБ"]),
        TableColumn::new(3, "АЗС"),
        TableColumn::new(4, "Действующ").aliases(&["Работающ"]).optional(),
    ],
};

impl TableRecord for StructureRecord {
    fn parse(row: &TableRow) -> GenericResult<StructureRecord> {
        if is_total(&row.text(0)) || is_total(&row.text(1)) {
            return Err!("Got a total row");
        }

        Ok(StructureRecord {
            company: None,
            affiliation: row.text(0),
            company_name: row.text(1),
            oil_depots_count: row.integer(2),
            azs_count: row.integer(3),
            working_azs_count: row.integer(4),
        })
    }

    fn is_signal(&self) -> bool {
        self.oil_depots_count > 0 || self.azs_count > 0 || self.working_azs_count > 0
    }
}
