use serde::Serialize;

use crate::core::GenericResult;
use crate::formats::xls::{TableColumn, TableLayout, TableRecord, TableRow};

/// Free-form notes on the supply situation for a fuel type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RemarkRecord {
    pub company: Option<String>,
    pub fuel_type: String,
    pub situation: String,
    pub comments: String,
}

pub const LAYOUT: TableLayout = TableLayout {
    name: "Remarks",
    sheet: "7-Справка",
    marker: "Таблица №9",
    max_rows: 10,
    leading_column: 0,
    columns: &[
        TableColumn::new(0, "Вид топлива").aliases(&["Топливо", "Нефтепродукт"]),
        TableColumn::new(1, "Ситуация").aliases(&["Обстановка", "Состояние"]),
        TableColumn::new(2, "Комментари").aliases(&["Примечани"]).optional(),
    ],
};

impl TableRecord for RemarkRecord {
    fn parse(row: &TableRow) -> GenericResult<RemarkRecord> {
        Ok(RemarkRecord {
            company: None,
            fuel_type: row.text(0),
            situation: row.text(1),
            comments: row.text(2),
        })
    }

    fn is_signal(&self) -> bool {
        !self.situation.is_empty() || !self.comments.is_empty()
    }
}
