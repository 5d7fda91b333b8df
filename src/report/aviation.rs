use serde::Serialize;

use crate::core::GenericResult;
use crate::formats::xls::{TableColumn, TableLayout, TableRecord, TableRow};
use crate::types::Decimal;

use super::common::is_total;

/// Jet fuel supply and consumption of an airport's refueling complex.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AviationRecord {
    pub company: Option<String>,
    pub airport_name: String,
    pub depot_name: String,
    pub contracts_info: String,
    pub supply_week: Decimal,
    pub supply_month_start: Decimal,
    pub monthly_demand: Decimal,
    pub consumption_week: Decimal,
    pub consumption_month_start: Decimal,
    pub end_of_day_balance: Decimal,
}

impl AviationRecord {
    fn figures(&self) -> [Decimal; 6] {
        [
            self.supply_week, self.supply_month_start, self.monthly_demand,
            self.consumption_week, self.consumption_month_start, self.end_of_day_balance,
        ]
    }
}

pub const LAYOUT: TableLayout = TableLayout {
    name: "Aviation",
    sheet: "6-Авиатопливо",
    marker: "Таблица №8",
    max_rows: 50,
    leading_column: 0,
    columns: &[
        TableColumn::new(0, "Аэропорт"),
        TableColumn::new(1, "ТЗК").aliases(&["Топливозаправочный"]),
        TableColumn::new(2, "Договор").aliases(&["Контракт"]).optional(),
        TableColumn::new(3, "Поставка за неделю").aliases(&["Поставка"]),
        TableColumn::new(4, "Поставка с начала месяца").aliases(&["Поставка"]),
        TableColumn::new(5, "Потребность").optional(),
        TableColumn::new(6, "Расход за неделю").aliases(&["Расход"]),
        TableColumn::new(7, "Расход с начала месяца").aliases(&["Расход"]),
        TableColumn::new(8, "Остаток"),
    ],
};

impl TableRecord for AviationRecord {
    fn parse(row: &TableRow) -> GenericResult<AviationRecord> {
        let airport_name = row.text(0);
        if airport_name.is_empty() {
            return Err!("The row has no airport name");
        } else if is_total(&airport_name) {
            return Err!("Got a total row");
        }

        Ok(AviationRecord {
            company: None,
            airport_name,
            depot_name: row.text(1),
            contracts_info: row.text(2),
            supply_week: row.decimal(3),
            supply_month_start: row.decimal(4),
            monthly_demand: row.decimal(5),
            consumption_week: row.decimal(6),
            consumption_month_start: row.decimal(7),
            end_of_day_balance: row.decimal(8),
        })
    }

    fn is_signal(&self) -> bool {
        !self.depot_name.is_empty() || self.figures().iter().any(|value| !value.is_zero())
    }
}
