use std::ops::{Add, AddAssign};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::core::GenericResult;
use crate::formats::xls::{TableColumn, TableRow};
use crate::types::Decimal;

/// Volumes per fuel grade, in tons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FuelVolumes {
    pub ai76_80: Decimal,
    pub ai92: Decimal,
    pub ai95: Decimal,
    pub ai98_100: Decimal,
    pub diesel_winter: Decimal,
    pub diesel_arctic: Decimal,
    pub diesel_summer: Decimal,
    pub diesel_intermediate: Decimal,
}

impl FuelVolumes {
    /// Reads four gasoline grades starting from `gasoline` column and four diesel grades starting from
    /// `diesel` column.
    pub fn read(row: &TableRow, gasoline: usize, diesel: usize) -> FuelVolumes {
        FuelVolumes {
            ai76_80: row.decimal(gasoline),
            ai92: row.decimal(gasoline + 1),
            ai95: row.decimal(gasoline + 2),
            ai98_100: row.decimal(gasoline + 3),
            diesel_winter: row.decimal(diesel),
            diesel_arctic: row.decimal(diesel + 1),
            diesel_summer: row.decimal(diesel + 2),
            diesel_intermediate: row.decimal(diesel + 3),
        }
    }

    pub fn read_contiguous(row: &TableRow, first: usize) -> FuelVolumes {
        FuelVolumes::read(row, first, first + 4)
    }

    pub fn gasoline(&self) -> Decimal {
        self.ai76_80 + self.ai92 + self.ai95 + self.ai98_100
    }

    pub fn diesel(&self) -> Decimal {
        self.diesel_winter + self.diesel_arctic + self.diesel_summer + self.diesel_intermediate
    }

    pub fn total(&self) -> Decimal {
        self.gasoline() + self.diesel()
    }

    /// Checks the grades which are present in every real report row. Negative values come from column
    /// titles like "АИ-92" and are never data.
    pub fn has_signal(&self) -> bool {
        [self.ai92, self.ai95, self.diesel_winter, self.diesel_arctic].iter()
            .any(|value| value.is_sign_positive() && !value.is_zero())
    }
}

impl Add for FuelVolumes {
    type Output = FuelVolumes;

    fn add(mut self, other: FuelVolumes) -> FuelVolumes {
        self += other;
        self
    }
}

impl AddAssign for FuelVolumes {
    fn add_assign(&mut self, other: FuelVolumes) {
        self.ai76_80 += other.ai76_80;
        self.ai92 += other.ai92;
        self.ai95 += other.ai95;
        self.ai98_100 += other.ai98_100;
        self.diesel_winter += other.diesel_winter;
        self.diesel_arctic += other.diesel_arctic;
        self.diesel_summer += other.diesel_summer;
        self.diesel_intermediate += other.diesel_intermediate;
    }
}

const GRADE_TITLES: [&str; FUEL_GRADES] = ["АИ-76", "АИ-92", "АИ-95", "АИ-98", "зимн", "арктич", "летн", "межсез"];
pub const FUEL_GRADES: usize = 8;

/// Builds a table layout of the fixed columns followed by groups of fuel grade columns.
pub const fn fuel_table_columns<const N: usize>(fixed: &[TableColumn], groups: usize) -> [TableColumn; N] {
    assert!(N == fixed.len() + groups * FUEL_GRADES);

    let mut columns = [TableColumn::new(0, ""); N];

    let mut index = 0;
    while index < N {
        columns[index] = if index < fixed.len() {
            fixed[index]
        } else {
            TableColumn::new(index, GRADE_TITLES[(index - fixed.len()) % FUEL_GRADES])
        };
        index += 1;
    }

    columns
}

/// Reads company name of the row, falling back to the specified column when the name cell is empty.
pub fn parse_company_name(row: &TableRow, column: usize, fallback: usize) -> GenericResult<String> {
    let mut name = row.text(column);
    if name.is_empty() {
        name = row.text(fallback);
    }

    if name.chars().count() < 3 {
        return Err!("Invalid company name: {:?}", name);
    } else if is_total(&name) || is_total(&row.text(0)) {
        return Err!("Got a total row");
    }

    Ok(name)
}

pub fn is_total(text: &str) -> bool {
    let text = text.to_lowercase();
    text.starts_with("итого") || text.starts_with("всего")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    #[strum(serialize = "НБ")]
    OilDepot,
    #[strum(serialize = "АЗС")]
    FuelStation,
}

impl LocationType {
    pub fn detect(name: &str) -> LocationType {
        lazy_static! {
            static ref OIL_DEPOT_REGEX: Regex = Regex::new(r"(?i)(\bнб\b|нефтебаз)").unwrap();
        }

        if OIL_DEPOT_REGEX.is_match(name) {
            LocationType::OilDepot
        } else {
            LocationType::FuelStation
        }
    }
}
