pub mod aviation;
pub mod balance;
pub mod common;
pub mod demand;
pub mod metadata;
pub mod remarks;
pub mod sales;
pub mod strategies;
pub mod structure;
pub mod supply;

use chrono::Datelike;
use log::{debug, warn};
use serde::Serialize;
use strum::{EnumIter, IntoEnumIterator};

use crate::companies::{self, CompanyNormalizer};
use crate::config::Config;
use crate::core::GenericResult;
use crate::formats::xls::{Grid, TableLayout, TableRecord, Workbook, read_table};
use crate::formatting::{self, table::{Cell, Row, Table, print_table}};

use self::aviation::AviationRecord;
use self::balance::BalanceRecord;
use self::demand::DemandRecord;
use self::metadata::{ReportMetadata, extract_metadata};
use self::remarks::RemarkRecord;
use self::sales::SalesRecord;
use self::strategies::{ExtractionStrategy, NamedSheetsStrategy};
use self::structure::StructureRecord;
use self::supply::SupplyRecord;

pub use self::strategies::read_report;

/// Report sections in the order of the workbook tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Section {
    Structure,
    Demand,
    Balance,
    Supply,
    Sales,
    Aviation,
    Remarks,
}

impl Section {
    pub fn sheet_name(self) -> &'static str {
        match self {
            Section::Structure => structure::LAYOUT.sheet,
            Section::Demand => demand::SHEET_NAME,
            Section::Balance => balance::LAYOUT.sheet,
            Section::Supply => supply::LAYOUT.sheet,
            Section::Sales => sales::LAYOUT.sheet,
            Section::Aviation => aviation::LAYOUT.sheet,
            Section::Remarks => remarks::LAYOUT.sheet,
        }
    }

    pub fn index(self) -> usize {
        Section::iter().position(|section| section == self).unwrap_or_default()
    }
}

pub struct ParseOptions {
    pub normalizer: CompanyNormalizer,
    pub metadata_scan_rows: usize,
}

impl ParseOptions {
    pub fn new(config: &Config) -> ParseOptions {
        ParseOptions {
            normalizer: CompanyNormalizer::new(&config.companies),
            metadata_scan_rows: config.metadata_scan_rows,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> ParseOptions {
        ParseOptions::new(&Config::default())
    }
}

#[derive(Debug, Serialize)]
pub struct ParsedReport {
    pub metadata: ReportMetadata,
    pub structure: Vec<StructureRecord>,
    pub demand: Vec<DemandRecord>,
    pub balance: Vec<BalanceRecord>,
    pub supply: Vec<SupplyRecord>,
    pub sales: Vec<SalesRecord>,
    pub aviation: Vec<AviationRecord>,
    pub remarks: Vec<RemarkRecord>,
}

/// Parses a workbook with the standard tab names.
pub fn parse_report(workbook: &Workbook, filename: &str, options: &ParseOptions) -> ParsedReport {
    parse_sections(workbook, filename, &NamedSheetsStrategy, options)
}

/// Reads metadata and then every section independently: a failed section yields no records and
/// doesn't affect the others.
fn parse_sections<S>(workbook: &Workbook, filename: &str, strategy: &S, options: &ParseOptions) -> ParsedReport
    where S: ExtractionStrategy + ?Sized
{
    let header = strategy.sheet(workbook, Section::Structure).ok()
        .or_else(|| workbook.sheet_by_index(0).map(|sheet| &sheet.grid));

    let metadata = extract_metadata(header, filename, &options.normalizer, options.metadata_scan_rows);
    let company = (!companies::is_unknown(&metadata.company)).then(|| metadata.company.clone());
    let year = metadata.report_date.year();

    let reader = SectionReader {workbook, filename, strategy, company};

    ParsedReport {
        structure: reader.read_table(Section::Structure, &structure::LAYOUT),
        demand: reader.read(Section::Demand, |grid| Ok(demand::read_demand(grid, year))),
        balance: reader.read_table(Section::Balance, &balance::LAYOUT),
        supply: reader.read_table(Section::Supply, &supply::LAYOUT),
        sales: reader.read_table(Section::Sales, &sales::LAYOUT),
        aviation: reader.read_table(Section::Aviation, &aviation::LAYOUT),
        remarks: reader.read_table(Section::Remarks, &remarks::LAYOUT),
        metadata,
    }
}

struct SectionReader<'a, S: ?Sized> {
    workbook: &'a Workbook,
    filename: &'a str,
    strategy: &'a S,
    company: Option<String>,
}

impl<S: ExtractionStrategy + ?Sized> SectionReader<'_, S> {
    fn read_table<T>(&self, section: Section, layout: &TableLayout) -> Vec<T>
        where T: TableRecord + CompanyRecord
    {
        self.read(section, |grid| read_table(grid, layout))
    }

    fn read<T, R>(&self, section: Section, read: R) -> Vec<T>
        where T: CompanyRecord, R: FnOnce(&Grid) -> GenericResult<Vec<T>>
    {
        let result = self.strategy.sheet(self.workbook, section).and_then(read);

        let mut records = match result {
            Ok(records) => records,
            Err(e) => {
                warn!("{}: Failed to read {} section: {}.", self.filename, section, e);
                return Vec::new();
            },
        };

        debug!("{}: {} section: {} records.", self.filename, section, records.len());

        for record in &mut records {
            record.set_company(self.company.clone());
        }

        records
    }
}

trait CompanyRecord {
    fn set_company(&mut self, company: Option<String>);
}

macro_rules! impl_company_record {
    ($($record:ty),*) => {$(
        impl CompanyRecord for $record {
            fn set_company(&mut self, company: Option<String>) {
                self.company = company;
            }
        }
    )*}
}

impl_company_record!(
    StructureRecord, DemandRecord, BalanceRecord, SupplyRecord, SalesRecord, AviationRecord,
    RemarkRecord);

impl ParsedReport {
    pub fn is_empty(&self) -> bool {
        self.structure.is_empty() && self.demand.is_empty() && self.balance.is_empty() &&
            self.supply.is_empty() && self.sales.is_empty() && self.aviation.is_empty() &&
            self.remarks.is_empty()
    }

    pub fn print(&self) {
        let metadata = &self.metadata;

        println!("{} ({})", metadata.filename, metadata.company);
        println!("Report date: {}", formatting::format_date_time(metadata.report_date));
        for (name, value) in [("Region", &metadata.region), ("Executor", &metadata.executor), ("Phone", &metadata.phone)] {
            if !value.is_empty() {
                println!("{name}: {value}");
            }
        }

        if self.is_empty() {
            println!("\nThe report contains no data.");
            return;
        }

        if !self.structure.is_empty() {
            let mut table = Table::new();
            for record in &self.structure {
                table.add_row(Row::new(&[
                    Cell::new(&record.affiliation),
                    Cell::new(&record.company_name),
                    Cell::new_integer(record.oil_depots_count),
                    Cell::new_integer(record.azs_count),
                    Cell::new_integer(record.working_azs_count),
                ]));
            }
            print_table("Structure", &["Affiliation", "Company", "Oil depots", "Fuel stations", "Working"], table);
        }

        if !self.demand.is_empty() {
            let mut table = Table::new();
            for record in &self.demand {
                table.add_row(Row::new(&[
                    Cell::new(&record.period.to_string()),
                    Cell::new(&record.year.to_string()),
                    Cell::new(record.month.as_deref().unwrap_or_default()),
                    Cell::new_decimal(record.gasoline_total),
                    Cell::new_decimal(record.diesel_total),
                ]));
            }
            print_table("Demand", &["Period", "Year", "Month", "Gasoline", "Diesel"], table);
        }

        if !self.balance.is_empty() {
            let mut table = Table::new();
            for record in &self.balance {
                table.add_row(Row::new(&[
                    Cell::new(&record.company_name),
                    Cell::new(&record.location_type.to_string()),
                    Cell::new(&record.location_name),
                    Cell::new_decimal(record.stock.gasoline()),
                    Cell::new_decimal(record.stock.diesel()),
                    Cell::new_decimal(record.transit.total()),
                    Cell::new_decimal(record.capacity.total()),
                ]));
            }
            print_table("Balance", &[
                "Company", "Type", "Location", "Gasoline stock", "Diesel stock", "In transit", "Capacity",
            ], table);
        }

        if !self.supply.is_empty() {
            let mut table = Table::new();
            for record in &self.supply {
                table.add_row(Row::new(&[
                    Cell::new(&record.company_name),
                    Cell::new(&record.oil_depot_name),
                    Cell::new_date(record.supply_date),
                    Cell::new_decimal(record.volumes.gasoline()),
                    Cell::new_decimal(record.volumes.diesel()),
                ]));
            }
            print_table("Supply", &["Company", "Oil depot", "Date", "Gasoline", "Diesel"], table);
        }

        if !self.sales.is_empty() {
            let mut table = Table::new();
            for record in &self.sales {
                table.add_row(Row::new(&[
                    Cell::new(&record.company_name),
                    Cell::new(&record.location_type.to_string()),
                    Cell::new(&record.location_name),
                    Cell::new_decimal(record.daily.gasoline()),
                    Cell::new_decimal(record.daily.diesel()),
                    Cell::new_decimal(record.month_to_date.gasoline()),
                    Cell::new_decimal(record.month_to_date.diesel()),
                ]));
            }
            print_table("Sales", &[
                "Company", "Type", "Location", "Gasoline (day)", "Diesel (day)",
                "Gasoline (month)", "Diesel (month)",
            ], table);
        }

        if !self.aviation.is_empty() {
            let mut table = Table::new();
            for record in &self.aviation {
                table.add_row(Row::new(&[
                    Cell::new(&record.airport_name),
                    Cell::new(&record.depot_name),
                    Cell::new_decimal(record.supply_week),
                    Cell::new_decimal(record.supply_month_start),
                    Cell::new_decimal(record.monthly_demand),
                    Cell::new_decimal(record.consumption_week),
                    Cell::new_decimal(record.consumption_month_start),
                    Cell::new_decimal(record.end_of_day_balance),
                ]));
            }
            print_table("Aviation fuel", &[
                "Airport", "Refueling complex", "Supply (week)", "Supply (month)", "Demand",
                "Consumption (week)", "Consumption (month)", "Balance",
            ], table);
        }

        if !self.remarks.is_empty() {
            let mut table = Table::new();
            for record in &self.remarks {
                table.add_row(Row::new(&[
                    Cell::new(&record.fuel_type),
                    Cell::new(&record.situation),
                    Cell::new(&record.comments),
                ]));
            }
            print_table("Remarks", &["Fuel", "Situation", "Comments"], table);
        }
    }
}
