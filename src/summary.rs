//! Per-company totals over a set of parsed reports.

use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;

use crate::companies;
use crate::formatting::{self, table::{Cell, Row, Table, print_table}};
use crate::report::ParsedReport;
use crate::report::common::FuelVolumes;
use crate::report::demand::DemandPeriod;
use crate::time::DateTime;
use crate::types::Decimal;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SectionCounts {
    pub structure: usize,
    pub demand: usize,
    pub balance: usize,
    pub supply: usize,
    pub sales: usize,
    pub aviation: usize,
    pub remarks: usize,
}

impl SectionCounts {
    fn total(&self) -> usize {
        self.structure + self.demand + self.balance + self.supply + self.sales + self.aviation + self.remarks
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompanySummary {
    pub company: String,
    pub report_date: DateTime,
    pub reports: usize,

    pub oil_depots_count: i64,
    pub azs_count: i64,
    pub working_azs_count: i64,

    pub yearly_gasoline_demand: Decimal,
    pub yearly_diesel_demand: Decimal,
    pub monthly_gasoline_demand: Decimal,
    pub monthly_diesel_demand: Decimal,

    pub stock: FuelVolumes,
    pub supply: FuelVolumes,
    pub daily_sales: FuelVolumes,
    pub monthly_sales: FuelVolumes,

    pub aviation_supply: Decimal,
    pub aviation_consumption: Decimal,
    pub aviation_balance: Decimal,

    pub records: SectionCounts,
}

impl CompanySummary {
    fn new(company: &str, report_date: DateTime) -> CompanySummary {
        CompanySummary {
            company: company.to_owned(),
            report_date,
            reports: 0,

            oil_depots_count: 0,
            azs_count: 0,
            working_azs_count: 0,

            yearly_gasoline_demand: Decimal::ZERO,
            yearly_diesel_demand: Decimal::ZERO,
            monthly_gasoline_demand: Decimal::ZERO,
            monthly_diesel_demand: Decimal::ZERO,

            stock: FuelVolumes::default(),
            supply: FuelVolumes::default(),
            daily_sales: FuelVolumes::default(),
            monthly_sales: FuelVolumes::default(),

            aviation_supply: Decimal::ZERO,
            aviation_consumption: Decimal::ZERO,
            aviation_balance: Decimal::ZERO,

            records: SectionCounts::default(),
        }
    }

    fn add(&mut self, report: &ParsedReport) {
        self.reports += 1;

        for record in &report.structure {
            self.oil_depots_count += record.oil_depots_count;
            self.azs_count += record.azs_count;
            self.working_azs_count += record.working_azs_count;
        }

        for record in &report.demand {
            let (gasoline, diesel) = match record.period {
                DemandPeriod::Year => (&mut self.yearly_gasoline_demand, &mut self.yearly_diesel_demand),
                DemandPeriod::Month => (&mut self.monthly_gasoline_demand, &mut self.monthly_diesel_demand),
            };
            *gasoline += record.gasoline_total;
            *diesel += record.diesel_total;
        }

        for record in &report.balance {
            self.stock += record.stock;
        }

        for record in &report.supply {
            self.supply += record.volumes;
        }

        for record in &report.sales {
            self.daily_sales += record.daily;
            self.monthly_sales += record.month_to_date;
        }

        for record in &report.aviation {
            self.aviation_supply += record.supply_month_start;
            self.aviation_consumption += record.consumption_month_start;
            self.aviation_balance += record.end_of_day_balance;
        }

        let records = &mut self.records;
        records.structure += report.structure.len();
        records.demand += report.demand.len();
        records.balance += report.balance.len();
        records.supply += report.supply.len();
        records.sales += report.sales.len();
        records.aviation += report.aviation.len();
        records.remarks += report.remarks.len();
    }
}

/// Sums the most recent reports of each company. Several reports of the same date (corrections split
/// into separate files) are summed together, older ones are ignored.
pub fn aggregate(reports: &[ParsedReport]) -> Vec<CompanySummary> {
    let mut by_company: BTreeMap<&str, Vec<&ParsedReport>> = BTreeMap::new();

    for report in reports {
        let metadata = &report.metadata;

        if companies::is_unknown(&metadata.company) {
            warn!("{}: Skipping the report of unknown company.", metadata.filename);
            continue;
        }

        by_company.entry(metadata.company.as_str()).or_default().push(report);
    }

    by_company.into_iter().filter_map(|(company, reports)| {
        let report_date = reports.iter().map(|report| report.metadata.report_date).max()?;

        let mut summary = CompanySummary::new(company, report_date);
        for report in reports.iter().filter(|report| report.metadata.report_date == report_date) {
            summary.add(report);
        }

        (summary.records.total() != 0).then_some(summary)
    }).collect()
}

pub fn print(summaries: &[CompanySummary]) {
    let mut table = Table::new();

    for summary in summaries {
        table.add_row(Row::new(&[
            Cell::new(&summary.company),
            Cell::new_date(Some(summary.report_date.date())),
            Cell::new_integer(summary.oil_depots_count),
            Cell::new_integer(summary.azs_count),
            Cell::new_decimal(summary.yearly_gasoline_demand + summary.yearly_diesel_demand),
            Cell::new_decimal(summary.monthly_gasoline_demand + summary.monthly_diesel_demand),
            Cell::new_decimal(summary.stock.total()),
            Cell::new_decimal(summary.supply.total()),
            Cell::new_decimal(summary.daily_sales.total()),
            Cell::new_decimal(summary.monthly_sales.total()),
            Cell::new_decimal(summary.aviation_balance),
        ]));
    }

    let totals = summaries.iter().fold(FuelVolumes::default(), |total, summary| total + summary.stock);

    print_table("Companies", &[
        "Company", "Date", "Oil depots", "Fuel stations", "Yearly demand", "Monthly demand", "Stock",
        "Supply", "Sales (day)", "Sales (month)", "Aviation fuel",
    ], table);

    if !summaries.is_empty() {
        println!("Total stock: {} t.", formatting::format_decimal(totals.total()));
    }
}
