//! Ways of mapping a workbook onto report sections, tried in priority order.

use std::path::Path;

use log::{debug, warn};
use strum::IntoEnumIterator;

use crate::core::{EmptyResult, GenericResult};
use crate::formats::xls::{Grid, Workbook};

use super::{ParseOptions, ParsedReport, Section, parse_sections};

pub trait ExtractionStrategy: Sync {
    fn name(&self) -> &'static str;

    /// Checks whether the workbook can be handled by the strategy at all.
    fn check(&self, workbook: &Workbook) -> EmptyResult;

    fn sheet<'a>(&self, workbook: &'a Workbook, section: Section) -> GenericResult<&'a Grid>;

    fn parse(&self, workbook: &Workbook, filename: &str, options: &ParseOptions) -> GenericResult<ParsedReport> {
        self.check(workbook)?;
        Ok(parse_sections(workbook, filename, self, options))
    }
}

/// Finds sections by the standard tab names.
pub struct NamedSheetsStrategy;

impl ExtractionStrategy for NamedSheetsStrategy {
    fn name(&self) -> &'static str {
        "named sheets"
    }

    fn check(&self, workbook: &Workbook) -> EmptyResult {
        if !Section::iter().any(|section| workbook.sheet(section.sheet_name()).is_some()) {
            return Err!("The workbook has none of the known sheets");
        }
        Ok(())
    }

    fn sheet<'a>(&self, workbook: &'a Workbook, section: Section) -> GenericResult<&'a Grid> {
        let name = section.sheet_name();
        Ok(workbook.sheet(name).ok_or_else(|| format!(
            "There is no {:?} sheet", name))?)
    }
}

/// Finds sections by tab position. Handles reports with renamed tabs.
pub struct SheetOrderStrategy;

impl ExtractionStrategy for SheetOrderStrategy {
    fn name(&self) -> &'static str {
        "sheet order"
    }

    fn check(&self, workbook: &Workbook) -> EmptyResult {
        let expected = Section::iter().count();
        let actual = workbook.sheets().len();

        if actual < expected {
            return Err!("The workbook has {} sheets when at least {} are expected", actual, expected);
        }

        Ok(())
    }

    fn sheet<'a>(&self, workbook: &'a Workbook, section: Section) -> GenericResult<&'a Grid> {
        let sheet = workbook.sheet_by_index(section.index()).ok_or_else(|| format!(
            "There is no sheet #{}", section.index() + 1))?;

        if sheet.name.trim() != section.sheet_name() {
            debug!("Using {:?} sheet as {:?}.", sheet.name, section.sheet_name());
        }

        Ok(&sheet.grid)
    }
}

const STRATEGIES: &[&dyn ExtractionStrategy] = &[&NamedSheetsStrategy, &SheetOrderStrategy];

/// Reads the report file and parses it with the first strategy that accepts the workbook.
pub fn read_report(path: &Path, options: &ParseOptions) -> GenericResult<ParsedReport> {
    let filename = path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let workbook = Workbook::open(path)?;
    parse_workbook(&workbook, &filename, STRATEGIES, options)
}

fn parse_workbook(
    workbook: &Workbook, filename: &str, strategies: &[&dyn ExtractionStrategy], options: &ParseOptions,
) -> GenericResult<ParsedReport> {
    let mut last_error = None;

    for strategy in strategies {
        match strategy.parse(workbook, filename, options) {
            Ok(report) => {
                debug!("{}: Parsed using {} strategy.", filename, strategy.name());
                return Ok(report);
            },
            Err(e) => {
                warn!("{}: Unable to parse the report using {} strategy: {}.", filename, strategy.name(), e);
                last_error.replace(e);
            },
        }
    }

    Err(last_error.unwrap_or_else(|| "There are no report parsing strategies".into()))
}
