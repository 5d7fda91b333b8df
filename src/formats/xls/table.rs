use itertools::Itertools;
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

use crate::core::GenericResult;
use crate::time::Date;
use crate::types::Decimal;

use super::{Cell, Grid, as_date, as_decimal, as_integer, as_text, is_empty_cell, is_formula};

/// Marker row, column index row and column title row.
pub const HEADER_ROWS: usize = 3;

lazy_static! {
    static ref TABLE_MARKER_REGEX: Regex = Regex::new(r"^Таблица\s*№\s*\d+").unwrap();
}

/// Describes where a section's table lives and how its columns are laid out.
pub struct TableLayout {
    pub name: &'static str,
    pub sheet: &'static str,
    pub marker: &'static str,
    /// Hard limit on the number of scanned rows.
    pub max_rows: usize,
    /// Index into `columns`. A blank cell in this column ends the table.
    pub leading_column: usize,
    pub columns: &'static [TableColumn],
}

#[derive(Clone, Copy)]
pub struct TableColumn {
    position: usize,
    name: &'static str,
    aliases: &'static [&'static str],
    optional: bool,
}

impl TableColumn {
    pub const fn new(position: usize, name: &'static str) -> TableColumn {
        TableColumn {position, name, aliases: &[], optional: false}
    }

    pub const fn aliases(self, aliases: &'static [&'static str]) -> TableColumn {
        TableColumn {aliases, ..self}
    }

    pub const fn optional(self) -> TableColumn {
        TableColumn {optional: true, ..self}
    }

    fn find(&self, titles: &[String], offset: usize) -> Option<usize> {
        titles.iter().enumerate().skip(offset)
            .find(|(_, title)| self.matches(title))
            .map(|(cell_id, _)| cell_id)
    }

    fn matches(&self, title: &str) -> bool {
        if title.is_empty() {
            return false;
        }

        std::iter::once(self.name).chain(self.aliases.iter().copied()).any(|name| {
            title.contains(&transform_for_matching(name))
        })
    }
}

fn transform_for_matching(value: &str) -> String {
    value.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '–' | '—' | '.'))
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ё' { 'е' } else { c })
        .collect()
}

pub struct ColumnsMapping {
    mapping: Vec<Option<usize>>,
}

impl ColumnsMapping {
    pub fn positional(columns: &[TableColumn]) -> ColumnsMapping {
        ColumnsMapping {
            mapping: columns.iter().map(|column| Some(column.position)).collect(),
        }
    }

    pub fn map<'a>(&self, grid: &'a Grid, row_id: usize) -> Vec<Option<&'a Cell>> {
        self.mapping.iter()
            .map(|cell_id| cell_id.and_then(|cell_id| grid.cell(row_id, cell_id)))
            .collect()
    }
}

/// Maps columns to the titles in order: each column is searched for to the right of the previous one.
pub fn map_columns(titles: &[String], columns: &[TableColumn]) -> GenericResult<ColumnsMapping> {
    let mut mapping = Vec::with_capacity(columns.len());
    let mut offset = 0;

    for column in columns {
        let cell_id = match column.find(titles, offset) {
            Some(cell_id) => {
                offset = cell_id + 1;
                Some(cell_id)
            },
            None if column.optional => None,
            None => return Err!("The table has no {:?} column", column.name),
        };
        mapping.push(cell_id);
    }

    Ok(ColumnsMapping {mapping})
}

/// One table row with cells ordered as the layout's columns.
pub struct TableRow<'a> {
    pub row_id: usize,
    cells: Vec<Option<&'a Cell>>,
}

impl<'a> TableRow<'a> {
    pub fn new(row_id: usize, cells: Vec<Option<&'a Cell>>) -> TableRow<'a> {
        TableRow {row_id, cells}
    }

    pub fn cell(&self, column_id: usize) -> Option<&'a Cell> {
        self.cells.get(column_id).copied().flatten()
    }

    pub fn text(&self, column_id: usize) -> String {
        as_text(self.cell(column_id))
    }

    pub fn integer(&self, column_id: usize) -> i64 {
        as_integer(self.cell(column_id))
    }

    pub fn decimal(&self, column_id: usize) -> Decimal {
        as_decimal(self.cell(column_id))
    }

    pub fn date(&self, column_id: usize) -> Option<Date> {
        as_date(self.cell(column_id))
    }

    fn is_empty(&self, column_id: usize) -> bool {
        is_empty_cell(self.cell(column_id))
    }

    pub fn is_column_index_row(&self) -> bool {
        self.text(0) == "1" && self.text(1) == "2"
    }
}

pub trait TableRecord: Sized {
    fn parse(row: &TableRow) -> GenericResult<Self>;

    /// Whether the record carries real data rather than formatting noise.
    fn is_signal(&self) -> bool;
}

/// Returns the first data row of the table which is marked by the specified text.
pub fn locate_table(grid: &Grid, marker: &str) -> Option<usize> {
    find_marker(grid, marker).map(|row_id| row_id + HEADER_ROWS)
}

fn find_marker(grid: &Grid, marker: &str) -> Option<usize> {
    (0..grid.height()).find(|&row_id| as_text(grid.cell(row_id, 0)).contains(marker))
}

pub fn read_table<T: TableRecord>(grid: &Grid, layout: &TableLayout) -> GenericResult<Vec<T>> {
    let marker_row = find_marker(grid, layout.marker);

    if let Some(marker_row) = marker_row {
        let start = marker_row + HEADER_ROWS;
        trace!("Reading {} table starting from #{} row...", layout.name, start + 1);

        let records = read_rows(grid, layout, &ColumnsMapping::positional(layout.columns), start);
        if !records.is_empty() {
            return Ok(records);
        }

        debug!("{} table has no data at the expected positions. Trying to match it by column titles.",
               layout.name);
    } else {
        debug!("Unable to find {:?} marker of {} table. Trying to match it by column titles.",
               layout.marker, layout.name);
    }

    let search_start = marker_row.map(|row_id| row_id + 1).unwrap_or_default();
    let search_end = match marker_row {
        Some(_) => grid.height().min(search_start + layout.max_rows),
        None => grid.height(),
    };

    for row_id in search_start..search_end {
        for band in 1..=2 {
            let titles = header_titles(grid, row_id, band);
            let Ok(mapping) = map_columns(&titles, layout.columns) else {
                continue;
            };

            trace!("Found {} table column titles at #{} row.", layout.name, row_id + 1);
            return Ok(read_rows(grid, layout, &mapping, row_id + band));
        }
    }

    debug!("{} table is not found.", layout.name);
    Ok(Vec::new())
}

fn read_rows<T: TableRecord>(grid: &Grid, layout: &TableLayout, mapping: &ColumnsMapping, start: usize) -> Vec<T> {
    let leading_column = layout.leading_column;
    let end = grid.height().min(start + layout.max_rows);

    let mut records = Vec::new();

    for row_id in start..end {
        let row = TableRow::new(row_id, mapping.map(grid, row_id));
        let human_row_id = row_id + 1;

        if row.is_empty(leading_column) {
            trace!("{} table: #{} row has no leading value. Stopping.", layout.name, human_row_id);
            break;
        }

        if is_formula(row.cell(leading_column)) {
            trace!("{} table: skipping #{} formula row.", layout.name, human_row_id);
            continue;
        }

        if TABLE_MARKER_REGEX.is_match(&as_text(grid.cell(row_id, 0))) {
            trace!("{} table: #{} row starts the next table. Stopping.", layout.name, human_row_id);
            break;
        }

        if row.is_column_index_row() {
            continue;
        }

        match T::parse(&row) {
            Ok(record) if record.is_signal() => records.push(record),
            Ok(_) => trace!("{} table: skipping #{} row without data.", layout.name, human_row_id),
            Err(e) => trace!("{} table: skipping #{} row: {}.", layout.name, human_row_id, e),
        }
    }

    debug!("{} table: {} records.", layout.name, records.len());
    records
}

fn header_titles(grid: &Grid, row_id: usize, band: usize) -> Vec<String> {
    let width = (row_id..row_id + band).map(|row_id| grid.row(row_id).len()).max().unwrap_or_default();

    (0..width).map(|column_id| {
        let title = (row_id..row_id + band)
            .map(|row_id| as_text(grid.cell(row_id, column_id)))
            .filter(|title| !title.is_empty())
            .join(" ");

        transform_for_matching(&title)
    }).collect()
}
