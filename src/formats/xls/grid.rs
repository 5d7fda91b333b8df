use std::path::Path;

use calamine::{Range, Reader, open_workbook_auto};
use log::{debug, trace};

use crate::core::GenericResult;

use super::{Cell, is_empty_row, trim_row_right};

/// Raw header-less view of one spreadsheet tab.
///
/// Indexes are absolute: row 0 and column 0 always correspond to the sheet's first row and column A
/// even when the used range starts further away.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(range: &Range<Cell>) -> Grid {
        let (start_row, start_column) = match range.start() {
            Some((row, column)) => (row as usize, column as usize),
            None => return Grid::default(),
        };

        let mut rows = vec![Vec::new(); start_row];

        for row in range.rows() {
            let row = trim_row_right(row);
            if row.is_empty() {
                rows.push(Vec::new());
                continue;
            }

            let mut cells = Vec::with_capacity(start_column + row.len());
            cells.resize(start_column, Cell::Empty);
            cells.extend_from_slice(row);
            rows.push(cells);
        }

        while rows.last().is_some_and(|row| is_empty_row(row)) {
            rows.pop();
        }

        Grid {rows}
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Grid {
        Grid {rows}
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| is_empty_row(row))
    }

    pub fn row(&self, row_id: usize) -> &[Cell] {
        self.rows.get(row_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn cell(&self, row_id: usize, column_id: usize) -> Option<&Cell> {
        self.rows.get(row_id).and_then(|row| row.get(column_id))
    }
}

pub struct Sheet {
    pub name: String,
    pub grid: Grid,
}

/// All tabs of a report, fully read into memory so the file is closed before extraction starts.
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Workbook {
        Workbook {sheets}
    }

    pub fn open(path: &Path) -> GenericResult<Workbook> {
        debug!("Reading {:?}...", path);

        let mut workbook = open_workbook_auto(path).map_err(|e| format!(
            "Unable to open {:?}: {}", path, e))?;
        let mut sheets = Vec::new();

        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name).map_err(|e| format!(
                "Unable to read {:?} sheet: {}", name, e))?;

            let grid = Grid::new(&range);
            trace!("{:?} sheet: {} rows.", name, grid.height());

            sheets.push(Sheet {name, grid});
        }

        Ok(Workbook {sheets})
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Grid> {
        self.sheets.iter()
            .find(|sheet| sheet.name.trim() == name)
            .map(|sheet| &sheet.grid)
    }

    pub fn sheet_by_index(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_indexes() {
        let mut range = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Cell::String(s!("Таблица №1")));
        range.set_value((3, 2), Cell::Int(42));

        let grid = Grid::new(&range);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.cell(0, 0), None);
        assert_eq!(grid.cell(2, 0), Some(&Cell::Empty));
        assert_eq!(grid.cell(2, 1), Some(&Cell::String(s!("Таблица №1"))));
        assert_eq!(grid.cell(3, 2), Some(&Cell::Int(42)));
        assert_eq!(grid.cell(3, 3), None);
        assert!(grid.row(10).is_empty());
    }

    #[test]
    fn empty_range() {
        let grid = Grid::new(&Range::empty());
        assert_eq!(grid.height(), 0);
        assert!(grid.is_empty());
    }

    #[test]
    fn sheet_lookup() {
        let workbook = Workbook::new(vec![
            Sheet {name: s!("1-Структура "), grid: Grid::default()},
            Sheet {name: s!("3-Остатки"), grid: Grid::from_rows(vec![vec![Cell::Int(1)]])},
        ]);

        assert!(workbook.sheet("1-Структура").is_some());
        assert_eq!(workbook.sheet("3-Остатки").map(Grid::height), Some(1));
        assert!(workbook.sheet("2-Потребность").is_none());
        assert_eq!(workbook.sheet_by_index(1).map(|sheet| sheet.name.as_str()), Some("3-Остатки"));
    }
}
