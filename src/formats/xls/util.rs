use super::{Cell, is_empty_cell};

pub fn is_empty_row(row: &[Cell]) -> bool {
    row.iter().all(|cell| is_empty_cell(Some(cell)))
}

pub fn trim_row_right(mut row: &[Cell]) -> &[Cell] {
    while let Some(cell) = row.last() {
        if !is_empty_cell(Some(cell)) {
            break;
        }
        row = &row[..row.len() - 1]
    }
    row
}
