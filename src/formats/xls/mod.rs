mod cell;
mod grid;
mod table;
mod util;

pub use self::cell::*;
pub use self::grid::*;
pub use self::table::*;
pub use self::util::*;
