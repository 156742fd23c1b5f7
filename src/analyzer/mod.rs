mod kind;
mod symbol_table;

pub use kind::*;
pub use symbol_table::*;
