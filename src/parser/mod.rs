mod expr;
mod parser;
mod statements;
mod subroutine;

pub use expr::MAX_INT;
pub use parser::*;
pub use subroutine::SubroutineKind;
