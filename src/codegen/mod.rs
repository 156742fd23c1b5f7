mod vm_writer;
mod xml_writer;

pub use vm_writer::*;
pub use xml_writer::*;
