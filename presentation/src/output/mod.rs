//! Output formatting for confirmation results

pub mod console;
pub mod formatter;
