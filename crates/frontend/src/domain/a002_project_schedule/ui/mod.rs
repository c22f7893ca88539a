pub mod monthly;
mod progress_table;
pub mod weekly;
