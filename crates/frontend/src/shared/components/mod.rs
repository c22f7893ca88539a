pub mod month_selector;
pub mod page_header;
pub mod table;
