pub mod backlog;
pub mod raw_table;
pub mod report;
pub mod report_kind;
