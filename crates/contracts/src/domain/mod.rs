pub mod a001_tender_process;
pub mod a002_project_schedule;
