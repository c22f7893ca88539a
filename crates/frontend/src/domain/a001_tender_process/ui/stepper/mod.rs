mod view;
mod view_model;

pub use view::TenderProcessStepper;
pub use view_model::TenderProcessViewModel;
