pub mod aggregate;
pub mod dto;
pub mod form;
pub mod store;
pub mod tracker;

pub use aggregate::*;
pub use dto::*;
pub use form::{field, FieldError, StepForm, ValidationErrors};
pub use store::{ParentRecordStore, ProcessStore, StoreError};
pub use tracker::*;
