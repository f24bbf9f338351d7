//! Service layer: input schemas, validation engine and entity repositories.

mod repository;
pub mod schemas;
mod validation;

pub use repository::{Repositories, Repository};
pub use validation::{FieldError, Schema, ValidationError};
