//! Response validation: immediate assertions and reusable specifications

mod expectation;
mod specification;
mod validatable;

pub use expectation::ExpectedContentType;
pub use specification::ResponseSpecification;
pub use validatable::{Then, ValidatableResponse};
