//! Request models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod name;
pub mod patch;
pub mod pagination;

pub use validation::ValidationError;
pub use name::RecordName;
pub use patch::Patch;
pub use pagination::{Pagination, PaginationParams};
