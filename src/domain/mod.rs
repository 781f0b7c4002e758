//! Domain Layer
//!
//! Entities, value objects, the error taxonomy and the ports the
//! application layer depends on.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;

pub use entities::VerifyResult;
pub use errors::{AppError, BoxError, ErrorKind};
pub use value_objects::ParsedAddress;
