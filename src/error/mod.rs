//! Error types for the mapping engine.

mod mapper_error;

pub use mapper_error::MapperError;
