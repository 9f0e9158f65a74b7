pub mod jwt;
pub mod tracing;
pub mod validation;
