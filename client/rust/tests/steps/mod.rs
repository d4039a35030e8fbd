//! Step definition modules for Cucumber feature tests.

pub mod envelope;
pub mod query;
pub mod validation;
