//! Analysis request adapter: validate → prompt → call → parse → normalise → respond.

mod analyzer;
mod error;
mod routes;

#[cfg(test)]
mod testing;

pub use analyzer::Analyzer;
pub use error::AnalysisError;
pub use routes::{ANALYZE_PATH, router, serve};
