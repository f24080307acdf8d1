//! Aggregation pipeline and stat grid formatting.

pub mod metrics;
pub mod pipeline;

pub use metrics::{assemble_metrics, format_decimal, format_thousands};
pub use pipeline::ProfileService;
