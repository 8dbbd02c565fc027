//! Report aggregation and the renderer boundary.

mod aggregator;
mod renderer;

pub use aggregator::{aggregate, FailedStep, ReportPayload};
pub use renderer::{NullRenderer, ReportRenderer};
