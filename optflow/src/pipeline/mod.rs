//! Pipeline execution: sequencing, policy, results.

mod options;
mod result;
mod runner;

pub use options::PipelineOptions;
pub use result::{PipelineOutcome, PipelineResult, PipelineStep};
pub use runner::PipelineRunner;
