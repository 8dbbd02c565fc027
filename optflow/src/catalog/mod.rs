//! Context catalog: definitions and the validated, read-only store.

mod definition;
mod store;

pub use definition::{AnalysisDepth, Context};
pub use store::{ContextCatalog, ContextStore};
