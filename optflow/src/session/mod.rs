//! Active session ownership and context switching.

mod manager;

pub use manager::ContextManager;
