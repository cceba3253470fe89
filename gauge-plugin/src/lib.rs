//! Gauge Plugin System
//!
//! Provides the trait for extending Gauge with pure functions and the
//! registry that dispatches calls to them by name.

mod traits;
mod registry;
mod context;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::PluginRegistry;
pub use context::{EvalContext, DEFAULT_PRECISION};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{FunctionPlugin, FunctionMeta, ArgMeta, PluginRegistry, EvalContext};
    pub use gauge_core::prelude::*;
}
