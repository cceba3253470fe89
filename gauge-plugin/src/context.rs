//! Evaluation Context

/// Decimal places used when a function renders a number as text
pub const DEFAULT_PRECISION: u32 = 2;

/// Evaluation context passed to plugins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalContext {
    pub precision: u32,
}

impl EvalContext {
    pub fn new() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}
