pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Evaluation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// How deep parentheses, bracket expressions and function arguments may
    /// nest before the query is rejected.
    pub max_depth: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Context {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
