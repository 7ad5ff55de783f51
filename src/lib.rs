//! JSONPath-like queries with arithmetic over a JSON value tree.
//!
//! ```
//! use json_path_like_eval::{evaluate, loader, Value};
//!
//! let doc = loader::from_str(r#"{"mm": {"4": 4, "arr": ["x", "y"]}}"#).unwrap();
//! assert_eq!(evaluate(&doc, "mm['4'] + 1").unwrap(), vec![Value::Number(5.0)]);
//! assert_eq!(evaluate(&doc, "$.mm.arr[-1]").unwrap(), vec![Value::from("y")]);
//! ```

pub mod context;
pub mod errors;
pub mod functions;
pub mod loader;
pub mod render;
pub mod value;
mod expression;
mod jsonpath;
mod parser;

use std::borrow::Cow;

use tracing::debug;

pub use context::Context;
pub use errors::{Diagnostic, Error, LoadError, QueryError, QueryResult, Result};
pub use functions::Builtin;
pub use value::{Nodelist, Value};

use expression::QueryParser;

/// Evaluates queries under a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    ctx: Context,
}

impl Evaluator {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// Evaluates `query` against `root`.
    ///
    /// Selected nodes borrow from `root`; computed numbers are owned.
    #[tracing::instrument(level = "debug", skip(self, root))]
    pub fn evaluate<'a>(&self, root: &'a Value, query: &str) -> QueryResult<Nodelist<'a>> {
        let nodes = QueryParser::new(query, root, self.ctx).parse()?;
        debug!(matches = nodes.len(), "query evaluated");
        Ok(nodes)
    }
}

/// Evaluates `query` against `root` with default options.
pub fn evaluate(root: &Value, query: &str) -> QueryResult<Vec<Value>> {
    let nodes = Evaluator::default().evaluate(root, query)?;
    Ok(nodes.into_iter().map(Cow::into_owned).collect())
}
