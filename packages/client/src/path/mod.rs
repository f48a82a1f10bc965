//! GPath-style path expressions
//!
//! A path such as `store.book.findAll { it.price < 10 }.title` is tokenized,
//! parsed into an [`ast::Expression`] and evaluated against a
//! [`PathValue`](crate::value::PathValue) tree built from JSON or XML.
//!
//! ```
//! use restcheck_client::path::{compiler::CompiledPath, evaluator::Evaluator, NO_PARAMS};
//! use restcheck_client::value::PathValue;
//!
//! let document = PathValue::from(serde_json::json!({"store": {"book": [{"price": 8}, {"price": 22}]}}));
//! let path = CompiledPath::compile("store.book.findAll { it.price < 10 }.price").expect("valid path");
//! let cheap = Evaluator::new(&NO_PARAMS).evaluate(&path, &document).expect("evaluates");
//! assert_eq!(cheap, PathValue::from(vec![8]));
//! ```

pub mod ast;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod tokenizer;
pub mod tokens;

use hashbrown::HashMap;
use once_cell::sync::Lazy;

use crate::value::PathValue;

pub use compiler::{CompiledPath, join_root_path};
pub use error::{ErrorKind, PathError, PathResult};
pub use evaluator::Evaluator;

/// Named parameters visible to expressions
pub type Params = HashMap<String, PathValue>;

/// Empty parameter set for evaluations that take none
pub static NO_PARAMS: Lazy<Params> = Lazy::new(Params::new);

/// Compile and evaluate `path` against `root`, turning a missing property into null
///
/// # Errors
/// Returns an error if the path is malformed or evaluation fails for any
/// reason other than a missing property.
pub fn evaluate(path: &str, root: &PathValue, params: &Params) -> PathResult<PathValue> {
    let compiled = CompiledPath::compile(path)?;
    match Evaluator::new(params).evaluate(&compiled, root) {
        Err(e) if e.is_missing_property() => Ok(PathValue::Null),
        other => other,
    }
}
