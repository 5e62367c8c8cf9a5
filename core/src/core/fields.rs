// stepline/src/core/fields.rs

//! Field storage shared by action instances, step options and outcomes.

use indexmap::IndexMap;

/// A single field value. Any JSON-shaped value can be stored on an action.
pub type Value = serde_json::Value;

/// Ordered mapping of field name to value; iteration follows insertion order.
pub type Fields = IndexMap<String, Value>;

/// Options attached to a step registration. Same shape as `Fields`.
pub type Options = Fields;

/// Structured errors carried by an outcome: field name to messages.
pub type Errors = IndexMap<String, Vec<String>>;

/// Name that never appears in fixtures.
pub(crate) const RESULT_FIELD: &str = "result";

/// Fields named with a leading underscore are private unless exposed.
pub(crate) fn is_private(name: &str) -> bool {
  name.starts_with('_')
}

/// Builds a `Fields` map from any iterator of name/value pairs.
///
/// ```
/// let fields = stepline::fields([("x", 1), ("y", 2)]);
/// assert_eq!(fields["y"], 2);
/// ```
pub fn fields<I, K, V>(pairs: I) -> Fields
where
  I: IntoIterator<Item = (K, V)>,
  K: Into<String>,
  V: Into<Value>,
{
  pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
