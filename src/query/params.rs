//! Request parameters and their values.
//!
//! Parameters are kept in insertion order so the query string a client sends
//! is the same every time for the same input.
//!
//! ## List Values
//!
//! ```text
//!     Value::List(["1", "2", "3"])  ──►  "1,2,3"
//!
//!     id=1,2,3        (emitted)
//!     id=1&id=2&id=3  (never emitted)
//!     id[]=1&id[]=2   (never emitted)
//! ```
//!
//! E-utilities reads comma-separated UID lists from a single parameter, so a
//! list is always flattened into one comma-joined value.

use std::fmt;

/// A parameter or search-term value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A single scalar, already rendered as text.
    Text(String),
    /// An ordered list of scalars, rendered comma-joined.
    List(Vec<String>),
}

impl Value {
    /// Renders the value the way it appears on the wire (before URL encoding).
    ///
    /// ```rust
    /// use entrez_client::Value;
    ///
    /// assert_eq!(Value::from("xml").render(), "xml");
    /// assert_eq!(Value::from(vec![1, 2, 3]).render(), "1,2,3");
    /// ```
    pub fn render(&self) -> String {
        match self {
            Value::Text(text) => text.clone(),
            Value::List(items) => items.join(","),
        }
    }

    /// Returns `true` for an empty string or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Text(text) => text.is_empty(),
            Value::List(items) => items.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Text(value.to_string())
                }
            }
        )*
    };
}

impl_from_scalar!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_from_scalar!(f32, f64, bool, char);

impl<T: ToString> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for Value {
    fn from(values: &[T]) -> Self {
        Value::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for Value {
    fn from(values: [T; N]) -> Self {
        Value::List(values.iter().map(ToString::to_string).collect())
    }
}

/// Ordered request parameters.
///
/// Inserting a key that already exists replaces its value in place, so the
/// key keeps its original position and never appears twice.
///
/// ## Example
///
/// ```rust
/// use entrez_client::Params;
///
/// let params = Params::new()
///     .with("id", vec![123, 456])
///     .with("retmode", "xml")
///     .with("retmode", "json");
///
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.get("id").unwrap().render(), "123,456");
/// assert_eq!(params.get("retmode").unwrap().render(), "json");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a parameter, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlays `other` on top of `self`.
    ///
    /// Keys from `other` win on collision and keep the position they already
    /// had in `self`; new keys are appended in `other`'s order.
    pub fn merge(&mut self, other: &Params) {
        for (key, value) in other.iter() {
            self.insert(key, value.clone());
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Params {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from("abc"), Value::Text("abc".to_string()));
        assert_eq!(Value::from(42u64), Value::Text("42".to_string()));
        assert_eq!(Value::from(-7i32), Value::Text("-7".to_string()));
        assert_eq!(
            Value::from(["a", "b"]),
            Value::List(vec!["a".to_string(), "b".to_string()])
        );

        let ids: &[u32] = &[10, 20];
        assert_eq!(Value::from(ids).render(), "10,20");
    }

    #[test]
    fn test_value_from_float_bool_char() {
        assert_eq!(Value::from(0.5f64).render(), "0.5");
        assert_eq!(Value::from(2.25f32).render(), "2.25");
        assert_eq!(Value::from(true).render(), "true");
        assert_eq!(Value::from('y').render(), "y");

        let params = Params::new().with("usehistory", 'y').with("retstart", 0).with("sort", false);
        assert_eq!(params.get("usehistory"), Some(&Value::from("y")));
        assert_eq!(params.get("sort").map(Value::render), Some("false".to_string()));
    }

    #[test]
    fn test_value_empty() {
        assert!(Value::from("").is_empty());
        assert!(Value::List(Vec::new()).is_empty());
        assert!(!Value::from(vec![1]).is_empty());
    }

    #[test]
    fn test_value_display_matches_render() {
        let value = Value::from(vec!["x", "y"]);
        assert_eq!(value.to_string(), value.render());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = Params::new().with("db", "snp").with("id", 1).with("retmode", "xml");

        let previous = params.insert("id", 2);
        assert_eq!(previous, Some(Value::from(1)));

        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["db", "id", "retmode"]);
        assert_eq!(params.get("id"), Some(&Value::from(2)));
    }

    #[test]
    fn test_remove_and_contains() {
        let mut params = Params::from([("a", "1"), ("b", "2")]);
        assert!(params.contains_key("a"));

        assert_eq!(params.remove("a"), Some(Value::from("1")));
        assert!(!params.contains_key("a"));
        assert_eq!(params.remove("missing"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_merge_overrides_and_appends() {
        let mut defaults = Params::new().with("tool", "entrez-client").with("email", "a@b.org");
        let caller = Params::new().with("retmax", 20).with("tool", "mytool");

        defaults.merge(&caller);

        let pairs: Vec<(String, String)> = defaults
            .iter()
            .map(|(k, v)| (k.to_string(), v.render()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("tool".to_string(), "mytool".to_string()),
                ("email".to_string(), "a@b.org".to_string()),
                ("retmax".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_iterator_and_into_iterator() {
        let params: Params = vec![("id", 1), ("id", 2), ("retmax", 5)].into_iter().collect();
        assert_eq!(params.len(), 2);

        let collected: Vec<(String, Value)> = params.into_iter().collect();
        assert_eq!(collected[0], ("id".to_string(), Value::from(2)));
    }
}
