//! Caller-supplied request parameters.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

/// A single request parameter value.
///
/// `Decimal` is kept apart from `Number` so amounts and prices can travel
/// with exact precision.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// An explicitly absent value (e.g. an omitted positional argument).
    Null,
    /// A boolean flag, sent as `true` / `false`.
    Bool(bool),
    /// An integer.
    Integer(i64),
    /// A floating point number.
    Number(f64),
    /// An exact decimal number.
    Decimal(Decimal),
    /// A string.
    String(String),
}

impl ParamValue {
    /// Whether this is [`ParamValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Null => Ok(()),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Integer(i) => write!(f, "{i}"),
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Decimal(d) => write!(f, "{d}"),
            ParamValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::String(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        ParamValue::Decimal(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

/// A set of named request parameters.
///
/// # Example
///
/// ```rust
/// use zaif_api_client::schema::Params;
/// use rust_decimal::Decimal;
///
/// let params = Params::new()
///     .with("currency_pair", "btc_jpy")
///     .with("action", "bid")
///     .with("price", Decimal::new(4_500_000, 0))
///     .with("amount", Decimal::new(1, 3));
/// assert_eq!(params.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, ParamValue>,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Get a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Remove a parameter, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.values.remove(name)
    }

    /// Whether a parameter is present (a `Null` value counts as present).
    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render the non-null parameters as `(name, text)` pairs for form encoding.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_wire_text() {
        assert_eq!(ParamValue::from(true).to_string(), "true");
        assert_eq!(ParamValue::from(42).to_string(), "42");
        assert_eq!(ParamValue::from(0.5).to_string(), "0.5");
        assert_eq!(ParamValue::from(Decimal::new(1050, 3)).to_string(), "1.050");
        assert_eq!(ParamValue::from("btc_jpy").to_string(), "btc_jpy");
    }

    #[test]
    fn test_option_maps_to_null() {
        assert!(ParamValue::from(None::<&str>).is_null());
        assert_eq!(ParamValue::from(Some(3)), ParamValue::Integer(3));
    }

    #[test]
    fn test_to_pairs_skips_null() {
        let params = Params::new()
            .with("currency_pair", None::<&str>)
            .with("group_id", 1);
        assert_eq!(
            params.to_pairs(),
            vec![("group_id".to_string(), "1".to_string())]
        );
    }
}
