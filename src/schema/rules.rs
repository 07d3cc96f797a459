//! Field rules and the schema registry.

use std::collections::BTreeMap;

use crate::schema::ParamValue;

/// A primitive type a parameter value may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Text.
    String,
    /// Whole number.
    Integer,
    /// Integer or floating point number.
    Number,
    /// Exact decimal number.
    Decimal,
    /// Boolean flag.
    Boolean,
}

impl FieldType {
    /// Whether `value` is of this type.
    pub fn matches(&self, value: &ParamValue) -> bool {
        matches!(
            (self, value),
            (FieldType::String, ParamValue::String(_))
                | (FieldType::Integer, ParamValue::Integer(_))
                | (FieldType::Number, ParamValue::Integer(_) | ParamValue::Number(_))
                | (FieldType::Decimal, ParamValue::Decimal(_))
                | (FieldType::Boolean, ParamValue::Bool(_))
        )
    }

    /// Lower-case type name used in violation messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Decimal => "decimal",
            FieldType::Boolean => "boolean",
        }
    }
}

/// The validation rule for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// The parameter must be present.
    pub required: bool,
    /// Accepted types; a value must match at least one.
    pub types: &'static [FieldType],
    /// If set, the textual value must be one of these.
    pub allowed: Option<&'static [&'static str]>,
    /// A `Null` value is accepted.
    pub nullable: bool,
}

impl FieldRule {
    /// An optional, non-nullable field of the given types.
    pub const fn new(types: &'static [FieldType]) -> Self {
        Self {
            required: false,
            types,
            allowed: None,
            nullable: false,
        }
    }

    /// Mark the field as required.
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restrict the field to a fixed set of values.
    pub const fn allowed(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = Some(values);
        self
    }

    /// Accept `Null` for this field.
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Check `value` against this rule, returning the violation message if any.
    pub fn check(&self, value: &ParamValue) -> Option<String> {
        if value.is_null() {
            return (!self.nullable).then(|| "null value not allowed".to_string());
        }

        if !self.types.iter().any(|t| t.matches(value)) {
            let names: Vec<&str> = self.types.iter().map(FieldType::name).collect();
            return Some(format!("must be of {} type", names.join(" or ")));
        }

        if let Some(allowed) = self.allowed {
            let text = value.to_string();
            if !allowed.contains(&text.as_str()) {
                return Some(format!("unallowed value {text}"));
            }
        }

        None
    }
}

const STRING: &[FieldType] = &[FieldType::String];
const INTEGER: &[FieldType] = &[FieldType::Integer];
const NUMBER: &[FieldType] = &[FieldType::Number];
const BOOLEAN: &[FieldType] = &[FieldType::Boolean];
const STRING_OR_INTEGER: &[FieldType] = &[FieldType::String, FieldType::Integer];
const NUMBER_OR_DECIMAL: &[FieldType] = &[FieldType::Number, FieldType::Decimal];

/// Every parameter rule known to the Zaif APIs.
pub const DEFAULT_RULES: &[(&str, FieldRule)] = &[
    ("from_num", FieldRule::new(INTEGER)),
    ("count", FieldRule::new(INTEGER)),
    ("from_id", FieldRule::new(INTEGER)),
    ("end_id", FieldRule::new(STRING_OR_INTEGER)),
    ("order", FieldRule::new(STRING).allowed(&["ASC", "DESC"])),
    ("since", FieldRule::new(INTEGER)),
    ("end", FieldRule::new(STRING_OR_INTEGER)),
    ("currency_pair", FieldRule::new(STRING)),
    ("currency", FieldRule::new(STRING).required()),
    ("address", FieldRule::new(STRING).required()),
    ("message", FieldRule::new(STRING)),
    ("amount", FieldRule::new(NUMBER_OR_DECIMAL).required()),
    ("opt_fee", FieldRule::new(NUMBER)),
    ("order_id", FieldRule::new(INTEGER).required()),
    ("action", FieldRule::new(STRING).required().allowed(&["bid", "ask"])),
    ("price", FieldRule::new(NUMBER_OR_DECIMAL).required()),
    ("limit", FieldRule::new(NUMBER_OR_DECIMAL)),
    ("stop", FieldRule::new(NUMBER_OR_DECIMAL)),
    ("is_token", FieldRule::new(BOOLEAN)),
    ("is_token_both", FieldRule::new(BOOLEAN)),
    ("comment", FieldRule::new(STRING)),
    ("group_id", FieldRule::new(STRING_OR_INTEGER)),
    ("type", FieldRule::new(STRING).allowed(&["margin", "futures"])),
    ("leverage", FieldRule::new(NUMBER_OR_DECIMAL)),
    ("leverage_id", FieldRule::new(INTEGER)),
];

/// An immutable map from parameter name to rule.
///
/// API families derive their schema from [`Schema::default`] plus explicit
/// overrides when the client is built; a schema is never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    rules: BTreeMap<&'static str, FieldRule>,
}

impl Schema {
    /// The schema for the futures public API: `currency_pair` may be null.
    pub fn futures_public() -> Self {
        Self::default().with_override("currency_pair", FieldRule::new(STRING).nullable())
    }

    /// Return a copy with `name` added or replaced.
    pub fn with_override(mut self, name: &'static str, rule: FieldRule) -> Self {
        self.rules.insert(name, rule);
        self
    }

    /// The rule for `name`.
    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.rules.get(name)
    }

    /// The sub-schema restricted to `keys`. Unknown keys are ignored.
    pub fn select(&self, keys: &[&str]) -> Schema {
        let rules = self
            .rules
            .iter()
            .filter(|(name, _)| keys.contains(name))
            .map(|(name, rule)| (*name, *rule))
            .collect();
        Schema { rules }
    }

    /// Iterate over `(name, rule)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldRule)> {
        self.rules.iter().map(|(name, rule)| (*name, rule))
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the schema has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_select_preserves_rules() {
        let schema = Schema::default();
        let selected = schema.select(&["action", "price", "not_a_field"]);

        assert_eq!(selected.len(), 2);
        assert_eq!(selected.get("action"), schema.get("action"));
        assert!(selected.get("price").unwrap().required);
        assert!(selected.get("not_a_field").is_none());
    }

    #[test]
    fn test_futures_override_leaves_default_untouched() {
        let futures = Schema::futures_public();
        assert!(futures.get("currency_pair").unwrap().nullable);
        assert!(!Schema::default().get("currency_pair").unwrap().nullable);
    }

    #[test]
    fn test_number_accepts_integer_but_not_decimal() {
        let rule = FieldRule::new(NUMBER);
        assert!(rule.check(&ParamValue::Integer(1)).is_none());
        assert!(rule.check(&ParamValue::Number(1.5)).is_none());
        assert_eq!(
            rule.check(&ParamValue::Decimal(Decimal::ONE)).as_deref(),
            Some("must be of number type")
        );
    }

    #[test]
    fn test_allowed_values() {
        let rule = FieldRule::new(STRING).allowed(&["bid", "ask"]);
        assert!(rule.check(&ParamValue::from("ask")).is_none());
        assert_eq!(
            rule.check(&ParamValue::from("buy")).as_deref(),
            Some("unallowed value buy")
        );
    }

    #[test]
    fn test_null_requires_nullable() {
        assert!(FieldRule::new(STRING).check(&ParamValue::Null).is_some());
        assert!(
            FieldRule::new(STRING)
                .nullable()
                .check(&ParamValue::Null)
                .is_none()
        );
    }
}
