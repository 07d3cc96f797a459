//! Schema-driven parameter validation.

use std::sync::Arc;

use crate::error::{ValidationErrors, ZaifError};
use crate::schema::{ParamValue, Params, Schema};

/// Validates parameter sets against a slice of a [`Schema`].
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Arc<Schema>,
}

impl Validator {
    /// Create a validator over `schema`.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
        }
    }

    /// Validate `params` against the rules for `keys` and apply the wire edits.
    ///
    /// Every violation is collected before failing. On success `from_num` is
    /// renamed to `from`, the name Zaif expects on the wire.
    pub fn validate(&self, keys: &[&str], mut params: Params) -> Result<Params, ZaifError> {
        let schema = self.schema.select(keys);
        let mut errors = ValidationErrors::new();

        for (name, rule) in schema.iter() {
            if rule.required && !params.contains_key(name) {
                errors.add(name, "required field");
            }
        }

        for (name, value) in params.iter() {
            match schema.get(name) {
                Some(rule) => {
                    if let Some(message) = rule.check(value) {
                        errors.add(name, message);
                    }
                }
                None => errors.add(name, "unknown field"),
            }
        }

        if !errors.is_empty() {
            tracing::debug!(%errors, "Parameter validation failed");
            return Err(ZaifError::Validation(errors));
        }

        if let Some(from) = params.remove("from_num") {
            params.insert("from", from);
        }
        Ok(params)
    }

    /// Validate ordered positional arguments, as used for path segments.
    pub fn validate_positional(
        &self,
        keys: &[&str],
        args: &[(&str, ParamValue)],
    ) -> Result<Params, ZaifError> {
        let params = args.iter().map(|(k, v)| (*k, v.clone())).collect();
        self.validate(keys, params)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Schema::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const TRADE_KEYS: &[&str] = &["currency_pair", "action", "price", "amount", "limit", "comment"];
    const HISTORY_KEYS: &[&str] = &["from_num", "count", "order", "currency_pair"];

    fn trade_params() -> Params {
        Params::new()
            .with("currency_pair", "btc_jpy")
            .with("action", "bid")
            .with("price", Decimal::new(4_500_000, 0))
            .with("amount", 0.01)
    }

    #[test]
    fn test_valid_params_pass_unchanged() {
        let params = trade_params();
        let validated = Validator::default()
            .validate(TRADE_KEYS, params.clone())
            .unwrap();
        assert_eq!(validated, params);
    }

    #[test]
    fn test_from_num_renamed_to_from() {
        let params = Params::new().with("from_num", 10).with("order", "DESC");
        let validated = Validator::default().validate(HISTORY_KEYS, params).unwrap();

        assert!(!validated.contains_key("from_num"));
        assert_eq!(validated.get("from"), Some(&ParamValue::Integer(10)));
        assert_eq!(validated.get("order"), Some(&ParamValue::from("DESC")));
    }

    #[test]
    fn test_missing_required_reported() {
        let mut params = trade_params();
        params.remove("price");
        params.remove("amount");

        let err = Validator::default().validate(TRADE_KEYS, params).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert!(errors.contains("price"));
        assert!(errors.contains("amount"));
        assert_eq!(errors.get("price").unwrap(), ["required field"]);
    }

    #[test]
    fn test_action_outside_bid_ask_rejected() {
        let params = trade_params().with("action", "buy");
        let err = Validator::default().validate(TRADE_KEYS, params).unwrap_err();
        assert!(err.validation_errors().unwrap().contains("action"));
    }

    #[test]
    fn test_all_violations_collected() {
        let params = Params::new()
            .with("currency_pair", 1)
            .with("action", "buy")
            .with("price", "cheap")
            .with("unexpected", true);

        let err = Validator::default().validate(TRADE_KEYS, params).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get("currency_pair").unwrap(), ["must be of string type"]);
        assert_eq!(
            errors.get("price").unwrap(),
            ["must be of number or decimal type"]
        );
        assert_eq!(errors.get("unexpected").unwrap(), ["unknown field"]);
        assert!(errors.contains("amount"));
    }

    #[test]
    fn test_positional_null_needs_nullable_schema() {
        let keys = &["group_id", "currency_pair"];
        let args = [
            ("group_id", ParamValue::Integer(1)),
            ("currency_pair", ParamValue::Null),
        ];

        assert!(Validator::default().validate_positional(keys, &args).is_err());
        assert!(
            Validator::new(Schema::futures_public())
                .validate_positional(keys, &args)
                .is_ok()
        );
    }
}
