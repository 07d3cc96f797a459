//! Request parameter schemas and validation.
//!
//! Each endpoint names the schema keys it accepts; the [`Validator`] checks a
//! caller's [`Params`] against that slice of the [`Schema`] before anything is
//! sent.

mod params;
mod rules;
mod validator;

pub use params::{ParamValue, Params};
pub use rules::{DEFAULT_RULES, FieldRule, FieldType, Schema};
pub use validator::Validator;
