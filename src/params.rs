//! Declarative parameter validation
//!
//! Request payloads and transaction descriptors arrive as free-form JSON;
//! each method and encoder variant declares the shape it expects as a rule
//! list and checks it with [`validate`] before anything touches the device.

use serde_json::Value;
use thiserror::Error;

/// Expected JSON type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Number,
    Boolean,
    Array,
    Object,
    /// An unsigned 64-bit quantity, given either as a JSON number or as a
    /// decimal string (hosts routinely stringify uint64 values).
    Amount,
}

impl Kind {
    fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Array => "array",
            Kind::Object => "object",
            Kind::Amount => "amount",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Kind::String => value.is_string(),
            Kind::Number => value.is_number(),
            Kind::Boolean => value.is_boolean(),
            Kind::Array => value.is_array(),
            Kind::Object => value.is_object(),
            Kind::Amount => as_amount(value).is_some(),
        }
    }
}

/// One declarative rule: field name, optional type constraint, presence.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub kind: Option<Kind>,
    pub required: bool,
}

impl Rule {
    pub const fn required(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind: Some(kind),
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind: Some(kind),
            required: false,
        }
    }

    /// Presence-only rule, any type accepted.
    pub const fn present(name: &'static str) -> Self {
        Self {
            name,
            kind: None,
            required: true,
        }
    }
}

/// First violated rule, as a typed error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParamError {
    #[error("parameter {0:?} is missing")]
    Missing(&'static str),

    #[error("parameter {name:?} is not of type {expected:?}")]
    WrongType {
        name: &'static str,
        expected: &'static str,
    },
}

/// Check `object` against the rule list, first violation wins.
///
/// A JSON `null` counts as absent, matching how hosts omit optional fields.
pub fn validate(object: &Value, rules: &[Rule]) -> Result<(), ParamError> {
    for rule in rules {
        let field = object.get(rule.name).filter(|v| !v.is_null());

        match (field, rule.required) {
            (None, true) => return Err(ParamError::Missing(rule.name)),
            (None, false) => continue,
            (Some(value), _) => {
                if let Some(kind) = rule.kind {
                    if !kind.matches(value) {
                        return Err(ParamError::WrongType {
                            name: rule.name,
                            expected: kind.name(),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}

/// Read a uint64 quantity given as a JSON number or decimal string.
pub fn as_amount(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) if !s.is_empty() => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_field_missing() {
        let err = validate(&json!({}), &[Rule::required("path", Kind::String)]).unwrap_err();
        assert_eq!(err, ParamError::Missing("path"));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let object = json!({ "duration": null });
        let err = validate(&object, &[Rule::required("duration", Kind::Amount)]).unwrap_err();
        assert_eq!(err, ParamError::Missing("duration"));

        // But an optional null is fine.
        validate(&object, &[Rule::optional("duration", Kind::Amount)]).expect("optional null");
    }

    #[test]
    fn test_wrong_type() {
        let err = validate(
            &json!({ "showOnDevice": "yes" }),
            &[Rule::optional("showOnDevice", Kind::Boolean)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ParamError::WrongType {
                name: "showOnDevice",
                expected: "boolean"
            }
        );
    }

    #[test]
    fn test_first_violation_wins() {
        let err = validate(
            &json!({ "b": 1 }),
            &[
                Rule::required("a", Kind::String),
                Rule::required("b", Kind::String),
            ],
        )
        .unwrap_err();
        assert_eq!(err, ParamError::Missing("a"));
    }

    #[test]
    fn test_amounts() {
        let object = json!({ "n": 20000, "s": "113248176649", "bad": "12x" });
        validate(&object, &[Rule::required("n", Kind::Amount)]).expect("number amount");
        validate(&object, &[Rule::required("s", Kind::Amount)]).expect("string amount");
        assert!(validate(&object, &[Rule::required("bad", Kind::Amount)]).is_err());

        assert_eq!(as_amount(&json!("113248176649")), Some(113248176649));
        assert_eq!(as_amount(&json!(-5)), None);
        assert_eq!(as_amount(&json!("")), None);
    }

    #[test]
    fn test_present_rule() {
        validate(&json!({ "transaction": 5 }), &[Rule::present("transaction")])
            .expect("any type accepted");
        assert!(validate(&json!({}), &[Rule::present("transaction")]).is_err());
    }
}
