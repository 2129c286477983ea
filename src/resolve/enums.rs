//! Enum resolution from raw log values.
//!
//! Enums arrive from the tracking backend as variant names in arbitrary
//! case or as integer codes. Resolution follows one fixed precedence:
//!
//! 1. exact variant name,
//! 2. case-insensitive variant name,
//! 3. integer catalogue value (integer raws only).
//!
//! A case-insensitive lookup that matches more than one variant is a
//! hard error rather than a guess, and every failure lists the full
//! `Name(value)` catalogue so the message can be acted on directly.

use serde_json::Value;

use super::coerce::describe;
use crate::error::ParamgateError;

/// One resolvable variant of an [`EnumParam`].
#[derive(Clone, Copy, Debug)]
pub struct EnumVariant<T: 'static> {
    /// Canonical variant name, matched exactly first and
    /// case-insensitively second.
    pub name: &'static str,

    /// Integer code for the variant, matched against integer raws.
    pub value: i64,

    /// The member this entry resolves to.
    pub member: T,
}

/// Implemented by enums that can be resolved from raw parameter values.
///
/// The catalogue is the single source of truth for resolution and for
/// the valid-values listing in error messages.
pub trait EnumParam: Copy + 'static {
    /// Type name used in diagnostics (e.g. `"ExportFormat"`).
    const NAME: &'static str;

    /// Every resolvable variant, in declaration order.
    const VARIANTS: &'static [EnumVariant<Self>];

    /// Renders the catalogue as `Name(value), ...` for error messages.
    fn catalogue() -> String {
        Self::VARIANTS
            .iter()
            .map(|v| format!("{}({})", v.name, v.value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Resolves a raw value to an enum member per the documented precedence.
pub(crate) fn resolve_enum<T: EnumParam>(key: &str, raw: &Value) -> Result<T, ParamgateError> {
    match raw {
        Value::String(name) => {
            if let Some(variant) = T::VARIANTS.iter().find(|v| v.name == name) {
                return Ok(variant.member);
            }

            let mut folded = T::VARIANTS
                .iter()
                .filter(|v| v.name.eq_ignore_ascii_case(name));
            match (folded.next(), folded.next()) {
                (Some(only), None) => Ok(only.member),
                (Some(first), Some(second)) => Err(ParamgateError::AmbiguousEnumValue {
                    key: key.to_string(),
                    value: describe(raw),
                    enum_name: T::NAME,
                    first: first.name,
                    second: second.name,
                }),
                _ => Err(unknown(key, raw, T::NAME, T::catalogue())),
            }
        }
        Value::Number(n) => match n.as_i64() {
            Some(code) => T::VARIANTS
                .iter()
                .find(|v| v.value == code)
                .map(|v| v.member)
                .ok_or_else(|| unknown(key, raw, T::NAME, T::catalogue())),
            None => Err(unknown(key, raw, T::NAME, T::catalogue())),
        },
        _ => Err(unknown(key, raw, T::NAME, T::catalogue())),
    }
}

fn unknown(key: &str, raw: &Value, enum_name: &'static str, valid: String) -> ParamgateError {
    ParamgateError::UnknownEnumValue {
        key: key.to_string(),
        value: describe(raw),
        enum_name,
        valid,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum TileMode {
        Constant,
        Drop,
        Reflect,
    }

    impl EnumParam for TileMode {
        const NAME: &'static str = "TileMode";
        const VARIANTS: &'static [EnumVariant<Self>] = &[
            EnumVariant {
                name: "Constant",
                value: 0,
                member: TileMode::Constant,
            },
            EnumVariant {
                name: "Drop",
                value: 1,
                member: TileMode::Drop,
            },
            EnumVariant {
                name: "Reflect",
                value: 2,
                member: TileMode::Reflect,
            },
        ];
    }

    // Variants that collide under case folding, to pin the ambiguity rule.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Collider {
        Auto,
        AutoUpper,
    }

    impl EnumParam for Collider {
        const NAME: &'static str = "Collider";
        const VARIANTS: &'static [EnumVariant<Self>] = &[
            EnumVariant {
                name: "Auto",
                value: 0,
                member: Collider::Auto,
            },
            EnumVariant {
                name: "AUTO",
                value: 1,
                member: Collider::AutoUpper,
            },
        ];
    }

    #[test]
    fn resolves_exact_and_case_insensitive_names() {
        assert_eq!(
            resolve_enum::<TileMode>("k", &json!("Constant")).unwrap(),
            TileMode::Constant
        );
        assert_eq!(
            resolve_enum::<TileMode>("k", &json!("constant")).unwrap(),
            TileMode::Constant
        );
        assert_eq!(
            resolve_enum::<TileMode>("k", &json!("cOnStAnT")).unwrap(),
            TileMode::Constant
        );
        assert_eq!(
            resolve_enum::<TileMode>("k", &json!("DROP")).unwrap(),
            TileMode::Drop
        );
    }

    #[test]
    fn resolves_integer_codes() {
        assert_eq!(
            resolve_enum::<TileMode>("k", &json!(0)).unwrap(),
            TileMode::Constant
        );
        assert_eq!(
            resolve_enum::<TileMode>("k", &json!(2)).unwrap(),
            TileMode::Reflect
        );
    }

    #[test]
    fn unknown_values_list_the_catalogue() {
        let err = resolve_enum::<TileMode>("k", &json!("INVALID")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Constant(0)"));
        assert!(message.contains("Reflect(2)"));

        assert!(resolve_enum::<TileMode>("k", &json!(5)).is_err());
        assert!(resolve_enum::<TileMode>("k", &json!(3.14)).is_err());
        assert!(resolve_enum::<TileMode>("k", &json!(true)).is_err());
    }

    #[test]
    fn integer_spelled_as_string_does_not_resolve_by_value() {
        assert!(resolve_enum::<TileMode>("k", &json!("0")).is_err());
    }

    #[test]
    fn exact_match_beats_case_folding() {
        assert_eq!(
            resolve_enum::<Collider>("k", &json!("AUTO")).unwrap(),
            Collider::AutoUpper
        );
        assert_eq!(
            resolve_enum::<Collider>("k", &json!("Auto")).unwrap(),
            Collider::Auto
        );
    }

    #[test]
    fn case_folded_collision_is_a_hard_error() {
        let err = resolve_enum::<Collider>("k", &json!("auto")).unwrap_err();
        assert!(matches!(
            err,
            ParamgateError::AmbiguousEnumValue { .. }
        ));
    }
}
