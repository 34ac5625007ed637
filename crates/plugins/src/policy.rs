//! Prefix policy: whether a command requires, forbids, or tolerates the
//! configured leading marker.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A command's declared stance on the configured prefix.
///
/// The wire encoding is the legacy tri-value: `true` (required), `false`
/// (forbidden), `"both"` (either), in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixPolicy {
    /// Only prefixed messages may invoke the command.
    Required,
    /// Only bare messages may invoke the command.
    Forbidden,
    /// Prefix usage does not matter.
    Either,
}

impl PrefixPolicy {
    /// Whether a message with the observed prefix usage may invoke the
    /// command.
    #[must_use]
    pub fn allows(self, has_prefix: bool) -> bool {
        match self {
            Self::Required => has_prefix,
            Self::Forbidden => !has_prefix,
            Self::Either => true,
        }
    }
}

impl std::fmt::Display for PrefixPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::Either => write!(f, "both"),
        }
    }
}

impl Serialize for PrefixPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Required => serializer.serialize_bool(true),
            Self::Forbidden => serializer.serialize_bool(false),
            Self::Either => serializer.serialize_str("both"),
        }
    }
}

impl<'de> Deserialize<'de> for PrefixPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TriValue;

        impl de::Visitor<'_> for TriValue {
            type Value = PrefixPolicy;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("true, false, or \"both\"")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<PrefixPolicy, E> {
                Ok(if v {
                    PrefixPolicy::Required
                } else {
                    PrefixPolicy::Forbidden
                })
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<PrefixPolicy, E> {
                match v {
                    "both" => Ok(PrefixPolicy::Either),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(TriValue)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_matrix() {
        assert!(PrefixPolicy::Required.allows(true));
        assert!(!PrefixPolicy::Required.allows(false));
        assert!(!PrefixPolicy::Forbidden.allows(true));
        assert!(PrefixPolicy::Forbidden.allows(false));
        assert!(PrefixPolicy::Either.allows(true));
        assert!(PrefixPolicy::Either.allows(false));
    }

    #[test]
    fn serializes_to_tri_value() {
        assert_eq!(
            serde_json::to_value(PrefixPolicy::Required).unwrap(),
            serde_json::json!(true)
        );
        assert_eq!(
            serde_json::to_value(PrefixPolicy::Forbidden).unwrap(),
            serde_json::json!(false)
        );
        assert_eq!(
            serde_json::to_value(PrefixPolicy::Either).unwrap(),
            serde_json::json!("both")
        );
    }

    #[test]
    fn deserializes_from_tri_value() {
        let parse = |v: serde_json::Value| serde_json::from_value::<PrefixPolicy>(v).unwrap();
        assert_eq!(parse(serde_json::json!(true)), PrefixPolicy::Required);
        assert_eq!(parse(serde_json::json!(false)), PrefixPolicy::Forbidden);
        assert_eq!(parse(serde_json::json!("both")), PrefixPolicy::Either);
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(serde_json::from_value::<PrefixPolicy>(serde_json::json!("sometimes")).is_err());
        assert!(serde_json::from_value::<PrefixPolicy>(serde_json::json!(1)).is_err());
        assert!(serde_json::from_value::<PrefixPolicy>(serde_json::json!(null)).is_err());
    }
}
