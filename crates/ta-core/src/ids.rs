//! Strongly-typed identifiers carried through workflow records.

/// Define a trimmed, non-empty string identifier.
///
/// Generates the struct with serde support (empty or blank input is rejected
/// on deserialize), `try_new`, `as_str`, `Display`, `Deref<Target = str>` and
/// string comparisons.
macro_rules! define_identifier {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl<'de> serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                // Account ids occasionally arrive as JSON numbers from hand-written inputs.
                let value = serde_json::Value::deserialize(deserializer)?;
                let raw = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Number(n) => n.to_string(),
                    other => {
                        return Err(serde::de::Error::custom(format!(
                            concat!(stringify!($Name), " must be a string, got {}"),
                            other
                        )))
                    }
                };
                $Name::try_new(raw).ok_or_else(|| {
                    serde::de::Error::custom(concat!(stringify!($Name), " must not be empty"))
                })
            }
        }

        impl $Name {
            /// Build an identifier from untrusted input, trimming surrounding whitespace.
            ///
            /// Returns `None` when nothing is left after trimming.
            pub fn try_new(raw: impl Into<String>) -> Option<Self> {
                let raw = raw.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else if trimmed.len() == raw.len() {
                    Some(Self(raw))
                } else {
                    Some(Self(trimmed.to_string()))
                }
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $Name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $Name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $Name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_identifier! {
    /// AWS account identifier (normally twelve digits).
    pub struct AccountId;
}

define_identifier! {
    /// Trusted Advisor check identifier, e.g. `Qch7DwouX1`.
    pub struct CheckId;
}

impl AccountId {
    /// ARN of the named role inside this account.
    pub fn role_arn(&self, role_name: &str) -> String {
        format!("arn:aws:iam::{}:role/{}", self.0, role_name)
    }
}
