//! Strongly typed numeric identifiers used on the wire.
//!
//! The backend issues 64-bit integer ids for every record. Wrapping them keeps
//! a compliment id from being passed where a user id is expected, while the
//! serde representation stays a bare JSON number.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw backend identifier.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw identifier value.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }
    };
}

define_id! {
    /// Identifier of a user account.
    UserId
}

define_id! {
    /// Identifier of a tenant (household or organisation namespace).
    TenantId
}

define_id! {
    /// Identifier of a compliment record.
    ComplimentId
}

define_id! {
    /// Identifier of a scheduled task.
    TaskId
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", 42)]
    #[case(" 7 ", 7)]
    #[case("-1", -1)]
    fn parses_decimal_strings(#[case] raw: &str, #[case] expected: i64) {
        let id: UserId = raw.parse().expect("valid id");
        assert_eq!(id.get(), expected);
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!("abc".parse::<TenantId>().is_err());
    }

    #[test]
    fn serialises_as_bare_number() {
        let json = serde_json::to_string(&TaskId::new(9)).expect("serialise id");
        assert_eq!(json, "9");
        let back: TaskId = serde_json::from_str("9").expect("decode id");
        assert_eq!(back, TaskId::new(9));
    }
}
