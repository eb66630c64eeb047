use crate::utils::error::{ReservationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// 產生新的隨機 id (32 個十六進位字元)
            pub fn generate() -> Self {
                Self(Uuid::new_v4().simple().to_string())
            }

            /// Accepts any non-blank token, e.g. one read back from disk.
            pub fn parse(value: &str) -> Result<Self> {
                if value.trim().is_empty() {
                    return Err(ReservationError::validation($field, "id cannot be empty"));
                }
                Ok(Self(value.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ReservationError;

            fn try_from(value: String) -> Result<Self> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ReservationError;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`Hotel`](crate::domain::model::Hotel).
    HotelId,
    "hotel_id"
);
entity_id!(
    /// Identifier of a [`Customer`](crate::domain::model::Customer).
    CustomerId,
    "customer_id"
);
entity_id!(ReservationId, "reservation_id");
