//! Ingredient amount type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing an [`Amount`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The value is zero or negative.
    #[error("amount must be at least {min} (got {value})")]
    NotPositive {
        /// Smallest accepted amount.
        min: i64,
        /// Rejected value.
        value: i64,
    },
    /// The value does not fit the `SMALLINT` column.
    #[error("amount must be at most {max} (got {value})")]
    TooLarge {
        /// Largest accepted amount.
        max: i64,
        /// Rejected value.
        value: i64,
    },
}

/// How much of an ingredient a recipe needs.
///
/// Stored as `SMALLINT` with a `CHECK (amount >= 1)` constraint, so the
/// valid range is `1..=32767`.
///
/// ## Examples
///
/// ```
/// use foodgram_core::Amount;
///
/// assert_eq!(Amount::new(200).unwrap().get(), 200);
/// assert!(Amount::new(0).is_err());
/// assert!(Amount::new(40_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Amount(u16);

impl Amount {
    /// Smallest valid amount.
    pub const MIN: i64 = 1;

    /// Largest valid amount (`SMALLINT` upper bound).
    pub const MAX: i64 = i16::MAX as i64;

    /// Validate and wrap an amount.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError`] when the value is outside `1..=32767`.
    pub fn new(value: i64) -> Result<Self, AmountError> {
        if value < Self::MIN {
            return Err(AmountError::NotPositive {
                min: Self::MIN,
                value,
            });
        }
        if value > Self::MAX {
            return Err(AmountError::TooLarge {
                max: Self::MAX,
                value,
            });
        }
        u16::try_from(value)
            .map(Self)
            .map_err(|_| AmountError::TooLarge {
                max: Self::MAX,
                value,
            })
    }

    /// Get the amount as an unsigned integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0 as u64
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Amount {
    type Error = AmountError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        Self::from(amount.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Amount {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i16 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i16 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Amount {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <i16 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Rows that slipped past the CHECK constraint surface as decode errors.
        Ok(Self::new(i64::from(raw))?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Amount {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        let raw = i16::try_from(self.0)?;
        <i16 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&raw, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_bounds() {
        assert_eq!(Amount::new(1).unwrap().get(), 1);
        assert_eq!(Amount::new(32_767).unwrap().get(), 32_767);
    }

    #[test]
    fn test_new_rejects_zero() {
        assert_eq!(
            Amount::new(0),
            Err(AmountError::NotPositive { min: 1, value: 0 })
        );
    }

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Amount::new(-5),
            Err(AmountError::NotPositive { .. })
        ));
    }

    #[test]
    fn test_new_rejects_too_large() {
        assert!(matches!(
            Amount::new(32_768),
            Err(AmountError::TooLarge { max: 32_767, .. })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let amount: Amount = serde_json::from_str("15").unwrap();
        assert_eq!(amount.get(), 15);

        assert!(serde_json::from_str::<Amount>("0").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(250).unwrap().to_string(), "250");
    }
}
