use crate::enums::EResult;
use std::fmt;
use serde::de::{self, Deserializer, Visitor, Unexpected};
use serde::Deserialize;

/// Deserializes a numeric result code, mapping codes this crate does not
/// know about to [`EResult::Invalid`] rather than failing the whole body.
pub fn to_eresult<'de, D>(deserializer: D) -> Result<EResult, D::Error>
where
    D: Deserializer<'de>,
{
    let code: u8 = Deserialize::deserialize(deserializer)?;

    Ok(EResult::try_from(code).unwrap_or(EResult::Invalid))
}

/// Deserializes an amount the store sends either as a number or as a string
/// of digits.
pub fn from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl Visitor<'_> for AmountVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string of digits")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(v as i64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            v.parse::<i64>()
                .map_err(|_| de::Error::invalid_value(Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Body {
        #[serde(deserialize_with = "to_eresult")]
        success: EResult,
        #[serde(deserialize_with = "from_number_or_string")]
        total: i64,
    }

    #[test]
    fn coerces_amounts_and_unknown_results() {
        let body: Body = serde_json::from_str(r#"{"success":1,"total":"999"}"#).unwrap();

        assert_eq!(body.success, EResult::OK);
        assert_eq!(body.total, 999);

        let body: Body = serde_json::from_str(r#"{"success":97,"total":999}"#).unwrap();

        assert_eq!(body.success, EResult::Invalid);
        assert_eq!(body.total, 999);
    }
}
