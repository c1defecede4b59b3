//! Serde support for byte vectors as `0x` prefixed hex strings.

use serde::{de, Deserializer, Serializer};
use std::fmt;

pub fn serialize<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("0x{}", hex::encode(value)))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor {}
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Vec<u8>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            write!(formatter, "a hex encoded string starting with '0x'")
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let s = s.strip_prefix("0x").ok_or_else(|| {
                de::Error::custom(format!(
                    "{:?} can't be decoded as hex bytes because it does not start with '0x'",
                    s
                ))
            })?;
            hex::decode(s).map_err(|err| {
                de::Error::custom(format!("failed to decode {:?} as hex bytes: {}", s, err))
            })
        }
    }

    deserializer.deserialize_str(Visitor {})
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    #[serde(transparent)]
    struct Wrapper(#[serde(with = "super")] Vec<u8>);

    #[test]
    fn serialize_and_back() {
        for (bytes, value) in [
            (Wrapper(vec![]), json!("0x")),
            (Wrapper(vec![0x01, 0xff]), json!("0x01ff")),
        ] {
            assert_eq!(json!(bytes), value);
            assert_eq!(serde_json::from_value::<Wrapper>(value).unwrap(), bytes);
        }
    }

    #[test]
    fn deserialize_rejects_missing_prefix_and_bad_hex() {
        for value in [json!("01ff"), json!("0x01f"), json!("0xgg")] {
            assert!(serde_json::from_value::<Wrapper>(value).is_err());
        }
    }
}
