//! Serde helpers for detail types.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Accept a list field that XML delivers as a single object when it has one
/// entry, an array when it has several, and an empty string when it has none.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
        Blank(String),
    }

    match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(OneOrMany::Many(items)) => Ok(items),
        Some(OneOrMany::One(item)) => Ok(vec![item]),
        Some(OneOrMany::Blank(text)) if text.trim().is_empty() => Ok(Vec::new()),
        Some(OneOrMany::Blank(text)) => Err(D::Error::custom(format!(
            "expected a list entry, found text '{text}'"
        ))),
    }
}
