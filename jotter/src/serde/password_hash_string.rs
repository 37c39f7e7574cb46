//! `#[serde(with)]` support for PHC strings kept in the store file.

use argon2::password_hash::{Encoding, PasswordHashString};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(
    hash: &PasswordHashString,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(hash.as_str())
}

pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<PasswordHashString, D::Error> {
    let phc = String::deserialize(deserializer)?;
    PasswordHashString::parse(&phc, Encoding::B64)
        .map_err(|e| D::Error::custom(format!("invalid password hash: {e}")))
}
