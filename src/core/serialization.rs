//! # Payload Serialization
//!
//! The token engine never looks inside a payload; it only needs something that
//! turns an application value into bytes and back. That capability is the
//! [`Serializer`] trait. Any format works as long as `decode` inverts `encode`
//! for the types the application signs.
//!
//! ## Built-in Formats
//! - **JSON** (default): canonical for plain data, readable once decoded
//! - **Bincode**: compact binary, fastest
//! - **MessagePack**: compact binary, self-describing
//!
//! [`SerializationFormat`] also implements [`Serializer`], so the format can be
//! picked at runtime from configuration.
//!
//! ## Usage
//! ```rust
//! use miller::core::serialization::{Bincode, Serializer};
//!
//! let bytes = Bincode.encode(&(1u8, "two")).unwrap();
//! let value: (u8, String) = Bincode.decode(&bytes).unwrap();
//! assert_eq!(value, (1, "two".to_string()));
//! ```

use crate::error::{Result, TokenError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Converts application values to and from payload bytes.
pub trait Serializer {
    /// Serialize `value` into payload bytes.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    /// Deserialize payload bytes into a `T`.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

impl<S: Serializer + ?Sized> Serializer for &S {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        (**self).encode(value)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        (**self).decode(bytes)
    }
}

/// JSON payloads via `serde_json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Json;

impl Serializer for Json {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| TokenError::Serialization(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| TokenError::Deserialization(e.to_string()))
    }
}

/// Bincode payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bincode;

impl Serializer for Bincode {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        bincode::serialize(value).map_err(|e| TokenError::Serialization(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        bincode::deserialize(bytes).map_err(|e| TokenError::Deserialization(e.to_string()))
    }
}

/// MessagePack payloads via `rmp-serde`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessagePack;

impl Serializer for MessagePack {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        rmp_serde::to_vec(value).map_err(|e| TokenError::Serialization(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        rmp_serde::from_slice(bytes).map_err(|e| TokenError::Deserialization(e.to_string()))
    }
}

/// Supported serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializationFormat {
    /// Human-readable JSON (default)
    #[default]
    Json,
    /// Binary compact format (fastest)
    Bincode,
    /// Compact binary format (MessagePack)
    #[serde(alias = "msgpack")]
    MessagePack,
}

impl SerializationFormat {
    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            SerializationFormat::Json => "JSON",
            SerializationFormat::Bincode => "Bincode",
            SerializationFormat::MessagePack => "MessagePack",
        }
    }

    /// Whether payloads carry their own structure.
    ///
    /// Only self-describing formats can be decoded without knowing the
    /// target type up front, e.g. into `serde_json::Value`.
    pub fn is_self_describing(self) -> bool {
        match self {
            SerializationFormat::Json | SerializationFormat::MessagePack => true,
            SerializationFormat::Bincode => false,
        }
    }
}

impl fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SerializationFormat {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(SerializationFormat::Json),
            "bincode" => Ok(SerializationFormat::Bincode),
            "messagepack" | "msgpack" => Ok(SerializationFormat::MessagePack),
            other => Err(TokenError::Config(format!(
                "Unknown serialization format: '{other}' (expected json, bincode or messagepack)"
            ))),
        }
    }
}

impl Serializer for SerializationFormat {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        match self {
            SerializationFormat::Json => Json.encode(value),
            SerializationFormat::Bincode => Bincode.encode(value),
            SerializationFormat::MessagePack => MessagePack.encode(value),
        }
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        match self {
            SerializationFormat::Json => Json.decode(bytes),
            SerializationFormat::Bincode => Bincode.decode(bytes),
            SerializationFormat::MessagePack => MessagePack.decode(bytes),
        }
    }
}
