// ABOUTME: Phantom-typed identifiers for compile-time type safety.
// ABOUTME: Prevents accidental swapping of deployment record, comment, and Vercel IDs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker types for phantom type parameters.
/// Using empty enums prevents instantiation and requires no trait bounds.
pub enum DeploymentRecordMarker {}
pub enum CommentMarker {}
pub enum VercelDeploymentMarker {}

/// A type-safe identifier that prevents accidental mixing of different ID types.
///
/// GitHub hands out numeric identifiers while Vercel uses opaque strings, so the
/// value is always stored in its textual form. Deserialization accepts both.
#[must_use = "IDs reference resources and should not be ignored"]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Id").field("value", &self.value).finish()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> std::fmt::Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value.to_string())
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(Self::from(n)),
            RawId::Text(s) => Ok(Self::new(s)),
        }
    }
}

/// Identifier of a GitHub deployment record.
pub type DeploymentRecordId = Id<DeploymentRecordMarker>;
/// Identifier of a pull request comment.
pub type CommentId = Id<CommentMarker>;
/// Identifier of a Vercel deployment (`dpl_...`).
pub type VercelDeploymentId = Id<VercelDeploymentMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_numeric_and_string_ids() {
        let numeric: CommentId = serde_json::from_str("1234").unwrap();
        assert_eq!(numeric.as_str(), "1234");

        let text: VercelDeploymentId = serde_json::from_str("\"dpl_abc\"").unwrap();
        assert_eq!(text.as_str(), "dpl_abc");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = DeploymentRecordId::from(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }
}
