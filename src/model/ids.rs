use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Type-safe wrapper around a server-assigned identifier. The phantom type
/// parameter `T` prevents mixing IDs from different entity types (e.g., a
/// Group ID vs a User ID).
///
/// Equality and hashing use the normalized key (trimmed, lowercased), so two
/// storage layers that disagree on casing still agree on identity.
pub struct Id<T> {
    raw: String,
    key: String,
    _phantom: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: impl AsRef<str>) -> Self {
        let raw = value.as_ref().trim().to_string();
        let key = raw.to_lowercase();
        Self {
            raw,
            key,
            _phantom: PhantomData,
        }
    }

    /// The empty identifier, used for an unauthenticated viewer.
    pub fn empty() -> Self {
        Self::new("")
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Identity check used by membership reconciliation. An empty id never
    /// matches, so an anonymous viewer is never taken for a creator or member.
    pub fn matches(&self, other: &Self) -> bool {
        !self.is_empty() && self == other
    }

    /// Compare against an id of another entity type, e.g. a member reference
    /// that arrived untyped.
    pub fn matches_str(&self, other: &str) -> bool {
        !self.is_empty() && ids_match(&self.raw, other)
    }
}

/// Tolerant comparison of two raw identifier strings.
///
/// Both sides are trimmed; an exact or case-insensitive match counts. Long
/// equal-length ids (object references are 24 hex chars) that differ only in
/// case are covered by the same case-insensitive rule. Empty ids never match,
/// not even each other: an anonymous viewer must never pass for a member.
pub fn ids_match(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || a.to_lowercase() == b.to_lowercase()
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            key: self.key.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.raw)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl<T> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

// The backend sends references either as a bare string or as a populated
// document carrying `_id`, `id`, or both.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Plain(String),
    Ref {
        #[serde(rename = "_id")]
        mongo_id: Option<String>,
        id: Option<String>,
    },
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = match RawId::deserialize(deserializer)? {
            RawId::Plain(s) => s,
            RawId::Ref { mongo_id, id } => mongo_id
                .or(id)
                .ok_or_else(|| D::Error::custom("reference has neither _id nor id"))?,
        };
        Ok(Self::new(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Foo;

    #[test]
    fn new_trims_input() {
        let id = Id::<Foo>::new("  abc  ");
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn ids_differing_in_case_are_equal() {
        let id1 = Id::<Foo>::new("65F0A1B2C3D4E5F6A7B8C9D0");
        let id2 = Id::<Foo>::new("65f0a1b2c3d4e5f6a7b8c9d0");
        assert_eq!(id1, id2);
    }

    #[test]
    fn display_keeps_original_casing() {
        let id = Id::<Foo>::new("AbC");
        assert_eq!(id.to_string(), "AbC");
    }

    #[test]
    fn empty_id_never_matches() {
        let a = Id::<Foo>::empty();
        let b = Id::<Foo>::new("   ");
        assert_eq!(a, b);
        assert!(!a.matches(&b));
        assert!(!a.matches_str(""));
    }

    #[test]
    fn ids_match_trims_and_ignores_case() {
        assert!(ids_match(" u1 ", "U1"));
        assert!(!ids_match("u1", "u2"));
        assert!(!ids_match("", ""));
    }

    #[test]
    fn deserializes_plain_string() {
        let id: Id<Foo> = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn deserializes_populated_reference() {
        let id: Id<Foo> = serde_json::from_str(r#"{"_id": "abc", "name": "Ana"}"#).unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn deserializes_reference_with_both_id_fields() {
        let id: Id<Foo> =
            serde_json::from_str(r#"{"_id": "abc", "id": "abc", "name": "Ana"}"#).unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn reference_without_any_id_is_rejected() {
        assert!(serde_json::from_str::<Id<Foo>>(r#"{"name": "Ana"}"#).is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = Id::<Foo>::new("AbC");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"AbC\"");
    }
}
