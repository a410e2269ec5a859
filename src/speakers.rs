//! Speaker index → display name mapping.

use crate::error::TranscriptError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Display names keyed by speaker index.
///
/// Only indices the user actually named are present. Stored ordered so logs
/// and JSON output are deterministic; substitution itself does not depend on
/// the order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SpeakerMap(BTreeMap<u32, String>);

impl SpeakerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name a speaker. The name is stored exactly as given; an empty name
    /// is not stored and clears any earlier name for that index.
    pub fn insert(&mut self, index: u32, name: impl Into<String>) {
        let name = name.into();
        if name.is_empty() {
            self.0.remove(&index);
        } else {
            self.0.insert(index, name);
        }
    }

    pub fn get(&self, index: u32) -> Option<&str> {
        self.0.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(i, n)| (*i, n.as_str()))
    }

    /// Parse one `INDEX=NAME` assignment, e.g. `0=Alice Smith`.
    pub fn parse_assignment(s: &str) -> Result<(u32, String), TranscriptError> {
        let (index, name) = s.split_once('=').ok_or_else(|| {
            TranscriptError::InvalidConfig(format!(
                "Expected INDEX=NAME (e.g. 0=Alice), got '{s}'"
            ))
        })?;
        let index: u32 = index.trim().parse().map_err(|_| {
            TranscriptError::InvalidConfig(format!(
                "Speaker index must be a non-negative integer, got '{}'",
                index.trim()
            ))
        })?;
        Ok((index, name.trim().to_string()))
    }
}

impl<S: Into<String>> FromIterator<(u32, S)> for SpeakerMap {
    fn from_iter<I: IntoIterator<Item = (u32, S)>>(iter: I) -> Self {
        let mut map = SpeakerMap::new();
        for (index, name) in iter {
            map.insert(index, name);
        }
        map
    }
}

impl<'de> Deserialize<'de> for SpeakerMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<u32, String>::deserialize(deserializer).map(|names| names.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_name_verbatim_and_skips_empty() {
        let mut map = SpeakerMap::new();
        map.insert(0, "  Alice ");
        map.insert(1, "");
        map.insert(2, " ");
        assert_eq!(map.get(0), Some("  Alice "));
        assert_eq!(map.get(1), None);
        assert_eq!(map.get(2), Some(" "));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn empty_name_clears_previous() {
        let mut map: SpeakerMap = [(2, "Carol")].into_iter().collect();
        map.insert(2, "");
        assert!(map.is_empty());
    }

    #[test]
    fn deserialised_map_matches_inserted_map() {
        let parsed: SpeakerMap =
            serde_json::from_str(r#"{"0":" Alice","1":"Bob","2":""}"#).unwrap();
        let built: SpeakerMap = [(0, " Alice"), (1, "Bob")].into_iter().collect();
        assert_eq!(parsed, built);
    }

    #[test]
    fn parse_assignment_accepts_spaces_in_name() {
        let (i, n) = SpeakerMap::parse_assignment("3 = Dr. Jane Doe").unwrap();
        assert_eq!(i, 3);
        assert_eq!(n, "Dr. Jane Doe");
    }

    #[test]
    fn parse_assignment_keeps_equals_in_name() {
        let (i, n) = SpeakerMap::parse_assignment("0=A=B").unwrap();
        assert_eq!(i, 0);
        assert_eq!(n, "A=B");
    }

    #[test]
    fn parse_assignment_rejects_malformed() {
        assert!(SpeakerMap::parse_assignment("Alice").is_err());
        assert!(SpeakerMap::parse_assignment("-1=Alice").is_err());
        assert!(SpeakerMap::parse_assignment("x=Alice").is_err());
    }

    #[test]
    fn serialises_as_plain_object() {
        let map: SpeakerMap = [(1, "Bob"), (0, "Alice")].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"0":"Alice","1":"Bob"}"#);
    }
}
