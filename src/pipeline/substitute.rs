//! Speaker substitution: replace `Speaker N` labels with display names.
//!
//! Every mapped index `i` replaces each literal occurrence of `Speaker {i}`.
//! There is no digit boundary: with only index 1 named `Bob`, `Speaker 10`
//! becomes `Bob0`. All mapped patterns are applied in one left-to-right
//! scan, and where two patterns match at the same position the longer one
//! wins (`Speaker 10` over `Speaker 1` when both are named). Replacement
//! text is never rescanned, so the result does not depend on the order in
//! which indices are visited.
//!
//! [`detect_labels`] reports labels as `Speaker ` plus the full digit run,
//! so `Speaker 10` is reported as label 10.

use crate::speakers::SpeakerMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

static RE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"Speaker (\d+)").unwrap());

/// How many labels were replaced, per speaker index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionStats {
    pub replaced: BTreeMap<u32, usize>,
}

impl SubstitutionStats {
    /// Total labels replaced across all speakers.
    pub fn total(&self) -> usize {
        self.replaced.values().sum()
    }
}

/// Replace every named speaker label in `text`.
pub fn substitute_speakers(text: &str, speakers: &SpeakerMap) -> (String, SubstitutionStats) {
    let mut stats = SubstitutionStats::default();
    if speakers.is_empty() {
        return (text.to_string(), stats);
    }

    // Decimal keys, longest first, so a longer mapped index wins.
    let mut keys: Vec<(String, u32, &str)> = speakers
        .iter()
        .map(|(index, name)| (index.to_string(), index, name))
        .collect();
    keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let replaced = RE_LABEL.replace_all(text, |caps: &Captures<'_>| {
        let digits = &caps[1];
        match keys.iter().find(|(key, ..)| digits.starts_with(key.as_str())) {
            Some((key, index, name)) => {
                *stats.replaced.entry(*index).or_insert(0) += 1;
                format!("{name}{}", &digits[key.len()..])
            }
            None => caps[0].to_string(),
        }
    });

    (replaced.into_owned(), stats)
}

/// Speaker indices that appear as labels in `text`.
pub fn detect_labels(text: &str) -> BTreeSet<u32> {
    RE_LABEL
        .captures_iter(text)
        .filter_map(|caps| label_index(&caps[1]))
        .collect()
}

/// Parse a reported label's digit run, rejecting leading zeros and `u32`
/// overflow.
fn label_index(digits: &str) -> Option<u32> {
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}
