//! Tiered option matching: exact, then prefix, then (optionally) substring.

use dom_port::ChoiceOption;
use serde::{Deserialize, Serialize};

use crate::model::{MatchKey, MatchTier};
use crate::normalize::normalize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchHit {
    /// Position in the option list.
    pub index: usize,
    pub tier: MatchTier,
    pub key: MatchKey,
}

/// Normalized view of one option, built per matching call.
struct Candidate {
    text: String,
    value: String,
}

impl Candidate {
    fn key(&self, key: MatchKey) -> &str {
        match key {
            MatchKey::Value => &self.value,
            MatchKey::Text => &self.text,
        }
    }
}

/// Picks the option `raw` designates.
///
/// Within a tier, the first key in `order` with any hit wins, and within a
/// key the first option in list order wins. In the substring tier several
/// hits are narrowed to the one with the shortest normalized display text,
/// whichever key produced them. Label length is measured in UTF-16 code
/// units, the unit page scripts see.
pub fn best_match(
    options: &[ChoiceOption],
    raw: &str,
    order: [MatchKey; 2],
    allow_contains: bool,
) -> Option<MatchHit> {
    let input = normalize(raw);
    let candidates: Vec<Candidate> = options
        .iter()
        .map(|opt| Candidate {
            text: normalize(&opt.text),
            value: normalize(&opt.value),
        })
        .collect();

    let first_hit = |tier: MatchTier, test: &dyn Fn(&str) -> bool| {
        order.iter().find_map(|&key| {
            candidates
                .iter()
                .position(|cand| test(cand.key(key)))
                .map(|index| MatchHit { index, tier, key })
        })
    };

    if let Some(hit) = first_hit(MatchTier::Exact, &|key| key == input) {
        return Some(hit);
    }
    if let Some(hit) = first_hit(MatchTier::Prefix, &|key| key.starts_with(&input)) {
        return Some(hit);
    }
    if !allow_contains {
        return None;
    }

    for &key in &order {
        let shortest = candidates
            .iter()
            .enumerate()
            .filter(|(_, cand)| cand.key(key).contains(&input))
            .min_by_key(|(_, cand)| cand.text.encode_utf16().count());
        if let Some((index, _)) = shortest {
            return Some(MatchHit {
                index,
                tier: MatchTier::Contains,
                key,
            });
        }
    }
    None
}
