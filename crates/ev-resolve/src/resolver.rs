//! Query → catalog entry resolution.

use ev_catalog::AreaCatalog;
use ev_core::{AreaId, normalize_name};

use crate::similarity::score;

/// Acceptance threshold used when none is configured.
pub const DEFAULT_THRESHOLD: u8 = 50;

/// Outcome of resolving one query.
///
/// `matched` and `name` are both `Some` when the best candidate reached the
/// threshold.  `confidence` is always the best score seen, so a rejected
/// query still reports how close it came.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub matched:    Option<AreaId>,
    /// Canonical (normalized) name of the match.
    pub name:       Option<String>,
    pub confidence: u8,
}

impl Resolution {
    pub fn no_match(confidence: u8) -> Self {
        Self { matched: None, name: None, confidence }
    }

    #[inline]
    pub fn is_match(&self) -> bool {
        self.matched.is_some()
    }
}

/// Fuzzy matcher over an [`AreaCatalog`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceResolver {
    /// Inclusive: a best score equal to the threshold is accepted.
    pub threshold: u8,
}

impl Default for PlaceResolver {
    fn default() -> Self {
        Self { threshold: DEFAULT_THRESHOLD }
    }
}

impl PlaceResolver {
    pub fn with_threshold(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Resolve `query` to the best-scoring catalog entry.
    ///
    /// Ties go to the entry that appears first in the catalog.  A blank
    /// query returns confidence 0 without scoring anything.
    pub fn resolve(&self, query: &str, catalog: &AreaCatalog) -> Resolution {
        let query = normalize_name(query);
        if query.is_empty() {
            return Resolution::no_match(0);
        }

        let mut best: Option<(AreaId, u8)> = None;
        for (id, rec) in catalog.iter() {
            let s = score(&query, &rec.name);
            if best.is_none_or(|(_, b)| s > b) {
                best = Some((id, s));
                if s == 100 {
                    break;
                }
            }
        }

        match best {
            Some((id, confidence)) if confidence >= self.threshold => {
                log::debug!("resolved {query:?} to {:?} ({confidence})", catalog[id].name);
                Resolution {
                    matched: Some(id),
                    name: Some(catalog[id].name.clone()),
                    confidence,
                }
            }
            Some((_, confidence)) => Resolution::no_match(confidence),
            None => Resolution::no_match(0),
        }
    }

    /// Up to `limit` `(name, score)` pairs, best first.  Equal scores keep
    /// catalog order.  Blank queries yield nothing.
    pub fn suggest(&self, query: &str, catalog: &AreaCatalog, limit: usize) -> Vec<(String, u8)> {
        let query = normalize_name(query);
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(String, u8)> = catalog
            .names()
            .map(|name| (name.to_owned(), score(&query, name)))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(limit);
        scored
    }
}
