//! Hero directory filtering, search, and ordering.
//!
//! Works over anything implementing [`DirectoryEntry`] so the same rules
//! apply to database rows and to test fixtures.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::category::KnownCategory;

/// Category filter value meaning "no filter".
pub const ALL_CATEGORIES: &str = "ALL";

/// The fields the directory needs from a hero.
pub trait DirectoryEntry {
    fn alias(&self) -> &str;
    fn real_name(&self) -> Option<&str>;
    fn category_label(&self) -> &str;
    fn trust_factor(&self) -> i64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectorySort {
    /// Highest trust factor first.
    Trust,
}

/// Query-string options for the hero directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub sort: Option<DirectorySort>,
}

impl DirectoryQuery {
    pub fn is_empty(&self) -> bool {
        self.category_filter().is_none() && self.search_term().is_none() && self.sort.is_none()
    }

    fn category_filter(&self) -> Option<String> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES))
            .map(str::to_uppercase)
    }

    fn search_term(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches<T: DirectoryEntry>(&self, entry: &T) -> bool {
        let category_ok = match self.category_filter() {
            Some(wanted) => entry.category_label().to_uppercase() == wanted,
            None => true,
        };
        let search_ok = match self.search_term() {
            Some(term) => {
                entry.alias().to_lowercase().contains(&term)
                    || entry
                        .real_name()
                        .is_some_and(|name| name.to_lowercase().contains(&term))
            }
            None => true,
        };
        category_ok && search_ok
    }

    /// Filter `entries` and, when requested, order them.
    ///
    /// The trust sort is stable, so heroes with equal trust keep their
    /// incoming order.
    pub fn apply<T: DirectoryEntry>(&self, entries: Vec<T>) -> Vec<T> {
        let mut kept: Vec<T> = entries.into_iter().filter(|e| self.matches(e)).collect();
        if self.sort == Some(DirectorySort::Trust) {
            kept.sort_by(|a, b| b.trust_factor().cmp(&a.trust_factor()));
        }
        kept
    }
}

/// Every known category plus every category in use, upper-cased, unique and
/// sorted.
pub fn category_list<'a, I>(in_use: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut set: BTreeSet<String> = KnownCategory::ALL
        .iter()
        .map(|c| c.label().to_uppercase())
        .collect();
    set.extend(
        in_use
            .into_iter()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase),
    );
    set.into_iter().collect()
}
