//! Job categories a hero can be listed under.
//!
//! Categories are a fixed set of well-known trades plus an escape hatch for
//! free text entered by an admin. The wire and storage form is always the
//! display label (e.g. `"Instalator"`), so existing rows keep working when a
//! custom category is later promoted to a known one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The trades the directory knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownCategory {
    Electrician,
    Plumber,
    Mechanic,
    Cleaner,
    Painter,
    Carpenter,
    Locksmith,
    Other,
}

impl KnownCategory {
    pub const ALL: [KnownCategory; 8] = [
        KnownCategory::Electrician,
        KnownCategory::Plumber,
        KnownCategory::Mechanic,
        KnownCategory::Cleaner,
        KnownCategory::Painter,
        KnownCategory::Carpenter,
        KnownCategory::Locksmith,
        KnownCategory::Other,
    ];

    /// Label shown to clients and stored in the database.
    pub fn label(&self) -> &'static str {
        match self {
            KnownCategory::Electrician => "Electrician",
            KnownCategory::Plumber => "Instalator",
            KnownCategory::Mechanic => "Mecanic",
            KnownCategory::Cleaner => "Curățenie",
            KnownCategory::Painter => "Zugrav",
            KnownCategory::Carpenter => "Tâmplar",
            KnownCategory::Locksmith => "Lăcătuș",
            KnownCategory::Other => "Altele",
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            KnownCategory::Electrician => "ELECTRICIAN",
            KnownCategory::Plumber => "PLUMBER",
            KnownCategory::Mechanic => "MECHANIC",
            KnownCategory::Cleaner => "CLEANER",
            KnownCategory::Painter => "PAINTER",
            KnownCategory::Carpenter => "CARPENTER",
            KnownCategory::Locksmith => "LOCKSMITH",
            KnownCategory::Other => "OTHER",
        }
    }

    /// Case-insensitive lookup by label or by English variant name.
    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.label().to_uppercase() == wanted || c.variant_name() == wanted)
    }
}

/// A hero's category: either a known trade or admin-entered free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobCategory {
    Known(KnownCategory),
    Custom(String),
}

impl JobCategory {
    pub fn label(&self) -> &str {
        match self {
            JobCategory::Known(known) => known.label(),
            JobCategory::Custom(text) => text,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, JobCategory::Known(_))
    }

    /// Upper-cased label used for filter comparisons and the category list.
    pub fn filter_key(&self) -> String {
        self.label().to_uppercase()
    }
}

impl From<KnownCategory> for JobCategory {
    fn from(known: KnownCategory) -> Self {
        JobCategory::Known(known)
    }
}

impl From<String> for JobCategory {
    fn from(raw: String) -> Self {
        match KnownCategory::parse(&raw) {
            Some(known) => JobCategory::Known(known),
            None => JobCategory::Custom(raw.trim().to_string()),
        }
    }
}

impl From<&str> for JobCategory {
    fn from(raw: &str) -> Self {
        JobCategory::from(raw.to_string())
    }
}

impl From<JobCategory> for String {
    fn from(category: JobCategory) -> Self {
        match category {
            JobCategory::Known(known) => known.label().to_string(),
            JobCategory::Custom(text) => text,
        }
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
