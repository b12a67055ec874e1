use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grouped category for any raw label the taxonomy does not know.
pub const OTHER: &str = "Other";

pub const DEFAULT_CATEGORY_MAP: &[(&str, &str)] = &[
    ("Groceries", "Groceries"),
    ("Food & Drink", "Dining Out"),
    ("Shopping", "Shopping"),
    ("Merchandise", "Shopping"),
    ("Personal", "Personal/Health"),
    ("Health & Wellness", "Personal/Health"),
    ("Education", "Personal/Health"),
    ("Insurance", "Bills & Utilities"),
    ("Internet", "Bills & Utilities"),
    ("Gas", "Auto & Travel"),
    ("Automotive", "Auto & Travel"),
    ("Travel", "Auto & Travel"),
];

/// Fixed lookup from an institution's category label to a shared group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTaxonomy {
    groups: BTreeMap<String, String>,
}

impl CategoryTaxonomy {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            groups: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Total: labels absent from the table, and missing labels, map to `"Other"`.
    pub fn group(&self, raw: Option<&str>) -> &str {
        raw.and_then(|label| self.groups.get(label))
            .map(String::as_str)
            .unwrap_or(OTHER)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY_MAP.iter().copied())
    }
}
