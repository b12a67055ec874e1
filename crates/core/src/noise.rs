//! Settlement-noise suppression.
//!
//! Card exports carry rows that only move money between the user's own
//! accounts (autopay postings, "payment thank you" lines, reversals). They are
//! dropped by case-insensitive substring match on the description.

use serde::{Deserialize, Deserializer, Serialize};

use crate::transaction::CanonicalTransaction;

pub const DEFAULT_NOISE_PHRASES: &[&str] = &[
    "autopay pymt",
    "payment thank you",
    "automatic payment",
    "returned payment",
    "reversal",
];

/// Ordered list of lower-cased phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NoisePhraseList {
    phrases: Vec<String>,
}

impl NoisePhraseList {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// The first phrase found in `description`, if any.
    pub fn matching_phrase(&self, description: &str) -> Option<&str> {
        let desc = description.to_lowercase();
        self.phrases
            .iter()
            .find(|phrase| desc.contains(phrase.as_str()))
            .map(String::as_str)
    }

    /// Null descriptions are never noise.
    pub fn is_noise(&self, description: Option<&str>) -> bool {
        description.is_some_and(|d| self.matching_phrase(d).is_some())
    }

    pub fn retain_real(&self, transactions: &mut Vec<CanonicalTransaction>) -> usize {
        let before = transactions.len();
        transactions.retain(|tx| !self.is_noise(tx.description.as_deref()));
        before - transactions.len()
    }

    pub fn filter(&self, transactions: Vec<CanonicalTransaction>) -> Vec<CanonicalTransaction> {
        let mut transactions = transactions;
        self.retain_real(&mut transactions);
        transactions
    }
}

impl Default for NoisePhraseList {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_PHRASES)
    }
}

// Lower-case on the way in so configured phrases behave like the defaults.
impl<'de> Deserialize<'de> for NoisePhraseList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let phrases = Vec::<String>::deserialize(deserializer)?;
        Ok(NoisePhraseList::new(phrases))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn tx(description: Option<&str>) -> CanonicalTransaction {
        CanonicalTransaction {
            date: None,
            description: description.map(str::to_string),
            category: None,
            amount: Some(Money::from_cents(-10000)),
            account: "Chase".to_string(),
            grouped_category: "Other".to_string(),
        }
    }

    #[test]
    fn matches_configured_phrase() {
        let list = NoisePhraseList::default();
        assert!(list.is_noise(Some("AUTOPAY PYMT 0123")));
        assert!(list.is_noise(Some("Payment Thank You - Web")));
        assert!(list.is_noise(Some("CHARGE REVERSAL")));
    }

    #[test]
    fn case_insensitive_both_ways() {
        let list = NoisePhraseList::new(["Automatic PAYMENT"]);
        assert!(list.is_noise(Some("automatic payment - thank")));
        assert!(list.is_noise(Some("AUTOMATIC PAYMENT")));
        assert_eq!(list.phrases(), ["automatic payment"]);
    }

    #[test]
    fn null_description_never_noise() {
        assert!(!NoisePhraseList::default().is_noise(None));
    }

    #[test]
    fn ordinary_purchase_is_kept() {
        let list = NoisePhraseList::default();
        assert!(!list.is_noise(Some("WHOLE FOODS MARKET")));
        assert!(!list.is_noise(Some("")));
    }

    #[test]
    fn empty_phrases_are_dropped() {
        let list = NoisePhraseList::new(["", "reversal"]);
        assert_eq!(list.phrases().len(), 1);
        assert!(!list.is_noise(Some("STARBUCKS")));
    }

    #[test]
    fn matching_phrase_reports_first_hit() {
        let list = NoisePhraseList::default();
        assert_eq!(
            list.matching_phrase("RETURNED PAYMENT REVERSAL"),
            Some("returned payment")
        );
    }

    #[test]
    fn filter_drops_noise_and_keeps_null_descriptions() {
        let list = NoisePhraseList::default();
        let kept = list.filter(vec![
            tx(Some("Payment Thank You-Mobile")),
            tx(Some("TRADER JOE'S")),
            tx(None),
        ]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].description.as_deref(), Some("TRADER JOE'S"));
        assert_eq!(kept[1].description, None);
    }

    #[test]
    fn retain_real_counts_removed() {
        let list = NoisePhraseList::default();
        let mut txs = vec![tx(Some("AUTOPAY PYMT")), tx(Some("reversal of fee")), tx(Some("GAS"))];
        assert_eq!(list.retain_real(&mut txs), 2);
        assert_eq!(txs.len(), 1);
    }

    #[test]
    fn deserialize_lowercases() {
        let list: NoisePhraseList = serde_json::from_str(r#"["Zelle TRANSFER"]"#).unwrap();
        assert!(list.is_noise(Some("zelle transfer to savings")));
    }
}
