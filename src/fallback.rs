//! Local fallback replies for when the remote NLU cannot be reached.

use rand::seq::SliceRandom;

use crate::catalog::{Answer, CANNOT_REPLY_TEXT};

/// How the selector picks a reply, chosen by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackMode {
    /// Match the message against an ordered keyword table.
    Keyword,
    /// Ignore the message and pick uniformly from a fixed pool.
    Random,
}

/// Ordered topic table for the keyword variant. First match wins, same as
/// the rule engine.
const KEYWORD_TABLE: &[(&[&str], Answer)] = &[
    (&["сайн", "мэнд"], Answer::Greeting),
    (&["эмнэлэг"], Answer::ContractedHospitals),
    (&["эм"], Answer::DiscountedMedicines),
    (&["шимтгэл", "төлбөр", "хураамж"], Answer::FeeAmount),
    (&["үйлчилгээ"], Answer::CoveredServices),
    (&["төлөх", "сувг"], Answer::PaymentChannels),
];

/// Generic pool for the random variant.
const RANDOM_POOL: &[&str] = &[
    Answer::General.text(),
    Answer::Greeting.text(),
    CANNOT_REPLY_TEXT,
];

pub struct FallbackSelector {
    mode: FallbackMode,
}

impl FallbackSelector {
    pub fn new(mode: FallbackMode) -> Self {
        Self { mode }
    }

    /// Pick a canned reply. Never fails; `None` or an unrecognized message
    /// yields the domain-default text in keyword mode.
    pub fn select(&self, message: Option<&str>) -> &'static str {
        match self.mode {
            FallbackMode::Keyword => {
                let Some(message) = message else {
                    return Answer::General.text();
                };
                let normalized = message.to_lowercase();
                for (keywords, answer) in KEYWORD_TABLE {
                    if keywords.iter().any(|kw| normalized.contains(kw)) {
                        return answer.text();
                    }
                }
                Answer::General.text()
            }
            FallbackMode::Random => {
                let mut rng = rand::thread_rng();
                RANDOM_POOL
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(Answer::General.text())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_keyword_wins_regardless_of_rest() {
        let selector = FallbackSelector::new(FallbackMode::Keyword);
        assert_eq!(
            selector.select(Some("сайн байна уу, эмнэлэг хаана вэ")),
            Answer::Greeting.text()
        );
    }

    #[test]
    fn test_hospital_keyword() {
        let selector = FallbackSelector::new(FallbackMode::Keyword);
        assert_eq!(
            selector.select(Some("ойрхон эмнэлэг")),
            Answer::ContractedHospitals.text()
        );
    }

    #[test]
    fn test_unindexed_message_gets_default() {
        let selector = FallbackSelector::new(FallbackMode::Keyword);
        assert_eq!(selector.select(Some("цаг агаар ямар байна")), Answer::General.text());
    }

    #[test]
    fn test_missing_message_gets_default() {
        let selector = FallbackSelector::new(FallbackMode::Keyword);
        assert_eq!(selector.select(None), Answer::General.text());
    }

    #[test]
    fn test_random_picks_from_the_pool() {
        let selector = FallbackSelector::new(FallbackMode::Random);
        for _ in 0..50 {
            let pick = selector.select(Some("anything"));
            assert!(RANDOM_POOL.contains(&pick));
        }
    }
}
