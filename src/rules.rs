//! Ordered keyword-rule engine mapping user text to a canned answer.
//!
//! Rules are evaluated strictly in declaration order and the first match
//! wins; there is no scoring and no backtracking. Ordering therefore carries
//! meaning: a rule requiring two co-occurring terms must come before any
//! broader rule that matches on either term alone, or the broad rule will
//! shadow it.

use crate::catalog::Answer;

/// A predicate in disjunctive normal form over substring containment:
/// the predicate holds if for any clause every keyword of that clause is
/// contained in the normalized message.
#[derive(Debug, Clone)]
pub struct Predicate {
    clauses: &'static [&'static [&'static str]],
}

impl Predicate {
    pub const fn new(clauses: &'static [&'static [&'static str]]) -> Self {
        Self { clauses }
    }

    /// Test against an already lower-cased message.
    pub fn matches(&self, normalized: &str) -> bool {
        self.clauses
            .iter()
            .any(|clause| clause.iter().all(|kw| normalized.contains(kw)))
    }
}

/// One (predicate, answer) pair.
#[derive(Debug, Clone)]
pub struct Rule {
    pub when: Predicate,
    pub answer: Answer,
}

/// The ordered rule list. A sequence, never a map: position is semantics.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

const fn rule(clauses: &'static [&'static [&'static str]], answer: Answer) -> Rule {
    Rule { when: Predicate::new(clauses), answer }
}

impl RuleSet {
    /// The built-in rule chain for the health-insurance domain.
    ///
    /// Order notes: the "ходоод"+"өвчин" pair precedes the medicine rules
    /// that match "өвчин" or "эм" alone, and the premium rules precede the
    /// discounted-medicine rules sharing "хэмжээ"/"эм" terms.
    pub fn builtin() -> Self {
        let rules = vec![
            rule(&[&["дэвтэргүй"], &["дэвтэр"]], Answer::NoBooklet),
            rule(&[&["ходоод", "өвчин"]], Answer::StomachIllness),
            rule(&[&["ханиад"], &["томуу"], &["эм", "ууж"]], Answer::ColdFlu),
            rule(&[&["парацетамол"]], Answer::Paracetamol),
            rule(
                &[
                    &["гэрээт", "эмнэлг"],
                    &["эмнэлэг", "гэрээ"],
                    &["эмнэлгүүд"],
                    &["эмд-тэй"],
                    &["жагсаалт", "эмнэлг"],
                    &["хөнгөлөлттэй эмчлүүлж"],
                ],
                Answer::ContractedHospitals,
            ),
            rule(
                &[&["шимтгэл"], &["төлбөр"], &["хураамж"], &["хэмжээ"], &["хэд вэ"]],
                Answer::FeeAmount,
            ),
            rule(&[&["дутуу сар"], &["шалгах"]], Answer::MissedMonths),
            rule(
                &[
                    &["хөнгөлөлт", "эм"],
                    &["эмийн жагсаалт"],
                    &["эмийн", "хөнгөлөлт"],
                    &["өвчин", "эм"],
                ],
                Answer::DiscountedMedicines,
            ),
            rule(
                &[
                    &["үйлчилгээ", "болох"],
                    &["тусламж", "авах"],
                    &["авч болох"],
                    &["үйлчилгээ", "авах"],
                ],
                Answer::CoveredServices,
            ),
            rule(&[&["төлөх"], &["сувг"], &["хаанаас"]], Answer::PaymentChannels),
            rule(&[&["заавал"], &["нөхөн төлөх"]], Answer::MandatoryCoverage),
            rule(&[&["битүүмж"]], Answer::Seal),
            rule(&[&["сайн"], &["өдрийн мэнд"]], Answer::Greeting),
        ];
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classify a raw user message.
    ///
    /// The empty string short-circuits to [`Answer::EmptyMessage`] without
    /// touching the rules. Otherwise the message is lower-cased once and the
    /// first rule whose predicate holds wins; no match yields
    /// [`Answer::General`]. Pure: no side effects, never fails.
    pub fn classify(&self, raw: &str) -> Answer {
        if raw.is_empty() {
            return Answer::EmptyMessage;
        }

        let normalized = raw.to_lowercase();

        for rule in &self.rules {
            if rule.when.matches(&normalized) {
                return rule.answer;
            }
        }

        Answer::General
    }
}
