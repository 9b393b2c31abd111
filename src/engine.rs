//! Response pipeline: turns a raw user message into final reply text.
//!
//! Two classification paths exist. The rules path evaluates the local rule
//! chain; the remote path asks the NLU webhook and degrades to the local
//! fallback selector when the service is unreachable. Every path ends in a
//! textual reply; nothing here surfaces an error to the user.

use std::sync::Arc;
use tracing::{info, warn};

use crate::catalog::Answer;
use crate::fallback::FallbackSelector;
use crate::rasa::{NluReply, RasaClient};
use crate::rules::RuleSet;
use crate::store::Store;

/// Which classification path answers the chat endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    /// Local ordered keyword rules.
    Rules,
    /// Remote NLU webhook, with local fallback on unreachability.
    Remote,
}

pub struct ChatEngine {
    mode: EngineMode,
    rules: RuleSet,
    rasa: RasaClient,
    fallback: FallbackSelector,
    /// Unanswered-question log. Side channel only: a write failure never
    /// changes the reply.
    store: Option<Arc<Store>>,
}

impl ChatEngine {
    pub fn new(mode: EngineMode, rasa: RasaClient, fallback: FallbackSelector) -> Self {
        Self {
            mode,
            rules: RuleSet::builtin(),
            rasa,
            fallback,
            store: None,
        }
    }

    /// Attach the store so unmatched questions get logged.
    pub fn with_store(mut self, store: Arc<Store>) -> Self {
        self.store = Some(store);
        self
    }

    /// Produce the reply text for one message. Always returns text.
    pub async fn respond(&self, raw: &str) -> String {
        if raw.is_empty() {
            return Answer::EmptyMessage.text().to_string();
        }

        match self.mode {
            EngineMode::Rules => {
                let answer = self.rules.classify(raw);
                if answer == Answer::General {
                    self.log_unanswered(raw);
                }
                answer.text().to_string()
            }
            EngineMode::Remote => match self.rasa.dispatch(raw).await {
                NluReply::Text(text) => text,
                NluReply::Unreachable => {
                    info!("NLU unreachable, answering from local fallback");
                    self.fallback.select(Some(raw)).to_string()
                }
                NluReply::Failed(text) => text,
            },
        }
    }

    fn log_unanswered(&self, question: &str) {
        let Some(store) = &self.store else { return };
        if let Err(e) = store.save_unanswered(question) {
            warn!("Failed to log unanswered question: {e}");
        }
    }
}
