//! Rule-based chatbot service for Mongolia's national health-insurance
//! program (ЭМД). Classifies free-text questions against an ordered keyword
//! rule set, or relays them to a Rasa NLU webhook with local fallback, and
//! serves hospital/medicine lookups from SQLite.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod fallback;
pub mod rasa;
pub mod rules;
pub mod server;
pub mod store;
