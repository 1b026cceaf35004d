// Veridity Core Services

pub mod text_processor;
pub mod config;
pub mod detection;

pub use text_processor::*;
pub use config::*;

pub use detection::{AnalysisError, ContradictionRule, FraudDetector};
