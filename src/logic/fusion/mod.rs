//! Fusion Module
//!
//! Turns a model score plus deterministic text signals into a labeled decision.
//! This is the CORE STEP - where Phishing / Possibly Safe / Not Phishing is decided.
//!
//! ## Structure
//! - `types`: Core types (VerdictLabel, ModelOutput, SignalSet, Decision, FusionOutcome)
//! - `vocabulary`: Domain and keyword lists
//! - `signals`: URL, domain and keyword extraction
//! - `rules`: Thresholds and the ordered rule list
//! - `engine`: The fuser
//!
//! ## Usage
//! ```ignore
//! use crate::logic::fusion::{Fuser, ModelOutput, VerdictLabel};
//!
//! let fuser = Fuser::default();
//! let decision = fuser.fuse(text, &ModelOutput::new("label_1", 0.93));
//! match decision.label {
//!     VerdictLabel::Phishing => warn_user(),
//!     VerdictLabel::NotPhishing => {}
//!     _ => ask_user_to_double_check(),
//! }
//! ```

pub mod types;
pub mod vocabulary;
pub mod signals;
pub mod rules;
pub mod engine;


pub use types::{Decision, FusionOutcome, ModelOutput, VerdictLabel};
pub use vocabulary::{Vocabulary, VocabularyError};
pub use rules::ConfidenceThresholds;
pub use engine::Fuser;
