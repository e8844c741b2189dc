//! # prepwise-engine - Adaptive Learning Engine
//!
//! Pure-Rust core of the exam-preparation product: it models per-user,
//! per-topic mastery from historical question attempts, classifies topics
//! into weak/average/strong sets, and composes adaptive tests biased
//! toward a learner's demonstrated weak areas.
//!
//! Design goals:
//! - **Pure Rust** - no web or database surface; storage is supplied by
//!   the embedder through the [`AttemptStore`] and [`QuestionRepository`]
//!   traits
//! - **Stateless** - mastery is recomputed from the attempt history on
//!   every call, so results are always consistent with visible history
//! - **Reproducible** - selection randomness comes from a seedable
//!   generator so tests can pin exact outputs
//! - **Explainable** - every composed test carries a composition
//!   breakdown and a human-readable rationale
//!
//! ## Module structure
//!
//! - [`mastery`] - mastery aggregation and trend detection
//! - [`classify`] - weak/average/strong topic classification
//! - [`composer`] - adaptive test composition
//! - [`recommend`] - next-action and difficulty-distribution suggestions
//! - [`engine`] - the [`AdaptiveEngine`] facade
//! - [`store`] - collaborator traits and in-memory implementations
//! - [`types`] - shared types and tuning constants
//!
//! ## Usage example
//!
//! ```rust
//! use prepwise_engine::{
//!     AdaptiveEngine, AdaptiveTestConfig, Difficulty, MemoryAttemptStore,
//!     MemoryQuestionBank, Question,
//! };
//!
//! # fn main() -> Result<(), prepwise_engine::EngineError> {
//! let bank = MemoryQuestionBank::new(
//!     (0..10)
//!         .map(|i| Question {
//!             id: format!("q{i}"),
//!             subject: "Physics".to_string(),
//!             topic: "Optics".to_string(),
//!             difficulty: Difficulty::Medium,
//!             content: serde_json::Value::Null,
//!         })
//!         .collect(),
//! );
//!
//! let mut engine = AdaptiveEngine::with_seed(MemoryAttemptStore::new(), bank, 42);
//! let test = engine.generate_adaptive_test(&AdaptiveTestConfig {
//!     user_id: "learner-1".to_string(),
//!     number_of_questions: 5,
//!     focus_on_weak_areas: 70,
//!     include_strong_areas: true,
//!     subject: None,
//! })?;
//!
//! // A user with no history gets a neutral baseline test.
//! assert_eq!(test.questions.len(), 5);
//! assert_eq!(test.composition.medium_questions, 5);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod composer;
pub mod engine;
pub mod error;
pub mod mastery;
pub mod recommend;
pub mod store;
pub mod types;

pub use engine::AdaptiveEngine;
pub use error::{EngineError, StoreError};
pub use store::{AttemptStore, MemoryAttemptStore, MemoryQuestionBank, QuestionRepository};
pub use types::*;
