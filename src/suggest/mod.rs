pub mod engine;
pub mod sampling;

pub use engine::{Suggestion, SuggestionEngine};
pub use sampling::{uniform_pick, weighted_pick};
