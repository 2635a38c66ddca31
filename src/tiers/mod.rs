pub mod collection;
pub mod engine;
pub mod semantics;

pub use collection::{Direction, TierBounds, TierCollection};
pub use engine::{GameFilter, NewEntrant, TierEngine, TierMembership};
pub use semantics::{CostClubSemantics, MilestoneSemantics, TierSemantics};
