pub mod config;
pub mod domain;
pub mod hindex;
pub mod metrics;
pub mod suggest;
pub mod tiers;

pub use config::AnalyticsConfig;
pub use domain::{Classification, GameRecord, Metric, MetricSnapshot, PlayRecord};
pub use hindex::{HIndexEngine, HIndexKind};
pub use suggest::{Suggestion, SuggestionEngine};
pub use tiers::{
    CostClubSemantics, Direction, MilestoneSemantics, TierCollection, TierEngine,
};
