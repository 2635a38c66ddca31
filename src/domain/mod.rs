pub mod models;

pub use models::{
    Classification, GameId, GameRecord, LocationId, Metric, MetricSnapshot, OwnedCopy,
    ParticipantId, PlayRecord,
};
