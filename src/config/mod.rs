pub mod settings;

pub use settings::{
    AnalyticsConfig, CostClubSettings, MilestoneSettings, PeopleSettings, SuggestionSettings,
};
