use crate::domain::ParticipantId;

/// Ascending milestone thresholds over raw metric counts
#[derive(Debug, Clone)]
pub struct MilestoneSettings {
    pub thresholds: Vec<f64>,
}

impl Default for MilestoneSettings {
    fn default() -> Self {
        Self {
            thresholds: vec![5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0],
        }
    }
}

/// Descending cost-per-unit club thresholds over price ÷ metric
#[derive(Debug, Clone)]
pub struct CostClubSettings {
    pub thresholds: Vec<f64>,
}

impl Default for CostClubSettings {
    fn default() -> Self {
        Self {
            thresholds: vec![100.0, 50.0, 25.0, 10.0, 5.0, 2.5, 1.0],
        }
    }
}

/// Participant ids with special counting rules in the people h-index
#[derive(Debug, Clone)]
pub struct PeopleSettings {
    /// Excluded from every count
    pub self_participant: ParticipantId,
    /// Counted once per occurrence, never deduplicated
    pub anonymous_participant: ParticipantId,
}

impl Default for PeopleSettings {
    fn default() -> Self {
        Self {
            self_participant: 1,
            anonymous_participant: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SuggestionSettings {
    /// Lookback window for the "recently played" strategy
    pub recent_window_days: i64,
    /// Enables price-aware strategies and aggregates
    pub experimental: bool,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            recent_window_days: 30,
            experimental: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    pub milestones: MilestoneSettings,
    pub cost_clubs: CostClubSettings,
    pub people: PeopleSettings,
    pub suggestions: SuggestionSettings,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsConfig {
    pub fn new() -> Self {
        Self {
            milestones: MilestoneSettings::default(),
            cost_clubs: CostClubSettings::default(),
            people: PeopleSettings::default(),
            suggestions: SuggestionSettings::default(),
        }
    }
}

// Prefer passing these explicitly (dependency injection) rather than globals.
