pub mod engine;
pub mod people;

pub use engine::{
    Contribution, HIndexEngine, HIndexKind, NewContributor, h_index_from_sorted_desc,
};
pub use people::unique_participants;
