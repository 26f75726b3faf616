pub mod analysis;
pub mod search;
pub mod types;

pub use analysis::{
    filter_by_aspect, filter_by_body, is_outer_body, most_important, score_all, score_transit,
};
pub use search::TransitSearcher;
pub use types::{ExactTransit, RefineStrategy, SearchSettings, TransitEvent, TransitScore};
