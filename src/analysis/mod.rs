pub mod frequency;
pub mod statistics;

pub use frequency::{top_k, FrequencyEntry, FrequencyTable};
pub use statistics::{display_label, Statistics, EMPTY_LABEL, NOT_AVAILABLE};
