//! Maps a free-text testing request onto an operating mode and, for
//! spec-violation runs, a vulnerability category.

pub mod classifier;

pub use classifier::{
    classify_category, classify_mode, OperatingMode, VulnerabilityCategory, DEFAULT_CATEGORY,
};
