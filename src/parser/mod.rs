//! Tolerant extraction of structured pieces from free-text oracle output.
//! None of these functions fail on malformed input; each has a fallback.

pub mod code;
pub mod fields;
pub mod json;

pub use code::extract_code;
pub use fields::{parse_labeled_fields, LabeledFields};
pub use json::extract_json;
