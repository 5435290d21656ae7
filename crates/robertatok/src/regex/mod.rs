//! # Regex Utilities

pub mod exact_match_union;
pub mod pattern_tools;

#[doc(inline)]
pub use exact_match_union::exact_match_union_regex_pattern;
