//! Per-publisher extraction rules.
//!
//! Rules map a publisher domain to a content selection strategy plus a set
//! of URL substrings that exclude hits from fetching. The table preserves
//! insertion order and resolves lookups by first substring match.

mod selector;
mod table;

pub use selector::ContentSelector;
pub use table::{ExtractionRule, RuleTable};
