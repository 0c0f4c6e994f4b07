//! INI codec: text ⇄ [`SectionMap`](crate::domain::section::SectionMap).

pub mod codec;

pub use codec::{parse, serialize, ParsedFile, SkipReason, SkippedLine};
