//! Local, deterministic text checks
//!
//! - `input`       → is the raw user string worth a network call
//! - `markdown`    → emphasis balancing and code-format stripping
//! - `report_text` → word-count annotation removal and word counting

pub mod input;
pub mod markdown;
pub mod report_text;

pub use input::{assess, is_meaningful, InputRejection};
pub use markdown::sanitize_markdown;
pub use report_text::{clean_report_text, word_count};
