#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/straits-research/straits/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod enrich;
pub mod error;
pub mod gemini;
pub mod oracle;
pub mod prompt;

pub use config::SegmentConfig;
pub use enrich::enrich_segments;
pub use error::{Result, SegmentError};
pub use gemini::GeminiClient;
pub use oracle::SegmentOracle;
pub use prompt::parse_segment_response;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
