#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/straits-research/straits/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod pipeline;

// Re-export the member crates
pub use straits_data as data;
pub use straits_extract as extract;
pub use straits_output as output;
pub use straits_segments as segments;

pub use pipeline::{Outcome, Pipeline, PipelineConfig, PipelineReport, fill_exchange_rates};

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
