#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/straits-research/straits/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod extractor;
pub mod line_items;
pub mod market_tier;
pub mod record;
pub mod resolver;
pub mod shareholders;

pub use extractor::Extractor;
pub use line_items::{LineItemMap, Metric, MetricChain};
pub use market_tier::{MarketTier, classify};
pub use record::{CanonicalRecord, NOT_AVAILABLE};
pub use resolver::{PeriodView, Statement, resolve};
pub use shareholders::{HolderKind, format_shareholders};

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
