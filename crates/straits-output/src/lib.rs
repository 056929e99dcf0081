#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/straits-research/straits/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod columns;
pub mod export;
pub mod table;

pub use columns::Scale;
pub use export::{ExportError, ExportFormat, Exporter};
pub use table::format_for_export;

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
