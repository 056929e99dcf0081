#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/straits-research/straits/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod record;
pub mod snapshot;
pub mod universe;
pub mod yahoo;

pub use error::{DataError, Result};
pub use record::{Cell, CompanyInfo, HolderTable, Officer, RawRecord, StatementTable};
pub use snapshot::{RecordSource, SnapshotSource};
pub use universe::Exchange;
pub use yahoo::RENMINBI_LABEL;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
