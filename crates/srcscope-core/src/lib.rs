//! srcscope-core: Settings, path matching, exclusion filters, and logging for srcscope.

pub mod build_info;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod matcher;
pub mod paths;
pub mod version;

pub use config::{IndexerSettings, SourceGroupSettings};
pub use error::{Error, Result};
pub use filter::{ExcludeFilters, PathFilter};
pub use version::Version;
