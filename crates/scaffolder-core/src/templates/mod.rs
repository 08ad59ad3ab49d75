//! Template acquisition and copying
//!
//! This module provides:
//! - Template fetching from the package registry into a staging directory
//! - Staging directory ownership and cleanup
//! - Recursive tree copying with name-based exclusion

pub mod copier;
pub mod fetcher;
pub mod staging;

pub use copier::{copy_tree, CopyError, CopyOptions, CopyStats};
pub use fetcher::{AcquisitionError, TemplateFetcher};
pub use staging::{remove_dir_if_exists, StagingDir};
