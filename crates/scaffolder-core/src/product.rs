//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface that each starter CLI must implement
//! to configure which template package is fetched and how it is installed.

use crate::runtime::PackageManager;
use std::path::Path;

/// Name of the staging directory created in the working directory for downloads
pub const DEFAULT_STAGING_DIR: &str = ".temp-starter";

/// Configuration trait for different starter products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - The template package fetched from the registry
/// - Where the bundled template lives for local development
/// - Which path segments are never copied into a new project
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Scoped registry identifier of the template package
    fn package_name(&self) -> &'static str;

    /// Template directory used by `--local`, relative to the directory holding the executable
    fn local_template_dir(&self) -> &'static str;

    /// Package manager used to fetch the template and install dependencies
    fn package_manager(&self) -> PackageManager {
        PackageManager::pnpm()
    }

    /// Staging directory name, created inside the working directory
    fn staging_dir_name(&self) -> &'static str {
        DEFAULT_STAGING_DIR
    }

    /// Path segments skipped while copying, in addition to the staging directory
    fn excluded_names(&self) -> &'static [&'static str] {
        &["node_modules", ".git", "dist"]
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path) -> Vec<String>;
}
