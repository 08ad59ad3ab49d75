//! Template acquisition from the package registry
//!
//! The template ships as a registry package. Fetching it means creating a
//! staging directory and asking the package manager to add the package there;
//! its files then sit under the staging directory's `node_modules`.

use super::staging::{remove_dir_if_exists, StagingDir};
use crate::product::ProductConfig;
use crate::runtime::{run_checked, CommandError, CommandRunner, PackageManager};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to stage the template package
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("Failed to create staging directory {}", path.display())]
    CreateStaging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to download template package {package}")]
    Fetch {
        package: String,
        #[source]
        source: CommandError,
    },
}

/// Template fetcher - stages a template package through the package manager
pub struct TemplateFetcher<'a, R> {
    runner: &'a R,
    package_manager: PackageManager,
    package: &'static str,
}

impl<'a, R: CommandRunner> TemplateFetcher<'a, R> {
    pub fn new(runner: &'a R, package_manager: PackageManager, package: &'static str) -> Self {
        Self {
            runner,
            package_manager,
            package,
        }
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C, runner: &'a R) -> Self {
        Self::new(runner, config.package_manager(), config.package_name())
    }

    pub fn package(&self) -> &'static str {
        self.package
    }

    /// Create `temp_dir` and fetch the template package into it
    ///
    /// On failure nothing is left behind at `temp_dir`.
    pub async fn acquire(&self, temp_dir: &Path) -> Result<StagingDir, AcquisitionError> {
        let staging = match StagingDir::create(temp_dir) {
            Ok(staging) => staging,
            Err(source) => {
                if let Err(err) = remove_dir_if_exists(temp_dir) {
                    tracing::debug!(error = %err, "nothing to clean up after failed create");
                }
                return Err(AcquisitionError::CreateStaging {
                    path: temp_dir.to_path_buf(),
                    source,
                });
            }
        };

        let command = self.package_manager.add_command(self.package, staging.path());
        if let Err(source) = run_checked(self.runner, &command).await {
            if let Err(err) = staging.remove() {
                tracing::warn!(path = %temp_dir.display(), error = %err, "failed to remove staging directory");
            }
            return Err(AcquisitionError::Fetch {
                package: self.package.to_string(),
                source,
            });
        }

        Ok(staging)
    }
}
