//! Package manager commands used to fetch templates and install dependencies

use super::command::ExternalCommand;
use std::path::{Path, PathBuf};

/// A Node package manager invoked as an external process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageManager {
    /// Name of the binary (e.g., "pnpm")
    name: &'static str,
}

impl PackageManager {
    /// Package manager launched as `name`
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// The pnpm package manager
    pub const fn pnpm() -> Self {
        Self::new("pnpm")
    }

    /// Program to execute; Node package managers ship as `.cmd` shims on Windows
    pub fn program(&self) -> String {
        if cfg!(windows) {
            format!("{}.cmd", self.name)
        } else {
            self.name.to_string()
        }
    }

    /// `<pm> add <package> --prefix <prefix>`, run inside the prefix directory
    pub fn add_command(&self, package: &str, prefix: &Path) -> ExternalCommand {
        ExternalCommand::new(self.program(), prefix)
            .arg("add")
            .arg(package)
            .arg("--prefix")
            .arg(prefix.display().to_string())
    }

    /// `<pm> install`, run in the project directory
    pub fn install_command(&self, project_dir: &Path) -> ExternalCommand {
        ExternalCommand::new(self.program(), project_dir).arg("install")
    }

    /// Where `add --prefix` places a package, following the `node_modules` layout
    pub fn installed_package_dir(&self, prefix: &Path, package: &str) -> PathBuf {
        let mut dir = prefix.join("node_modules");
        for segment in package.split('/').filter(|s| !s.is_empty()) {
            dir.push(segment);
        }
        dir
    }
}
