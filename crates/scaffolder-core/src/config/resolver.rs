//! Resolution of where the template comes from and where it goes

use crate::product::ProductConfig;
use std::path::{Path, PathBuf};

/// Process facts the resolver depends on, captured once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveContext {
    /// Current working directory; the project is created here
    pub cwd: PathBuf,
    /// Directory holding the running executable
    pub install_dir: PathBuf,
}

impl ResolveContext {
    /// Context with an explicit working directory and executable directory
    pub fn new(cwd: impl Into<PathBuf>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            install_dir: install_dir.into(),
        }
    }

    /// Read the working directory and executable location from the process
    pub fn detect() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let install_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| cwd.clone());
        Self { cwd, install_dir }
    }
}

/// Resolved template locations for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    /// Directory whose contents are copied
    pub template_dir: PathBuf,
    /// Destination of the copy
    pub target_dir: PathBuf,
    /// Staging directory to create, fetch into, and remove afterwards
    pub temp_dir: Option<PathBuf>,
}

impl TemplateConfig {
    /// Build the configuration for local (`is_local`) or registry mode
    pub fn resolve<C: ProductConfig>(config: &C, is_local: bool, ctx: &ResolveContext) -> Self {
        let target_dir = ctx.cwd.clone();

        if is_local {
            return Self {
                template_dir: ctx.install_dir.join(config.local_template_dir()),
                target_dir,
                temp_dir: None,
            };
        }

        let temp_dir = ctx.cwd.join(config.staging_dir_name());
        let template_dir = config
            .package_manager()
            .installed_package_dir(&temp_dir, config.package_name());

        Self {
            template_dir,
            target_dir,
            temp_dir: Some(temp_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestConfig;

    impl ProductConfig for TestConfig {
        fn name(&self) -> &'static str {
            "test"
        }

        fn display_name(&self) -> &'static str {
            "Test"
        }

        fn package_name(&self) -> &'static str {
            "@acme/web-starter"
        }

        fn local_template_dir(&self) -> &'static str {
            "../templates/web-starter"
        }

        fn next_steps(&self, _dir: &Path) -> Vec<String> {
            Vec::new()
        }
    }

    fn ctx() -> ResolveContext {
        ResolveContext::new("/home/dev/app", "/opt/starter/bin")
    }

    #[test]
    fn test_local_mode_uses_bundled_template() {
        let resolved = TemplateConfig::resolve(&TestConfig, true, &ctx());

        assert_eq!(
            resolved.template_dir,
            Path::new("/opt/starter/bin").join("../templates/web-starter")
        );
        assert_eq!(resolved.target_dir, Path::new("/home/dev/app"));
        assert_eq!(resolved.temp_dir, None);
    }

    #[test]
    fn test_remote_mode_stages_in_cwd() {
        let resolved = TemplateConfig::resolve(&TestConfig, false, &ctx());
        let staging = Path::new("/home/dev/app").join(".temp-starter");

        assert_eq!(resolved.temp_dir.as_deref(), Some(staging.as_path()));
        assert_eq!(
            resolved.template_dir,
            staging.join("node_modules").join("@acme").join("web-starter")
        );
        assert_eq!(resolved.target_dir, Path::new("/home/dev/app"));
    }

    #[test]
    fn test_detect_produces_directories() {
        let detected = ResolveContext::detect();
        assert!(!detected.cwd.as_os_str().is_empty());
        assert!(!detected.install_dir.as_os_str().is_empty());
    }
}
