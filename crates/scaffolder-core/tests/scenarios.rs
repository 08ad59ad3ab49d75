//! End-to-end runs of `initialize` against real directories and a fake package manager

use scaffolder_core::runtime::{CommandStatus, ExternalCommand};
use scaffolder_core::{
    copy_tree, initialize, CommandRunner, CopyError, CopyOptions, InitError, ProductConfig,
    Progress, ProgressEvent, ResolveContext, TemplateConfig,
};
use std::fs;
use std::future::{self, Future};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use walkdir::WalkDir;

#[derive(Clone)]
struct Starter;

impl ProductConfig for Starter {
    fn name(&self) -> &'static str {
        "starter"
    }

    fn display_name(&self) -> &'static str {
        "Starter"
    }

    fn package_name(&self) -> &'static str {
        "@example/starter"
    }

    fn local_template_dir(&self) -> &'static str {
        "bundled"
    }

    fn next_steps(&self, _dir: &Path) -> Vec<String> {
        Vec::new()
    }
}

/// Files the fake registry writes into `node_modules/@example/starter`
type Package = Vec<(&'static str, &'static str)>;

struct FakeRegistry {
    package: Package,
    fetch_exit: i32,
    install_exit: i32,
    /// Package file whose permissions are cleared after fetching
    locked: Option<&'static str>,
    commands: Mutex<Vec<ExternalCommand>>,
}

impl FakeRegistry {
    fn new(package: Package) -> Self {
        Self {
            package,
            fetch_exit: 0,
            install_exit: 0,
            locked: None,
            commands: Mutex::new(Vec::new()),
        }
    }

    fn subcommands(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.args[0].clone())
            .collect()
    }
}

impl CommandRunner for FakeRegistry {
    fn run(
        &self,
        command: &ExternalCommand,
    ) -> impl Future<Output = io::Result<CommandStatus>> + Send {
        self.commands.lock().unwrap().push(command.clone());
        let code = if command.args[0] == "add" {
            let root = command.cwd.join("node_modules/@example/starter");
            for (path, content) in &self.package {
                write(&root, path, content);
            }
            if let Some(path) = self.locked {
                lock(&root.join(path));
            }
            self.fetch_exit
        } else {
            self.install_exit
        };
        future::ready(Ok(CommandStatus::from_code(code)))
    }
}

struct Quiet;

impl Progress for Quiet {
    fn report(&self, _event: ProgressEvent) {}
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[cfg(unix)]
fn lock(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
}

#[cfg(not(unix))]
fn lock(_path: &Path) {}

/// Relative paths of every entry under `root`, sorted
fn listing(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap().path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    paths.sort();
    paths
}

#[tokio::test]
async fn local_mode_copies_template_without_excluded_dirs() {
    let install = TempDir::new().unwrap();
    let bundled = install.path().join("bundled");
    write(&bundled, "a.txt", "alpha");
    write(&bundled, "b/c.txt", "charlie");
    write(&bundled, "node_modules/x.txt", "cached");
    let target = TempDir::new().unwrap();

    let template = TemplateConfig::resolve(
        &Starter,
        true,
        &ResolveContext::new(target.path(), install.path()),
    );
    let registry = FakeRegistry::new(Vec::new());

    initialize(&Starter, &template, &registry, &Quiet).await.unwrap();

    assert_eq!(fs::read_to_string(target.path().join("a.txt")).unwrap(), "alpha");
    assert_eq!(fs::read_to_string(target.path().join("b/c.txt")).unwrap(), "charlie");
    assert!(!target.path().join("node_modules").exists());
    assert_eq!(registry.subcommands(), vec!["install"]);
}

#[tokio::test]
async fn remote_fetch_failure_leaves_no_staging_dir() {
    let cwd = TempDir::new().unwrap();
    let mut registry = FakeRegistry::new(vec![("a.txt", "alpha")]);
    registry.fetch_exit = 1;
    let template = TemplateConfig::resolve(
        &Starter,
        false,
        &ResolveContext::new(cwd.path(), cwd.path()),
    );

    let err = initialize(&Starter, &template, &registry, &Quiet)
        .await
        .unwrap_err();

    assert!(matches!(err, InitError::Acquisition(_)));
    assert!(!cwd.path().join(".temp-starter").exists());
    assert!(!cwd.path().join("a.txt").exists());
    assert_eq!(registry.subcommands(), vec!["add"]);
}

#[tokio::test]
async fn remote_copy_failure_reports_path_and_cleans_up() {
    let cwd = TempDir::new().unwrap();
    let registry = FakeRegistry::new(vec![("a.txt", "alpha"), ("b.txt", "bravo")]);
    // b.txt cannot be written over a directory
    fs::create_dir_all(cwd.path().join("b.txt/keep")).unwrap();
    let template = TemplateConfig::resolve(
        &Starter,
        false,
        &ResolveContext::new(cwd.path(), cwd.path()),
    );

    let err = initialize(&Starter, &template, &registry, &Quiet)
        .await
        .unwrap_err();

    let copy = match err {
        InitError::Copy(copy) => copy,
        other => panic!("expected a copy error, got {:?}", other),
    };
    assert!(matches!(copy, CopyError::CopyFile { .. }));
    assert!(copy.path().ends_with("b.txt"));
    assert!(!cwd.path().join(".temp-starter").exists());
    assert_eq!(registry.subcommands(), vec!["add"]);
}

#[cfg(unix)]
#[tokio::test]
async fn remote_unreadable_template_file_fails_copy_and_cleans_up() {
    let cwd = TempDir::new().unwrap();
    let mut registry = FakeRegistry::new(vec![("a.txt", "alpha"), ("b.txt", "bravo")]);
    registry.locked = Some("b.txt");
    let template = TemplateConfig::resolve(
        &Starter,
        false,
        &ResolveContext::new(cwd.path(), cwd.path()),
    );

    // Privileged users read through permission bits
    let privilege_check = TempDir::new().unwrap();
    write(privilege_check.path(), "locked", "x");
    lock(&privilege_check.path().join("locked"));
    if fs::read(privilege_check.path().join("locked")).is_ok() {
        return;
    }

    let err = initialize(&Starter, &template, &registry, &Quiet)
        .await
        .unwrap_err();

    let copy = match err {
        InitError::Copy(copy) => copy,
        other => panic!("expected a copy error, got {:?}", other),
    };
    assert!(matches!(copy, CopyError::CopyFile { .. }));
    assert!(copy.path().ends_with("b.txt"));
    assert!(copy.to_string().contains("b.txt"));
    assert!(!cwd.path().join(".temp-starter").exists());
    assert_eq!(registry.subcommands(), vec!["add"]);
}

#[tokio::test]
async fn remote_install_failure_after_successful_copy() {
    let cwd = TempDir::new().unwrap();
    let mut registry = FakeRegistry::new(vec![("package.json", "{}")]);
    registry.install_exit = 1;
    let template = TemplateConfig::resolve(
        &Starter,
        false,
        &ResolveContext::new(cwd.path(), cwd.path()),
    );

    let err = initialize(&Starter, &template, &registry, &Quiet)
        .await
        .unwrap_err();

    assert!(matches!(err, InitError::Install(_)));
    assert!(cwd.path().join("package.json").is_file());
    assert!(!cwd.path().join(".temp-starter").exists());

    let commands = registry.commands.lock().unwrap();
    assert_eq!(commands[1].cwd, cwd.path());
}

#[test]
fn copy_reproduces_everything_outside_excluded_names() {
    let src = TempDir::new().unwrap();
    let files = [
        "README.md",
        "src/index.tsx",
        "src/components/Button.tsx",
        "src/components/dist/keep.txt",
        "public/favicon.svg",
        ".git/config",
        "dist/app.js",
        "node_modules/react/package.json",
        "packages/ui/node_modules/lib/index.js",
        "packages/ui/src/theme.ts",
    ];
    for (i, file) in files.iter().enumerate() {
        write(src.path(), file, &format!("content {}", i));
    }

    for excluded in [
        vec!["node_modules"],
        vec!["node_modules", ".git", "dist"],
        vec!["components", "public"],
        vec![],
    ] {
        let dest = TempDir::new().unwrap();
        copy_tree(src.path(), dest.path(), &CopyOptions::new(&excluded)).unwrap();

        let is_excluded = |p: &Path| {
            p.components()
                .any(|c| excluded.iter().any(|name| c.as_os_str() == *name))
        };

        let expected: Vec<PathBuf> = listing(src.path())
            .into_iter()
            .filter(|p| !is_excluded(p))
            .collect();
        assert_eq!(listing(dest.path()), expected, "exclusions {:?}", excluded);

        for (i, file) in files.iter().enumerate() {
            let copied = dest.path().join(file);
            if is_excluded(Path::new(file)) {
                assert!(!copied.exists());
            } else {
                assert_eq!(fs::read_to_string(copied).unwrap(), format!("content {}", i));
            }
        }
    }
}
