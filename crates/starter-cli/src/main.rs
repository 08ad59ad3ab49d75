//! TypeScript React starter CLI - initializes a project in the current directory

use anyhow::Result;
use clap::Parser;
use scaffolder_core::templates::remove_dir_if_exists;
use scaffolder_core::tui::{restore_cursor, ClackProgress};
use scaffolder_core::{
    initialize, PlainProgress, ProductConfig, Progress, ProgressEvent, ResolveContext,
    SystemRunner, TemplateConfig,
};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit status after Ctrl+C (128 + SIGINT)
const INTERRUPTED: i32 = 130;

/// TypeScript React starter product configuration
#[derive(Clone)]
pub struct ReactStarterConfig;

impl ProductConfig for ReactStarterConfig {
    fn name(&self) -> &'static str {
        "create-ts-starter"
    }

    fn display_name(&self) -> &'static str {
        "TypeScript"
    }

    fn package_name(&self) -> &'static str {
        "@budokans/typescript-react-starter"
    }

    fn local_template_dir(&self) -> &'static str {
        // Executables live in target/<profile>/ of this workspace
        "../../templates/typescript-react-starter"
    }

    fn next_steps(&self, _dir: &Path) -> Vec<String> {
        // The project is always created in the working directory
        vec!["pnpm dev".to_string()]
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-ts-starter")]
#[command(about = "Initialize a TypeScript React project from the starter template")]
#[command(version)]
pub struct Args {
    /// Use the template bundled with this checkout instead of downloading it (for development use)
    #[arg(long)]
    pub local: bool,
}

/// Initialize the tracing subscriber; `RUST_LOG` overrides the default `warn` level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_cursor();
        default_panic(info);
    }));

    let args = Args::parse();
    init_tracing();

    let config = ReactStarterConfig;
    let template = TemplateConfig::resolve(&config, args.local, &ResolveContext::detect());
    tracing::debug!(?template, "resolved template configuration");

    // Handle Ctrl+C: drop the half-downloaded template before exiting
    let staging = template.temp_dir.clone();
    ctrlc::set_handler(move || {
        cleanup_on_interrupt(staging.as_deref());
        restore_cursor();
        std::process::exit(INTERRUPTED);
    })
    .ok();

    let progress: Box<dyn Progress> = if console::Term::stdout().is_term() {
        Box::new(ClackProgress)
    } else {
        Box::new(PlainProgress)
    };

    let result = run(&config, &template, progress.as_ref()).await;

    // Ensure cursor is visible on normal exit
    restore_cursor();

    if let Err(err) = &result {
        progress.report(ProgressEvent::Failed(format!("{:#}", err)));
    }
    ExitCode::from(exit_status(&result))
}

/// Remove the staging directory, if this run has one
fn cleanup_on_interrupt(staging: Option<&Path>) {
    let Some(dir) = staging else {
        return;
    };
    if let Err(err) = remove_dir_if_exists(dir) {
        tracing::warn!(path = %dir.display(), error = %err, "failed to remove staging directory");
    }
}

/// Process exit status: 0 on success, 1 on any failure
fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

async fn run(
    config: &ReactStarterConfig,
    template: &TemplateConfig,
    progress: &dyn Progress,
) -> Result<()> {
    let stats = initialize(config, template, &SystemRunner, progress).await?;
    tracing::debug!(files = stats.files, "project initialized");
    Ok(())
}
