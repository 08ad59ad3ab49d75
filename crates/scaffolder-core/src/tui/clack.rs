//! Charm-style progress lines using cliclack

use crate::progress::{print_next_steps, Progress, ProgressEvent};

/// Reports progress as cliclack log lines between an intro and an outro
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackProgress;

impl Progress for ClackProgress {
    fn report(&self, event: ProgressEvent) {
        // Output is best effort; a closed terminal must not abort the run
        let result = match event {
            ProgressEvent::Started { display_name } => cliclack::intro(display_name),
            ProgressEvent::LocalTemplate(dir) => {
                cliclack::log::info(format!("Using local template files from {}", dir.display()))
            }
            ProgressEvent::Downloading { package } => {
                cliclack::log::step(format!("📦 Downloading template {}...", package))
            }
            ProgressEvent::Copying { to, .. } => {
                cliclack::log::step(format!("📋 Copying template files into {}...", to.display()))
            }
            ProgressEvent::Copied(stats) => cliclack::log::success(format!(
                "Copied {} files and {} directories",
                stats.files, stats.dirs
            )),
            ProgressEvent::Installing => cliclack::log::step("📥 Installing dependencies..."),
            ProgressEvent::Warning(message) => cliclack::log::warning(message),
            ProgressEvent::Done {
                display_name,
                next_steps,
            } => {
                print_next_steps(&next_steps);
                cliclack::outro(format!(
                    "✨ {} project initialized successfully!",
                    display_name
                ))
            }
            ProgressEvent::Failed(message) => {
                cliclack::outro_cancel(format!("Error: {}", message))
            }
        };

        if let Err(err) = result {
            tracing::debug!(error = %err, "failed to write progress");
        }
    }
}

/// Make the terminal cursor visible again (after a panic or interrupt)
pub fn restore_cursor() {
    let _ = console::Term::stderr().show_cursor();
}
