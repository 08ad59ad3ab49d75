//! Project initialization: acquire, copy, clean up, install
//!
//! Each step runs only after the previous one succeeded. The staging
//! directory, when one is used, is removed before dependencies are installed
//! and on every failure path.

use crate::config::TemplateConfig;
use crate::product::ProductConfig;
use crate::progress::{Progress, ProgressEvent};
use crate::runtime::{run_checked, CommandError, CommandRunner};
use crate::templates::{
    copy_tree, AcquisitionError, CopyError, CopyOptions, CopyStats, StagingDir, TemplateFetcher,
};
use thiserror::Error;

/// Dependency installation failed
#[derive(Debug, Error)]
#[error("Failed to install dependencies")]
pub struct InstallError(#[from] pub CommandError);

/// Any failure of a project initialization run
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Copy(#[from] CopyError),

    #[error(transparent)]
    Install(#[from] InstallError),
}

/// Exclusions for a product: its configured names plus the staging directory
pub fn copy_options<C: ProductConfig>(config: &C) -> CopyOptions {
    CopyOptions::new(
        config
            .excluded_names()
            .iter()
            .copied()
            .chain([config.staging_dir_name()]),
    )
}

/// Materialize the template described by `template` and install its dependencies
pub async fn initialize<C, R, P>(
    config: &C,
    template: &TemplateConfig,
    runner: &R,
    progress: &P,
) -> Result<CopyStats, InitError>
where
    C: ProductConfig,
    R: CommandRunner,
    P: Progress + ?Sized,
{
    tracing::info!(
        product = config.name(),
        template = %template.template_dir.display(),
        "initializing project"
    );
    progress.report(ProgressEvent::Started {
        display_name: config.display_name(),
    });

    let staging = match &template.temp_dir {
        Some(temp_dir) => {
            let fetcher = TemplateFetcher::from_config(config, runner);
            progress.report(ProgressEvent::Downloading {
                package: fetcher.package().to_string(),
            });
            Some(fetcher.acquire(temp_dir).await?)
        }
        None => {
            progress.report(ProgressEvent::LocalTemplate(template.template_dir.clone()));
            None
        }
    };

    progress.report(ProgressEvent::Copying {
        from: template.template_dir.clone(),
        to: template.target_dir.clone(),
    });
    let stats = match copy_tree(
        &template.template_dir,
        &template.target_dir,
        &copy_options(config),
    ) {
        Ok(stats) => stats,
        Err(err) => {
            if let Some(staging) = staging {
                discard(staging, progress);
            }
            return Err(err.into());
        }
    };
    tracing::info!(files = stats.files, dirs = stats.dirs, "template copied");
    progress.report(ProgressEvent::Copied(stats));

    // A leftover staging directory does not fail the run
    if let Some(staging) = staging {
        discard(staging, progress);
    }

    progress.report(ProgressEvent::Installing);
    let install = config
        .package_manager()
        .install_command(&template.target_dir);
    run_checked(runner, &install)
        .await
        .map_err(InstallError::from)?;

    progress.report(ProgressEvent::Done {
        display_name: config.display_name(),
        next_steps: config.next_steps(&template.target_dir),
    });

    Ok(stats)
}

fn discard<P: Progress + ?Sized>(staging: StagingDir, progress: &P) {
    let path = staging.path().to_path_buf();
    if let Err(err) = staging.remove() {
        tracing::warn!(path = %path.display(), error = %err, "failed to remove staging directory");
        progress.report(ProgressEvent::Warning(format!(
            "Could not remove {}: {}",
            path.display(),
            err
        )));
    }
}
