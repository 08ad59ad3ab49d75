//! Scaffolder Core - Shared library for starter project CLIs
//!
//! This library materializes a starter project: it acquires a template (a
//! bundled directory or a registry package), copies it into the working
//! directory while skipping excluded names, and installs dependencies.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Tree copying, staging directories, external commands
//! - **Layer 2: Workflow Orchestration** - `ProductConfig`, `TemplateConfig` and [`initialize`]
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based progress output (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based progress module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{initialize, PlainProgress, ResolveContext, SystemRunner, TemplateConfig};
//!
//! let template = TemplateConfig::resolve(&MyConfig, false, &ResolveContext::detect());
//! initialize(&MyConfig, &template, &SystemRunner, &PlainProgress).await?;
//! ```

pub mod config;
pub mod init;
pub mod product;
pub mod progress;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{ResolveContext, TemplateConfig};
pub use init::{copy_options, initialize, InitError, InstallError};
pub use product::ProductConfig;
pub use progress::{PlainProgress, Progress, ProgressEvent};
pub use runtime::{CommandRunner, PackageManager, SystemRunner};
pub use templates::{copy_tree, AcquisitionError, CopyError, CopyOptions, CopyStats};
