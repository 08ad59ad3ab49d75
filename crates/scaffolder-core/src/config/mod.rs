//! Run configuration

pub mod resolver;

pub use resolver::{ResolveContext, TemplateConfig};
