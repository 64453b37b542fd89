//! Core module - project discovery and configuration

pub mod config;
pub mod project;

pub use config::Config;
pub use project::{Project, ProjectError};
