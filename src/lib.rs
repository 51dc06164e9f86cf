//! Translation engine for embeddable web UI components.
//!
//! See [`i18n`] for the engine and [`config`] for environment-driven setup.

pub mod config;
pub mod i18n;
