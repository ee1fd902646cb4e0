// Public API exports (shared between the web app and the CLI)
pub mod config;
pub mod domain;
pub mod shared;

// Dioxus UI
pub mod app;
