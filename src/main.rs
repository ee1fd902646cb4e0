//! Cloud Atlas - Main Entry Point
//!
//! Launches the Dioxus app. Pick the renderer with `--features web` or
//! `--features desktop` (e.g. `dx serve --features web`).

use cloud_atlas_nav::app::App;

const NO_RENDERER: &str = "No renderer compiled in: run `dx serve --features web` \
     or `cargo run --features desktop` (use the `site-nav` binary for the CLI)";

/// Renderer feature this binary was built with, if any
fn renderer() -> Option<&'static str> {
    if cfg!(feature = "web") {
        Some("web")
    } else if cfg!(feature = "desktop") {
        Some("desktop")
    } else {
        None
    }
}

// dioxus::launch installs its own tracing subscriber
fn main() -> anyhow::Result<()> {
    match renderer() {
        Some(_) => {
            dioxus::launch(App);
            Ok(())
        }
        // dioxus::launch panics without a platform feature
        None => anyhow::bail!(NO_RENDERER),
    }
}
