pub mod components;
pub mod layouts;

use dioxus::prelude::*;

use crate::config::NavigationConfig;
use crate::domain::{NavigationTree, ThemeConfig};
use crate::shared::hooks::use_navigation_provider;
use crate::shared::state::NavigationState;
use components::SectionHeader;
use layouts::{Navbar, Sidebar};

/// Root component: owns the single navigation store and lays out the page shell
#[component]
pub fn App() -> Element {
    use_navigation_provider(initial_state);
    let theme_css = use_hook(|| ThemeConfig::canonical().to_css());

    rsx! {
        style { "{theme_css}" }
        div { class: "l-app font-sans",
            Navbar {}
            div { class: "l-app__body",
                Sidebar {}
                main { class: "l-app__content",
                    SectionHeader {}
                }
            }
        }
    }
}

/// Store for the built-in tree, configured from `SITE_NAV_*`.
/// Falls back to the defaults when the configuration names unknown sections.
pub fn initial_state() -> NavigationState {
    let tree = NavigationTree::builtin();
    let config = NavigationConfig::from_env();

    match NavigationState::from_config(tree.clone(), &config) {
        Ok(state) => {
            tracing::info!(
                active_section = %config.active_section,
                sidebar_open = config.sidebar_open,
                "Navigation store initialized"
            );
            state
        }
        Err(e) => {
            tracing::warn!(error = %e, "Invalid navigation config, using defaults");
            NavigationState::with_tree(tree, &NavigationConfig::default())
        }
    }
}
