use dioxus::prelude::*;

use crate::domain::NavigationTree;
use crate::shared::hooks::use_navigation;

/// Breadcrumb and title of the active section. Page bodies are rendered by the router.
#[component]
pub fn SectionHeader() -> Element {
    let nav = use_navigation();
    let active = nav.active_section.read().clone();
    let crumbs = breadcrumb(nav.state.tree(), &active);

    match nav.state.tree().find_by_id(&active) {
        Some(item) => rsx! {
            header { class: "c-section-header animate-fade-in",
                ol { class: "c-section-header__crumbs",
                    for crumb in crumbs {
                        li { key: "{crumb}", "{crumb}" }
                    }
                }
                h1 { class: "c-section-header__title", "{item.label}" }
                code { class: "c-section-header__href font-mono", "{item.href}" }
            }
        },
        None => rsx! {
            header { class: "c-section-header",
                h1 { class: "c-section-header__title", "Unknown section" }
            }
        },
    }
}

/// Labels from the root down to the parent of `id`
pub fn breadcrumb(tree: &NavigationTree, id: &str) -> Vec<String> {
    tree.ancestors(id)
        .unwrap_or_default()
        .into_iter()
        .map(|item| item.label.clone())
        .collect()
}
