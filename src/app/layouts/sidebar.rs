use dioxus::prelude::*;

use crate::domain::NavItem;
use crate::shared::hooks::{use_navigation, UseNavigation};

/// Collapsible navigation panel. Renders the whole tree once and follows the
/// store for visibility, highlight and expansion.
#[component]
pub fn Sidebar() -> Element {
    let nav = use_navigation();
    let open = *nav.sidebar_open.read();
    let hidden = !open;
    let items = nav.state.tree().list().to_vec();

    let sidebar_class = if open {
        "c-sidebar"
    } else {
        "c-sidebar c-sidebar--closed"
    };

    rsx! {
        aside { class: "{sidebar_class}", "aria-hidden": "{hidden}",
            div { class: "c-sidebar__header",
                h2 { "Topics" }
            }
            nav { class: "c-sidebar__nav",
                ul {
                    for item in items {
                        SidebarEntry { key: "{item.id}", item: item.clone(), depth: 0, nav: nav.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn SidebarEntry(item: NavItem, depth: usize, nav: UseNavigation) -> Element {
    let is_active = *nav.active_section.read() == item.id;
    let is_expanded = nav.expanded_sections.read().contains(&item.id);
    let class = entry_class(is_active, is_expanded, item.has_children());
    let indent = depth * 12;

    let select_state = nav.state.clone();
    let select_id = item.id.clone();
    let toggle_state = nav.state.clone();
    let toggle_id = item.id.clone();

    rsx! {
        li { class: "{class}",
            div { class: "c-sidebar__row", style: "padding-left: {indent}px;",
                a {
                    class: "c-sidebar__link",
                    href: "{item.href}",
                    title: "{item.label}",
                    "data-icon": "{item.icon}",
                    onclick: move |_| select_state.set_active_section(&select_id),
                    span { class: "c-sidebar__label", "{item.label}" }
                }
                if item.has_children() {
                    button {
                        class: "c-sidebar__chevron",
                        "aria-expanded": "{is_expanded}",
                        onclick: move |_| toggle_state.toggle_section(&toggle_id),
                        if is_expanded { "▾" } else { "▸" }
                    }
                }
            }
            if is_expanded && item.has_children() {
                ul { class: "c-sidebar__children",
                    for child in item.children.iter() {
                        SidebarEntry { key: "{child.id}", item: child.clone(), depth: depth + 1, nav: nav.clone() }
                    }
                }
            }
        }
    }
}

/// BEM class list for one sidebar entry
pub fn entry_class(active: bool, expanded: bool, has_children: bool) -> String {
    let mut class = String::from("c-sidebar__item");
    if has_children {
        class.push_str(" c-sidebar__item--branch");
        if expanded {
            class.push_str(" c-sidebar__item--expanded");
        }
    }
    if active {
        class.push_str(" c-sidebar__item--active");
    }
    class
}
