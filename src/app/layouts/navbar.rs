use dioxus::prelude::*;

use crate::shared::hooks::use_navigation;

#[component]
pub fn Navbar() -> Element {
    let nav = use_navigation();
    let open = *nav.sidebar_open.read();
    let state = nav.state.clone();

    let toggle_label = if open { "Hide topics" } else { "Show topics" };

    rsx! {
        nav { class: "c-navbar",
            button {
                class: "c-navbar__toggle",
                "aria-label": "{toggle_label}",
                "aria-pressed": "{open}",
                onclick: move |_| state.toggle_sidebar(),
                if open { "✕" } else { "☰" }
            }
            div { class: "c-navbar__title font-sans",
                "☁️ Cloud Atlas"
            }
        }
    }
}
