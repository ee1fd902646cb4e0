// Custom Dioxus hooks
pub mod use_navigation;

pub use use_navigation::{use_navigation, use_navigation_provider, UseNavigation};
