pub mod errors;
pub mod logging;
pub mod state;
pub mod store;

// Dioxus bindings for the store
pub mod hooks;
