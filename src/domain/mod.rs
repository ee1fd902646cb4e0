pub mod models;
pub mod services;

pub use models::{NavItem, ThemeConfig};
pub use services::NavigationTree;
