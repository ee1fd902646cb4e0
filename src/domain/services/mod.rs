// Business logic services
// Framework-agnostic, 100% testable

pub mod navigation_tree;
pub use navigation_tree::NavigationTree;
