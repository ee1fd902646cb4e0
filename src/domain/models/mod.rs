// Domain models
// Pure Rust, no framework dependencies

pub mod nav_item;
pub mod theme;

pub use nav_item::NavItem;
pub use theme::{
    Animation, ColorPalette, ColorShade, CssDeclaration, DarkMode, FontStack, KeyframeStep,
    Keyframes, ThemeConfig,
};
