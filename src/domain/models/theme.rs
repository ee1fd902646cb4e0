use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::shared::errors::{AppError, Result};

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern")
});

/// How dark mode is switched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    /// A `dark` class on the root element
    Class,
    /// The `prefers-color-scheme` media query
    Media,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorShade {
    pub shade: String,
    pub hex: String,
}

/// A named color scale, e.g. `surface` with shades 50..950
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub name: String,
    pub shades: Vec<ColorShade>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontStack {
    pub name: String,
    pub families: Vec<String>,
}

/// Utility animation, `value` is a CSS `animation` shorthand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssDeclaration {
    pub property: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyframeStep {
    /// Keyframe selector such as `0%, 100%`
    pub offsets: String,
    pub declarations: Vec<CssDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyframes {
    pub name: String,
    pub steps: Vec<KeyframeStep>,
}

/// Visual theme of the site: palettes, fonts and animations.
/// Declaration order is kept in every list so the exported CSS is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub dark_mode: DarkMode,
    pub colors: Vec<ColorPalette>,
    pub fonts: Vec<FontStack>,
    pub animations: Vec<Animation>,
    pub keyframes: Vec<Keyframes>,
}

fn palette(name: &str, shades: &[(&str, &str)]) -> ColorPalette {
    ColorPalette {
        name: name.to_string(),
        shades: shades
            .iter()
            .map(|(shade, hex)| ColorShade {
                shade: shade.to_string(),
                hex: hex.to_string(),
            })
            .collect(),
    }
}

fn step(offsets: &str, declarations: &[(&str, &str)]) -> KeyframeStep {
    KeyframeStep {
        offsets: offsets.to_string(),
        declarations: declarations
            .iter()
            .map(|(property, value)| CssDeclaration {
                property: property.to_string(),
                value: value.to_string(),
            })
            .collect(),
    }
}

impl ThemeConfig {
    /// The site theme. The `surface` scale is the slate scale shipped with
    /// the tailwind configuration.
    pub fn canonical() -> Self {
        Self {
            dark_mode: DarkMode::Class,
            colors: vec![
                palette(
                    "aws",
                    &[("orange", "#FF9900"), ("dark", "#232F3E"), ("light", "#37475A")],
                ),
                palette(
                    "gcp",
                    &[
                        ("blue", "#4285F4"),
                        ("red", "#EA4335"),
                        ("yellow", "#FBBC04"),
                        ("green", "#34A853"),
                    ],
                ),
                palette(
                    "surface",
                    &[
                        ("50", "#f8fafc"),
                        ("100", "#f1f5f9"),
                        ("200", "#e2e8f0"),
                        ("300", "#cbd5e1"),
                        ("400", "#94a3b8"),
                        ("500", "#64748b"),
                        ("600", "#475569"),
                        ("700", "#334155"),
                        ("800", "#1e293b"),
                        ("900", "#0f172a"),
                        ("950", "#020617"),
                    ],
                ),
            ],
            fonts: vec![
                FontStack {
                    name: "sans".to_string(),
                    families: vec!["Inter".into(), "system-ui".into(), "sans-serif".into()],
                },
                FontStack {
                    name: "mono".to_string(),
                    families: vec![
                        "JetBrains Mono".into(),
                        "Fira Code".into(),
                        "monospace".into(),
                    ],
                },
            ],
            animations: vec![
                Animation {
                    name: "flow".to_string(),
                    value: "flow 2s ease-in-out infinite".to_string(),
                },
                Animation {
                    name: "pulse-slow".to_string(),
                    value: "pulse 3s ease-in-out infinite".to_string(),
                },
                Animation {
                    name: "fade-in".to_string(),
                    value: "fadeIn 0.5s ease-out".to_string(),
                },
            ],
            keyframes: vec![
                Keyframes {
                    name: "flow".to_string(),
                    steps: vec![
                        step("0%, 100%", &[("stroke-dashoffset", "0")]),
                        step("50%", &[("stroke-dashoffset", "20")]),
                    ],
                },
                Keyframes {
                    name: "fadeIn".to_string(),
                    steps: vec![
                        step("0%", &[("opacity", "0"), ("transform", "translateY(10px)")]),
                        step("100%", &[("opacity", "1"), ("transform", "translateY(0)")]),
                    ],
                },
                // Built into tailwind, `pulse-slow` relies on it
                Keyframes {
                    name: "pulse".to_string(),
                    steps: vec![
                        step("0%, 100%", &[("opacity", "1")]),
                        step("50%", &[("opacity", ".5")]),
                    ],
                },
            ],
        }
    }

    pub fn palette(&self, name: &str) -> Option<&ColorPalette> {
        self.colors.iter().find(|p| p.name == name)
    }

    /// Hex value of `palette.shade`, e.g. `color("surface", "900")`
    pub fn color(&self, palette: &str, shade: &str) -> Option<&str> {
        self.palette(palette)?
            .shades
            .iter()
            .find(|s| s.shade == shade)
            .map(|s| s.hex.as_str())
    }

    pub fn font(&self, name: &str) -> Option<&FontStack> {
        self.fonts.iter().find(|f| f.name == name)
    }

    /// Checks color syntax and that every animation names defined keyframes.
    pub fn validate(&self) -> Result<()> {
        for palette in &self.colors {
            for shade in &palette.shades {
                if !HEX_COLOR.is_match(&shade.hex) {
                    return Err(AppError::InvalidColor {
                        palette: palette.name.clone(),
                        shade: shade.shade.clone(),
                        value: shade.hex.clone(),
                    });
                }
            }
        }

        let defined: HashSet<&str> = self.keyframes.iter().map(|k| k.name.as_str()).collect();
        for animation in &self.animations {
            let keyframes = animation.value.split_whitespace().next().unwrap_or_default();
            if !defined.contains(keyframes) {
                return Err(AppError::UndefinedKeyframes {
                    animation: animation.name.clone(),
                    keyframes: keyframes.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Render the theme as a stylesheet: custom properties on `:root`,
    /// the dark mode color scheme, `@keyframes` and `.animate-*`/`.font-*` utilities.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");

        for palette in &self.colors {
            for shade in &palette.shades {
                css.push_str(&format!(
                    "  --color-{}-{}: {};\n",
                    palette.name, shade.shade, shade.hex
                ));
            }
        }
        for font in &self.fonts {
            css.push_str(&format!(
                "  --font-{}: {};\n",
                font.name,
                font_family_value(&font.families)
            ));
        }
        css.push_str("}\n");

        match self.dark_mode {
            DarkMode::Class => css.push_str("\n.dark {\n  color-scheme: dark;\n}\n"),
            DarkMode::Media => css.push_str(
                "\n@media (prefers-color-scheme: dark) {\n  :root {\n    color-scheme: dark;\n  }\n}\n",
            ),
        }

        for keyframes in &self.keyframes {
            css.push_str(&format!("\n@keyframes {} {{\n", keyframes.name));
            for step in &keyframes.steps {
                css.push_str(&format!("  {} {{\n", step.offsets));
                for decl in &step.declarations {
                    css.push_str(&format!("    {}: {};\n", decl.property, decl.value));
                }
                css.push_str("  }\n");
            }
            css.push_str("}\n");
        }

        for animation in &self.animations {
            css.push_str(&format!(
                "\n.animate-{} {{\n  animation: {};\n}}\n",
                animation.name, animation.value
            ));
        }

        for font in &self.fonts {
            css.push_str(&format!(
                "\n.font-{} {{\n  font-family: var(--font-{});\n}}\n",
                font.name, font.name
            ));
        }

        css
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::canonical()
    }
}

fn font_family_value(families: &[String]) -> String {
    families
        .iter()
        .map(|family| {
            if family.contains(char::is_whitespace) {
                format!("\"{}\"", family)
            } else {
                family.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
