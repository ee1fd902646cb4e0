//! Initial navigation state.
//!
//! Defaults match the site: sidebar open, `home` active, `fundamentals`
//! expanded. Values can come from JSON and be overridden from the
//! environment:
//!
//! - `SITE_NAV_SIDEBAR_OPEN` (`true`/`false`/`1`/`0`)
//! - `SITE_NAV_ACTIVE_SECTION`
//! - `SITE_NAV_EXPANDED` (comma-separated ids, empty for none)

use serde::{Deserialize, Serialize};

use crate::domain::NavigationTree;
use crate::shared::errors::{AppError, Result};
use crate::shared::logging::{log_config_override, log_config_override_ignored};

pub const ENV_SIDEBAR_OPEN: &str = "SITE_NAV_SIDEBAR_OPEN";
pub const ENV_ACTIVE_SECTION: &str = "SITE_NAV_ACTIVE_SECTION";
pub const ENV_EXPANDED: &str = "SITE_NAV_EXPANDED";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub sidebar_open: bool,
    pub active_section: String,
    pub expanded_sections: Vec<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            active_section: "home".to_string(),
            expanded_sections: vec!["fundamentals".to_string()],
        }
    }
}

impl NavigationConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults with the process environment applied
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`. Unparseable values are logged and skipped.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ENV_SIDEBAR_OPEN) {
            match parse_bool(&raw) {
                Some(open) => {
                    log_config_override(ENV_SIDEBAR_OPEN, &raw);
                    self.sidebar_open = open;
                }
                None => log_config_override_ignored(ENV_SIDEBAR_OPEN, &raw, "expected a boolean"),
            }
        }

        if let Some(raw) = lookup(ENV_ACTIVE_SECTION) {
            let id = raw.trim();
            if id.is_empty() {
                log_config_override_ignored(ENV_ACTIVE_SECTION, &raw, "empty section id");
            } else {
                log_config_override(ENV_ACTIVE_SECTION, id);
                self.active_section = id.to_string();
            }
        }

        if let Some(raw) = lookup(ENV_EXPANDED) {
            log_config_override(ENV_EXPANDED, &raw);
            self.expanded_sections = raw
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect();
        }

        self
    }

    /// Every referenced id must exist in `tree`, and expanded ids must be branches.
    pub fn validate(&self, tree: &NavigationTree) -> Result<()> {
        if !tree.contains(&self.active_section) {
            return Err(AppError::UnknownSection(self.active_section.clone()));
        }

        for id in &self.expanded_sections {
            match tree.find_by_id(id) {
                None => return Err(AppError::UnknownSection(id.clone())),
                Some(item) if item.is_leaf() => {
                    return Err(AppError::InvalidConfig(format!(
                        "{} has no children and cannot be expanded",
                        id
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
