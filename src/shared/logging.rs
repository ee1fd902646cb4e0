//! Structured logging module for the site navigation
//!
//! Provides consistent, contextual logging across the navigation store,
//! the tree model and the theme export.

/// Log operations for the different parts of the navigation
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    TreeValidation,
    TreeLookup,
    StateChange,
    Subscription,
    ConfigLoad,
    ThemeExport,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::TreeValidation => "tree_validation",
            LogOperation::TreeLookup => "tree_lookup",
            LogOperation::StateChange => "state_change",
            LogOperation::Subscription => "subscription",
            LogOperation::ConfigLoad => "config_load",
            LogOperation::ThemeExport => "theme_export",
        }
    }
}

/// Log a validated navigation tree
pub fn log_tree_validated(root_count: usize, node_count: usize) {
    tracing::debug!(
        operation = LogOperation::TreeValidation.as_str(),
        root_items = root_count,
        total_items = node_count,
        "Navigation tree validated"
    );
}

/// Log a rejected navigation tree
pub fn log_tree_rejected(error: &str) {
    tracing::error!(
        operation = LogOperation::TreeValidation.as_str(),
        error = error,
        "Navigation tree rejected"
    );
}

/// Log a lookup that matched nothing
pub fn log_lookup_miss(key: &str, value: &str) {
    tracing::debug!(
        operation = LogOperation::TreeLookup.as_str(),
        key = key,
        value = value,
        "No navigation item matched"
    );
}

/// Log a store mutation
pub fn log_state_change(field: &str, action: &str, value: &str) {
    tracing::debug!(
        operation = LogOperation::StateChange.as_str(),
        field = field,
        action = action,
        value = value,
        "Navigation state updated"
    );
}

/// Log a write from a listener, delivered after the running round
pub fn log_queued_notification(pending: usize) {
    tracing::debug!(
        operation = LogOperation::Subscription.as_str(),
        pending = pending,
        "Queued notification behind running round"
    );
}

/// Log a configuration override read from the environment
pub fn log_config_override(key: &str, value: &str) {
    tracing::info!(
        operation = LogOperation::ConfigLoad.as_str(),
        key = key,
        value = value,
        "Applied configuration override"
    );
}

/// Log an override that could not be parsed
pub fn log_config_override_ignored(key: &str, value: &str, reason: &str) {
    tracing::warn!(
        operation = LogOperation::ConfigLoad.as_str(),
        key = key,
        value = value,
        reason = reason,
        "Ignored configuration override"
    );
}

/// Log theme stylesheet generation
pub fn log_theme_export(format: &str, bytes: usize) {
    tracing::info!(
        operation = LogOperation::ThemeExport.as_str(),
        format = format,
        bytes = bytes,
        "Theme exported"
    );
}

/// Macro for creating structured log context
#[macro_export]
macro_rules! log_context {
    ($section:expr) => {
        tracing::info_span!("site_nav", section = $section)
    };
    ($section:expr, $href:expr) => {
        tracing::info_span!("site_nav", section = $section, href = $href)
    };
}
