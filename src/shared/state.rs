use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::config::NavigationConfig;
use crate::domain::NavigationTree;
use crate::shared::errors::Result;
use crate::shared::logging::log_state_change;
use crate::shared::store::Observable;

/// Ids of the branches whose children are shown
pub type ExpandedSections = BTreeSet<String>;

/// Plain copy of the navigation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    pub sidebar_open: bool,
    pub active_section: String,
    pub expanded_sections: Vec<String>,
}

/// Sidebar state of the site: the navigation tree plus three observable values.
///
/// Clones are handles to the same state. Every mutation notifies the
/// subscribers of the touched value before returning.
#[derive(Clone)]
pub struct NavigationState {
    tree: Rc<NavigationTree>,
    sidebar_open: Observable<bool>,
    active_section: Observable<String>,
    expanded_sections: Observable<ExpandedSections>,
}

impl NavigationState {
    /// Built-in tree with the default initial values
    pub fn new() -> Self {
        Self::with_tree(NavigationTree::builtin(), &NavigationConfig::default())
    }

    /// Initial values are taken as given, see [`NavigationState::from_config`] for the checked variant.
    pub fn with_tree(tree: NavigationTree, config: &NavigationConfig) -> Self {
        Self {
            tree: Rc::new(tree),
            sidebar_open: Observable::new(config.sidebar_open),
            active_section: Observable::new(config.active_section.clone()),
            expanded_sections: Observable::new(config.expanded_sections.iter().cloned().collect()),
        }
    }

    /// Like [`NavigationState::with_tree`], but rejects ids the tree does not contain
    pub fn from_config(tree: NavigationTree, config: &NavigationConfig) -> Result<Self> {
        config.validate(&tree)?;
        Ok(Self::with_tree(tree, config))
    }

    pub fn tree(&self) -> &NavigationTree {
        &self.tree
    }

    pub fn sidebar_open(&self) -> &Observable<bool> {
        &self.sidebar_open
    }

    pub fn active_section(&self) -> &Observable<String> {
        &self.active_section
    }

    pub fn expanded_sections(&self) -> &Observable<ExpandedSections> {
        &self.expanded_sections
    }

    pub fn set_sidebar_open(&self, open: bool) {
        log_state_change("sidebar_open", "set", if open { "true" } else { "false" });
        self.sidebar_open.set(open);
    }

    pub fn toggle_sidebar(&self) {
        let open = !self.sidebar_open.get();
        log_state_change("sidebar_open", "toggle", if open { "true" } else { "false" });
        self.sidebar_open.set(open);
    }

    /// Not checked against the tree, an unknown id just highlights nothing
    pub fn set_active_section(&self, id: &str) {
        log_state_change("active_section", "set", id);
        self.active_section.set(id.to_string());
    }

    pub fn expand_section(&self, id: &str) {
        log_state_change("expanded_sections", "expand", id);
        self.expanded_sections.update(|sections| {
            let mut next = sections.clone();
            next.insert(id.to_string());
            next
        });
    }

    pub fn collapse_section(&self, id: &str) {
        log_state_change("expanded_sections", "collapse", id);
        self.expanded_sections.update(|sections| {
            let mut next = sections.clone();
            next.remove(id);
            next
        });
    }

    pub fn toggle_section(&self, id: &str) {
        log_state_change("expanded_sections", "toggle", id);
        self.expanded_sections.update(|sections| {
            let mut next = sections.clone();
            if !next.remove(id) {
                next.insert(id.to_string());
            }
            next
        });
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_sections.with(|sections| sections.contains(id))
    }

    pub fn collapse_all(&self) {
        log_state_change("expanded_sections", "collapse_all", "");
        self.expanded_sections.set(ExpandedSections::new());
    }

    /// Expand every ancestor of `id` and make it the active section.
    /// Returns `false` and leaves the state untouched when `id` is not in the tree.
    pub fn reveal(&self, id: &str) -> bool {
        let _span = crate::log_context!(id).entered();

        let Some(ancestors) = self.tree.ancestors(id) else {
            return false;
        };

        let missing: Vec<String> = ancestors
            .iter()
            .filter(|item| !self.is_expanded(&item.id))
            .map(|item| item.id.clone())
            .collect();
        if !missing.is_empty() {
            log_state_change("expanded_sections", "reveal", id);
            self.expanded_sections.update(|sections| {
                let mut next = sections.clone();
                next.extend(missing);
                next
            });
        }

        self.set_active_section(id);
        true
    }

    /// Activate the item whose href is `href`, see [`NavigationState::reveal`]
    pub fn navigate_to(&self, href: &str) -> bool {
        let Some(id) = self.tree.find_by_href(href).map(|item| item.id.clone()) else {
            return false;
        };
        let _span = crate::log_context!(id.as_str(), href).entered();
        self.reveal(&id)
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            sidebar_open: self.sidebar_open.get(),
            active_section: self.active_section.get(),
            expanded_sections: self
                .expanded_sections
                .with(|sections| sections.iter().cloned().collect()),
        }
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for NavigationState {
    /// Handles are equal when they share the same state
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NavItem;
    use crate::shared::errors::AppError;
    use std::cell::RefCell;

    fn expanded(state: &NavigationState) -> Vec<String> {
        state.snapshot().expanded_sections
    }

    #[test]
    fn test_initial_values() {
        let state = NavigationState::new();
        assert!(state.sidebar_open().get());
        assert_eq!(state.active_section().get(), "home");
        assert_eq!(expanded(&state), vec!["fundamentals"]);
    }

    #[test]
    fn test_toggle_sidebar_twice_restores() {
        let state = NavigationState::new();
        let before = state.sidebar_open().get();
        state.toggle_sidebar();
        assert_eq!(state.sidebar_open().get(), !before);
        state.toggle_sidebar();
        assert_eq!(state.sidebar_open().get(), before);
    }

    #[test]
    fn test_set_sidebar_open_notifies_when_unchanged() {
        let state = NavigationState::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = state.sidebar_open().subscribe(move |open| sink.borrow_mut().push(*open));
        state.set_sidebar_open(true);
        state.set_sidebar_open(false);
        assert_eq!(*seen.borrow(), vec![true, true, false]);
    }

    #[test]
    fn test_set_active_section_accepts_unknown_id() {
        let state = NavigationState::new();
        state.set_active_section("not-a-page");
        assert_eq!(state.active_section().get(), "not-a-page");
    }

    #[test]
    fn test_expand_then_collapse() {
        let state = NavigationState::new();
        state.expand_section("storage");
        assert!(state.is_expanded("storage"));
        state.collapse_section("storage");
        assert!(!state.is_expanded("storage"));
    }

    #[test]
    fn test_expand_twice_keeps_one_entry() {
        let state = NavigationState::new();
        state.expand_section("storage");
        state.expand_section("storage");
        assert!(state.is_expanded("storage"));
        let count = expanded(&state).iter().filter(|id| *id == "storage").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_expand_existing_still_notifies() {
        let state = NavigationState::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let _sub = state
            .expanded_sections()
            .subscribe(move |_| *counter.borrow_mut() += 1);
        state.expand_section("fundamentals");
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_collapse_missing_is_noop() {
        let state = NavigationState::new();
        state.collapse_section("security");
        assert_eq!(expanded(&state), vec!["fundamentals"]);
    }

    #[test]
    fn test_toggle_section_parity() {
        let state = NavigationState::new();
        for n in 1..=6 {
            state.toggle_section("networking");
            assert_eq!(state.is_expanded("networking"), n % 2 == 1);
        }
        assert!(!state.is_expanded("networking"));
    }

    #[test]
    fn test_toggle_scenario() {
        let state = NavigationState::new();
        state.toggle_section("compute");
        assert_eq!(expanded(&state), vec!["compute", "fundamentals"]);
        state.toggle_section("fundamentals");
        assert_eq!(expanded(&state), vec!["compute"]);
    }

    #[test]
    fn test_subscribe_yields_current_values() {
        let state = NavigationState::new();
        state.set_active_section("dns");
        state.set_sidebar_open(false);

        let active = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&active);
        let _a = state
            .active_section()
            .subscribe(move |id| sink.borrow_mut().push(id.clone()));

        let open = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&open);
        let _b = state.sidebar_open().subscribe(move |v| sink.borrow_mut().push(*v));

        let sets = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&sets);
        let _c = state
            .expanded_sections()
            .subscribe(move |s| sink.borrow_mut().push(s.clone()));

        assert_eq!(*active.borrow(), vec!["dns".to_string()]);
        assert_eq!(*open.borrow(), vec![false]);
        assert_eq!(sets.borrow().len(), 1);
        assert!(sets.borrow()[0].contains("fundamentals"));
    }

    #[test]
    fn test_each_notification_carries_new_set() {
        let state = NavigationState::new();
        let sets = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&sets);
        let _sub = state
            .expanded_sections()
            .subscribe(move |s| sink.borrow_mut().push(s.clone()));

        state.toggle_section("compute");
        state.toggle_section("fundamentals");

        let sets = sets.borrow();
        assert_eq!(sets.len(), 3);
        assert!(sets[0].contains("fundamentals") && !sets[0].contains("compute"));
        assert!(sets[1].contains("fundamentals") && sets[1].contains("compute"));
        assert!(!sets[2].contains("fundamentals") && sets[2].contains("compute"));
    }

    #[test]
    fn test_reveal_expands_ancestors() {
        let state = NavigationState::new();
        state.collapse_all();
        assert!(state.reveal("kubernetes"));
        assert!(state.is_expanded("compute"));
        assert_eq!(state.active_section().get(), "kubernetes");
    }

    #[test]
    fn test_reveal_unknown_changes_nothing() {
        let state = NavigationState::new();
        let before = state.snapshot();
        assert!(!state.reveal("mainframes"));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_reveal_deep_item() {
        let tree = NavigationTree::new(vec![NavItem::branch(
            "a",
            "A",
            "Folder",
            "/a",
            vec![NavItem::branch(
                "b",
                "B",
                "Folder",
                "/a/b",
                vec![NavItem::leaf("c", "C", "File", "/a/b/c")],
            )],
        )])
        .unwrap();
        let config = NavigationConfig {
            sidebar_open: true,
            active_section: "a".to_string(),
            expanded_sections: Vec::new(),
        };
        let state = NavigationState::from_config(tree, &config).unwrap();
        assert!(state.navigate_to("/a/b/c"));
        assert_eq!(expanded(&state), vec!["a", "b"]);
        assert_eq!(state.active_section().get(), "c");
    }

    #[test]
    fn test_navigate_to_href() {
        let state = NavigationState::new();
        assert!(state.navigate_to("/compute/serverless"));
        assert_eq!(state.active_section().get(), "serverless");
        assert!(state.is_expanded("compute"));
        assert!(state.is_expanded("fundamentals"));
        assert!(!state.navigate_to("/nowhere"));
        assert_eq!(state.active_section().get(), "serverless");
    }

    #[test]
    fn test_from_config_rejects_unknown_ids() {
        let config = NavigationConfig {
            expanded_sections: vec!["mainframes".to_string()],
            ..NavigationConfig::default()
        };
        let result = NavigationState::from_config(NavigationTree::builtin(), &config);
        assert!(matches!(result, Err(AppError::UnknownSection(id)) if id == "mainframes"));
    }

    #[test]
    fn test_clones_share_state() {
        let state = NavigationState::new();
        let handle = state.clone();
        handle.toggle_sidebar();
        assert!(!state.sidebar_open().get());
        assert!(state == handle);
        assert!(state != NavigationState::new());
    }
}
