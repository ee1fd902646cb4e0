use dioxus::prelude::*;
use std::rc::Rc;

use crate::shared::state::{ExpandedSections, NavigationState};
use crate::shared::store::Observable;

/// Navigation store handle plus signals mirroring its three values
#[derive(Clone, PartialEq)]
pub struct UseNavigation {
    pub state: NavigationState,
    pub sidebar_open: Signal<bool>,
    pub active_section: Signal<String>,
    pub expanded_sections: Signal<ExpandedSections>,
}

/// Install the navigation store for the component tree below the caller
pub fn use_navigation_provider(init: impl FnOnce() -> NavigationState) -> NavigationState {
    use_context_provider(init)
}

/// Hook to read and drive the navigation store provided by an ancestor
pub fn use_navigation() -> UseNavigation {
    let state = use_context::<NavigationState>();
    let sidebar_open = use_mirror(state.sidebar_open());
    let active_section = use_mirror(state.active_section());
    let expanded_sections = use_mirror(state.expanded_sections());

    UseNavigation {
        state,
        sidebar_open,
        active_section,
        expanded_sections,
    }
}

/// Signal kept in sync with `observable` for the lifetime of the component.
/// The subscription lives in a hook slot and ends when the component unmounts.
fn use_mirror<T: Clone + PartialEq + 'static>(observable: &Observable<T>) -> Signal<T> {
    let signal = use_signal(|| observable.get());

    use_hook(|| {
        let mut mirror = signal;
        let subscription = observable.subscribe(move |value: &T| {
            // The replay on subscribe carries the value the signal started with
            if *mirror.peek() != *value {
                mirror.set(value.clone());
            }
        });
        Rc::new(subscription)
    });

    signal
}
