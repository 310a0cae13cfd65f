// Shared state structs to avoid circular dependencies.
// These are used by the controller and renderer and can be tested independently.

use serde::{Deserialize, Serialize};

/// One persisted tab. Identity is the `href`; the label is cosmetic and
/// may be empty, in which case the renderer displays the href instead.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct TabRecord {
    pub href: String,
    pub label: String,
}

impl TabRecord {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// The entire persisted session: the ordered tab list plus the active pointer.
/// `active` need not reference a list entry (it can be the new-tab target or
/// the current page before any tab exists).
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub tabs: Vec<TabRecord>,
    pub active: String,
}

/// A user intent, dispatched to the controller. One intent per UI event;
/// close-control clicks map to `CloseTab` only, never also to `SwitchTab`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Click on the "new tab" control.
    OpenTab,
    /// Click on an existing tab.
    SwitchTab(String),
    /// Click on a tab's close control.
    CloseTab(String),
    /// The page (re)loaded at the given URL.
    PageLoad(String),
}

/// What the host must do after an intent was committed to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Same page: the strip was repainted in place.
    Rerender,
    /// Trigger a full-page navigation to the href. Code running after this
    /// effect is reported must not assume the context has ended.
    Navigate(String),
}
