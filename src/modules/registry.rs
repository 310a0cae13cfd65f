// Tab registry - pure list logic + store round-trips.
// All dedup and ordering rules live here, free of any host/render types.

use crate::settings::Settings;
use crate::state::{SessionState, TabRecord};
use crate::store::{KvStore, ACTIVE_TAB_KEY, TABS_STORAGE_KEY};

/// Result of closing a tab. `next_href` is set only when the closed href was
/// the active one; the caller must then navigate to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseOutcome {
    pub next_href: Option<String>,
    pub tabs: Vec<TabRecord>,
}

/// Pure logic for opening a tab.
///
/// `current_url` is the page being left, `href` the tab being opened.
/// Algorithm:
/// 1. Retire any record for the page being left (no stale duplicate remains)
/// 2. Home is never reinserted when it already has a record
/// 3. The page being left floats to the front, unless it is itself the
///    href being opened
/// 4. Append the requested href unless already present (idempotent open)
fn open_logic(
    tabs: &mut Vec<TabRecord>,
    current_url: &str,
    current_label: &str,
    href: &str,
    label: &str,
    home_href: &str,
) {
    tabs.retain(|t| t.href != current_url);

    let home_exists = tabs.iter().any(|t| t.href == home_href);
    if current_url == home_href && home_exists {
        log::info!("[Tabs] Home tab already exists, not adding duplicate");
    } else if href != current_url {
        let label = if current_label.is_empty() {
            current_url
        } else {
            current_label
        };
        tabs.insert(0, TabRecord::new(current_url, label));
    }

    if !tabs.iter().any(|t| t.href == href) {
        tabs.push(TabRecord::new(href, label));
    } else {
        log::info!("[Tabs] Tab already exists: {}", href);
    }
}

/// Pure logic for closing a tab.
///
/// Returns the next navigation target when the closed href was active:
/// the first remaining record, or the new-tab target once the list is empty.
/// Membership in the list is not checked; `href == active` is what decides
/// whether a navigation is owed, so closing a stale href still reassigns.
fn close_logic(
    tabs: &mut Vec<TabRecord>,
    href: &str,
    active: &str,
    new_tab_href: &str,
) -> Option<String> {
    tabs.retain(|t| t.href != href);

    if active == href {
        let next = tabs
            .first()
            .map(|t| t.href.clone())
            .unwrap_or_else(|| new_tab_href.to_string());
        Some(next)
    } else {
        None
    }
}

/// Owns the persisted session: the ordered tab list and the active pointer,
/// mirrored into the store on every mutation.
pub struct TabRegistry {
    store: Box<dyn KvStore>,
    home_href: String,
    new_tab_href: String,
}

impl TabRegistry {
    pub fn new(store: Box<dyn KvStore>, settings: &Settings) -> Self {
        Self {
            store,
            home_href: settings.home_href.clone(),
            new_tab_href: settings.new_tab_href.clone(),
        }
    }

    pub fn new_tab_href(&self) -> &str {
        &self.new_tab_href
    }

    /// Reads and deserializes the tab list. Absence and corruption both
    /// degrade to the empty list; the next save overwrites with good data.
    pub fn load_list(&self) -> Vec<TabRecord> {
        let Some(raw) = self.store.read(TABS_STORAGE_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(tabs) => tabs,
            Err(e) => {
                log::warn!("[Tabs] Error loading from storage: {}", e);
                Vec::new()
            }
        }
    }

    /// Serializes and writes the whole list. Total replacement, not a patch.
    pub fn save_list(&self, tabs: &[TabRecord]) -> Result<(), String> {
        let json = serde_json::to_string(tabs).map_err(|e| e.to_string())?;
        self.store.write(TABS_STORAGE_KEY, &json)
    }

    pub fn load_active(&self) -> String {
        self.store.read(ACTIVE_TAB_KEY).unwrap_or_default()
    }

    /// Snapshot of the whole persisted session, for the renderer.
    pub fn load_session(&self) -> SessionState {
        SessionState {
            tabs: self.load_list(),
            active: self.load_active(),
        }
    }

    pub fn save_active(&self, href: &str) -> Result<(), String> {
        log::info!("[Tabs] Setting active tab: {}", href);
        self.store.write(ACTIVE_TAB_KEY, href)
    }

    /// Opens `href` from the page at `current_url`, persisting the updated
    /// list and making `href` active. Serves both "switch to an existing
    /// bookmark" and "create a new tab"; the dedup/insert rules are shared.
    pub fn open(
        &self,
        current_url: &str,
        current_label: &str,
        href: &str,
        label: &str,
    ) -> Result<Vec<TabRecord>, String> {
        let mut tabs = self.load_list();
        open_logic(
            &mut tabs,
            current_url,
            current_label,
            href,
            label,
            &self.home_href,
        );
        self.save_list(&tabs)?;
        self.save_active(href)?;
        log::info!("[Tabs] Opened {}, tabs now: {:?}", href, tabs);
        Ok(tabs)
    }

    /// Removes `href` from the list and persists. When `href` was active the
    /// outcome carries the next navigation target for the caller.
    pub fn close(&self, href: &str) -> Result<CloseOutcome, String> {
        let mut tabs = self.load_list();
        let active = self.load_active();
        let next_href = close_logic(&mut tabs, href, &active, &self.new_tab_href);
        self.save_list(&tabs)?;
        if let Some(ref next) = next_href {
            log::info!("[Tabs] Closed active tab {}, switching to: {}", href, next);
        }
        Ok(CloseOutcome { next_href, tabs })
    }
}
