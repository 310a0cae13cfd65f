// Navigation controller - the intent state machine over the registry and
// the rendered strip. Every intent is committed to the store before any
// navigation effect is reported, so a reload mid-handler observes the
// already-persisted state.

use crate::modules::navigation::normalize_href;
use crate::modules::registry::TabRegistry;
use crate::modules::render::{NodeSpec, TabStrip};
use crate::settings::Settings;
use crate::state::{Effect, Intent};
use crate::store::KvStore;

pub struct Controller {
    registry: TabRegistry,
    strip: TabStrip,
    new_tab_label: String,
    current_url: String,
    current_label: String,
}

impl Controller {
    /// Installs the subsystem over the given scaffold. A missing wrapper
    /// marker, template, or new-tab control aborts the install (logged);
    /// nothing is partially set up. On success the initial page load is
    /// applied: the stored active pointer is reconciled with `current_url`
    /// and the strip is painted from persisted state.
    pub fn install(
        store: Box<dyn KvStore>,
        wrapper: NodeSpec,
        settings: &Settings,
        current_url: &str,
    ) -> Result<Self, String> {
        let strip = TabStrip::install(wrapper)?;
        let registry = TabRegistry::new(store, settings);

        let mut controller = Self {
            registry,
            strip,
            new_tab_label: settings.new_tab_label.clone(),
            current_url: String::new(),
            current_label: String::new(),
        };
        controller.apply(Intent::PageLoad(current_url.to_string()));
        Ok(controller)
    }

    /// The page title of the current page, recorded as the label when the
    /// page being left gets a tab. Empty falls back to the href.
    pub fn set_page_label(&mut self, label: &str) {
        self.current_label = label.to_string();
    }

    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// The rendered strip, for the host adapter to apply.
    pub fn strip(&self) -> &NodeSpec {
        self.strip.wrapper()
    }

    /// Dispatches one user intent and reports what the host must do next.
    /// Store write failures are logged and the handler continues; the next
    /// successful write overwrites whatever state the store holds.
    pub fn apply(&mut self, intent: Intent) -> Effect {
        match intent {
            Intent::SwitchTab(href) => {
                if let Err(e) = self.registry.save_active(&href) {
                    log::warn!("[Tabs] Failed to persist active tab: {}", e);
                }
                Effect::Navigate(href)
            }

            Intent::CloseTab(href) => match self.registry.close(&href) {
                Ok(outcome) => {
                    if let Some(next) = outcome.next_href {
                        if let Err(e) = self.registry.save_active(&next) {
                            log::warn!("[Tabs] Failed to persist active tab: {}", e);
                        }
                        Effect::Navigate(next)
                    } else {
                        self.rerender();
                        Effect::Rerender
                    }
                }
                Err(e) => {
                    log::warn!("[Tabs] Failed to close {}: {}", href, e);
                    Effect::None
                }
            },

            Intent::OpenTab => {
                let href = self.registry.new_tab_href().to_string();
                if let Err(e) = self.registry.open(
                    &self.current_url,
                    &self.current_label,
                    &href,
                    &self.new_tab_label,
                ) {
                    log::warn!("[Tabs] Failed to open {}: {}", href, e);
                }
                Effect::Navigate(href)
            }

            Intent::PageLoad(url) => {
                let url = normalize_href(&url);
                if self.registry.load_active() != url {
                    if let Err(e) = self.registry.save_active(&url) {
                        log::warn!("[Tabs] Failed to persist active tab: {}", e);
                    }
                }
                self.current_url = url;
                self.current_label.clear();
                self.rerender();
                Effect::Rerender
            }
        }
    }

    fn rerender(&mut self) {
        let session = self.registry.load_session();
        self.strip.render(&session.tabs, &session.active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::render::{basic_scaffold, MARKER_TAB};
    use crate::state::TabRecord;
    use crate::store::{KvStore, MemoryStore, ACTIVE_TAB_KEY, TABS_STORAGE_KEY};

    fn seeded_store(tabs: &[TabRecord], active: &str) -> Box<MemoryStore> {
        let store = MemoryStore::new();
        store
            .write(TABS_STORAGE_KEY, &serde_json::to_string(tabs).unwrap())
            .unwrap();
        store.write(ACTIVE_TAB_KEY, active).unwrap();
        Box::new(store)
    }

    fn controller_at(tabs: &[TabRecord], active: &str, url: &str) -> Controller {
        Controller::install(
            seeded_store(tabs, active),
            basic_scaffold("/"),
            &Settings::default(),
            url,
        )
        .unwrap()
    }

    fn rendered_hrefs(controller: &Controller) -> Vec<String> {
        controller
            .strip()
            .children
            .iter()
            .filter(|c| c.marker() == Some(MARKER_TAB))
            .map(|c| c.get_attr("href").unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_first_load_on_empty_store() {
        let controller = Controller::install(
            Box::new(MemoryStore::new()),
            basic_scaffold("/"),
            &Settings::default(),
            "/dashboard",
        )
        .unwrap();

        assert_eq!(controller.current_url(), "/dashboard");
        assert!(rendered_hrefs(&controller).is_empty());
    }

    #[test]
    fn test_page_load_reconciles_active_pointer() {
        let store = seeded_store(&[TabRecord::new("/", "Home")], "/reports");
        let controller = Controller::install(
            store,
            basic_scaffold("/"),
            &Settings::default(),
            "https://example.com/billing",
        )
        .unwrap();

        // Stored active differed from the (normalized) current URL
        assert_eq!(controller.current_url(), "/billing");
        assert_eq!(rendered_hrefs(&controller), vec!["/"]);
    }

    #[test]
    fn test_switch_tab_persists_then_navigates() {
        let mut controller = controller_at(
            &[TabRecord::new("/", "Home"), TabRecord::new("/reports", "R")],
            "/",
            "/",
        );

        let effect = controller.apply(Intent::SwitchTab("/reports".to_string()));

        assert_eq!(effect, Effect::Navigate("/reports".to_string()));
        // Simulated reload at the target repaints with the new active tab
        controller.apply(Intent::PageLoad("/reports".to_string()));
        let active: Vec<_> = controller
            .strip()
            .children
            .iter()
            .filter(|c| c.has_class("active"))
            .map(|c| c.get_attr("href").unwrap())
            .collect();
        assert_eq!(active, vec!["/reports"]);
    }

    #[test]
    fn test_close_active_tab_navigates_to_first_remaining() {
        let mut controller = controller_at(
            &[TabRecord::new("/reports", "R"), TabRecord::new("/billing", "B")],
            "/reports",
            "/reports",
        );

        let effect = controller.apply(Intent::CloseTab("/reports".to_string()));

        assert_eq!(effect, Effect::Navigate("/billing".to_string()));
    }

    #[test]
    fn test_close_inactive_tab_rerenders_in_place() {
        let mut controller = controller_at(
            &[TabRecord::new("/reports", "R"), TabRecord::new("/billing", "B")],
            "/reports",
            "/reports",
        );

        let effect = controller.apply(Intent::CloseTab("/billing".to_string()));

        assert_eq!(effect, Effect::Rerender);
        assert_eq!(rendered_hrefs(&controller), vec!["/reports"]);
    }

    #[test]
    fn test_close_only_tab_targets_new_tab_href() {
        let mut controller = controller_at(&[TabRecord::new("/reports", "R")], "/reports", "/reports");

        let effect = controller.apply(Intent::CloseTab("/reports".to_string()));

        assert_eq!(effect, Effect::Navigate("/".to_string()));
    }

    #[test]
    fn test_open_tab_bookmarks_current_page_and_navigates() {
        let mut settings = Settings::default();
        settings.new_tab_href = "/start".to_string();
        let mut controller = Controller::install(
            seeded_store(&[TabRecord::new("/", "Home")], "/reports"),
            basic_scaffold("/start"),
            &settings,
            "/reports",
        )
        .unwrap();
        controller.set_page_label("Reports");

        let effect = controller.apply(Intent::OpenTab);

        assert_eq!(effect, Effect::Navigate("/start".to_string()));
        controller.apply(Intent::PageLoad("/start".to_string()));
        assert_eq!(rendered_hrefs(&controller), vec!["/reports", "/", "/start"]);
    }

    #[test]
    fn test_new_tab_from_home_keeps_home_first() {
        // list = [{/, Home}], active = /, user requests a new tab at /reports
        let mut settings = Settings::default();
        settings.new_tab_href = "/reports".to_string();
        let mut controller = Controller::install(
            seeded_store(&[TabRecord::new("/", "Home")], "/"),
            basic_scaffold("/reports"),
            &settings,
            "/",
        )
        .unwrap();
        controller.set_page_label("Home");

        let effect = controller.apply(Intent::OpenTab);

        assert_eq!(effect, Effect::Navigate("/reports".to_string()));
        controller.apply(Intent::PageLoad("/reports".to_string()));
        assert_eq!(rendered_hrefs(&controller), vec!["/", "/reports"]);
    }

    #[test]
    fn test_missing_scaffold_aborts_install() {
        let mut wrapper = basic_scaffold("/");
        wrapper.children.retain(|c| c.marker() != Some(MARKER_TAB));

        let result = Controller::install(
            Box::new(MemoryStore::new()),
            wrapper,
            &Settings::default(),
            "/",
        );

        assert!(result.is_err());
    }
}
