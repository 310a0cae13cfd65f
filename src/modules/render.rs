// Host-agnostic tab strip rendering.
// The registry stays DOM-free; this module projects its state onto a
// `NodeSpec` tree that a thin host adapter (webview, test harness, demo
// shell) applies to real markup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::TabRecord;

/// Marker attribute carried by every element this subsystem owns.
pub const MARKER_ATTR: &str = "data-hd-tabs";
pub const MARKER_WRAPPER: &str = "wrapper";
pub const MARKER_TAB: &str = "tab";
pub const MARKER_NEW_TAB: &str = "new-tab";
pub const MARKER_CLOSE_TAB: &str = "close-tab";
/// Class of the optional label sub-element inside a tab node.
pub const LABEL_CLASS: &str = "tab_text";

/// One element in the projected tree: tag, attributes, optional text,
/// children. Ordering of children is display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter for scaffold construction.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, node: NodeSpec) -> Self {
        self.children.push(node);
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|v| v.as_str())
    }

    pub fn marker(&self) -> Option<&str> {
        self.get_attr(MARKER_ATTR)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|p| p == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.attrs.insert("class".to_string(), classes);
    }

    /// Depth-first search over descendants (self excluded), mirroring a
    /// querySelector call scoped to this node.
    pub fn find_descendant_mut(
        &mut self,
        pred: &dyn Fn(&NodeSpec) -> bool,
    ) -> Option<&mut NodeSpec> {
        for child in &mut self.children {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant_mut(pred) {
                return Some(found);
            }
        }
        None
    }
}

/// The installed tab strip: the wrapper being mutated plus the template
/// node extracted from it at install time. The template is only a cloning
/// source; it never appears among the rendered children.
pub struct TabStrip {
    wrapper: NodeSpec,
    template: NodeSpec,
}

impl TabStrip {
    /// Validates the scaffold and takes ownership of it. The wrapper must
    /// carry the wrapper marker and contain one tab-marked template and one
    /// new-tab control; anything missing is fatal to this subsystem only.
    pub fn install(mut wrapper: NodeSpec) -> Result<Self, String> {
        let has_wrapper_marker = wrapper.marker() == Some(MARKER_WRAPPER);
        let template_idx = wrapper
            .children
            .iter()
            .position(|c| c.marker() == Some(MARKER_TAB));
        let has_new_tab = wrapper
            .children
            .iter()
            .any(|c| c.marker() == Some(MARKER_NEW_TAB));

        let idx = match (has_wrapper_marker, template_idx, has_new_tab) {
            (true, Some(idx), true) => idx,
            _ => {
                log::warn!(
                    "[Tabs] Required elements not found, aborting tab system initialization"
                );
                return Err("required tab strip elements not found".to_string());
            }
        };

        let mut template = wrapper.children.remove(idx);
        // Hide the cloning source; clones are made visible individually
        template.set_attr("hidden", "");

        Ok(Self { wrapper, template })
    }

    pub fn wrapper(&self) -> &NodeSpec {
        &self.wrapper
    }

    /// The rendered tab nodes, in display order.
    pub fn tab_nodes(&self) -> Vec<&NodeSpec> {
        self.wrapper
            .children
            .iter()
            .filter(|c| c.marker() == Some(MARKER_TAB))
            .collect()
    }

    /// Rebuilds the strip from the given state. Idempotent: previously
    /// rendered tab nodes are cleared first, then one clone of the template
    /// per record is inserted before the new-tab control, preserving order.
    pub fn render(&mut self, tabs: &[TabRecord], active_href: &str) {
        log::info!("[Tabs] Rendering {} tabs, active: {}", tabs.len(), active_href);

        self.wrapper
            .children
            .retain(|c| c.marker() != Some(MARKER_TAB));

        let mut insert_at = self
            .wrapper
            .children
            .iter()
            .position(|c| c.marker() == Some(MARKER_NEW_TAB))
            .unwrap_or(self.wrapper.children.len());

        for record in tabs {
            // Never render a record that aliases the template itself
            if self.template.get_attr("href") == Some(record.href.as_str()) {
                continue;
            }
            let node = self.make_tab(record, record.href == active_href);
            self.wrapper.children.insert(insert_at, node);
            insert_at += 1;
        }
    }

    fn make_tab(&self, record: &TabRecord, is_active: bool) -> NodeSpec {
        let mut tab = self.template.clone();
        tab.attrs.remove("hidden"); // make sure it's visible
        tab.set_attr("href", record.href.as_str());
        if is_active {
            tab.add_class("active");
        }

        let label = if record.label.is_empty() {
            record.href.clone()
        } else {
            record.label.clone()
        };
        match tab.find_descendant_mut(&|n| n.has_class(LABEL_CLASS)) {
            Some(text_node) => text_node.text = Some(label),
            None => tab.text = Some(label),
        }

        // Accessibility: ensure the close control has an aria-label
        if let Some(close) = tab.find_descendant_mut(&|n| n.marker() == Some(MARKER_CLOSE_TAB)) {
            close.set_attr("aria-label", "Close tab");
        }

        tab
    }
}

/// Canonical scaffold for hosts without their own markup: a wrapper holding
/// one hidden template (with label and close sub-elements) and the new-tab
/// control pointing at `new_tab_href`.
pub fn basic_scaffold(new_tab_href: &str) -> NodeSpec {
    NodeSpec::new("nav")
        .attr(MARKER_ATTR, MARKER_WRAPPER)
        .child(
            NodeSpec::new("a")
                .attr(MARKER_ATTR, MARKER_TAB)
                .attr("hidden", "")
                .child(NodeSpec::new("div").attr("class", LABEL_CLASS))
                .child(NodeSpec::new("button").attr(MARKER_ATTR, MARKER_CLOSE_TAB)),
        )
        .child(
            NodeSpec::new("a")
                .attr(MARKER_ATTR, MARKER_NEW_TAB)
                .attr("href", new_tab_href),
        )
}
