// Demo shell for the tab strip subsystem.
// Drives the controller with intents typed on stdin and prints the strip
// after every event. A Navigate effect is simulated by feeding the target
// back in as a page load, which is exactly what a real host would observe.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use hd_tabs::modules::controller::Controller;
use hd_tabs::modules::render::{basic_scaffold, NodeSpec, LABEL_CLASS, MARKER_NEW_TAB, MARKER_TAB};
use hd_tabs::settings::Settings;
use hd_tabs::state::{Effect, Intent};
use hd_tabs::store::FileStore;

fn data_dir() -> PathBuf {
    if let Some(arg) = std::env::args().nth(1) {
        return PathBuf::from(arg);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hd-tabs")
}

fn tab_label(tab: &NodeSpec) -> String {
    let text = tab
        .children
        .iter()
        .find(|c| c.has_class(LABEL_CLASS))
        .and_then(|c| c.text.clone())
        .or_else(|| tab.text.clone());
    text.unwrap_or_default()
}

fn print_strip(wrapper: &NodeSpec, current_url: &str) {
    let mut line = String::new();
    for child in &wrapper.children {
        match child.marker() {
            Some(MARKER_TAB) => {
                let marker = if child.has_class("active") { "*" } else { "" };
                line.push_str(&format!(
                    " [{}{} {}]",
                    marker,
                    tab_label(child),
                    child.get_attr("href").unwrap_or("")
                ));
            }
            Some(MARKER_NEW_TAB) => line.push_str(" [+]"),
            _ => {}
        }
    }
    println!("strip:{}  (page: {})", line, current_url);
}

fn handle_effect(controller: &mut Controller, effect: Effect) {
    match effect {
        Effect::Navigate(href) => {
            println!("-> navigating to {}", href);
            controller.apply(Intent::PageLoad(href));
        }
        Effect::Rerender | Effect::None => {}
    }
}

fn main() {
    let data_dir = data_dir();
    let settings = Settings::load(&data_dir);
    let store = Box::new(FileStore::new(data_dir.join("session")));

    let mut controller = match Controller::install(
        store,
        basic_scaffold(&settings.new_tab_href),
        &settings,
        &settings.home_href,
    ) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("hd-tabs: {}", e);
            std::process::exit(1);
        }
    };

    println!("hd-tabs demo shell (state in {})", data_dir.display());
    println!("commands: open | switch <href> | close <href> | title <label> | tabs | quit");
    print_strip(controller.strip(), controller.current_url());

    let stdin = io::stdin();
    print!("> ");
    let _ = io::stdout().flush();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        let mut parts = line.splitn(2, ' ');
        let command = parts.next().unwrap_or("");
        let arg = parts.next().map(str::trim);

        match (command, arg) {
            ("quit", _) | ("exit", _) => break,
            ("open", _) => {
                let effect = controller.apply(Intent::OpenTab);
                handle_effect(&mut controller, effect);
            }
            ("switch", Some(href)) => {
                let effect = controller.apply(Intent::SwitchTab(href.to_string()));
                handle_effect(&mut controller, effect);
            }
            ("close", Some(href)) => {
                let effect = controller.apply(Intent::CloseTab(href.to_string()));
                handle_effect(&mut controller, effect);
            }
            ("title", Some(label)) => controller.set_page_label(label),
            ("tabs", _) | ("", None) => {}
            _ => println!("unknown command: {}", line),
        }

        print_strip(controller.strip(), controller.current_url());
        print!("> ");
        let _ = io::stdout().flush();
    }
}
