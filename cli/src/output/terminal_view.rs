//! Terminal implementation of the dashboard view
//!
//! Keeps the page state in a [`Document`] and prints what changed. Regions
//! refreshed by the pollers are only printed when their content differs from
//! what is already shown.

use super::formatters::{format_block, format_modal, format_toast, region_label};
use colored::Colorize;
use jobdash_core::notify::{ModalEvent, ToastEvent};
use jobdash_core::view::{Block, Region, View};
use jobdash_core::Document;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Output sink, stdout unless captured
type Sink = Box<dyn Write + Send>;

pub struct TerminalView {
    document: Arc<Document>,
    out: Mutex<Sink>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(out: Sink) -> Self {
        Self {
            document: Arc::new(Document::new()),
            out: Mutex::new(out),
        }
    }

    /// State behind the printed output
    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    fn print(&self, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        for line in lines {
            // Output is best effort; a closed stdout must not take the dashboard down
            let _ = writeln!(out, "{}", line);
        }
        let _ = out.flush();
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for TerminalView {
    fn render(&self, region: Region, block: Block) -> bool {
        let unchanged = self.document.block(region).as_ref() == Some(&block);
        let lines = format_block(&block);

        if !self.document.render(region, block) {
            debug!(?region, "region not shown, output dropped");
            return false;
        }
        if unchanged && region.is_shell() {
            return true;
        }

        match region_label(region) {
            Some(label) if !lines.is_empty() => {
                let mut output = vec![format!("{}:", label.bold())];
                output.extend(lines.into_iter().map(|line| format!("  {}", line)));
                self.print(&output);
            }
            _ => self.print(&lines),
        }
        true
    }

    fn has_region(&self, region: Region) -> bool {
        self.document.has_region(region)
    }

    fn set_titles(&self, page_title: &str, document_title: &str) {
        self.document.set_titles(page_title, document_title);
        self.print(&[
            String::new(),
            format!("== {} ==", page_title).bold().to_string(),
        ]);
    }

    fn set_active_nav(&self, route: &str) {
        self.document.set_active_nav(route);
    }

    fn set_loading(&self, visible: bool) {
        self.document.set_loading(visible);
        if visible {
            self.print(&["Loading...".dimmed().to_string()]);
        }
    }

    fn toast(&self, event: &ToastEvent) {
        self.document.toast(event);
        if let ToastEvent::Inserted(toast) = event {
            self.print(&[format_toast(toast)]);
        }
    }

    fn modal(&self, event: &ModalEvent) {
        // Document also has an inherent `modal()` getter
        View::modal(self.document.as_ref(), event);
        match event {
            ModalEvent::Shown(content) => self.print(&format_modal(content)),
            ModalEvent::Hidden => self.print(&["(closed)".dimmed().to_string()]),
        }
    }
}
