use crate::core::{BasketView, Product};
use std::cell::RefCell;
use std::io::{Stderr, Write};
use std::rc::Rc;

pub const EMPTY_BASKET_TEXT: &str = "No products in basket.";

/// Renders the basket as plain text lines.
///
/// With a banner the error is printed inline with the rest of the output.
/// Without one, errors fall back to the alert writer, the way a page
/// without an error region falls back to `alert()`.
pub struct TerminalView<W: Write, A: Write = Stderr> {
    out: W,
    alert: Option<A>,
    error: Option<String>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            alert: None,
            error: None,
        }
    }

    /// Alerts go to stderr.
    pub fn without_banner(out: W) -> Self {
        Self::with_alert(out, std::io::stderr())
    }
}

impl<W: Write, A: Write> TerminalView<W, A> {
    pub fn with_alert(out: W, alert: A) -> Self {
        Self {
            out,
            alert: Some(alert),
            error: None,
        }
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn into_parts(self) -> (W, Option<A>) {
        (self.out, self.alert)
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            tracing::debug!("Failed to write basket view: {}", e);
        }
    }
}

impl<W: Write, A: Write> BasketView for TerminalView<W, A> {
    fn render_list(&mut self, items: &[&Product]) {
        if items.is_empty() {
            self.emit(EMPTY_BASKET_TEXT);
            return;
        }

        for item in items {
            let line = format!("  {} {}", item.icon, item.display_name);
            self.emit(&line);
        }
        // 購物車按鈕列只在有商品時顯示
        self.emit("[checkout] [clear]");
    }

    fn render_indicator(&mut self, count: usize) {
        if count > 0 {
            self.emit(&format!("Basket: {}", count));
        }
    }

    fn show_error(&mut self, message: &str) {
        match self.alert.as_mut() {
            Some(alert) => {
                if let Err(e) = writeln!(alert, "alert: {}", message) {
                    tracing::debug!("Failed to write basket alert: {}", e);
                }
            }
            None => {
                self.error = Some(message.to_string());
                self.emit(&format!("! {}", message));
            }
        }
    }

    fn clear_error(&mut self) {
        self.error = None;
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub list: Vec<String>,
    pub indicator: Option<usize>,
    pub error: Option<String>,
    pub renders: usize,
}

/// Keeps the last rendered state in memory. Clones share the same record,
/// so a caller can keep one handle and subscribe another.
#[derive(Debug, Default, Clone)]
pub struct RecordingView {
    state: Rc<RefCell<Recorded>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Recorded {
        self.state.borrow().clone()
    }

    pub fn list(&self) -> Vec<String> {
        self.state.borrow().list.clone()
    }

    /// `None` while the badge is hidden.
    pub fn indicator(&self) -> Option<usize> {
        self.state.borrow().indicator
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }
}

impl BasketView for RecordingView {
    fn render_list(&mut self, items: &[&Product]) {
        let mut state = self.state.borrow_mut();
        state.list = items.iter().map(|p| p.id.clone()).collect();
        state.renders += 1;
    }

    fn render_indicator(&mut self, count: usize) {
        self.state.borrow_mut().indicator = (count > 0).then_some(count);
    }

    fn show_error(&mut self, message: &str) {
        self.state.borrow_mut().error = Some(message.to_string());
    }

    fn clear_error(&mut self) {
        self.state.borrow_mut().error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(view: &mut TerminalView<Vec<u8>>, items: &[&Product]) {
        view.render_list(items);
        view.render_indicator(items.len());
    }

    #[test]
    fn test_terminal_view_empty_basket() {
        let mut view = TerminalView::new(Vec::new());
        render(&mut view, &[]);

        let output = String::from_utf8(view.into_inner()).unwrap();
        assert_eq!(output, "No products in basket.\n");
    }

    #[test]
    fn test_terminal_view_lists_products() {
        let apple = Product::new("apple", "Apple", "🍏");
        let lemon = Product::new("lemon", "Lemon", "🍋");
        let mut view = TerminalView::new(Vec::new());
        render(&mut view, &[&apple, &lemon]);

        let output = String::from_utf8(view.into_inner()).unwrap();
        assert!(output.contains("🍏 Apple"));
        assert!(output.contains("🍋 Lemon"));
        assert!(output.contains("[checkout] [clear]"));
        assert!(output.contains("Basket: 2"));
    }

    #[test]
    fn test_terminal_view_banner() {
        let mut view = TerminalView::new(Vec::new());
        view.show_error("nope");
        assert_eq!(view.current_error(), Some("nope"));

        view.clear_error();
        assert!(view.current_error().is_none());
        assert_eq!(String::from_utf8(view.into_inner()).unwrap(), "! nope\n");
    }

    #[test]
    fn test_terminal_view_without_banner_alerts() {
        let mut view = TerminalView::with_alert(Vec::new(), Vec::new());
        view.show_error("Strawberries and bananas cannot be combined.");
        view.clear_error();

        assert!(view.current_error().is_none());
        let (out, alert) = view.into_parts();
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(alert.unwrap()).unwrap(),
            "alert: Strawberries and bananas cannot be combined.\n"
        );
    }

    #[test]
    fn test_recording_view_hides_zero_indicator() {
        let mut view = RecordingView::new();
        view.render_indicator(3);
        assert_eq!(view.indicator(), Some(3));

        view.render_indicator(0);
        assert_eq!(view.indicator(), None);
    }
}
