//! FILENAME: core/engine/src/window.rs
//! PURPOSE: Incremental reveal of the filtered+sorted rows.
//! CONTEXT: Instead of pages, the table shows a growing prefix of its rows.
//! Scrolling near the bottom grows the prefix by a fixed step; growth is
//! clamped to the row count, so asking again at the end changes nothing.
//! The window shrinks only through `reset`, which the table state calls
//! whenever the filtered set changes.

use serde::{Deserialize, Serialize};

/// Window sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowConfig {
    /// Rows shown before any scrolling.
    pub initial_size: usize,
    /// Rows added per growth.
    pub growth_step: usize,
    /// Fraction of the scrollable height that counts as "near the bottom".
    pub reveal_threshold: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            initial_size: 40,
            growth_step: 20,
            reveal_threshold: 0.75,
        }
    }
}

/// Scroll position of the row container, as reported by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Fraction of the content scrolled past the bottom edge of the viewport.
    pub fn scrolled_fraction(&self) -> f64 {
        if self.scroll_height <= 0.0 {
            return 0.0;
        }
        (self.scroll_top + self.client_height) / self.scroll_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayWindow {
    config: WindowConfig,
    size: usize,
}

impl DisplayWindow {
    pub fn new(config: WindowConfig) -> Self {
        DisplayWindow {
            config,
            size: config.initial_size,
        }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Requested window size, before clamping to the row count.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of rows actually shown out of `total`.
    pub fn visible_len(&self, total: usize) -> usize {
        self.size.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.size < total
    }

    /// Reveal the next step of rows. Returns whether the window changed:
    /// false when everything is already shown or the step is zero.
    pub fn grow(&mut self, total: usize) -> bool {
        if self.size >= total {
            return false;
        }
        let grown = self.size.saturating_add(self.config.growth_step).min(total);
        let changed = grown != self.size;
        self.size = grown;
        changed
    }

    /// Grow when the scroll position is past the reveal threshold.
    pub fn on_scroll(&mut self, metrics: &ScrollMetrics, total: usize) -> bool {
        if metrics.scrolled_fraction() > self.config.reveal_threshold {
            self.grow(total)
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.size = self.config.initial_size;
    }
}

impl Default for DisplayWindow {
    fn default() -> Self {
        DisplayWindow::new(WindowConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> DisplayWindow {
        DisplayWindow::new(WindowConfig {
            initial_size: 4,
            growth_step: 3,
            reveal_threshold: 0.75,
        })
    }

    #[test]
    fn test_growth_is_clamped_and_idempotent() {
        let mut window = small();
        assert_eq!(window.visible_len(9), 4);
        assert!(window.grow(9));
        assert_eq!(window.size(), 7);
        assert!(window.grow(9));
        assert_eq!(window.size(), 9);
        assert!(!window.grow(9));
        assert!(!window.grow(9));
        assert_eq!(window.size(), 9);
        assert!(!window.has_more(9));
    }

    #[test]
    fn test_small_result_set_is_fully_visible() {
        let mut window = small();
        assert_eq!(window.visible_len(2), 2);
        assert!(!window.grow(2));
        assert_eq!(window.size(), 4);
    }

    #[test]
    fn test_never_shrinks_without_reset() {
        let mut window = small();
        let mut previous = window.visible_len(20);
        for _ in 0..10 {
            window.grow(20);
            let current = window.visible_len(20);
            assert!(current >= previous);
            assert!(current <= 20);
            previous = current;
        }
        window.reset();
        assert_eq!(window.size(), 4);
    }

    #[test]
    fn test_on_scroll_threshold() {
        let mut window = small();
        let near_top = ScrollMetrics { scroll_top: 0.0, scroll_height: 1000.0, client_height: 400.0 };
        let near_bottom = ScrollMetrics { scroll_top: 400.0, scroll_height: 1000.0, client_height: 400.0 };
        assert!(!window.on_scroll(&near_top, 20));
        assert!(window.on_scroll(&near_bottom, 20));
        assert_eq!(window.size(), 7);
    }

    #[test]
    fn test_zero_height_never_grows() {
        let mut window = small();
        let empty = ScrollMetrics { scroll_top: 0.0, scroll_height: 0.0, client_height: 0.0 };
        assert!(!window.on_scroll(&empty, 20));
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: WindowConfig = serde_json::from_str(r#"{"growthStep": 10}"#).unwrap();
        assert_eq!(config.initial_size, 40);
        assert_eq!(config.growth_step, 10);
    }

    #[test]
    fn test_huge_step_saturates_at_total() {
        let mut window = DisplayWindow::new(WindowConfig {
            initial_size: 40,
            growth_step: usize::MAX,
            reveal_threshold: 0.75,
        });
        assert!(window.grow(100));
        assert_eq!(window.size(), 100);
        assert!(!window.grow(100));
    }

    #[test]
    fn test_zero_step_reports_no_growth() {
        let mut window = DisplayWindow::new(WindowConfig {
            initial_size: 4,
            growth_step: 0,
            reveal_threshold: 0.75,
        });
        assert!(!window.grow(20));
        assert_eq!(window.size(), 4);
        assert!(window.has_more(20));
    }
}
