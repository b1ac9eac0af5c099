//! Progress reporting hook. An `indicatif`-backed `MultiProgress`/
//! `ProgressBar` implementation is the default when the `progress` feature
//! is enabled; the trait exists so callers who do not want a terminal UI
//! still get phase/window/individual callbacks.

pub trait ProgressSink: Send + Sync {
    fn on_phase_start(&self, phase: &str, total: usize);
    fn on_window_done(&self, window_index: usize);
    fn on_individual_done(&self, individual_index: usize);
}

/// The default no-op sink used whenever a caller doesn't supply one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn on_phase_start(&self, _phase: &str, _total: usize) {}
    fn on_window_done(&self, _window_index: usize) {}
    fn on_individual_done(&self, _individual_index: usize) {}
}

#[cfg(feature = "progress")]
pub use indicatif_sink::IndicatifProgressSink;

#[cfg(feature = "progress")]
mod indicatif_sink {
    use super::ProgressSink;
    use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
    use std::sync::Mutex;

    /// Renders window and individual progress as two bars under a shared
    /// `MultiProgress`.
    pub struct IndicatifProgressSink {
        multi: MultiProgress,
        window_bar: Mutex<Option<ProgressBar>>,
        individual_bar: Mutex<Option<ProgressBar>>,
    }

    impl IndicatifProgressSink {
        pub fn new() -> Self {
            IndicatifProgressSink {
                multi: MultiProgress::new(),
                window_bar: Mutex::new(None),
                individual_bar: Mutex::new(None),
            }
        }
    }

    impl Default for IndicatifProgressSink {
        fn default() -> Self {
            Self::new()
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    impl ProgressSink for IndicatifProgressSink {
        fn on_phase_start(&self, phase: &str, total: usize) {
            let bar = self.multi.add(ProgressBar::new(total as u64));
            bar.set_style(style());
            bar.set_prefix(phase.to_string());
            if phase == "windows" {
                *self.window_bar.lock().unwrap() = Some(bar);
            } else {
                *self.individual_bar.lock().unwrap() = Some(bar);
            }
        }

        fn on_window_done(&self, _window_index: usize) {
            if let Some(bar) = self.window_bar.lock().unwrap().as_ref() {
                bar.inc(1);
            }
        }

        fn on_individual_done(&self, _individual_index: usize) {
            if let Some(bar) = self.individual_bar.lock().unwrap().as_ref() {
                bar.inc(1);
            }
        }
    }
}
