//! A rendering backend that only logs what it would draw.

use vioscene_core::{RenderBackend, SceneUpdate, Widget};

/// Logs every widget operation through the `log` facade.
///
/// Useful for headless runs and for checking what a real backend receives.
#[derive(Debug, Default)]
pub struct LogBackend {
    frames: u64,
    upserts: u64,
    removals: u64,
}

impl LogBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames presented.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Total widget upserts received.
    pub fn upserts(&self) -> u64 {
        self.upserts
    }

    /// Total widget removals received.
    pub fn removals(&self) -> u64 {
        self.removals
    }
}

impl RenderBackend for LogBackend {
    fn upsert_widget(&mut self, widget: &Widget) {
        self.upserts += 1;
        log::trace!("draw {:?} '{}'", widget.kind(), widget.id());
    }

    fn remove_widget(&mut self, id: &str) {
        self.removals += 1;
        log::trace!("remove '{id}'");
    }

    fn present(&mut self, update: &SceneUpdate) {
        for id in &update.removed {
            self.remove_widget(id);
        }
        for widget in &update.widgets {
            self.upsert_widget(widget);
        }
        self.frames += 1;
        log::debug!(
            "presented frame {}: {} widgets, {} removed",
            self.frames,
            update.widgets.len(),
            update.removed.len()
        );
    }
}
