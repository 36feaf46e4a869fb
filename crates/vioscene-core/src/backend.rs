//! Hand-off to the rendering backend.

use crate::widget::Widget;

/// Result of composing one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneUpdate {
    /// Every widget currently in the scene, in registry order.
    pub widgets: Vec<Widget>,
    /// Ids of widgets removed while composing this frame.
    pub removed: Vec<String>,
}

impl SceneUpdate {
    /// Returns the widget with the given id, if present.
    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id() == id)
    }

    /// Returns true if a widget with the given id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.widget(id).is_some()
    }
}

/// The component that actually draws widgets: window, viewer, recorder.
///
/// The backend must not mutate scene state while a frame is being composed;
/// it only sees the finished [`SceneUpdate`].
pub trait RenderBackend {
    /// Draws a widget, replacing any widget with the same id.
    fn upsert_widget(&mut self, widget: &Widget);

    /// Removes a widget. Removing an unknown id must be a no-op.
    fn remove_widget(&mut self, id: &str);

    /// Applies a whole frame: removals first, then every live widget.
    fn present(&mut self, update: &SceneUpdate) {
        for id in &update.removed {
            self.remove_widget(id);
        }
        for widget in &update.widgets {
            self.upsert_widget(widget);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetPayload;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl RenderBackend for Recorder {
        fn upsert_widget(&mut self, widget: &Widget) {
            self.calls.push(format!("upsert {}", widget.id()));
        }

        fn remove_widget(&mut self, id: &str) {
            self.calls.push(format!("remove {id}"));
        }
    }

    #[test]
    fn test_present_removes_first() {
        let update = SceneUpdate {
            widgets: vec![Widget::new("frame", WidgetPayload::CoordinateFrame { scale: 1.0 })],
            removed: vec!["old".to_string()],
        };
        let mut recorder = Recorder::default();
        recorder.present(&update);
        assert_eq!(recorder.calls, vec!["remove old", "upsert frame"]);
        assert!(update.contains("frame"));
        assert!(!update.contains("old"));
    }
}
