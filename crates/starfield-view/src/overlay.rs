//! UI boundary: crosshair, info panel, and hover cursor.

use glam::Vec2;
use starfield_universe::BodyKind;

use crate::describe::BodyDescription;

/// Crosshair diameter in pixels for a selected body.
pub fn crosshair_size(kind: BodyKind) -> f32 {
    match kind {
        BodyKind::Moon => 15.0,
        BodyKind::Planet => 20.0,
        BodyKind::Star => 25.0,
    }
}

/// Screen-space UI the selection controller drives.
pub trait Overlay {
    /// Draw (or move) the crosshair centered at `position` in window pixels.
    fn show_crosshair(&mut self, position: Vec2, size: f32);
    /// Remove the crosshair.
    fn hide_crosshair(&mut self);
    /// Show the info panel for a body.
    fn show_info_panel(&mut self, description: &BodyDescription);
    /// Remove the info panel.
    fn hide_info_panel(&mut self);
    /// Switch between the default and the "over a body" cursor.
    fn set_hover_cursor(&mut self, hovering: bool);
}

/// One overlay call, as captured by [`RecordingOverlay`].
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayCall {
    /// `show_crosshair`.
    ShowCrosshair {
        /// Center in pixels.
        position: Vec2,
        /// Diameter in pixels.
        size: f32,
    },
    /// `hide_crosshair`.
    HideCrosshair,
    /// `show_info_panel`.
    ShowInfoPanel(BodyDescription),
    /// `hide_info_panel`.
    HideInfoPanel,
    /// `set_hover_cursor`.
    HoverCursor(bool),
}

/// Overlay that records every call, for tests and scripted runs.
#[derive(Clone, Debug, Default)]
pub struct RecordingOverlay {
    /// Calls in order.
    pub calls: Vec<OverlayCall>,
}

impl RecordingOverlay {
    /// Most recent info panel content, if the panel is still shown.
    pub fn info_panel(&self) -> Option<&BodyDescription> {
        for call in self.calls.iter().rev() {
            match call {
                OverlayCall::ShowInfoPanel(d) => return Some(d),
                OverlayCall::HideInfoPanel => return None,
                _ => {}
            }
        }
        None
    }

    /// Whether a crosshair is currently shown.
    pub fn crosshair_shown(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|call| match call {
                OverlayCall::ShowCrosshair { .. } => Some(true),
                OverlayCall::HideCrosshair => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Number of hover cursor changes.
    pub fn hover_changes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, OverlayCall::HoverCursor(_)))
            .count()
    }
}

impl Overlay for RecordingOverlay {
    fn show_crosshair(&mut self, position: Vec2, size: f32) {
        self.calls.push(OverlayCall::ShowCrosshair { position, size });
    }

    fn hide_crosshair(&mut self) {
        self.calls.push(OverlayCall::HideCrosshair);
    }

    fn show_info_panel(&mut self, description: &BodyDescription) {
        self.calls.push(OverlayCall::ShowInfoPanel(description.clone()));
    }

    fn hide_info_panel(&mut self) {
        self.calls.push(OverlayCall::HideInfoPanel);
    }

    fn set_hover_cursor(&mut self, hovering: bool) {
        self.calls.push(OverlayCall::HoverCursor(hovering));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crosshair_sizes_grow_with_kind() {
        assert!(crosshair_size(BodyKind::Moon) < crosshair_size(BodyKind::Planet));
        assert!(crosshair_size(BodyKind::Planet) < crosshair_size(BodyKind::Star));
    }

    #[test]
    fn test_recording_tracks_state() {
        let mut overlay = RecordingOverlay::default();
        assert!(!overlay.crosshair_shown());
        overlay.show_crosshair(Vec2::new(1.0, 2.0), 20.0);
        overlay.set_hover_cursor(true);
        assert!(overlay.crosshair_shown());
        overlay.hide_crosshair();
        assert!(!overlay.crosshair_shown());
        assert_eq!(overlay.hover_changes(), 1);
        assert!(overlay.info_panel().is_none());
    }
}
