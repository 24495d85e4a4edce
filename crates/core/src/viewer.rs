//! Before/after comparison viewer state machine.
//!
//! Models the lightbox the gallery opens on a product group: an active
//! variation compared against the original through a draggable slider,
//! with keyboard shortcuts and swipe navigation. All UI event handling
//! is expressed as explicit transitions on one machine so drag, touch,
//! and keyboard can never disagree about the session state.
//!
//! Mouse and touch slider movement share a single clamp
//! (`position = clamp(x / width * 100, 0, 100)`); swipe navigation is
//! evaluated once per gesture from the start/end positions, never per
//! move event.

use crate::group::NormalizedView;

/// Slider center position, used on open and by the reset shortcut.
pub const SLIDER_CENTER: f64 = 50.0;
/// Minimum horizontal travel (px) for a touch gesture to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Image layers whose load completion the session tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// The active variation shown in the comparison pane.
    Comparison,
    /// The original shown behind the slider.
    Original,
}

/// Keyboard shortcuts the viewer responds to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Toggle the slider fully to one side.
    Space,
    /// Reset the slider to center.
    KeyR,
    ArrowLeft,
    ArrowRight,
    Escape,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ViewerError {
    #[error("viewer is not open")]
    NotOpen,

    /// The group has nothing to compare (degraded new-system group or
    /// an old-system group that arrived with an empty variations list).
    #[error("group has no variations to compare")]
    NoVariations,

    #[error("variation index {index} out of range (count {count})")]
    OutOfRange { index: usize, count: usize },
}

/// Live viewer state for one opened group.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSession {
    group_id: String,
    variations_count: usize,
    active_index: usize,
    slider_position: f64,
    dragging: bool,
    touch_origin: Option<f64>,
    loading_comparison: bool,
    loading_original: bool,
}

impl ViewerSession {
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Always in `[0, variations_count)`.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn variations_count(&self) -> usize {
        self.variations_count
    }

    /// Always in `[0, 100]`.
    pub fn slider_position(&self) -> f64 {
        self.slider_position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// True until both layers have reported load (or placeholder render).
    pub fn is_loading(&self) -> bool {
        self.loading_comparison || self.loading_original
    }

    /// Reset per-variation state: slider recentered, both layers loading.
    fn reset_for_variation(&mut self) {
        self.slider_position = SLIDER_CENTER;
        self.loading_comparison = true;
        self.loading_original = true;
    }
}

/// Lifecycle of the viewer.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewerState {
    /// Never opened.
    #[default]
    Idle,
    Open(ViewerSession),
    /// Opened at least once, currently closed.
    Closed,
}

/// The comparison viewer. One instance per gallery page.
#[derive(Debug, Clone, Default)]
pub struct ComparisonViewer {
    state: ViewerState,
}

impl ComparisonViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open(_))
    }

    pub fn session(&self) -> Option<&ViewerSession> {
        match &self.state {
            ViewerState::Open(session) => Some(session),
            _ => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut ViewerSession> {
        match &mut self.state {
            ViewerState::Open(session) => Some(session),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Open the viewer on a group at the given variation.
    ///
    /// The slider starts centered and both layers are marked loading.
    /// Opening while already open replaces the session (the gallery can
    /// only ever click one card at a time, but the machine does not rely
    /// on that).
    pub fn open(
        &mut self,
        group_id: &str,
        view: &NormalizedView,
        start_index: usize,
    ) -> Result<(), ViewerError> {
        if view.variations_count == 0 {
            return Err(ViewerError::NoVariations);
        }
        if start_index >= view.variations_count {
            return Err(ViewerError::OutOfRange {
                index: start_index,
                count: view.variations_count,
            });
        }

        self.state = ViewerState::Open(ViewerSession {
            group_id: group_id.to_string(),
            variations_count: view.variations_count,
            active_index: start_index,
            slider_position: SLIDER_CENTER,
            dragging: false,
            touch_origin: None,
            loading_comparison: true,
            loading_original: true,
        });
        Ok(())
    }

    /// Close the viewer. Idempotent: closing an already-closed (or never
    /// opened) viewer is a no-op.
    pub fn close(&mut self) {
        if self.is_open() {
            self.state = ViewerState::Closed;
        }
    }

    // -----------------------------------------------------------------------
    // Variation navigation
    // -----------------------------------------------------------------------

    /// Jump directly to a variation. Unlike [`next`]/[`previous`] this
    /// never wraps; out-of-range indices are rejected.
    ///
    /// [`next`]: Self::next
    /// [`previous`]: Self::previous
    pub fn select_variation(&mut self, index: usize) -> Result<(), ViewerError> {
        let session = self.session_mut().ok_or(ViewerError::NotOpen)?;
        if index >= session.variations_count {
            return Err(ViewerError::OutOfRange {
                index,
                count: session.variations_count,
            });
        }
        session.active_index = index;
        session.reset_for_variation();
        Ok(())
    }

    /// Advance to the next variation, wrapping past the end.
    pub fn next(&mut self) -> Result<(), ViewerError> {
        let session = self.session_mut().ok_or(ViewerError::NotOpen)?;
        session.active_index = (session.active_index + 1) % session.variations_count;
        session.reset_for_variation();
        Ok(())
    }

    /// Step to the previous variation, wrapping past the start.
    pub fn previous(&mut self) -> Result<(), ViewerError> {
        let session = self.session_mut().ok_or(ViewerError::NotOpen)?;
        session.active_index =
            (session.active_index + session.variations_count - 1) % session.variations_count;
        session.reset_for_variation();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Slider drag (mouse or touch on the comparison surface)
    // -----------------------------------------------------------------------

    /// Begin a slider drag. Ignored when the viewer is closed.
    pub fn drag_start(&mut self) {
        if let Some(session) = self.session_mut() {
            session.dragging = true;
        }
    }

    /// Move the slider to `x_offset` within a container of
    /// `container_width` px. Ignored unless a drag is in progress.
    ///
    /// Offsets outside the container clamp to the edges, so fast drags
    /// that leave the element still land on 0 or 100.
    pub fn drag_move(&mut self, x_offset: f64, container_width: f64) {
        if container_width <= 0.0 {
            return;
        }
        if let Some(session) = self.session_mut() {
            if session.dragging {
                session.slider_position = (x_offset / container_width * 100.0).clamp(0.0, 100.0);
            }
        }
    }

    /// End a slider drag. The position stays where the drag left it.
    pub fn drag_end(&mut self) {
        if let Some(session) = self.session_mut() {
            session.dragging = false;
        }
    }

    // -----------------------------------------------------------------------
    // Swipe navigation (touch on the viewer surface)
    // -----------------------------------------------------------------------

    /// Record the starting x position of a touch gesture.
    pub fn touch_start(&mut self, x: f64) {
        if let Some(session) = self.session_mut() {
            session.touch_origin = Some(x);
        }
    }

    /// Finish a touch gesture at `x` and navigate if the total travel
    /// crossed the swipe threshold: leftward swipes advance, rightward
    /// swipes go back. Sub-threshold gestures do nothing.
    pub fn touch_end(&mut self, x: f64) {
        let Some(session) = self.session_mut() else {
            return;
        };
        let Some(origin) = session.touch_origin.take() else {
            return;
        };

        let travel = x - origin;
        if travel <= -SWIPE_THRESHOLD_PX {
            let _ = self.next();
        } else if travel >= SWIPE_THRESHOLD_PX {
            let _ = self.previous();
        }
    }

    // -----------------------------------------------------------------------
    // Keyboard
    // -----------------------------------------------------------------------

    /// Handle a keyboard shortcut. All keys are no-ops while closed
    /// (Escape in particular stays idempotent).
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Escape => self.close(),
            Key::ArrowRight => {
                let _ = self.next();
            }
            Key::ArrowLeft => {
                let _ = self.previous();
            }
            Key::Space => {
                if let Some(session) = self.session_mut() {
                    // Binary toggle: flip to whichever side is farther.
                    session.slider_position = if session.slider_position < SLIDER_CENTER {
                        100.0
                    } else {
                        0.0
                    };
                }
            }
            Key::KeyR => {
                if let Some(session) = self.session_mut() {
                    session.slider_position = SLIDER_CENTER;
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Image loading
    // -----------------------------------------------------------------------

    /// Mark a layer as loaded. Clients also call this when a layer
    /// renders a placeholder instead of an image, so the loading overlay
    /// always clears.
    pub fn image_loaded(&mut self, layer: Layer) {
        if let Some(session) = self.session_mut() {
            match layer {
                Layer::Comparison => session.loading_comparison = false,
                Layer::Original => session.loading_original = false,
            }
        }
    }
}
