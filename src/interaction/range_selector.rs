use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Domain, PixelPoint, Projector, Scale, TimeScale};
use crate::render::{Color, SurfaceHandle, fill_rect};

/// Window-level services the selector borrows while a drag is live.
///
/// Calls always come in matched pairs: every `subscribe_drag_events` is
/// followed by exactly one `unsubscribe_drag_events`, and text-selection
/// suppression is switched on and back off around the same span.
pub trait WindowHost {
    /// Start routing window pointer-move/up, key-down and blur events to the selector.
    fn subscribe_drag_events(&mut self);

    fn unsubscribe_drag_events(&mut self);

    fn set_text_selection_suppressed(&mut self, suppressed: bool);
}

impl<H: WindowHost + ?Sized> WindowHost for &mut H {
    fn subscribe_drag_events(&mut self) {
        (**self).subscribe_drag_events();
    }

    fn unsubscribe_drag_events(&mut self) {
        (**self).unsubscribe_drag_events();
    }

    fn set_text_selection_suppressed(&mut self, suppressed: bool) {
        (**self).set_text_selection_suppressed(suppressed);
    }
}

impl<H: WindowHost + ?Sized> WindowHost for Box<H> {
    fn subscribe_drag_events(&mut self) {
        (**self).subscribe_drag_events();
    }

    fn unsubscribe_drag_events(&mut self) {
        (**self).unsubscribe_drag_events();
    }

    fn set_text_selection_suppressed(&mut self, suppressed: bool) {
        (**self).set_text_selection_suppressed(suppressed);
    }
}

/// Host without a window, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedWindow;

impl WindowHost for DetachedWindow {
    fn subscribe_drag_events(&mut self) {}

    fn unsubscribe_drag_events(&mut self) {}

    fn set_text_selection_suppressed(&mut self, _suppressed: bool) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorKey {
    Escape,
    Other,
}

/// Input delivered to the selector. `x` is in overlay-local pixels, where
/// `0` is the left end of the x-axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SelectorEvent {
    PointerDown { x: f64 },
    PointerMove { x: f64 },
    PointerUp { x: f64 },
    /// The platform aborted the pointer gesture.
    PointerCancel,
    KeyDown { key: SelectorKey },
    WindowBlur,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SelectionState {
    Idle,
    Dragging { anchor: f64, current: f64 },
}

/// Visible selection bounds in overlay-local pixels, `left <= right`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub left: f64,
    pub right: f64,
}

impl SelectionRect {
    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }
}

/// What one event did to the selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionOutcome {
    Ignored,
    Started,
    Updated,
    /// A non-empty interval was reported to the callback.
    Selected(Domain),
    /// The drag ended without reporting (collapsed or cancelled).
    Discarded,
}

/// Drag-to-select overlay over a chart's x-axis strip.
///
/// Starts `Idle`; pointer-down enters `Dragging`, and release, escape,
/// blur or pointer-cancel always return to `Idle`. Window listeners and
/// text-selection suppression are held exactly while `Dragging`, and are
/// released on drop if a drag is still live.
pub struct RangeSelector<H: WindowHost> {
    x_scale: TimeScale,
    state: SelectionState,
    host: H,
    on_select: Box<dyn FnMut(Domain)>,
}

/// Binds a selector to `projector`'s x-scale.
pub fn attach_range_selector<H, F>(projector: &Projector, host: H, on_select: F) -> RangeSelector<H>
where
    H: WindowHost,
    F: FnMut(Domain) + 'static,
{
    RangeSelector {
        x_scale: *projector.x_scale(),
        state: SelectionState::Idle,
        host,
        on_select: Box::new(on_select),
    }
}

impl<H: WindowHost> RangeSelector<H> {
    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging { .. })
    }

    #[must_use]
    pub fn x_scale(&self) -> &TimeScale {
        &self.x_scale
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Current clamped selection, or `None` while idle.
    #[must_use]
    pub fn selection(&self) -> Option<SelectionRect> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Dragging { anchor, current } => Some(self.clamped(anchor, current)),
        }
    }

    /// Rebinds to a freshly built projector.
    ///
    /// A drag in progress is discarded when the x-scale changes, since its
    /// pixels no longer mean the same times.
    pub fn set_projector(&mut self, projector: &Projector) {
        let x_scale = *projector.x_scale();
        if x_scale == self.x_scale {
            return;
        }
        if self.is_dragging() {
            self.cancel("projector replaced");
        }
        self.x_scale = x_scale;
    }

    /// Discards a drag in progress, if any.
    pub fn reset(&mut self) {
        if self.is_dragging() {
            self.cancel("reset");
        }
    }

    pub fn handle_event(&mut self, event: SelectorEvent) -> SelectionOutcome {
        match (self.state, event) {
            (SelectionState::Idle, SelectorEvent::PointerDown { x }) => self.start(x),
            (SelectionState::Idle, _) => SelectionOutcome::Ignored,
            (SelectionState::Dragging { anchor, .. }, SelectorEvent::PointerMove { x }) => {
                if !x.is_finite() {
                    return SelectionOutcome::Ignored;
                }
                self.state = SelectionState::Dragging { anchor, current: x };
                SelectionOutcome::Updated
            }
            (SelectionState::Dragging { anchor, current }, SelectorEvent::PointerUp { x }) => {
                let current = if x.is_finite() { x } else { current };
                self.resolve(anchor, current)
            }
            (
                SelectionState::Dragging { .. },
                SelectorEvent::KeyDown {
                    key: SelectorKey::Escape,
                },
            ) => self.cancel("escape"),
            (SelectionState::Dragging { .. }, SelectorEvent::WindowBlur) => self.cancel("blur"),
            (SelectionState::Dragging { .. }, SelectorEvent::PointerCancel) => {
                self.cancel("pointer cancel")
            }
            (SelectionState::Dragging { .. }, _) => SelectionOutcome::Ignored,
        }
    }

    /// Paints the live selection as a filled band over the axis strip.
    ///
    /// `strip_origin` is the top-left of the strip on the surface; nothing
    /// is drawn while idle.
    pub fn render_overlay(
        &self,
        handle: &mut SurfaceHandle,
        strip_origin: PixelPoint,
        strip_height: f64,
        color: Color,
    ) -> bool {
        let Some(rect) = self.selection() else {
            return false;
        };
        if rect.width() <= 0.0 || strip_height <= 0.0 {
            return false;
        }
        fill_rect(
            handle,
            strip_origin.x + rect.left,
            strip_origin.y,
            rect.width(),
            strip_height,
            color,
        );
        true
    }

    fn clamped(&self, anchor: f64, current: f64) -> SelectionRect {
        let length = self.x_scale.length();
        SelectionRect {
            left: anchor.min(current).clamp(0.0, length),
            right: anchor.max(current).clamp(0.0, length),
        }
    }

    fn start(&mut self, x: f64) -> SelectionOutcome {
        if !x.is_finite() || x < 0.0 || x > self.x_scale.length() {
            return SelectionOutcome::Ignored;
        }
        self.host.subscribe_drag_events();
        self.host.set_text_selection_suppressed(true);
        self.state = SelectionState::Dragging {
            anchor: x,
            current: x,
        };
        debug!(anchor = x, "range selection started");
        SelectionOutcome::Started
    }

    fn finish(&mut self) {
        self.state = SelectionState::Idle;
        self.host.set_text_selection_suppressed(false);
        self.host.unsubscribe_drag_events();
    }

    fn resolve(&mut self, anchor: f64, current: f64) -> SelectionOutcome {
        let rect = self.clamped(anchor, current);
        self.finish();

        if rect.right == rect.left {
            debug!(at = rect.left, "discarding collapsed range selection");
            return SelectionOutcome::Discarded;
        }

        let interval = Domain::new(self.x_scale.invert(rect.left), self.x_scale.invert(rect.right));
        debug!(
            start = interval.min,
            end = interval.max,
            "range selection resolved"
        );
        (self.on_select)(interval);
        SelectionOutcome::Selected(interval)
    }

    fn cancel(&mut self, reason: &'static str) -> SelectionOutcome {
        self.finish();
        debug!(reason, "range selection cancelled");
        SelectionOutcome::Discarded
    }
}

impl<H: WindowHost> Drop for RangeSelector<H> {
    fn drop(&mut self) {
        if self.is_dragging() {
            self.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{
        DetachedWindow, SelectionOutcome, SelectionState, SelectorEvent, SelectorKey,
        attach_range_selector,
    };
    use crate::core::{Domain, ProjectorInput, Sample, build_projector};

    #[test]
    fn pointer_down_outside_axis_is_ignored() {
        let samples = vec![Sample::new(0.0, 1.0), Sample::new(100.0, 2.0)];
        let projector =
            build_projector(ProjectorInput::new(&samples).with_size(100.0, 50.0)).expect("projector");
        let mut selector = attach_range_selector(&projector, DetachedWindow, |_| {});

        assert_eq!(
            selector.handle_event(SelectorEvent::PointerDown { x: -1.0 }),
            SelectionOutcome::Ignored
        );
        assert_eq!(
            selector.handle_event(SelectorEvent::PointerDown { x: 101.0 }),
            SelectionOutcome::Ignored
        );
        assert_eq!(selector.state(), SelectionState::Idle);
    }

    #[test]
    fn selection_is_clamped_to_axis_length() {
        let samples = vec![Sample::new(0.0, 1.0), Sample::new(100.0, 2.0)];
        let projector =
            build_projector(ProjectorInput::new(&samples).with_size(100.0, 50.0)).expect("projector");
        let selected = Rc::new(RefCell::new(Vec::<Domain>::new()));
        let sink = Rc::clone(&selected);
        let mut selector =
            attach_range_selector(&projector, DetachedWindow, move |range| sink.borrow_mut().push(range));

        selector.handle_event(SelectorEvent::PointerDown { x: 60.0 });
        selector.handle_event(SelectorEvent::PointerMove { x: 400.0 });
        let rect = selector.selection().expect("dragging");
        assert_eq!((rect.left, rect.right), (60.0, 100.0));

        selector.handle_event(SelectorEvent::PointerUp { x: -30.0 });
        assert_eq!(selected.borrow().as_slice(), &[Domain::new(0.0, 60.0)]);
    }

    #[test]
    fn other_keys_do_not_cancel() {
        let samples = vec![Sample::new(0.0, 1.0), Sample::new(100.0, 2.0)];
        let projector =
            build_projector(ProjectorInput::new(&samples).with_size(100.0, 50.0)).expect("projector");
        let mut selector = attach_range_selector(&projector, DetachedWindow, |_| {});

        selector.handle_event(SelectorEvent::PointerDown { x: 10.0 });
        assert_eq!(
            selector.handle_event(SelectorEvent::KeyDown {
                key: SelectorKey::Other
            }),
            SelectionOutcome::Ignored
        );
        assert!(selector.is_dragging());
    }
}
