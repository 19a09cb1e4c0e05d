use std::cell::RefCell;
use std::rc::{Rc, Weak};

use web_sys::HtmlElement;

use crate::state::{GestureDelta, GestureSession, Transform};

/// Fixed zoom step for the toolbar buttons, pivoted at the viewport center.
pub const BUTTON_ZOOM_IN: f64 = 1.2;
pub const BUTTON_ZOOM_OUT: f64 = 0.8;

const FULLSCREEN_Z_INDEX: &str = "1000";

/// Mediates every change to one diagram's transform. Owns the transform and
/// gesture session; writes the CSS transform of `content` and the advisory
/// cursor of `surface` after each change.
pub struct ViewportController {
    surface: HtmlElement,
    content: HtmlElement,
    transform: Transform,
    session: GestureSession,
    fullscreen: bool,
    saved_surface_style: Option<String>,
}

impl ViewportController {
    pub(crate) fn new(surface: HtmlElement, content: HtmlElement) -> Self {
        Self {
            surface,
            content,
            transform: Transform::default(),
            session: GestureSession::default(),
            fullscreen: false,
            saved_surface_style: None,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Zoom in one toolbar step about the viewport's visual center. No-op at
    /// the maximum scale.
    pub fn zoom_in(&mut self) {
        let (cx, cy) = self.center();
        self.apply(&GestureDelta::ZoomAbout {
            factor: BUTTON_ZOOM_IN,
            pivot_x: cx,
            pivot_y: cy,
        });
    }

    /// Zoom out one toolbar step about the center. No-op at the minimum scale.
    pub fn zoom_out(&mut self) {
        let (cx, cy) = self.center();
        self.apply(&GestureDelta::ZoomAbout {
            factor: BUTTON_ZOOM_OUT,
            pivot_x: cx,
            pivot_y: cy,
        });
    }

    /// Back to the identity view; any in-flight gesture is abandoned and the
    /// cursor returns to default.
    pub fn reset_view(&mut self) {
        self.session.end_drag();
        self.transform.reset();
        self.sync();
    }

    /// Presentation-only: expands the surface container over the page and
    /// suppresses page scroll while active. Never touches the transform.
    pub fn toggle_fullscreen(&mut self) {
        if self.fullscreen {
            self.exit_fullscreen();
        } else {
            self.enter_fullscreen();
        }
    }

    pub(crate) fn apply(&mut self, delta: &GestureDelta) {
        self.transform.apply(delta);
        self.sync();
    }

    pub(crate) fn on_wheel(&mut self, delta_y: f64, cursor_x: f64, cursor_y: f64) {
        let delta = self.session.wheel(delta_y, cursor_x, cursor_y);
        self.apply(&delta);
    }

    pub(crate) fn on_drag_start(&mut self, x: f64, y: f64) {
        self.session.begin_drag(x, y, &self.transform);
        self.sync_cursor();
    }

    pub(crate) fn on_drag_move(&mut self, x: f64, y: f64) {
        if let Some(delta) = self.session.drag_to(x, y) {
            self.apply(&delta);
        }
    }

    pub(crate) fn on_drag_end(&mut self) {
        self.session.end_drag();
        self.sync_cursor();
    }

    pub(crate) fn on_pinch_start(&mut self, distance: f64) {
        self.session.begin_pinch(distance);
        self.sync_cursor();
    }

    pub(crate) fn on_pinch_move(&mut self, distance: f64, mid_x: f64, mid_y: f64) {
        if let Some(delta) = self.session.pinch_to(distance, mid_x, mid_y) {
            self.apply(&delta);
        }
    }

    pub(crate) fn on_touch_released(&mut self, remaining: u32) {
        self.session.touch_released(remaining);
        self.sync_cursor();
    }

    fn center(&self) -> (f64, f64) {
        let rect = self.surface.get_bounding_client_rect();
        (rect.width() / 2.0, rect.height() / 2.0)
    }

    pub(crate) fn sync(&self) {
        let _ = self
            .content
            .style()
            .set_property("transform", &self.transform.css());
        self.sync_cursor();
    }

    fn sync_cursor(&self) {
        let cursor = if self.session.is_dragging() {
            "grabbing"
        } else if self.session.is_idle() && self.transform.scale > 1.0 {
            "grab"
        } else {
            ""
        };
        let style = self.surface.style();
        if cursor.is_empty() {
            let _ = style.remove_property("cursor");
        } else {
            let _ = style.set_property("cursor", cursor);
        }
    }

    fn enter_fullscreen(&mut self) {
        self.saved_surface_style = self.surface.get_attribute("style");
        let style = self.surface.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("top", "0");
        let _ = style.set_property("left", "0");
        let _ = style.set_property("width", "100vw");
        let _ = style.set_property("height", "100vh");
        let _ = style.set_property("border-radius", "0");
        let _ = style.set_property("z-index", FULLSCREEN_Z_INDEX);
        if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
            let _ = body.style().set_property("overflow", "hidden");
        }
        self.fullscreen = true;
    }

    fn exit_fullscreen(&mut self) {
        match self.saved_surface_style.take() {
            Some(style) => {
                let _ = self.surface.set_attribute("style", &style);
            }
            None => {
                let _ = self.surface.remove_attribute("style");
            }
        }
        if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
            let _ = body.style().remove_property("overflow");
        }
        self.fullscreen = false;
        // The restored style attribute predates the current cursor state.
        self.sync();
    }
}

impl Drop for ViewportController {
    fn drop(&mut self) {
        // Leave the page scrollable if the viewport goes away mid-fullscreen.
        if self.fullscreen {
            self.exit_fullscreen();
        }
    }
}

/// Weak-backed handle to a registered viewport. Every call on a handle whose
/// viewport has been unregistered is a silent no-op.
#[derive(Clone)]
pub struct ControllerHandle {
    inner: Weak<RefCell<ViewportController>>,
}

impl ControllerHandle {
    pub(crate) fn new(controller: &Rc<RefCell<ViewportController>>) -> Self {
        Self {
            inner: Rc::downgrade(controller),
        }
    }

    pub fn zoom_in(&self) {
        self.with(ViewportController::zoom_in);
    }

    pub fn zoom_out(&self) {
        self.with(ViewportController::zoom_out);
    }

    pub fn reset_view(&self) {
        self.with(ViewportController::reset_view);
    }

    pub fn toggle_fullscreen(&self) {
        self.with(ViewportController::toggle_fullscreen);
    }

    /// Current transform, or `None` once the viewport is gone.
    pub fn transform(&self) -> Option<Transform> {
        let controller = self.inner.upgrade()?;
        let transform = controller.borrow().transform();
        Some(transform)
    }

    fn with(&self, f: impl FnOnce(&mut ViewportController)) {
        if let Some(controller) = self.inner.upgrade() {
            f(&mut controller.borrow_mut());
        }
    }
}

impl PartialEq for ControllerHandle {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.inner, &other.inner)
    }
}
