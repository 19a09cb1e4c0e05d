use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Document, HtmlElement, MouseEvent, TouchEvent, TouchList, WheelEvent,
};

use crate::state::gesture::pinch_geometry;
use crate::viewport::controller::ViewportController;

/// Owns every JS listener closure for one viewport and detaches them on
/// unregister. The document-level mousemove/mouseup pair is registered only
/// while a drag is active.
pub(crate) struct EventWiring {
    surface: HtmlElement,
    document: Document,
    wheel: Closure<dyn FnMut(WheelEvent)>,
    mouse_down: Closure<dyn FnMut(MouseEvent)>,
    touch_start: Closure<dyn FnMut(TouchEvent)>,
    touch_move: Closure<dyn FnMut(TouchEvent)>,
    touch_end: Closure<dyn FnMut(TouchEvent)>,
    // Alive for the lifetime of the viewport; only their document
    // registrations are scoped to the drag.
    _drag_move: Closure<dyn FnMut(MouseEvent)>,
    _drag_up: Closure<dyn FnMut(MouseEvent)>,
    drag_fns: Rc<RefCell<Option<(Function, Function)>>>,
    detached: Cell<bool>,
}

impl EventWiring {
    pub(crate) fn attach(
        surface: &HtmlElement,
        controller: &Rc<RefCell<ViewportController>>,
    ) -> Self {
        let document = web_sys::window()
            .expect("no global `window` exists")
            .document()
            .expect("should have a document on window");

        let drag_fns: Rc<RefCell<Option<(Function, Function)>>> = Rc::new(RefCell::new(None));

        let drag_move = {
            let controller = controller.clone();
            Closure::wrap(Box::new(move |e: MouseEvent| {
                controller
                    .borrow_mut()
                    .on_drag_move(e.client_x() as f64, e.client_y() as f64);
            }) as Box<dyn FnMut(_)>)
        };
        let drag_up = {
            let controller = controller.clone();
            let document = document.clone();
            let drag_fns = drag_fns.clone();
            Closure::wrap(Box::new(move |_e: MouseEvent| {
                controller.borrow_mut().on_drag_end();
                if let Some((mv, up)) = &*drag_fns.borrow() {
                    let _ = document.remove_event_listener_with_callback("mousemove", mv);
                    let _ = document.remove_event_listener_with_callback("mouseup", up);
                }
            }) as Box<dyn FnMut(_)>)
        };
        *drag_fns.borrow_mut() = Some((
            drag_move.as_ref().unchecked_ref::<Function>().clone(),
            drag_up.as_ref().unchecked_ref::<Function>().clone(),
        ));

        let mouse_down = {
            let controller = controller.clone();
            let document = document.clone();
            let drag_fns = drag_fns.clone();
            Closure::wrap(Box::new(move |e: MouseEvent| {
                if e.button() != 0 {
                    return;
                }
                e.prevent_default();
                controller
                    .borrow_mut()
                    .on_drag_start(e.client_x() as f64, e.client_y() as f64);
                // The drag must survive the pointer leaving the element, so
                // the move/up pair is observed at the document until release.
                if let Some((mv, up)) = &*drag_fns.borrow() {
                    let _ = document.add_event_listener_with_callback("mousemove", mv);
                    let _ = document.add_event_listener_with_callback("mouseup", up);
                }
            }) as Box<dyn FnMut(_)>)
        };

        let wheel = {
            let controller = controller.clone();
            let surface = surface.clone();
            Closure::wrap(Box::new(move |e: WheelEvent| {
                e.prevent_default();
                let (cx, cy) = surface_point(&surface, e.client_x() as f64, e.client_y() as f64);
                controller.borrow_mut().on_wheel(e.delta_y(), cx, cy);
            }) as Box<dyn FnMut(_)>)
        };

        let touch_start = {
            let controller = controller.clone();
            Closure::wrap(Box::new(move |e: TouchEvent| {
                let touches = e.touches();
                let mut ctrl = controller.borrow_mut();
                if touches.length() >= 2 {
                    if let Some([a, b]) = first_two(&touches) {
                        let (_, _, distance) = pinch_geometry(a.0, a.1, b.0, b.1);
                        ctrl.on_pinch_start(distance);
                    }
                } else if let Some(t) = touches.item(0) {
                    ctrl.on_drag_start(t.client_x() as f64, t.client_y() as f64);
                }
            }) as Box<dyn FnMut(_)>)
        };

        let touch_move = {
            let controller = controller.clone();
            let surface = surface.clone();
            Closure::wrap(Box::new(move |e: TouchEvent| {
                let touches = e.touches();
                {
                    let mut ctrl = controller.borrow_mut();
                    if touches.length() >= 2 {
                        if let Some([a, b]) = first_two(&touches) {
                            let (mid_x, mid_y, distance) = pinch_geometry(a.0, a.1, b.0, b.1);
                            let (px, py) = surface_point(&surface, mid_x, mid_y);
                            ctrl.on_pinch_move(distance, px, py);
                        }
                    } else if let Some(t) = touches.item(0) {
                        ctrl.on_drag_move(t.client_x() as f64, t.client_y() as f64);
                    }
                }
                // Keep the page from scrolling underneath the gesture.
                e.prevent_default();
            }) as Box<dyn FnMut(_)>)
        };

        let touch_end = {
            let controller = controller.clone();
            Closure::wrap(Box::new(move |e: TouchEvent| {
                controller
                    .borrow_mut()
                    .on_touch_released(e.touches().length());
            }) as Box<dyn FnMut(_)>)
        };

        let passive_off = AddEventListenerOptions::new();
        passive_off.set_passive(false);
        let _ = surface.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            wheel.as_ref().unchecked_ref(),
            &passive_off,
        );
        let _ = surface.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            touch_move.as_ref().unchecked_ref(),
            &passive_off,
        );
        let _ = surface
            .add_event_listener_with_callback("mousedown", mouse_down.as_ref().unchecked_ref());
        let _ = surface
            .add_event_listener_with_callback("touchstart", touch_start.as_ref().unchecked_ref());
        let _ = surface
            .add_event_listener_with_callback("touchend", touch_end.as_ref().unchecked_ref());
        let _ = surface
            .add_event_listener_with_callback("touchcancel", touch_end.as_ref().unchecked_ref());

        Self {
            surface: surface.clone(),
            document,
            wheel,
            mouse_down,
            touch_start,
            touch_move,
            touch_end,
            _drag_move: drag_move,
            _drag_up: drag_up,
            drag_fns,
            detached: Cell::new(false),
        }
    }

    /// Removes every listener, including an in-flight drag subscription.
    /// Safe to call more than once.
    pub(crate) fn detach(&self) {
        if self.detached.replace(true) {
            return;
        }
        let _ = self
            .surface
            .remove_event_listener_with_callback("wheel", self.wheel.as_ref().unchecked_ref());
        let _ = self.surface.remove_event_listener_with_callback(
            "mousedown",
            self.mouse_down.as_ref().unchecked_ref(),
        );
        let _ = self.surface.remove_event_listener_with_callback(
            "touchstart",
            self.touch_start.as_ref().unchecked_ref(),
        );
        let _ = self.surface.remove_event_listener_with_callback(
            "touchmove",
            self.touch_move.as_ref().unchecked_ref(),
        );
        let _ = self.surface.remove_event_listener_with_callback(
            "touchend",
            self.touch_end.as_ref().unchecked_ref(),
        );
        let _ = self.surface.remove_event_listener_with_callback(
            "touchcancel",
            self.touch_end.as_ref().unchecked_ref(),
        );
        if let Some((mv, up)) = &*self.drag_fns.borrow() {
            let _ = self
                .document
                .remove_event_listener_with_callback("mousemove", mv);
            let _ = self
                .document
                .remove_event_listener_with_callback("mouseup", up);
        }
    }
}

impl Drop for EventWiring {
    fn drop(&mut self) {
        self.detach();
    }
}

fn surface_point(surface: &HtmlElement, client_x: f64, client_y: f64) -> (f64, f64) {
    let rect = surface.get_bounding_client_rect();
    (client_x - rect.left(), client_y - rect.top())
}

fn first_two(touches: &TouchList) -> Option<[(f64, f64); 2]> {
    let a = touches.item(0)?;
    let b = touches.item(1)?;
    Some([
        (a.client_x() as f64, a.client_y() as f64),
        (b.client_x() as f64, b.client_y() as f64),
    ])
}
