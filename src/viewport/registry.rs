use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::util::clog;
use crate::viewport::controller::{ControllerHandle, ViewportController};
use crate::viewport::wiring::EventWiring;

struct ViewportEntry {
    content: HtmlElement,
    controller: Rc<RefCell<ViewportController>>,
    wiring: EventWiring,
}

/// Associates each rendered diagram element with its own controller, so any
/// number of independently controlled diagrams can live on one page. Owned
/// explicitly by whatever composes the page; not a singleton.
#[derive(Default)]
pub struct ViewportRegistry {
    entries: Vec<ViewportEntry>,
}

impl ViewportRegistry {
    /// Wires up a freshly rendered diagram element and returns its handle.
    /// One-to-one: registering an element twice returns a handle to the
    /// existing controller. The element's parent (the element itself when
    /// parentless) becomes the interaction surface and fullscreen target.
    pub fn register(&mut self, content: &HtmlElement) -> ControllerHandle {
        if let Some(entry) = self.entries.iter().find(|e| e.content == *content) {
            return ControllerHandle::new(&entry.controller);
        }
        let surface = content
            .parent_element()
            .and_then(|p| p.dyn_into::<HtmlElement>().ok())
            .unwrap_or_else(|| content.clone());
        let controller = Rc::new(RefCell::new(ViewportController::new(
            surface.clone(),
            content.clone(),
        )));
        controller.borrow().sync();
        let wiring = EventWiring::attach(&surface, &controller);
        let handle = ControllerHandle::new(&controller);
        self.entries.push(ViewportEntry {
            content: content.clone(),
            controller,
            wiring,
        });
        clog(&format!("viewport registered ({} active)", self.entries.len()));
        handle
    }

    /// Detaches listeners and drops the entry. Safe to call repeatedly;
    /// handles that outlive the entry become silent no-ops.
    pub fn unregister(&mut self, content: &HtmlElement) {
        let Some(pos) = self.entries.iter().position(|e| e.content == *content) else {
            return;
        };
        let entry = self.entries.remove(pos);
        entry.wiring.detach();
        clog(&format!(
            "viewport unregistered ({} active)",
            self.entries.len()
        ));
    }

    /// Handle to the Nth registered diagram, in registration order. External
    /// toolbar code addresses instances through this.
    pub fn controller(&self, index: usize) -> Option<ControllerHandle> {
        self.entries
            .get(index)
            .map(|e| ControllerHandle::new(&e.controller))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
