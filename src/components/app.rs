use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use super::diagram_view::DiagramView;
use crate::viewport::ViewportRegistry;

/// Shared registry handle, provided through context so toolbar code can
/// address any registered diagram without prop drilling.
#[derive(Clone)]
pub struct RegistryHandle(pub Rc<RefCell<ViewportRegistry>>);

impl PartialEq for RegistryHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let registry = use_mut_ref(|| ViewportRegistry::default());
    let registry_handle = RegistryHandle(registry.clone());

    // Addresses every viewport by registration index, the same way external
    // toolbar code does.
    let reset_all = {
        let registry = registry.clone();
        Callback::from(move |_| {
            let registry = registry.borrow();
            for i in 0..registry.len() {
                if let Some(handle) = registry.controller(i) {
                    handle.reset_view();
                }
            }
        })
    };

    html! {
        <ContextProvider<RegistryHandle> context={registry_handle}>
            <div id="root" style="min-height:100vh; background:#010409; color:#e6edf3; font-family:sans-serif;">
                <div id="top-bar" style="display:flex; align-items:center; gap:12px; padding:10px 16px; background:#161b22; border-bottom:1px solid #30363d;">
                    <strong>{"Diagram viewport demo"}</strong>
                    <span style="color:#8b949e; font-size:12px;">{"wheel to zoom, drag to pan, pinch on touch"}</span>
                    <button onclick={reset_all} style="margin-left:auto;">{"Reset all views"}</button>
                </div>
                <div style="display:flex; gap:16px; padding:16px; flex-wrap:wrap;">
                    <DiagramView title="Request flow">
                        { request_flow_diagram() }
                    </DiagramView>
                    <DiagramView title="Deployment topology">
                        { deployment_diagram() }
                    </DiagramView>
                </div>
            </div>
        </ContextProvider<RegistryHandle>>
    }
}

// Stand-ins for the external diagram renderer: the engine only ever sees the
// wrapping element, never the SVG internals.

fn request_flow_diagram() -> Html {
    html! {
        <svg width="100%" height="100%">
            <rect x="40" y="40" width="120" height="48" rx="6" fill="#1f6feb" />
            <text x="100" y="68" fill="#e6edf3" font-size="14" text-anchor="middle">{"Client"}</text>
            <line x1="160" y1="64" x2="240" y2="64" stroke="#8b949e" stroke-width="2" />
            <rect x="240" y="40" width="120" height="48" rx="6" fill="#238636" />
            <text x="300" y="68" fill="#e6edf3" font-size="14" text-anchor="middle">{"Gateway"}</text>
            <line x1="300" y1="88" x2="300" y2="180" stroke="#8b949e" stroke-width="2" />
            <rect x="240" y="180" width="120" height="48" rx="6" fill="#8957e5" />
            <text x="300" y="208" fill="#e6edf3" font-size="14" text-anchor="middle">{"Service"}</text>
            <line x1="300" y1="228" x2="300" y2="290" stroke="#8b949e" stroke-width="2" />
            <rect x="240" y="290" width="120" height="48" rx="6" fill="#da3633" />
            <text x="300" y="318" fill="#e6edf3" font-size="14" text-anchor="middle">{"Store"}</text>
        </svg>
    }
}

fn deployment_diagram() -> Html {
    html! {
        <svg width="100%" height="100%">
            <circle cx="240" cy="70" r="36" fill="#1f6feb" />
            <text x="240" y="74" fill="#e6edf3" font-size="13" text-anchor="middle">{"LB"}</text>
            <line x1="212" y1="94" x2="130" y2="190" stroke="#8b949e" stroke-width="2" />
            <line x1="240" y1="106" x2="240" y2="184" stroke="#8b949e" stroke-width="2" />
            <line x1="268" y1="94" x2="350" y2="190" stroke="#8b949e" stroke-width="2" />
            <circle cx="120" cy="220" r="32" fill="#238636" />
            <text x="120" y="224" fill="#e6edf3" font-size="13" text-anchor="middle">{"web-1"}</text>
            <circle cx="240" cy="220" r="32" fill="#238636" />
            <text x="240" y="224" fill="#e6edf3" font-size="13" text-anchor="middle">{"web-2"}</text>
            <circle cx="360" cy="220" r="32" fill="#238636" />
            <text x="360" y="224" fill="#e6edf3" font-size="13" text-anchor="middle">{"web-3"}</text>
            <line x1="240" y1="252" x2="240" y2="300" stroke="#8b949e" stroke-width="2" />
            <rect x="180" y="300" width="120" height="40" rx="6" fill="#8957e5" />
            <text x="240" y="324" fill="#e6edf3" font-size="13" text-anchor="middle">{"db"}</text>
        </svg>
    }
}
