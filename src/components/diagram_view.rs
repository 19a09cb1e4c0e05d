use web_sys::HtmlElement;
use yew::prelude::*;

use super::app::RegistryHandle;
use super::viewport_controls::ViewportControls;
use crate::viewport::ControllerHandle;

#[derive(Properties, PartialEq, Clone)]
pub struct DiagramViewProps {
    pub title: AttrValue,
    pub children: Html,
}

/// Hosts one rendered diagram: registers its content element with the shared
/// registry on mount, unregisters on unmount, and wires the toolbar to the
/// controller handle.
#[function_component(DiagramView)]
pub fn diagram_view(props: &DiagramViewProps) -> Html {
    let content_ref = use_node_ref();
    let registry = use_context::<RegistryHandle>().expect("no viewport registry in context");
    let handle = use_mut_ref(|| None::<ControllerHandle>);

    {
        let content_ref = content_ref.clone();
        let registry = registry.clone();
        let handle = handle.clone();
        use_effect_with((), move |_| {
            let content: HtmlElement = content_ref
                .cast::<HtmlElement>()
                .expect("content_ref not attached to an element");
            *handle.borrow_mut() = Some(registry.0.borrow_mut().register(&content));
            move || {
                registry.0.borrow_mut().unregister(&content);
            }
        });
    }

    let zoom_in = {
        let handle = handle.clone();
        Callback::from(move |_| {
            if let Some(h) = &*handle.borrow() {
                h.zoom_in();
            }
        })
    };
    let zoom_out = {
        let handle = handle.clone();
        Callback::from(move |_| {
            if let Some(h) = &*handle.borrow() {
                h.zoom_out();
            }
        })
    };
    let reset = {
        let handle = handle.clone();
        Callback::from(move |_| {
            if let Some(h) = &*handle.borrow() {
                h.reset_view();
            }
        })
    };
    let fullscreen = {
        let handle = handle.clone();
        Callback::from(move |_| {
            if let Some(h) = &*handle.borrow() {
                h.toggle_fullscreen();
            }
        })
    };

    html! {
        <div style="position:relative; overflow:hidden; width:480px; height:360px; background:#0e1116; border:1px solid #30363d; border-radius:8px;">
            <div ref={content_ref} style="width:100%; height:100%; transform-origin:0 0;">
                { props.children.clone() }
            </div>
            <div style="position:absolute; left:12px; top:12px; color:#8b949e; font:12px sans-serif; pointer-events:none;">
                { props.title.clone() }
            </div>
            <ViewportControls
                on_zoom_in={zoom_in}
                on_zoom_out={zoom_out}
                on_reset={reset}
                on_fullscreen={fullscreen}
            />
        </div>
    }
}
