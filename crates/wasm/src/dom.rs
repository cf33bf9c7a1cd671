//! DOM-backed subscriptions and the widget container.

use folio_core::html::{ROOT_ID, WIDGET_ID, WIDGET_SLOT_ID, layout_class};
use folio_core::{Disconnect, ExternalWidget};
use folio_protocol::Layout;
use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CustomEvent, Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverInit,
    Window,
};

/// DOM event fired on `document` after the widget container is attached.
pub const MOUNT_EVENT: &str = "folio:widget-mount";
/// DOM event fired on `document` after the widget container is removed.
pub const UNMOUNT_EVENT: &str = "folio:widget-unmount";

/// One `IntersectionObserver` watching one section root.
pub struct DomObservation {
    observer: IntersectionObserver,
}

impl DomObservation {
    pub fn observe(
        target: &Element,
        callback: &js_sys::Function,
        threshold: f64,
    ) -> Result<Self, JsValue> {
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer = IntersectionObserver::new_with_options(callback, &init)?;
        observer.observe(target);
        Ok(Self { observer })
    }
}

impl Disconnect for DomObservation {
    fn disconnect(&mut self) {
        self.observer.disconnect();
    }
}

/// A `resize` listener on the window. Owns its callback so the closure
/// lives exactly as long as the registration.
pub struct ResizeListener {
    window: Window,
    callback: Closure<dyn FnMut()>,
}

impl ResizeListener {
    pub fn register(window: &Window, handler: fn()) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut()>::new(handler);
        window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
        Ok(Self {
            window: window.clone(),
            callback,
        })
    }
}

impl Disconnect for ResizeListener {
    fn disconnect(&mut self) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref())
        {
            warn!("failed to remove resize listener: {e:?}");
        }
    }
}

/// The external widget as the page sees it: an empty container the
/// widget's own script fills in when it hears [`MOUNT_EVENT`].
pub struct DomWidget {
    document: Document,
}

impl DomWidget {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

/// A mounted widget container. Dropping it removes the container.
pub struct MountedWidget {
    document: Document,
    element: Option<Element>,
}

impl ExternalWidget for DomWidget {
    type Instance = MountedWidget;

    fn mount(&mut self) -> MountedWidget {
        let element = match self.document.create_element("section") {
            Ok(element) => Some(element),
            Err(e) => {
                warn!("failed to create widget container: {e:?}");
                None
            }
        };
        if let Some(element) = &element {
            element.set_id(WIDGET_ID);
            element.set_class_name("folio-widget");
            match self.document.get_element_by_id(WIDGET_SLOT_ID) {
                Some(slot) => {
                    if let Err(e) = slot.append_child(element) {
                        warn!("failed to attach widget container: {e:?}");
                    }
                }
                None => warn!("no #{WIDGET_SLOT_ID} to mount the widget into"),
            }
        }
        dispatch(&self.document, MOUNT_EVENT);
        MountedWidget {
            document: self.document.clone(),
            element,
        }
    }
}

impl Drop for MountedWidget {
    fn drop(&mut self) {
        if let Some(element) = self.element.take() {
            element.remove();
        }
        dispatch(&self.document, UNMOUNT_EVENT);
    }
}

fn dispatch(document: &Document, name: &str) {
    let result = CustomEvent::new(name).and_then(|event| document.dispatch_event(&event));
    if let Err(e) = result {
        warn!("failed to dispatch {name}: {e:?}");
    }
}

/// Switch the already-rendered page to `layout` in place, without
/// re-rendering (which would detach every observed section).
pub fn apply_layout(document: &Document, layout: Layout) {
    if let Some(root) = document.get_element_by_id(ROOT_ID) {
        root.set_class_name(&format!("folio {}", layout_class(layout)));
    }
    let direction = if layout.is_mobile() { "column" } else { "row" };
    let Ok(rows) = document.query_selector_all(".folio-row") else {
        return;
    };
    for idx in 0..rows.length() {
        let Some(row) = rows
            .get(idx)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        if let Err(e) = row.style().set_property("flex-direction", direction) {
            warn!("failed to restyle row: {e:?}");
        }
    }
}
