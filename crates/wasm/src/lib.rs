mod console;
mod dom;

use std::cell::RefCell;

use folio_core::content::profile_page;
use folio_core::html::{render_html, section_style};
use folio_core::model::PageError;
use folio_core::render::reveal_style;
use folio_core::{
    BreakpointMonitor, ExternalWidget, IntersectionEntry, PageComposer, PageConfig, Polled,
    RevealTransition,
};
use folio_protocol::{Layout, PageView};
use js_sys::Array;
use log::{LevelFilter, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry};

use crate::dom::{DomObservation, DomWidget, ResizeListener};

/// Everything a mounted page keeps alive between events.
struct Runtime {
    document: Document,
    monitor: BreakpointMonitor<ResizeListener>,
    composer: PageComposer<DomObservation, DomWidget>,
    /// Shared by every section's observer; dropped only with the runtime so
    /// it never goes away while one of its own invocations is running.
    _on_intersect: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

/// Render the profile page into the element `root_id` and start reacting
/// to scrolling and resizing. Replaces any page started earlier.
#[wasm_bindgen]
pub fn start(root_id: &str, config_json: Option<String>) -> Result<(), JsError> {
    console::install(LevelFilter::Info);
    console_error_panic_hook::set_once();

    let config = parse_config(config_json.as_deref())?;
    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("no document"))?;
    let mount = document
        .get_element_by_id(root_id)
        .ok_or_else(|| JsError::new(&format!("no element with id '{root_id}'")))?;
    let page = profile_page().map_err(|e| JsError::new(&e.to_string()))?;

    teardown();

    let width = window.inner_width().ok().and_then(|w| w.as_f64());
    let mut monitor = BreakpointMonitor::new(config.breakpoint_px, width);
    let mut composer = PageComposer::new(
        page,
        &config,
        monitor.reader(),
        DomWidget::new(document.clone()),
    );

    // Markup goes in first so the widget slot and section roots exist.
    mount.set_inner_html(&render_html(&composer.view()));

    let on_intersect =
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(handle_intersections);
    let ids: Vec<String> = composer
        .page()
        .sections()
        .iter()
        .map(|s| s.id().to_string())
        .collect();
    for id in &ids {
        let Some(element) = document.get_element_by_id(id) else {
            warn!("section {id} missing from rendered markup");
            continue;
        };
        let observation = DomObservation::observe(
            &element,
            on_intersect.as_ref().unchecked_ref(),
            config.reveal_threshold,
        )
        .map_err(js_error)?;
        composer
            .attach(id, observation)
            .map_err(|e| JsError::new(&e.to_string()))?;
    }

    monitor.subscribe(ResizeListener::register(&window, handle_resize).map_err(js_error)?);
    composer.render();

    info!(
        "page started: {} sections, width {width:?}, mobile={}",
        ids.len(),
        monitor.is_mobile()
    );
    RUNTIME.with(|cell| {
        if let Ok(mut slot) = cell.try_borrow_mut() {
            *slot = Some(Runtime {
                document,
                monitor,
                composer,
                _on_intersect: on_intersect,
            });
        }
    });
    Ok(())
}

/// Stop observing, drop the resize listener, and unmount the widget.
#[wasm_bindgen]
pub fn teardown() {
    let runtime = RUNTIME.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => slot.take(),
        Err(_) => {
            warn!("teardown requested from inside a page callback, ignored");
            None
        }
    });
    if let Some(mut runtime) = runtime {
        runtime.composer.teardown();
        runtime.monitor.teardown();
        info!("page stopped");
    }
}

/// Change console log verbosity ("off", "error", "warn", "info", "debug", "trace").
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| JsError::new(&format!("unknown log level: {level}")))?;
    console::install(filter);
    Ok(())
}

/// The page at `width` with every section still hidden, as JSON.
#[wasm_bindgen]
pub fn render_page_json(width: Option<f64>, config_json: Option<String>) -> Result<String, JsError> {
    let config = parse_config(config_json.as_deref())?;
    let view = page_view(width, &config).map_err(|e| JsError::new(&e.to_string()))?;
    serde_json::to_string(&view).map_err(|e| JsError::new(&e.to_string()))
}

/// Widget stand-in for stateless renders.
struct Headless;

impl ExternalWidget for Headless {
    type Instance = ();

    fn mount(&mut self) -> Self::Instance {}
}

fn page_view(width: Option<f64>, config: &PageConfig) -> Result<PageView, PageError> {
    let monitor: BreakpointMonitor<Polled> = BreakpointMonitor::new(config.breakpoint_px, width);
    let mut composer: PageComposer<Polled, Headless> =
        PageComposer::new(profile_page()?, config, monitor.reader(), Headless);
    Ok(composer.render())
}

fn parse_config(json: Option<&str>) -> Result<PageConfig, JsError> {
    match json {
        Some(json) => PageConfig::from_json(json).map_err(|e| JsError::new(&e.to_string())),
        None => Ok(PageConfig::default()),
    }
}

fn js_error(e: JsValue) -> JsError {
    JsError::new(&format!("{e:?}"))
}

fn with_runtime(f: impl FnOnce(&mut Runtime)) {
    RUNTIME.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => {
            if let Some(runtime) = slot.as_mut() {
                f(runtime);
            }
        }
        Err(_) => warn!("re-entrant page callback ignored"),
    });
}

fn handle_intersections(entries: Array, _observer: IntersectionObserver) {
    with_runtime(|rt| {
        for value in entries.iter() {
            let Ok(entry) = value.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            let id = target.id();
            let notification =
                IntersectionEntry::new(entry.is_intersecting(), entry.intersection_ratio());
            match rt.composer.on_intersection(&id, notification) {
                Ok(RevealTransition::Revealed) => {
                    let style = reveal_style(true, rt.composer.reveal_config());
                    if let Err(e) = target.set_attribute("style", &section_style(&style)) {
                        warn!("failed to reveal section {id}: {e:?}");
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("{e}"),
            }
        }
    });
}

fn handle_resize() {
    let Some(width) = web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|w| w.as_f64())
    else {
        return;
    };
    with_runtime(|rt| {
        if let Some(change) = rt.monitor.on_resize(width) {
            rt.composer.sync_widget();
            dom::apply_layout(&rt.document, Layout::from_mobile(change.is_mobile));
        }
    });
}
