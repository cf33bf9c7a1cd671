//! Integration test: drive the real profile page through scrolling, resizing,
//! and teardown, checking reveal, widget, and release behaviour end to end.

use std::cell::Cell;
use std::rc::Rc;

use folio_core::content::profile_page;
use folio_core::html::render_html;
use folio_core::{
    BreakpointMonitor, Disconnect, ExternalWidget, IntersectionEntry, PageComposer, PageConfig,
    RevealTransition,
};

#[derive(Clone, Default)]
struct Observation {
    released: Rc<Cell<u32>>,
}

impl Disconnect for Observation {
    fn disconnect(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

#[derive(Clone, Default)]
struct Runner {
    mounts: Rc<Cell<u32>>,
    live: Rc<Cell<i32>>,
}

struct RunnerInstance {
    live: Rc<Cell<i32>>,
}

impl Drop for RunnerInstance {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

impl ExternalWidget for Runner {
    type Instance = RunnerInstance;

    fn mount(&mut self) -> RunnerInstance {
        self.mounts.set(self.mounts.get() + 1);
        self.live.set(self.live.get() + 1);
        RunnerInstance {
            live: Rc::clone(&self.live),
        }
    }
}

struct Harness {
    monitor: BreakpointMonitor<Observation>,
    composer: PageComposer<Observation, Runner>,
    runner: Runner,
    observations: Vec<(String, Observation)>,
}

fn harness(width: Option<f64>) -> Harness {
    let config = PageConfig::default();
    let page = profile_page().expect("static page is valid");
    let mut monitor = BreakpointMonitor::new(config.breakpoint_px, width);
    monitor.subscribe(Observation::default());
    let runner = Runner::default();
    let mut composer = PageComposer::new(page, &config, monitor.reader(), runner.clone());

    let ids: Vec<String> = composer
        .page()
        .sections()
        .iter()
        .map(|s| s.id().to_string())
        .collect();
    let mut observations = Vec::new();
    for id in ids {
        let obs = Observation::default();
        composer.attach(&id, obs.clone()).expect("known section");
        observations.push((id, obs));
    }
    Harness {
        monitor,
        composer,
        runner,
        observations,
    }
}

impl Harness {
    fn released(&self, id: &str) -> u32 {
        self.observations
            .iter()
            .find(|(sid, _)| sid == id)
            .map_or(0, |(_, o)| o.released.get())
    }
}

#[test]
fn scrolling_reveals_sections_out_of_order() {
    let mut h = harness(Some(1280.0));

    // Page loads scrolled halfway down: skills shows first.
    assert_eq!(
        h.composer
            .on_intersection("skills", IntersectionEntry::visible(0.6))
            .expect("known section"),
        RevealTransition::Revealed
    );
    assert_eq!(
        h.composer
            .on_intersection("summary", IntersectionEntry::visible(0.05))
            .expect("known section"),
        RevealTransition::BelowThreshold
    );

    let view = h.composer.render();
    let ids: Vec<&str> = view.section_ids().collect();
    assert_eq!(
        ids,
        [
            "summary",
            "work-experience",
            "education",
            "skills",
            "projects",
            "certificates"
        ]
    );
    let revealed: Vec<bool> = view.sections.iter().map(|s| s.reveal.is_shown()).collect();
    assert_eq!(revealed, [false, false, false, true, false, false]);
    assert_eq!(h.released("skills"), 1);
    assert_eq!(h.released("summary"), 0);

    // Scroll back up and away: skills stays revealed.
    h.composer
        .on_intersection("skills", IntersectionEntry::outside())
        .expect("known section");
    assert_eq!(h.composer.is_revealed("skills"), Ok(true));
}

#[test]
fn detached_section_never_reveals() {
    let mut h = harness(Some(1280.0));
    assert_eq!(h.composer.detach("projects"), Ok(true));
    assert_eq!(h.released("projects"), 1);
    assert_eq!(
        h.composer
            .on_intersection("projects", IntersectionEntry::visible(1.0))
            .expect("known section"),
        RevealTransition::NotObserving
    );
    assert_eq!(h.composer.is_revealed("projects"), Ok(false));
    assert_eq!(h.released("projects"), 1);
}

#[test]
fn widget_tracks_width_without_duplicates() {
    let mut h = harness(Some(1280.0));
    assert!(h.composer.render().widget_mounted);

    for width in [799.0, 800.0, 801.0, 1200.0, 640.0, 2000.0] {
        h.monitor.on_resize(width);
        let view = h.composer.render();
        assert_eq!(view.widget_mounted, width > 800.0, "width {width}");
        assert_eq!(h.monitor.is_mobile(), width <= 800.0, "width {width}");
        assert!(h.runner.live.get() <= 1);
    }
    // Mounted at 1280, 801, 2000.
    assert_eq!(h.runner.mounts.get(), 3);
    assert_eq!(h.runner.live.get(), 1);
}

#[test]
fn no_viewport_starts_desktop_and_hidden() {
    let mut h = harness(None);
    let view = h.composer.render();
    assert!(view.widget_mounted);
    assert!(view.sections.iter().all(|s| s.reveal.opacity == 0.0));
}

#[test]
fn teardown_leaves_nothing_live() {
    let mut h = harness(Some(1280.0));
    h.composer
        .on_intersection("summary", IntersectionEntry::visible(1.0))
        .expect("known section");
    h.composer.render();
    h.composer.teardown();
    assert!(h.monitor.teardown());

    assert!(h.observations.iter().all(|(_, o)| o.released.get() == 1));
    assert_eq!(h.runner.live.get(), 0);
    assert_eq!(h.monitor.on_resize(1600.0), None);
}

#[test]
fn markup_reflects_reveal_state() {
    let mut h = harness(Some(1280.0));
    h.composer
        .on_intersection("education", IntersectionEntry::visible(0.3))
        .expect("known section");
    let html = render_html(&h.composer.render());
    assert!(html.contains(r#"<section id="education" class="folio-section" style="opacity:1;"#));
    assert!(html.contains(r#"<section id="summary" class="folio-section" style="opacity:0;"#));
    assert!(html.contains("Google Associate Cloud Engineer"));
}
