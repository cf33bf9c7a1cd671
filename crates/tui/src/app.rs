//! Terminal page state: scroll position, reveal instants, and the runner strip.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use folio_core::model::Page;
use folio_core::render::reveal_style;
use folio_core::{
    BreakpointMonitor, ExternalWidget, IntersectionEntry, PageComposer, PageConfig, Polled,
    RevealTransition,
};
use folio_protocol::Layout;
use log::{debug, warn};

use crate::layout::{self, Document, Row};

/// The external widget in a terminal: a strip with a runner crossing it.
#[derive(Debug, Default)]
pub struct RunnerStrip;

/// A mounted runner strip. Dropping it is the unmount.
#[derive(Debug)]
pub struct Runner {
    started: Instant,
}

impl Runner {
    pub fn frame(&self, now: Instant, width: usize) -> String {
        runner_frame(now.saturating_duration_since(self.started), width)
    }
}

impl ExternalWidget for RunnerStrip {
    type Instance = Runner;

    fn mount(&mut self) -> Runner {
        Runner {
            started: Instant::now(),
        }
    }
}

/// The strip after `elapsed`: the runner advances one column per 100ms.
pub fn runner_frame(elapsed: Duration, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let at = (elapsed.as_millis() / 100) as usize % width;
    (0..width)
        .map(|i| match i {
            _ if i == at => '>',
            _ if i % 4 == 0 => '·',
            _ => ' ',
        })
        .collect()
}

pub struct App {
    monitor: BreakpointMonitor<Polled>,
    composer: PageComposer<Polled, RunnerStrip>,
    doc: Document,
    layout: Layout,
    revealed_at: HashMap<String, Instant>,
    scroll: usize,
    cols: u16,
    rows: u16,
}

impl App {
    pub fn new(page: Page, config: &PageConfig, cols: u16, rows: u16) -> Self {
        let mut monitor =
            BreakpointMonitor::new(config.breakpoint_px, Some(layout::logical_width(cols)));
        monitor.subscribe(Polled);
        let mut composer = PageComposer::new(page, config, monitor.reader(), RunnerStrip);

        let ids: Vec<String> = composer
            .page()
            .sections()
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        for id in &ids {
            if let Err(e) = composer.attach(id, Polled) {
                warn!("{e}");
            }
        }

        let mut app = Self {
            monitor,
            composer,
            doc: Document::default(),
            layout: Layout::Desktop,
            revealed_at: HashMap::new(),
            scroll: 0,
            cols,
            rows,
        };
        app.relayout();
        app
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        if let Some(change) = self.monitor.on_resize(layout::logical_width(cols)) {
            debug!("{cols} columns, mobile={}", change.is_mobile);
        }
        self.relayout();
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.doc.max_scroll(self.page_height());
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
        self.notify_visibility();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
        self.notify_visibility();
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll = self.doc.max_scroll(self.page_height());
        self.notify_visibility();
    }

    /// One screen, keeping a row of overlap.
    pub fn page_step(&self) -> isize {
        self.page_height().saturating_sub(1).max(1) as isize
    }

    /// Rows available to the page below the header and the strip.
    pub fn page_height(&self) -> usize {
        let chrome = 1 + u16::from(self.composer.widget().is_mounted());
        usize::from(self.rows.saturating_sub(chrome))
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn visible_rows(&self) -> &[Row] {
        let start = self.scroll.min(self.doc.rows.len());
        let end = (start + self.page_height()).min(self.doc.rows.len());
        &self.doc.rows[start..end]
    }

    /// Strip contents while the widget is mounted.
    pub fn runner(&self, now: Instant) -> Option<String> {
        self.composer
            .widget()
            .instance()
            .map(|runner| runner.frame(now, usize::from(self.cols)))
    }

    /// Opacity of section `idx` at `now`, following its reveal transition.
    pub fn opacity(&self, idx: usize, now: Instant) -> f64 {
        let Some(section) = self.doc.sections.get(idx) else {
            return 1.0;
        };
        let config = self.composer.reveal_config();
        let hidden = reveal_style(false, config);
        match self.revealed_at.get(&section.id) {
            Some(at) => {
                let shown = reveal_style(true, config);
                let progress = shown
                    .transition
                    .progress(now.saturating_duration_since(*at));
                hidden.lerp(&shown, progress).opacity
            }
            None => hidden.opacity,
        }
    }

    /// Whether any section is still mid-transition.
    pub fn is_animating(&self, now: Instant) -> bool {
        let transition = self.composer.reveal_config().transition;
        self.revealed_at
            .values()
            .any(|at| !transition.is_finished(now.saturating_duration_since(*at)))
    }

    pub fn teardown(&mut self) {
        self.composer.teardown();
        self.monitor.teardown();
    }

    fn relayout(&mut self) {
        let view = self.composer.render();
        self.layout = view.layout;
        let width = layout::content_width(self.cols, view.layout);
        self.doc = layout::lay_out(&view, width);
        self.scroll = self.scroll.min(self.doc.max_scroll(self.page_height()));
        self.notify_visibility();
    }

    fn notify_visibility(&mut self) {
        let height = self.page_height();
        let now = Instant::now();
        for section in &self.doc.sections {
            let ratio = section.visible_fraction(self.scroll, height);
            let entry = IntersectionEntry::new(ratio > 0.0, ratio);
            match self.composer.on_intersection(&section.id, entry) {
                Ok(RevealTransition::Revealed) => {
                    self.revealed_at.insert(section.id.clone(), now);
                }
                Ok(_) => {}
                Err(e) => warn!("{e}"),
            }
        }
    }
}
