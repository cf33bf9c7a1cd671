use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_protocol::{Layout, ThemeToken};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
};

use crate::app::App;

const WHEEL_STEP: isize = 3;
const IDLE_TICK: Duration = Duration::from_millis(100);
const ANIMATION_TICK: Duration = Duration::from_millis(33);

fn theme_rgb(token: ThemeToken) -> (u8, u8, u8) {
    match token {
        ThemeToken::Background => (0x0b, 0x12, 0x20),
        ThemeToken::Accent | ThemeToken::Link | ThemeToken::ChipText => (0x4c, 0xd9, 0xff),
        ThemeToken::SectionTitle => (0x49, 0xc4, 0xff),
        ThemeToken::TextPrimary => (0xe4, 0xf4, 0xff),
        ThemeToken::TextSecondary => (0xb0, 0xce, 0xf9),
        ThemeToken::TextMuted => (0x9a, 0xbf, 0xf2),
        ThemeToken::TextStrong => (0xe6, 0xf5, 0xff),
        ThemeToken::CardBackground => (0x1f, 0x2e, 0x44),
        ThemeToken::CardBorder => (0x2a, 0x6e, 0x8a),
        ThemeToken::ChipBackground => (0x22, 0x33, 0x44),
        ThemeToken::BadgeBackground => (0x16, 0x3a, 0x52),
        ThemeToken::BadgeText => (0x61, 0xdf, 0xff),
    }
}

/// `token`'s colour blended over the background at `opacity`.
pub fn fade(token: ThemeToken, opacity: f64) -> Color {
    let (br, bg, bb) = theme_rgb(ThemeToken::Background);
    let (r, g, b) = theme_rgb(token);
    let t = opacity.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| {
        (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
    };
    Color::Rgb(mix(br, r), mix(bg, g), mix(bb, b))
}

pub fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.resize(size.width, size.height);

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        let now = Instant::now();
        terminal.draw(|frame| draw(frame, app, now))?;

        let tick = if app.is_animating(now) {
            ANIMATION_TICK
        } else {
            IDLE_TICK
        };
        if !event::poll(tick)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Up => app.scroll_by(-1),
                KeyCode::Down => app.scroll_by(1),
                KeyCode::PageUp => app.scroll_by(-app.page_step()),
                KeyCode::PageDown => app.scroll_by(app.page_step()),
                KeyCode::Home => app.scroll_to_top(),
                KeyCode::End => app.scroll_to_end(),
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => app.scroll_by(WHEEL_STEP),
                MouseEventKind::ScrollUp => app.scroll_by(-WHEEL_STEP),
                _ => {}
            },
            Event::Resize(cols, rows) => app.resize(cols, rows),
            _ => {}
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &App, now: Instant) {
    let area = frame.area();
    let background = Style::default().bg(fade(ThemeToken::Background, 1.0));
    frame.render_widget(Block::default().style(background), area);

    let layout = match app.layout() {
        Layout::Desktop => "desktop",
        Layout::Mobile => "mobile",
    };
    let header = Line::from(format!(
        " folio | {} cols, {layout} | ↑↓ PgUp PgDn Home End scroll | q quit ",
        app.cols()
    ))
    .style(
        Style::default()
            .fg(fade(ThemeToken::TextPrimary, 1.0))
            .bg(fade(ThemeToken::CardBackground, 1.0)),
    );
    frame.render_widget(header, Rect::new(area.x, area.y, area.width, 1));

    let mut top = area.y + 1;
    if let Some(strip) = app.runner(now) {
        let strip = Line::from(strip).style(Style::default().fg(fade(ThemeToken::Accent, 1.0)));
        frame.render_widget(strip, Rect::new(area.x, top, area.width, 1));
        top += 1;
    }

    let margin = match app.layout() {
        Layout::Desktop => area.width.saturating_sub(112) / 2 + 1,
        Layout::Mobile => 1,
    };
    let lines: Vec<Line<'_>> = app
        .visible_rows()
        .iter()
        .map(|row| {
            let opacity = row.section.map_or(1.0, |idx| app.opacity(idx, now));
            let mut style = Style::default().fg(fade(row.tone, opacity));
            if matches!(row.tone, ThemeToken::SectionTitle | ThemeToken::TextStrong) {
                style = style.add_modifier(Modifier::BOLD);
            }
            Line::styled(row.text.as_str(), style)
        })
        .collect();
    let body = Rect::new(
        area.x + margin.min(area.width),
        top,
        area.width.saturating_sub(margin),
        area.height.saturating_sub(top - area.y),
    );
    frame.render_widget(Paragraph::new(lines), body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::PageConfig;
    use folio_core::content::profile_page;
    use ratatui::backend::TestBackend;

    #[test]
    fn fade_blends_from_background() {
        assert_eq!(fade(ThemeToken::TextPrimary, 0.0), fade(ThemeToken::Background, 1.0));
        assert_eq!(fade(ThemeToken::TextPrimary, 1.0), Color::Rgb(0xe4, 0xf4, 0xff));
        assert_eq!(fade(ThemeToken::Accent, 7.0), Color::Rgb(0x4c, 0xd9, 0xff));
    }

    #[test]
    fn draws_header_strip_and_page() {
        let page = profile_page().expect("static page is valid");
        let app = App::new(page, &PageConfig::default(), 120, 20);
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).expect("test terminal");
        terminal
            .draw(|frame| draw(frame, &app, Instant::now()))
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String { (0..120u16).map(|x| buffer[(x, y)].symbol()).collect() };
        assert!(row(0).contains("folio | 120 cols, desktop"));
        assert!(row(1).contains('>'));
        let page: String = (2..20).map(row).collect();
        assert!(page.contains("Summary"));
    }
}
