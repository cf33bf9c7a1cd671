mod app;
mod layout;
mod renderer;

use anyhow::{Context, Result};
use folio_core::PageConfig;
use folio_core::content::profile_page;

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            PageConfig::from_json(&json).with_context(|| format!("parsing config {path}"))?
        }
        None => PageConfig::default(),
    };
    let page = profile_page()?;

    let (cols, rows) = crossterm::terminal::size()?;
    let mut app = app::App::new(page, &config, cols, rows);
    let result = renderer::run(&mut app);
    app.teardown();
    result
}
