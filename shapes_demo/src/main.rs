//! Text layout demo
//!
//! Draws left, centered and right-aligned text with the built-in block
//! typeface into an SVG file.
//!
//! Usage: `shapes_demo [config.toml|config.ron] [output.svg]`

use shapes::foundation::logging;
use shapes::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_filter("info");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading configuration from {path}");
            SessionConfig::load_validated(&path)?
        }
        None => SessionConfig::default(),
    };
    let output = args.next().unwrap_or_else(|| "shapes_demo.svg".to_string());

    let width = config.svg.width as f32;
    let height = config.svg.height as f32;
    let backend = SvgBackend::from_config(&config.svg)?;
    let mut session = GraphicsSession::new(backend, config)?;
    session.load_font(Typeface::Sans, &fonts::block_sans())?;

    let size = height / 10.0;
    let line = session.text_height(Typeface::Sans, size)? + session.text_depth(Typeface::Sans, size)?;
    let margin = width / 20.0;
    let mut y = height - margin - size;

    session.set_fill(Color::named("steelblue").unwrap_or(Color::BLACK));
    let drawn = session.text(Typeface::Sans, "LEFT", margin, y, size)?;
    log::info!("Left-aligned text: {drawn:.2} wide");

    y -= line;
    session.set_fill(Color::named("darkorange").unwrap_or(Color::BLACK));
    let drawn = session.text_mid(Typeface::Sans, "CAPS", width / 2.0, y, size)?;
    log::info!("Centered text: {drawn:.2} wide");

    y -= line;
    session.set_fill(Color::named("seagreen").unwrap_or(Color::BLACK));
    let drawn = session.text_end(Typeface::Sans, "STOP", width - margin, y, size)?;
    log::info!("Right-aligned text: {drawn:.2} wide");

    y -= line;
    session.translate(width / 2.0, y);
    session.rotate(15.0);
    let red = Color::rgb(200, 30, 30);
    session.text_with_fill(Typeface::Sans, "tilt 15 a.s.a.p.", 0.0, 0.0, size / 2.0, red)?;
    session.begin();

    log::info!(
        "Writing {} glyph paths to {output}",
        session.backend().element_count()
    );
    session.backend().save(&output)?;
    session.finish()?;
    Ok(())
}
