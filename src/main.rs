// What you SEE:
// • The image opens in a window titled "Image Inpainting".
// • Left click: the circle under the cursor is filled in from its surroundings.
// • ESC (or closing the window) quits.

use std::io::{self, Write};

use clap::Parser;
use env_logger::Env;

use click_inpaint::InpaintingSession;
use click_inpaint::config::Args;
use click_inpaint::draw::{Drawer, WINDOW_TITLE};
use click_inpaint::error::{Error, Result};

fn run(args: &Args) -> Result<()> {
    let mut session = InpaintingSession::open(&args.image)?.with_brush(args.radius, args.method.as_str());
    log::info!("Image loaded successfully.");

    let (w, h) = session.image().dimensions();
    let drawer = Drawer::new(WINDOW_TITLE, w as usize, h as usize)?;
    session.run(drawer)
}

/// Print the failure regardless of the log filter (RUST_LOG=off included).
fn report(e: &Error, out: &mut impl Write) {
    let _ = writeln!(out, "Error: {e}");
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Report and exit normally; nothing here is worth a crash.
    if let Err(e) = run(&args) {
        report(&e, &mut io::stderr().lock());
    }
}
