use std::path::PathBuf;

use clap::Parser;

use crate::method::DEFAULT_METHOD;
use crate::session::DEFAULT_RADIUS;

/// Click on the image to fill the spot under the cursor. ESC quits.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Image to edit.
    #[arg(default_value = "data/example.png")]
    pub image: PathBuf,

    /// Brush radius in pixels.
    #[arg(short, long, default_value_t = DEFAULT_RADIUS)]
    pub radius: u32,

    /// Inpainting method: 'telea' (fast marching) or 'ns' (Navier-Stokes).
    #[arg(short, long, default_value = DEFAULT_METHOD)]
    pub method: String,
}
