//! Click-to-inpaint: load an image, click on it, and the spot under the
//! cursor is filled in from its surroundings.

pub mod config;
pub mod draw;
pub mod error;
pub mod inpainter;
pub mod loader;
pub mod mask;
pub mod method;
pub mod ns;
pub mod session;
pub mod types;

pub use error::{Error, Result};
pub use method::InpaintMethod;
pub use session::{InpaintingSession, SessionState};
