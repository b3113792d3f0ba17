//! The interactive inpainting session: owns the image, reacts to clicks and
//! redraws until the cancel key is pressed.

use std::path::Path;

use image::{GrayImage, RgbImage};
use log::{debug, error, info};

use crate::draw::Surface;
use crate::error::{Error, Result};
use crate::loader::load_image;
use crate::mask::circle_mask;
use crate::method::{DEFAULT_METHOD, InpaintMethod};
use crate::types::{ClickEvent, ESC_KEY, FrameBuffer, InputEvent, MouseEventKind};

/// Brush radius used when none is configured.
pub const DEFAULT_RADIUS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Initializing,
    Running,
    Terminated,
}

pub struct InpaintingSession {
    image: RgbImage,
    frame: FrameBuffer,
    frame_stale: bool,
    radius: u32,
    method: String,
    state: SessionState,
}

impl InpaintingSession {
    /// Load the image at `path` and prepare a session around it.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_image(load_image(path)?))
    }

    pub fn from_image(image: RgbImage) -> Self {
        Self {
            frame: FrameBuffer::from_rgb(&image),
            frame_stale: false,
            image,
            radius: DEFAULT_RADIUS,
            method: DEFAULT_METHOD.to_string(),
            state: SessionState::Initializing,
        }
    }

    /// Radius and method selector applied to every click. The selector is
    /// only checked when a click arrives.
    pub fn with_brush(mut self, radius: u32, method: impl Into<String>) -> Self {
        self.radius = radius;
        self.method = method.into();
        self
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Build the brush mask for a click at `center`.
    pub fn create_mask(&self, center: (i32, i32), radius: u32) -> GrayImage {
        circle_mask(self.image.width(), self.image.height(), center, radius)
    }

    /// Inpaint a circle of `radius` around `center` with the `method`
    /// selector ("telea" or "ns", any case).
    ///
    /// The image is replaced only on success; an invalid selector or a
    /// failing algorithm leaves it untouched.
    pub fn apply_inpainting(&mut self, center: (i32, i32), radius: u32, method: &str) -> Result<()> {
        let algorithm: InpaintMethod = method.parse()?;
        let mask = self.create_mask(center, radius);

        let mut output = self.image.clone();
        algorithm.inpaint(&mut output, &mask, radius)?;
        self.image = output;
        self.frame_stale = true;

        info!(
            "Inpainting applied at ({}, {}) using '{}' method.",
            center.0, center.1, method
        );
        Ok(())
    }

    /// Drive `surface` until the cancel key is pressed or it is closed.
    ///
    /// The surface is dropped before this returns, whatever the outcome.
    /// A session runs once; later calls fail with [`Error::SessionEnded`].
    pub fn run<S: Surface>(&mut self, mut surface: S) -> Result<()> {
        if self.state == SessionState::Terminated {
            return Err(Error::SessionEnded);
        }

        self.state = SessionState::Running;
        info!("Press ESC to exit.");

        let outcome = self.event_loop(&mut surface);

        drop(surface);
        self.state = SessionState::Terminated;
        info!("Interactive session ended.");
        outcome
    }

    fn event_loop<S: Surface>(&mut self, surface: &mut S) -> Result<()> {
        while surface.is_open() {
            if self.frame_stale {
                self.frame.fill_from_rgb(&self.image);
                self.frame_stale = false;
            }
            surface.present(&self.frame)?;

            for event in surface.poll_events() {
                match event {
                    InputEvent::Key(ESC_KEY) => return Ok(()),
                    InputEvent::Mouse(click) => self.handle_click(click),
                    InputEvent::Key(_) => {}
                }
            }
        }
        Ok(())
    }

    fn handle_click(&mut self, click: ClickEvent) {
        if click.kind != MouseEventKind::Press {
            return;
        }
        debug!("Coordinates received: ({}, {})", click.x, click.y);

        let method = self.method.clone();
        if let Err(e) = self.apply_inpainting((click.x, click.y), self.radius, &method) {
            error!("{e}");
        }
    }
}
