// Window + input plumbing.
// The session only talks to a `Surface`; `Drawer` is the minifb-backed one
// that shows the live image and turns mouse/keyboard state into events.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::{Error, Result};
use crate::types::{ClickEvent, ESC_KEY, FrameBuffer, InputEvent, MouseEventKind};

/// Title of the session window.
pub const WINDOW_TITLE: &str = "Image Inpainting";

/// Roughly one millisecond between polls.
const TARGET_FPS: usize = 1000;

/// Something the session can draw into and read input from.
pub trait Surface {
    /// False once the user closed the surface.
    fn is_open(&self) -> bool;

    /// Show `frame` and pump pending window events.
    fn present(&mut self, frame: &FrameBuffer) -> Result<()>;

    /// Input gathered since the previous poll, in arrival order.
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

pub struct Drawer {
    window: Window,               // the on-screen window you see
    left_was_down: bool,          // left button state at the previous poll (for press/release edges)
    last_pos: Option<(i32, i32)>, // cursor at the previous poll (for move events)
}

impl Drawer {
    /// Create a window sized to the image.
    /// Visual: a new empty window appears with your chosen title; the image shows on the first present.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(TARGET_FPS);
        Ok(Self {
            window,
            left_was_down: false,
            last_pos: None,
        })
    }

    /// Current mouse position in window pixel coordinates (clamped to the window).
    /// Visual: when this returns Some(x,y), a click there is where the brush circle lands.
    fn mouse_pos(&self) -> Option<(i32, i32)> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| (x as i32, y as i32))
    }
}

impl Surface for Drawer {
    /// Returns false when the user closes the window (so we can stop the loop).
    fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the current (possibly just inpainted) image.
    fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.window
            .update_with_buffer(&frame.pixels, frame.width, frame.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Visual: nothing changes on screen here; a left click becomes a Press the session inpaints at.
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        let pos = self.mouse_pos();
        let down = self.window.get_mouse_down(MouseButton::Left); // held right now?
        if let Some((x, y)) = pos.or(self.last_pos) {
            let kind = match (self.left_was_down, down) {
                (false, true) => Some(MouseEventKind::Press),
                (true, false) => Some(MouseEventKind::Release),
                _ if pos != self.last_pos => Some(MouseEventKind::Move),
                _ => None,
            };
            if let Some(kind) = kind {
                events.push(InputEvent::Mouse(ClickEvent { x, y, kind }));
            }
        }
        self.left_was_down = down;
        self.last_pos = pos;

        // ESC only fires once per press; holding it does not repeat.
        if self.window.is_key_pressed(Key::Escape, KeyRepeat::No) {
            events.push(InputEvent::Key(ESC_KEY));
        }
        events
    }
}
