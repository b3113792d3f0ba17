// Core types shared by the loop, the window and the inpainting steps.

use image::RgbImage;

/// Key code the session treats as "cancel" (ASCII ESC).
pub const ESC_KEY: u8 = 27;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Pack an RGB image into a window-ready buffer.
    /// Visual: this is exactly what the window shows after the next present.
    pub fn from_rgb(image: &RgbImage) -> Self {
        let mut frame = Self {
            width: image.width() as usize,
            height: image.height() as usize,
            pixels: Vec::with_capacity(image.width() as usize * image.height() as usize),
        };
        frame.fill_from_rgb(image);
        frame
    }

    /// Re-pack `image` into this buffer, resizing if the dimensions differ.
    /// Visual: after an inpaint, the filled circle appears on the next frame.
    pub fn fill_from_rgb(&mut self, image: &RgbImage) {
        self.width = image.width() as usize;
        self.height = image.height() as usize;
        self.pixels.clear();
        self.pixels.extend(image.pixels().map(|p| {
            let [r, g, b] = p.0;
            ((r as u32) << 16) | ((g as u32) << 8) | b as u32 // pack as 0x00RRGGBB
        }));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    Press,
    Move,
    Release,
}

/// A primary-button event at window pixel coordinates.
/// Visual: only a Press triggers an inpaint; Move/Release change nothing on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickEvent {
    pub x: i32,
    pub y: i32,
    pub kind: MouseEventKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Mouse(ClickEvent),
    /// ASCII code of a pressed key.
    Key(u8),
}
