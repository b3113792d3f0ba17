use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Once;

use click_inpaint::draw::Surface;
use click_inpaint::error::{Error, Result};
use click_inpaint::mask::{MASK_FILL, circle_mask};
use click_inpaint::types::{ClickEvent, ESC_KEY, FrameBuffer, InputEvent, MouseEventKind};
use click_inpaint::{InpaintingSession, SessionState};
use image::{Rgb, RgbImage};
use log::{Log, Metadata, Record};

thread_local! {
    static LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Collects log lines per test thread.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        LINES.with(|lines| lines.borrow_mut().push(record.args().to_string()));
    }

    fn flush(&self) {}
}

fn capture_logs() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_boxed_logger(Box::new(CaptureLogger)).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
    LINES.with(|lines| lines.borrow_mut().clear());
}

fn logged() -> Vec<String> {
    LINES.with(|lines| lines.borrow().clone())
}

#[derive(Default)]
struct Recorded {
    frames: Vec<FrameBuffer>,
    dropped: bool,
}

/// Replays one batch of events per presented frame.
struct ScriptedSurface {
    batches: VecDeque<Vec<InputEvent>>,
    record: Rc<RefCell<Recorded>>,
}

impl ScriptedSurface {
    fn new(batches: Vec<Vec<InputEvent>>) -> (Self, Rc<RefCell<Recorded>>) {
        let record = Rc::new(RefCell::new(Recorded::default()));
        let surface = Self {
            batches: batches.into(),
            record: Rc::clone(&record),
        };
        (surface, record)
    }
}

impl Surface for ScriptedSurface {
    // Closes itself once the script runs out.
    fn is_open(&self) -> bool {
        !self.batches.is_empty()
    }

    fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.record.borrow_mut().frames.push(frame.clone());
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.batches.pop_front().unwrap_or_default()
    }
}

impl Drop for ScriptedSurface {
    fn drop(&mut self) {
        self.record.borrow_mut().dropped = true;
    }
}

fn mouse(x: i32, y: i32, kind: MouseEventKind) -> InputEvent {
    InputEvent::Mouse(ClickEvent { x, y, kind })
}

fn press(x: i32, y: i32) -> InputEvent {
    mouse(x, y, MouseEventKind::Press)
}

fn inpaint_lines(lines: &[String]) -> Vec<&String> {
    lines.iter().filter(|l| l.starts_with("Inpainting applied at")).collect()
}

#[test]
fn escape_right_away_ends_without_inpainting() {
    capture_logs();
    let mut session = InpaintingSession::from_image(RgbImage::new(100, 100));
    let (surface, record) = ScriptedSurface::new(vec![vec![InputEvent::Key(ESC_KEY)], vec![press(5, 5)]]);

    session.run(surface).unwrap();

    assert_eq!(session.state(), SessionState::Terminated);
    assert!(record.borrow().dropped);
    assert_eq!(record.borrow().frames.len(), 1);
    let lines = logged();
    assert!(lines.contains(&"Press ESC to exit.".to_string()));
    assert_eq!(lines.last().map(String::as_str), Some("Interactive session ended."));
    assert!(inpaint_lines(&lines).is_empty());
}

#[test]
fn click_on_black_image_inpaints_once() {
    capture_logs();
    let mut session = InpaintingSession::from_image(RgbImage::new(100, 100));
    let (surface, record) = ScriptedSurface::new(vec![
        vec![mouse(40, 40, MouseEventKind::Move)],
        vec![press(50, 50), mouse(50, 50, MouseEventKind::Release)],
        vec![],
        vec![InputEvent::Key(ESC_KEY)],
    ]);

    session.run(surface).unwrap();

    let lines = logged();
    assert_eq!(
        inpaint_lines(&lines),
        vec!["Inpainting applied at (50, 50) using 'telea' method."]
    );
    assert_eq!(session.state(), SessionState::Terminated);
    // Surrounded by black, the filled circle stays black.
    assert!(session.image().pixels().all(|p| p.0 == [0, 0, 0]));
    assert_eq!(record.borrow().frames.len(), 4);
}

#[test]
fn inpainted_image_reaches_the_next_frame() {
    capture_logs();
    let mask = circle_mask(64, 64, (32, 32), 10);
    let image = RgbImage::from_fn(64, 64, |x, y| {
        if mask.get_pixel(x, y).0 == [MASK_FILL] { Rgb([255, 255, 255]) } else { Rgb([0, 0, 0]) }
    });
    let mut session = InpaintingSession::from_image(image);
    let (surface, record) = ScriptedSurface::new(vec![vec![press(32, 32)], vec![InputEvent::Key(ESC_KEY)]]);

    session.run(surface).unwrap();

    let record = record.borrow();
    let centre = 32 * 64 + 32;
    assert_eq!(record.frames[0].pixels[centre], 0x00FF_FFFF);
    assert_eq!(record.frames[1], FrameBuffer::from_rgb(session.image()));
    assert!(record.frames[1].pixels[centre] < 0x0010_1010);
}

#[test]
fn invalid_method_is_logged_and_session_continues() {
    capture_logs();
    let original = RgbImage::from_fn(32, 32, |x, y| Rgb([(x * 8) as u8, (y * 8) as u8, 90]));
    let mut session = InpaintingSession::from_image(original.clone()).with_brush(4, "blur");
    let (surface, record) = ScriptedSurface::new(vec![
        vec![press(10, 10)],
        vec![press(20, 20)],
        vec![InputEvent::Key(ESC_KEY)],
    ]);

    session.run(surface).unwrap();

    assert_eq!(session.image(), &original);
    assert_eq!(record.borrow().frames.len(), 3);
    let lines = logged();
    assert!(inpaint_lines(&lines).is_empty());
    let failures = lines.iter().filter(|l| l.contains("Invalid method 'blur'")).count();
    assert_eq!(failures, 2);
    assert_eq!(lines.last().map(String::as_str), Some("Interactive session ended."));
}

#[test]
fn configured_brush_is_used_for_clicks() {
    capture_logs();
    let mut session = InpaintingSession::from_image(RgbImage::new(40, 40)).with_brush(3, "NS");
    let (surface, _) = ScriptedSurface::new(vec![vec![press(7, 9), InputEvent::Key(ESC_KEY), press(1, 1)]]);

    session.run(surface).unwrap();

    let lines = logged();
    assert_eq!(
        inpaint_lines(&lines),
        vec!["Inpainting applied at (7, 9) using 'NS' method."]
    );
}

#[test]
fn closing_the_surface_ends_the_session() {
    capture_logs();
    let mut session = InpaintingSession::from_image(RgbImage::new(8, 8));
    let (surface, record) = ScriptedSurface::new(vec![vec![], vec![]]);

    session.run(surface).unwrap();

    assert_eq!(session.state(), SessionState::Terminated);
    assert!(record.borrow().dropped);
    assert_eq!(logged().last().map(String::as_str), Some("Interactive session ended."));
}

#[test]
fn terminated_session_cannot_restart() {
    capture_logs();
    let mut session = InpaintingSession::from_image(RgbImage::new(8, 8));
    let (surface, _) = ScriptedSurface::new(vec![vec![InputEvent::Key(ESC_KEY)]]);
    session.run(surface).unwrap();

    let (surface, record) = ScriptedSurface::new(vec![vec![press(1, 1)]]);
    assert!(matches!(session.run(surface), Err(Error::SessionEnded)));
    assert!(record.borrow().dropped);
    assert!(record.borrow().frames.is_empty());
}

#[test]
fn opening_a_missing_file_fails() {
    let path = std::env::temp_dir().join("click-inpaint-session-missing.png");
    assert!(matches!(
        InpaintingSession::open(&path),
        Err(Error::PathNotFound(_))
    ));
}
