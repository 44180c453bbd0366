/*
 * The seam between the logical-space `Painter` and a native drawing surface.
 *
 * Backends only ever see pixel geometry that has already been scaled and offset
 * by the painter's accumulated origin. They own clip state and the checkpoint
 * stack; the painter owns color, line width and origin.
 */
use crate::geometry::Rect;
use crate::region::CombineMode;
use crate::styling_primitives::{Color, Font};

/// Snapshot of a backend's clip state, returned by `begin_checkpoint` and
/// consumed by `end_checkpoint`. Deliberately neither `Clone` nor comparable:
/// each token restores exactly once.
#[derive(Debug)]
pub struct CheckpointToken {
    raw: i32,
}

impl CheckpointToken {
    pub fn from_raw(raw: i32) -> Self {
        Self { raw }
    }

    pub fn into_raw(self) -> i32 {
        self.raw
    }
}

/// Raw device handle lent out for native theme drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(isize);

impl DeviceHandle {
    /// Returned when the backend could not hand out a device; callers skip the draw.
    pub const INVALID: DeviceHandle = DeviceHandle(0);

    pub const fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> isize {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

/// Horizontal placement of a text run inside its rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    Near,
    Center,
    Far,
}

/// Everything a backend needs to draw one single-line, vertically centered run.
#[derive(Debug, Clone, Copy)]
pub struct TextRun<'t> {
    pub text: &'t str,
    pub font: &'t Font,
    /// Font height in device pixels.
    pub pixel_height: i32,
    pub color: Color,
    pub rect: Rect,
    pub alignment: TextAlignment,
}

pub trait PaintBackend {
    /// Records the current clip so it can be reinstated by `end_checkpoint`.
    fn begin_checkpoint(&mut self) -> CheckpointToken;

    /// Reinstates the clip captured by `token`, discarding any later checkpoints.
    fn end_checkpoint(&mut self, token: CheckpointToken);

    fn combine_clip(&mut self, rect: Rect, mode: CombineMode);

    /// Bounding box of the current clip, `None` when nothing is drawable.
    fn clip_box(&self) -> Option<Rect>;

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_text(&mut self, run: TextRun<'_>);

    /// Lends out the raw device. Returns `DeviceHandle::INVALID` on failure or
    /// while a previous acquisition has not been released.
    fn acquire_device(&mut self) -> DeviceHandle;

    fn release_device(&mut self, device: DeviceHandle);
}
