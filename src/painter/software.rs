/*
 * Portable recording backend. Keeps a real clip `Region` with SaveDC-style
 * numbered checkpoints and appends every visible draw call to a display list.
 *
 * Used for headless rendering (the display list can be replayed elsewhere) and
 * as the observable backend for painter and view tests on every platform.
 */
use super::backend::{CheckpointToken, DeviceHandle, PaintBackend, TextAlignment, TextRun};
use crate::geometry::{Rect, Size};
use crate::region::{CombineMode, Region};
use crate::styling_primitives::{Color, Font};

use log::{debug, warn};

const SOFTWARE_DEVICE: DeviceHandle = DeviceHandle::from_raw(0x5D);

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f32,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        font: Font,
        pixel_height: i32,
        color: Color,
        rect: Rect,
        alignment: TextAlignment,
    },
}

impl DrawOp {
    pub fn rect(&self) -> Rect {
        match self {
            DrawOp::StrokeRect { rect, .. } | DrawOp::FillRect { rect, .. } => *rect,
            DrawOp::Text { rect, .. } => *rect,
        }
    }
}

#[derive(Debug)]
pub struct SoftwareBackend {
    surface: Size,
    clip: Region,
    // Entry n-1 holds the clip saved by checkpoint n.
    checkpoints: Vec<Region>,
    ops: Vec<DrawOp>,
    device_in_flight: bool,
}

impl SoftwareBackend {
    pub fn new(surface: Size) -> Self {
        Self {
            surface,
            clip: Region::from_rect(Rect::from_size(surface)),
            checkpoints: Vec::new(),
            ops: Vec::new(),
            device_in_flight: false,
        }
    }

    pub fn surface_size(&self) -> Size {
        self.surface
    }

    pub fn clip_region(&self) -> &Region {
        &self.clip
    }

    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn is_device_acquired(&self) -> bool {
        self.device_in_flight
    }

    fn is_visible(&self, rect: Rect) -> bool {
        !rect.is_empty() && self.clip.rects().iter().any(|c| c.intersects(&rect))
    }

    fn record(&mut self, op: DrawOp) {
        if self.is_visible(op.rect()) {
            self.ops.push(op);
        } else {
            debug!("SoftwareBackend: dropping fully clipped {:?}", op.rect());
        }
    }
}

impl PaintBackend for SoftwareBackend {
    fn begin_checkpoint(&mut self) -> CheckpointToken {
        self.checkpoints.push(self.clip.clone());
        CheckpointToken::from_raw(self.checkpoints.len() as i32)
    }

    fn end_checkpoint(&mut self, token: CheckpointToken) {
        let index = token.into_raw();
        if index < 1 || index as usize > self.checkpoints.len() {
            warn!("SoftwareBackend: ignoring unknown checkpoint {index}");
            return;
        }
        self.checkpoints.truncate(index as usize);
        if let Some(saved) = self.checkpoints.pop() {
            self.clip = saved;
        }
    }

    fn combine_clip(&mut self, rect: Rect, mode: CombineMode) {
        // Like GDI, a DC without an explicit clip behaves as clipped to the surface.
        self.clip.combine(rect, mode);
        self.clip.intersect_rect(Rect::from_size(self.surface));
    }

    fn clip_box(&self) -> Option<Rect> {
        if self.clip.is_empty() {
            None
        } else {
            Some(self.clip.bounds())
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        self.record(DrawOp::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.record(DrawOp::FillRect { rect, color });
    }

    fn draw_text(&mut self, run: TextRun<'_>) {
        self.record(DrawOp::Text {
            text: run.text.to_owned(),
            font: run.font.clone(),
            pixel_height: run.pixel_height,
            color: run.color,
            rect: run.rect,
            alignment: run.alignment,
        });
    }

    fn acquire_device(&mut self) -> DeviceHandle {
        if self.device_in_flight {
            warn!("SoftwareBackend: device already acquired; refusing nested acquisition");
            return DeviceHandle::INVALID;
        }
        self.device_in_flight = true;
        SOFTWARE_DEVICE
    }

    fn release_device(&mut self, device: DeviceHandle) {
        if device == SOFTWARE_DEVICE {
            self.device_in_flight = false;
        } else {
            warn!("SoftwareBackend: release of foreign device {device:?} ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_checkpoint_discards_later_checkpoints() {
        let mut backend = SoftwareBackend::new(Size::new(100, 100));
        let first = backend.begin_checkpoint();
        backend.combine_clip(Rect::new(0, 0, 50, 50), CombineMode::Intersect);
        let _second = backend.begin_checkpoint();
        backend.combine_clip(Rect::new(0, 0, 10, 10), CombineMode::Intersect);
        assert_eq!(backend.checkpoint_depth(), 2);

        backend.end_checkpoint(first);

        assert_eq!(backend.checkpoint_depth(), 0);
        assert_eq!(backend.clip_box(), Some(Rect::new(0, 0, 100, 100)));
    }

    #[test]
    fn fully_clipped_ops_are_not_recorded() {
        let mut backend = SoftwareBackend::new(Size::new(100, 100));
        backend.combine_clip(Rect::new(0, 0, 10, 10), CombineMode::Replace);
        backend.fill_rect(Rect::new(50, 50, 5, 5), Color::BLACK);
        backend.fill_rect(Rect::new(5, 5, 10, 10), Color::WHITE);
        assert_eq!(backend.ops().len(), 1);
        assert_eq!(backend.ops()[0].rect(), Rect::new(5, 5, 10, 10));
    }

    #[test]
    fn second_acquisition_fails_until_release() {
        let mut backend = SoftwareBackend::new(Size::new(10, 10));
        let device = backend.acquire_device();
        assert!(device.is_valid());
        assert_eq!(backend.acquire_device(), DeviceHandle::INVALID);
        backend.release_device(device);
        assert!(backend.acquire_device().is_valid());
    }

    #[test]
    fn clip_never_extends_past_the_surface() {
        let mut backend = SoftwareBackend::new(Size::new(100, 80));
        backend.combine_clip(Rect::new(50, 50, 200, 200), CombineMode::Union);
        assert_eq!(backend.clip_box(), Some(Rect::new(0, 0, 100, 80)));

        backend.combine_clip(Rect::new(90, -20, 40, 40), CombineMode::Replace);
        assert_eq!(backend.clip_box(), Some(Rect::from_ltrb(90, 0, 100, 20)));
        assert_eq!(backend.clip_region().area(), 200);
    }
}
