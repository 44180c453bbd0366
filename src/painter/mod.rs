/*
 * DPI-scaled immediate-mode painter with a save/restore state stack.
 *
 * Callers work in logical (DIP) coordinates. Every operation scales by the
 * painter's fixed scale factor, offsets by the origin accumulated through
 * `translate`, and forwards pixel geometry to a `PaintBackend`. Color, line width
 * and origin live in `PainterState`; clip lives in the backend and is rolled back
 * through the `CheckpointToken` stored on each saved state.
 *
 * A painter borrows its backend for exactly one paint pass.
 */
pub mod backend;
#[cfg(target_os = "windows")]
pub mod gdi;
pub mod software;

pub use backend::{CheckpointToken, DeviceHandle, PaintBackend, TextAlignment, TextRun};
pub use software::{DrawOp, SoftwareBackend};

use crate::error::{PlatformError, Result as PlatformResult};
use crate::geometry::{
    Rect, RectF, Vector2d, Vector2dF, scale_vector2d, to_floored_vector2d, to_logical_rect,
    to_pixel_rect,
};
use crate::region::CombineMode;
use crate::styling_primitives::{Color, Font};
use crate::theme::{ControlState, ExtraParams, NativeTheme, ThemePart};

use bitflags::bitflags;
use log::{debug, warn};
use std::ops::{Deref, DerefMut};

bitflags! {
    /// Text placement flags for `draw_colored_text_with_flags`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextAlign: u32 {
        const LEFT = 1 << 0;
        const CENTER = 1 << 1;
        const RIGHT = 1 << 2;
    }
}

impl TextAlign {
    /// Left wins over Center, Center over Right; no flag means Center.
    pub fn resolve(self) -> TextAlignment {
        if self.contains(TextAlign::LEFT) {
            TextAlignment::Near
        } else if self.contains(TextAlign::CENTER) {
            TextAlignment::Center
        } else if self.contains(TextAlign::RIGHT) {
            TextAlignment::Far
        } else {
            TextAlignment::Center
        }
    }
}

#[derive(Debug)]
struct PainterState {
    color: Color,
    line_width: f32,
    /// Accumulated translation in logical units.
    origin: Vector2dF,
    /// Backend checkpoint taken when this state was pushed. `None` for the
    /// initial state.
    checkpoint: Option<CheckpointToken>,
}

impl PainterState {
    fn initial() -> Self {
        Self {
            color: Color::default(),
            line_width: 1.0,
            origin: Vector2dF::default(),
            checkpoint: None,
        }
    }

    fn derive(&self, checkpoint: CheckpointToken) -> Self {
        Self {
            color: self.color,
            line_width: self.line_width,
            origin: self.origin,
            checkpoint: Some(checkpoint),
        }
    }
}

pub struct Painter<'a> {
    backend: &'a mut dyn PaintBackend,
    theme: Option<&'a dyn NativeTheme>,
    scale_factor: f32,
    // Never empty: index 0 is the initial state.
    states: Vec<PainterState>,
}

impl<'a> Painter<'a> {
    pub fn new(backend: &'a mut dyn PaintBackend, scale_factor: f32) -> PlatformResult<Self> {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(PlatformError::InvalidParameter(format!(
                "Painter: scale factor must be positive and finite, got {scale_factor}"
            )));
        }
        Ok(Self {
            backend,
            theme: None,
            scale_factor,
            states: vec![PainterState::initial()],
        })
    }

    /// Attaches the renderer used by `draw_native_theme` and `draw_focus_rect`.
    pub fn with_theme(mut self, theme: &'a dyn NativeTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Number of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.states.len() - 1
    }

    pub fn color(&self) -> Color {
        self.top().color
    }

    pub fn line_width(&self) -> f32 {
        self.top().line_width
    }

    pub fn origin(&self) -> Vector2dF {
        self.top().origin
    }

    // ── State stack ─────────────────────────────────────────────────────────

    pub fn save(&mut self) {
        let checkpoint = self.backend.begin_checkpoint();
        let state = self.top().derive(checkpoint);
        self.states.push(state);
    }

    /// Pops the most recent `save`. Extra calls are ignored.
    pub fn restore(&mut self) {
        if self.states.len() == 1 {
            debug!("Painter: restore without matching save ignored");
            return;
        }
        if let Some(state) = self.states.pop() {
            if let Some(checkpoint) = state.checkpoint {
                self.backend.end_checkpoint(checkpoint);
            }
        }
    }

    /// Saves and returns a guard that restores when dropped.
    #[must_use]
    pub fn save_guard(&mut self) -> PainterGuard<'_, 'a> {
        self.save();
        PainterGuard(self)
    }

    pub fn set_color(&mut self, color: Color) {
        self.top_mut().color = color;
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.top_mut().line_width = width;
    }

    pub fn translate(&mut self, offset: Vector2dF) {
        self.top_mut().origin += offset;
    }

    pub fn translate_pixel(&mut self, offset: Vector2d) {
        let logical = scale_vector2d(Vector2dF::from(offset), 1.0 / self.scale_factor);
        self.translate(logical);
    }

    // ── Clipping ────────────────────────────────────────────────────────────

    pub fn clip_rect(&mut self, rect: RectF, mode: CombineMode) {
        let pixel = self.to_device_rect(rect);
        self.backend.combine_clip(pixel, mode);
    }

    pub fn clip_pixel_rect(&mut self, rect: Rect, mode: CombineMode) {
        let pixel = rect.offset(self.pixel_origin());
        self.backend.combine_clip(pixel, mode);
    }

    /// Bounding box of the current clip in logical units relative to the
    /// current origin. `None` when the clip is empty.
    pub fn clip_bounds(&self) -> Option<RectF> {
        let device = self.backend.clip_box()?;
        Some(to_logical_rect(device, self.scale_factor).offset(-self.origin()))
    }

    // ── Drawing ─────────────────────────────────────────────────────────────

    pub fn draw_rect(&mut self, rect: RectF) {
        let pixel = self.to_device_rect(rect);
        self.stroke_device_rect(pixel);
    }

    pub fn fill_rect(&mut self, rect: RectF) {
        let pixel = self.to_device_rect(rect);
        self.fill_device_rect(pixel);
    }

    pub fn draw_pixel_rect(&mut self, rect: Rect) {
        let pixel = rect.offset(self.pixel_origin());
        self.stroke_device_rect(pixel);
    }

    pub fn fill_pixel_rect(&mut self, rect: Rect) {
        let pixel = rect.offset(self.pixel_origin());
        self.fill_device_rect(pixel);
    }

    /// Draws `text` in `color` (not the state color), vertically centered in
    /// `rect`, horizontally placed according to `flags`.
    pub fn draw_colored_text_with_flags(
        &mut self,
        text: &str,
        font: &Font,
        color: Color,
        rect: RectF,
        flags: TextAlign,
    ) {
        let pixel = self.to_device_rect(rect);
        self.draw_device_text(text, font, color, pixel, flags);
    }

    pub fn draw_colored_text_pixel_with_flags(
        &mut self,
        text: &str,
        font: &Font,
        color: Color,
        rect: Rect,
        flags: TextAlign,
    ) {
        let pixel = rect.offset(self.pixel_origin());
        self.draw_device_text(text, font, color, pixel, flags);
    }

    pub fn draw_colored_text(&mut self, text: &str, font: &Font, color: Color, rect: RectF) {
        self.draw_colored_text_with_flags(text, font, color, rect, TextAlign::CENTER);
    }

    /// Draws text in the current state color.
    pub fn draw_text(&mut self, text: &str, font: &Font, rect: RectF) {
        let color = self.color();
        self.draw_colored_text(text, font, color, rect);
    }

    pub fn draw_native_theme(
        &mut self,
        part: ThemePart,
        state: ControlState,
        rect: RectF,
        extra: &ExtraParams,
    ) {
        let pixel = self.to_device_rect(rect);
        self.paint_theme_part(part, state, pixel, extra);
    }

    pub fn draw_native_theme_pixel(
        &mut self,
        part: ThemePart,
        state: ControlState,
        rect: Rect,
        extra: &ExtraParams,
    ) {
        let pixel = rect.offset(self.pixel_origin());
        self.paint_theme_part(part, state, pixel, extra);
    }

    pub fn draw_focus_rect(&mut self, rect: RectF) {
        let pixel = self.to_device_rect(rect);
        let Some(theme) = self.theme else {
            debug!("Painter: no native theme attached; focus rect skipped");
            return;
        };
        self.with_device(|device| theme.paint_focus_rect(device, pixel));
    }

    /// Lends the raw device to `f` for the duration of the call. Returns `None`
    /// without calling `f` when the backend cannot provide a device.
    pub fn with_device<R>(&mut self, f: impl FnOnce(DeviceHandle) -> R) -> Option<R> {
        let device = self.backend.acquire_device();
        if !device.is_valid() {
            debug!("Painter: device unavailable; native draw skipped this frame");
            return None;
        }
        let result = f(device);
        self.backend.release_device(device);
        Some(result)
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn top(&self) -> &PainterState {
        &self.states[self.states.len() - 1]
    }

    fn top_mut(&mut self) -> &mut PainterState {
        let last = self.states.len() - 1;
        &mut self.states[last]
    }

    fn pixel_origin(&self) -> Vector2d {
        to_floored_vector2d(scale_vector2d(self.origin(), self.scale_factor))
    }

    fn to_device_rect(&self, rect: RectF) -> Rect {
        to_pixel_rect(rect.offset(self.origin()), self.scale_factor)
    }

    fn stroke_device_rect(&mut self, rect: Rect) {
        let state = self.top();
        let (color, width) = (state.color, state.line_width * self.scale_factor);
        self.backend.stroke_rect(rect, color, width);
    }

    fn fill_device_rect(&mut self, rect: Rect) {
        let color = self.top().color;
        self.backend.fill_rect(rect, color);
    }

    fn draw_device_text(&mut self, text: &str, font: &Font, color: Color, rect: Rect, flags: TextAlign) {
        if text.is_empty() {
            return;
        }
        self.backend.draw_text(TextRun {
            text,
            font,
            pixel_height: font.pixel_height(self.scale_factor),
            color,
            rect,
            alignment: flags.resolve(),
        });
    }

    fn paint_theme_part(&mut self, part: ThemePart, state: ControlState, rect: Rect, extra: &ExtraParams) {
        let Some(theme) = self.theme else {
            warn!("Painter: no native theme attached; {part:?} skipped");
            return;
        };
        self.with_device(|device| theme.paint(part, device, state, rect, extra));
    }
}

impl Drop for Painter<'_> {
    fn drop(&mut self) {
        if self.save_depth() > 0 {
            warn!("Painter: dropped with {} unmatched save(s)", self.save_depth());
        }
        while self.states.len() > 1 {
            self.restore();
        }
    }
}

/// Restores the painter state when dropped. Derefs to the painter.
pub struct PainterGuard<'p, 'a>(&'p mut Painter<'a>);

impl Drop for PainterGuard<'_, '_> {
    fn drop(&mut self) {
        self.0.restore();
    }
}

impl<'a> Deref for PainterGuard<'_, 'a> {
    type Target = Painter<'a>;
    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl DerefMut for PainterGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0
    }
}
