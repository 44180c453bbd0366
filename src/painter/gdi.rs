/*
 * GDI implementation of `PaintBackend` over a borrowed device context.
 *
 * Checkpoints map onto SaveDC/RestoreDC, so everything GDI keeps per DC (clip
 * region, selected objects) is rolled back together. Pens, brushes and fonts are
 * created per call and deleted before returning; nothing stays selected into the
 * DC once a call completes, which keeps the DC safe to lend to uxtheme.
 */
use super::backend::{CheckpointToken, DeviceHandle, PaintBackend, TextAlignment, TextRun};
use crate::geometry::Rect;
use crate::region::CombineMode;
use crate::styling_primitives::{Color, FontWeight};

use log::{debug, warn};
use std::marker::PhantomData;
use windows::Win32::{
    Foundation::{COLORREF, RECT},
    Graphics::Gdi::{
        BACKGROUND_MODE, CLIP_DEFAULT_PRECIS, CreateFontW, CreatePen, CreateRectRgn, CreateSolidBrush,
        DEFAULT_CHARSET, DEFAULT_QUALITY, DT_CENTER, DT_LEFT, DT_NOPREFIX, DT_RIGHT,
        DT_SINGLELINE, DT_VCENTER, DeleteObject, DrawTextW, ExtSelectClipRgn, FF_DONTCARE,
        FW_BOLD, FW_NORMAL, FillRect, GetClipBox, GetStockObject, HDC, NULL_BRUSH, NULLREGION,
        OUT_DEFAULT_PRECIS, PS_INSIDEFRAME, RGN_AND, RGN_COPY, RGN_DIFF, RGN_ERROR, RGN_OR,
        Rectangle, RestoreDC, SaveDC, SelectObject, SetBkMode, SetTextColor, TRANSPARENT,
    },
};
use windows::core::HSTRING;

/// Win32 expects colors in BGR order.
pub(crate) fn color_to_colorref(color: Color) -> COLORREF {
    COLORREF((color.r as u32) | ((color.g as u32) << 8) | ((color.b as u32) << 16))
}

pub(crate) fn rect_to_native(rect: Rect) -> RECT {
    RECT {
        left: rect.x,
        top: rect.y,
        right: rect.right(),
        bottom: rect.bottom(),
    }
}

pub struct GdiBackend<'dc> {
    hdc: HDC,
    device_in_flight: bool,
    _dc: PhantomData<&'dc mut HDC>,
}

impl<'dc> GdiBackend<'dc> {
    /*
     * Wraps a device context for one paint pass.
     *
     * # Safety
     * `hdc` must stay valid for `'dc` and must not be drawn to through any other
     * path while the backend exists.
     */
    pub unsafe fn from_hdc(hdc: HDC) -> Option<Self> {
        if hdc.is_invalid() {
            warn!("GdiBackend: refusing to wrap an invalid HDC");
            return None;
        }
        Some(Self {
            hdc,
            device_in_flight: false,
            _dc: PhantomData,
        })
    }

    pub fn hdc(&self) -> HDC {
        self.hdc
    }
}

impl PaintBackend for GdiBackend<'_> {
    fn begin_checkpoint(&mut self) -> CheckpointToken {
        let saved = unsafe { SaveDC(self.hdc) };
        if saved == 0 {
            warn!("GdiBackend: SaveDC failed");
        }
        CheckpointToken::from_raw(saved)
    }

    fn end_checkpoint(&mut self, token: CheckpointToken) {
        let saved = token.into_raw();
        if saved == 0 {
            return;
        }
        if !unsafe { RestoreDC(self.hdc, saved) }.as_bool() {
            warn!("GdiBackend: RestoreDC({saved}) failed");
        }
    }

    fn combine_clip(&mut self, rect: Rect, mode: CombineMode) {
        let region = unsafe { CreateRectRgn(rect.x, rect.y, rect.right(), rect.bottom()) };
        if region.is_invalid() {
            warn!("GdiBackend: CreateRectRgn failed for {rect:?}");
            return;
        }
        let native_mode = match mode {
            CombineMode::Replace => RGN_COPY,
            CombineMode::Intersect => RGN_AND,
            CombineMode::Union => RGN_OR,
            CombineMode::Exclude => RGN_DIFF,
        };
        let result = unsafe { ExtSelectClipRgn(self.hdc, Some(region), native_mode) };
        if result == RGN_ERROR {
            warn!("GdiBackend: ExtSelectClipRgn({mode:?}) failed");
        }
        let _ = unsafe { DeleteObject(region.into()) };
    }

    fn clip_box(&self) -> Option<Rect> {
        let mut rc = RECT::default();
        let kind = unsafe { GetClipBox(self.hdc, &mut rc) };
        if kind == RGN_ERROR || kind == NULLREGION {
            return None;
        }
        Some(Rect::from_ltrb(rc.left, rc.top, rc.right, rc.bottom))
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
        if rect.is_empty() || color.is_transparent() {
            return;
        }
        let width = line_width.round().max(1.0) as i32;
        unsafe {
            let pen = CreatePen(PS_INSIDEFRAME, width, color_to_colorref(color));
            if pen.is_invalid() {
                warn!("GdiBackend: CreatePen failed");
                return;
            }
            let old_pen = SelectObject(self.hdc, pen.into());
            let old_brush = SelectObject(self.hdc, GetStockObject(NULL_BRUSH));
            let _ = Rectangle(self.hdc, rect.x, rect.y, rect.right(), rect.bottom());
            SelectObject(self.hdc, old_brush);
            SelectObject(self.hdc, old_pen);
            let _ = DeleteObject(pen.into());
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() || color.is_transparent() {
            return;
        }
        unsafe {
            let brush = CreateSolidBrush(color_to_colorref(color));
            if brush.is_invalid() {
                warn!("GdiBackend: CreateSolidBrush failed");
                return;
            }
            let _ = FillRect(self.hdc, &rect_to_native(rect), brush);
            let _ = DeleteObject(brush.into());
        }
    }

    fn draw_text(&mut self, run: TextRun<'_>) {
        if run.color.is_transparent() {
            return;
        }
        let weight = match run.font.weight {
            FontWeight::Bold => FW_BOLD.0 as i32,
            FontWeight::Normal => FW_NORMAL.0 as i32,
        };
        let family = HSTRING::from(run.font.family.as_str());
        let mut wide: Vec<u16> = run.text.encode_utf16().collect();
        let mut rc = rect_to_native(run.rect);
        let align = match run.alignment {
            TextAlignment::Near => DT_LEFT,
            TextAlignment::Center => DT_CENTER,
            TextAlignment::Far => DT_RIGHT,
        };
        unsafe {
            let hfont = CreateFontW(
                -run.pixel_height,
                0,
                0,
                0,
                weight,
                0,
                0,
                0,
                DEFAULT_CHARSET,
                OUT_DEFAULT_PRECIS,
                CLIP_DEFAULT_PRECIS,
                DEFAULT_QUALITY,
                FF_DONTCARE.0 as u32,
                &family,
            );
            if hfont.is_invalid() {
                warn!("GdiBackend: CreateFontW failed for {:?}", run.font.family);
                return;
            }
            let old_font = SelectObject(self.hdc, hfont.into());
            let old_mode = SetBkMode(self.hdc, TRANSPARENT);
            let old_color = SetTextColor(self.hdc, color_to_colorref(run.color));
            let _ = DrawTextW(
                self.hdc,
                &mut wide,
                &mut rc,
                align | DT_VCENTER | DT_SINGLELINE | DT_NOPREFIX,
            );
            SetTextColor(self.hdc, old_color);
            SetBkMode(self.hdc, BACKGROUND_MODE(old_mode as _));
            SelectObject(self.hdc, old_font);
            let _ = DeleteObject(hfont.into());
        }
    }

    fn acquire_device(&mut self) -> DeviceHandle {
        if self.device_in_flight {
            warn!("GdiBackend: HDC already lent out");
            return DeviceHandle::INVALID;
        }
        self.device_in_flight = true;
        debug!("GdiBackend: lending HDC {:?}", self.hdc);
        DeviceHandle::from_raw(self.hdc.0 as isize)
    }

    fn release_device(&mut self, device: DeviceHandle) {
        if device.raw() == self.hdc.0 as isize {
            self.device_in_flight = false;
        }
    }
}

/// Recovers the HDC lent out through `acquire_device`.
pub(crate) fn device_to_hdc(device: DeviceHandle) -> HDC {
    HDC(device.raw() as *mut _)
}
