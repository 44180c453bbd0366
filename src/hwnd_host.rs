/*
 * Binds the view tree to a real HWND: `HwndHost` answers scale queries and turns
 * invalidation into InvalidateRect, and `paint_hwnd` runs one WM_PAINT pass
 * through a `GdiBackend` over the BeginPaint DC.
 */
use crate::error::{PlatformError, Result as PlatformResult};
use crate::geometry::Rect;
use crate::painter::gdi::{GdiBackend, rect_to_native};
use crate::theme::NativeTheme;
use crate::view::{ViewId, ViewTree, WindowHost};

use log::{debug, warn};
use windows::Win32::{
    Foundation::HWND,
    Graphics::Gdi::{BeginPaint, EndPaint, InvalidateRect, PAINTSTRUCT},
    UI::HiDpi::GetDpiForWindow,
};

const USER_DEFAULT_SCREEN_DPI: u32 = 96;

#[derive(Debug)]
pub struct HwndHost {
    hwnd: HWND,
}

impl HwndHost {
    pub fn new(hwnd: HWND) -> PlatformResult<Self> {
        if hwnd.is_invalid() {
            return Err(PlatformError::InvalidHandle(
                "HwndHost: cannot host views in an invalid HWND".into(),
            ));
        }
        Ok(Self { hwnd })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }
}

impl WindowHost for HwndHost {
    fn scale_factor(&self) -> f32 {
        let dpi = unsafe { GetDpiForWindow(self.hwnd) };
        if dpi == 0 {
            warn!("HwndHost: GetDpiForWindow failed for {:?}; assuming 96 DPI", self.hwnd);
            return 1.0;
        }
        dpi as f32 / USER_DEFAULT_SCREEN_DPI as f32
    }

    fn schedule_repaint(&self, pixel_dirty: Rect) {
        let rc = rect_to_native(pixel_dirty);
        if !unsafe { InvalidateRect(Some(self.hwnd), Some(&rc), true) }.as_bool() {
            warn!("HwndHost: InvalidateRect failed for {pixel_dirty:?}");
        }
    }
}

/*
 * Handles WM_PAINT for a window whose client area is `content_view`.
 * BeginPaint/EndPaint always pair up, even when painting itself fails.
 */
pub fn paint_hwnd(
    views: &ViewTree,
    content_view: ViewId,
    hwnd: HWND,
    theme: Option<&dyn NativeTheme>,
) -> PlatformResult<()> {
    let mut ps = PAINTSTRUCT::default();
    let hdc = unsafe { BeginPaint(hwnd, &mut ps) };
    let result = match unsafe { GdiBackend::from_hdc(hdc) } {
        Some(mut backend) => {
            let dirty = Rect::from_ltrb(
                ps.rcPaint.left,
                ps.rcPaint.top,
                ps.rcPaint.right,
                ps.rcPaint.bottom,
            );
            debug!("HwndHost: painting {content_view:?} dirty={dirty:?}");
            views.paint_window(content_view, &mut backend, theme, dirty)
        }
        None => Err(PlatformError::InvalidHandle(format!(
            "HwndHost: BeginPaint returned no DC for {hwnd:?}"
        ))),
    };
    let _ = unsafe { EndPaint(hwnd, &ps) };
    result
}
