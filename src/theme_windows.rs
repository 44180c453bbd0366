/*
 * uxtheme-backed `NativeTheme`. Theme handles are opened lazily per class on
 * first use and closed on drop. When visual styles are off (classic theme or
 * OpenThemeData failure) parts fall back to DrawFrameControl.
 */
use crate::geometry::{Rect, Size};
use crate::painter::DeviceHandle;
use crate::painter::gdi::{device_to_hdc, rect_to_native};
use crate::theme::{ControlState, ExtraParams, NativeTheme, ThemePart, visual_style_ids};

use log::{debug, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use windows::Win32::{
    Graphics::Gdi::{
        DFC_BUTTON, DFC_SCROLL, DFCS_BUTTONCHECK, DFCS_BUTTONPUSH, DFCS_BUTTONRADIO,
        DFCS_CHECKED, DFCS_INACTIVE, DFCS_PUSHED, DFCS_SCROLLDOWN, DFCS_SCROLLLEFT,
        DFCS_SCROLLRIGHT, DFCS_SCROLLSIZEGRIP, DFCS_SCROLLUP, DFCS_STATE,
        DrawFocusRect, DrawFrameControl,
    },
    UI::Controls::{
        CloseThemeData, DrawThemeBackground, GetThemePartSize, HTHEME, IsAppThemed, OpenThemeData,
        TS_TRUE,
    },
};
use windows::core::HSTRING;

#[derive(Default)]
pub struct UxTheme {
    handles: RefCell<HashMap<&'static str, HTHEME>>,
}

impl UxTheme {
    pub fn new() -> Self {
        Self::default()
    }

    fn theme_for(&self, class: &'static str) -> Option<HTHEME> {
        if !unsafe { IsAppThemed() }.as_bool() {
            return None;
        }
        let mut handles = self.handles.borrow_mut();
        if let Some(handle) = handles.get(class) {
            return Some(*handle);
        }
        let handle = unsafe { OpenThemeData(None, &HSTRING::from(class)) };
        if handle.is_invalid() {
            debug!("UxTheme: OpenThemeData({class}) unavailable; using classic drawing");
            return None;
        }
        handles.insert(class, handle);
        Some(handle)
    }

    fn paint_classic(&self, part: ThemePart, device: DeviceHandle, state: ControlState, rect: Rect, extra: &ExtraParams) {
        let checked = matches!(extra, ExtraParams::Button { checked: true, .. });
        let (kind, base) = match part {
            ThemePart::Button => (DFC_BUTTON, DFCS_BUTTONPUSH),
            ThemePart::Checkbox => (DFC_BUTTON, DFCS_BUTTONCHECK),
            ThemePart::Radio => (DFC_BUTTON, DFCS_BUTTONRADIO),
            ThemePart::ScrollbarUpArrow => (DFC_SCROLL, DFCS_SCROLLUP),
            ThemePart::ScrollbarDownArrow => (DFC_SCROLL, DFCS_SCROLLDOWN),
            ThemePart::ScrollbarLeftArrow => (DFC_SCROLL, DFCS_SCROLLLEFT),
            ThemePart::ScrollbarRightArrow => (DFC_SCROLL, DFCS_SCROLLRIGHT),
            ThemePart::ScrollbarCorner => (DFC_SCROLL, DFCS_SCROLLSIZEGRIP),
            _ => {
                debug!("UxTheme: no classic fallback for {part:?}");
                return;
            }
        };
        let mut flags = base.0;
        if checked {
            flags |= DFCS_CHECKED.0;
        }
        match state {
            ControlState::Pressed => flags |= DFCS_PUSHED.0,
            ControlState::Disabled => flags |= DFCS_INACTIVE.0,
            _ => {}
        }
        let mut rc = rect_to_native(rect);
        let _ = unsafe {
            DrawFrameControl(device_to_hdc(device), &mut rc, kind, DFCS_STATE(flags))
        };
    }
}

impl NativeTheme for UxTheme {
    fn paint(
        &self,
        part: ThemePart,
        device: DeviceHandle,
        state: ControlState,
        rect: Rect,
        extra: &ExtraParams,
    ) {
        let ids = visual_style_ids(part, state, extra);
        let Some(theme) = self.theme_for(ids.class) else {
            self.paint_classic(part, device, state, rect, extra);
            return;
        };
        let rc = rect_to_native(rect);
        if let Err(err) = unsafe {
            DrawThemeBackground(theme, device_to_hdc(device), ids.part_id, ids.state_id, &rc, None)
        } {
            warn!("UxTheme: DrawThemeBackground({part:?}) failed: {err}");
        }
    }

    fn paint_focus_rect(&self, device: DeviceHandle, rect: Rect) {
        let rc = rect_to_native(rect);
        let _ = unsafe { DrawFocusRect(device_to_hdc(device), &rc) };
    }

    fn part_size(&self, part: ThemePart, state: ControlState) -> Size {
        let ids = visual_style_ids(part, state, &ExtraParams::None);
        let Some(theme) = self.theme_for(ids.class) else {
            return Size::default();
        };
        match unsafe { GetThemePartSize(theme, None, ids.part_id, ids.state_id, None, TS_TRUE) } {
            Ok(size) => Size::new(size.cx, size.cy),
            Err(err) => {
                debug!("UxTheme: GetThemePartSize({part:?}) failed: {err}");
                Size::default()
            }
        }
    }
}

impl Drop for UxTheme {
    fn drop(&mut self) {
        for (_, handle) in self.handles.get_mut().drain() {
            let _ = unsafe { CloseThemeData(handle) };
        }
    }
}
