/*
 * Native theme parts and the renderer interface the painter delegates to.
 *
 * A theme renderer draws directly onto a device handle in pixel space; the
 * painter is responsible for scaling, origin offset and the scoped device
 * acquisition around each call. `visual_style_ids` is the portable half of the
 * uxtheme mapping so it can be checked without a visual-styles session.
 */
use crate::geometry::{Rect, Size};
use crate::painter::DeviceHandle;

/// Interaction state of a control. Discriminants are stable array indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlState {
    Disabled = 0,
    Hovered = 1,
    #[default]
    Normal = 2,
    Pressed = 3,
}

impl ControlState {
    pub const COUNT: usize = 4;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemePart {
    Checkbox,
    Radio,
    Button,
    ScrollbarUpArrow,
    ScrollbarDownArrow,
    ScrollbarLeftArrow,
    ScrollbarRightArrow,
    ScrollbarHorizontalThumb,
    ScrollbarVerticalThumb,
    ScrollbarHorizontalTrack,
    ScrollbarVerticalTrack,
    ScrollbarCorner,
    TabPanel,
    TabItem,
}

/// Per-part payload.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ExtraParams {
    #[default]
    None,
    Button {
        checked: bool,
        indeterminate: bool,
        is_default: bool,
    },
    ScrollbarTrack {
        is_upper: bool,
        track_rect: Rect,
    },
    TabItem {
        selected: bool,
    },
}

pub trait NativeTheme {
    /// Paints `part` into `rect` (pixels, already offset to device space).
    fn paint(
        &self,
        part: ThemePart,
        device: DeviceHandle,
        state: ControlState,
        rect: Rect,
        extra: &ExtraParams,
    );

    /// Draws the dotted keyboard-focus outline around `rect` (device pixels).
    fn paint_focus_rect(&self, device: DeviceHandle, rect: Rect);

    /// Natural size of a part in pixels, or zero when the theme has no opinion.
    fn part_size(&self, _part: ThemePart, _state: ControlState) -> Size {
        Size::default()
    }
}

/// uxtheme class name plus part/state ids (vssym32.h values).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualStyleIds {
    pub class: &'static str,
    pub part_id: i32,
    pub state_id: i32,
}

const BP_PUSHBUTTON: i32 = 1;
const BP_RADIOBUTTON: i32 = 2;
const BP_CHECKBOX: i32 = 3;

const SBP_ARROWBTN: i32 = 1;
const SBP_THUMBBTNHORZ: i32 = 2;
const SBP_THUMBBTNVERT: i32 = 3;
const SBP_LOWERTRACKHORZ: i32 = 4;
const SBP_UPPERTRACKHORZ: i32 = 5;
const SBP_LOWERTRACKVERT: i32 = 6;
const SBP_UPPERTRACKVERT: i32 = 7;
const SBP_SIZEBOX: i32 = 10;

const TABP_TABITEM: i32 = 1;
const TABP_PANE: i32 = 9;

// ABS_UPNORMAL..ABS_RIGHTDISABLED come in blocks of four per direction.
const ABS_UP_BASE: i32 = 1;
const ABS_DOWN_BASE: i32 = 5;
const ABS_LEFT_BASE: i32 = 9;
const ABS_RIGHT_BASE: i32 = 13;

const PBS_DEFAULTED: i32 = 5;
const TIS_SELECTED: i32 = 3;

// NORMAL, HOT, PRESSED, DISABLED ordering shared by most uxtheme parts.
fn common_state_offset(state: ControlState) -> i32 {
    match state {
        ControlState::Normal => 0,
        ControlState::Hovered => 1,
        ControlState::Pressed => 2,
        ControlState::Disabled => 3,
    }
}

pub fn visual_style_ids(part: ThemePart, state: ControlState, extra: &ExtraParams) -> VisualStyleIds {
    let offset = common_state_offset(state);
    let (checked, indeterminate, is_default) = match *extra {
        ExtraParams::Button {
            checked,
            indeterminate,
            is_default,
        } => (checked, indeterminate, is_default),
        _ => (false, false, false),
    };
    match part {
        ThemePart::Button => {
            let state_id = if is_default && state == ControlState::Normal {
                PBS_DEFAULTED
            } else {
                1 + offset
            };
            VisualStyleIds {
                class: "BUTTON",
                part_id: BP_PUSHBUTTON,
                state_id,
            }
        }
        ThemePart::Checkbox => {
            // CBS_UNCHECKED*, CBS_CHECKED*, CBS_MIXED* blocks of four.
            let block = if indeterminate {
                8
            } else if checked {
                4
            } else {
                0
            };
            VisualStyleIds {
                class: "BUTTON",
                part_id: BP_CHECKBOX,
                state_id: 1 + block + offset,
            }
        }
        ThemePart::Radio => VisualStyleIds {
            class: "BUTTON",
            part_id: BP_RADIOBUTTON,
            state_id: 1 + if checked { 4 } else { 0 } + offset,
        },
        ThemePart::ScrollbarUpArrow => arrow(ABS_UP_BASE + offset),
        ThemePart::ScrollbarDownArrow => arrow(ABS_DOWN_BASE + offset),
        ThemePart::ScrollbarLeftArrow => arrow(ABS_LEFT_BASE + offset),
        ThemePart::ScrollbarRightArrow => arrow(ABS_RIGHT_BASE + offset),
        ThemePart::ScrollbarHorizontalThumb => scrollbar(SBP_THUMBBTNHORZ, 1 + offset),
        ThemePart::ScrollbarVerticalThumb => scrollbar(SBP_THUMBBTNVERT, 1 + offset),
        ThemePart::ScrollbarHorizontalTrack => {
            let upper = matches!(extra, ExtraParams::ScrollbarTrack { is_upper: true, .. });
            let part_id = if upper {
                SBP_UPPERTRACKHORZ
            } else {
                SBP_LOWERTRACKHORZ
            };
            scrollbar(part_id, 1 + offset)
        }
        ThemePart::ScrollbarVerticalTrack => {
            let upper = matches!(extra, ExtraParams::ScrollbarTrack { is_upper: true, .. });
            let part_id = if upper {
                SBP_UPPERTRACKVERT
            } else {
                SBP_LOWERTRACKVERT
            };
            scrollbar(part_id, 1 + offset)
        }
        ThemePart::ScrollbarCorner => scrollbar(SBP_SIZEBOX, 1),
        ThemePart::TabPanel => VisualStyleIds {
            class: "TAB",
            part_id: TABP_PANE,
            state_id: 0,
        },
        ThemePart::TabItem => {
            let selected = matches!(extra, ExtraParams::TabItem { selected: true });
            VisualStyleIds {
                class: "TAB",
                part_id: TABP_TABITEM,
                state_id: if selected { TIS_SELECTED } else { tab_state(state) },
            }
        }
    }
}

fn arrow(state_id: i32) -> VisualStyleIds {
    scrollbar(SBP_ARROWBTN, state_id)
}

fn scrollbar(part_id: i32, state_id: i32) -> VisualStyleIds {
    VisualStyleIds {
        class: "SCROLLBAR",
        part_id,
        state_id,
    }
}

// TIS_NORMAL=1, TIS_HOT=2, TIS_SELECTED=3, TIS_DISABLED=4.
fn tab_state(state: ControlState) -> i32 {
    match state {
        ControlState::Normal | ControlState::Pressed => 1,
        ControlState::Hovered => 2,
        ControlState::Disabled => 4,
    }
}
