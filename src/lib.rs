/*
 * ductpaint: the drawing and view plumbing underneath a Win32 widget toolkit.
 *
 * Views live in a `ViewTree` and are measured in logical units; a `Painter`
 * turns logical drawing calls into device pixels through a `PaintBackend`
 * (GDI on Windows, a recording software backend everywhere). Theme parts,
 * menus and the process-wide scale factor sit alongside. Windows-only glue is
 * gated per module so the portable core builds and tests on every platform.
 */
pub mod dpi;
pub mod error;
pub mod geometry;
#[cfg(target_os = "windows")]
pub mod hwnd_host;
pub mod menu;
#[cfg(target_os = "windows")]
pub mod menu_windows;
pub mod painter;
pub mod region;
pub mod styling_primitives;
pub mod theme;
#[cfg(target_os = "windows")]
pub mod theme_windows;
pub mod view;

pub use dpi::{DpiConfig, ScaleService};
pub use error::{PlatformError, Result as PlatformResult};
pub use geometry::{Point, PointF, Rect, RectF, Size, SizeF, Vector2d, Vector2dF};
#[cfg(target_os = "windows")]
pub use hwnd_host::{HwndHost, paint_hwnd};
pub use menu::{
    Accelerator, AcceleratorManager, MenuBase, MenuItem, MenuItemId, MenuItemType, NativeMenu,
};
#[cfg(target_os = "windows")]
pub use menu_windows::Win32Menu;
#[cfg(target_os = "windows")]
pub use painter::gdi::GdiBackend;
pub use painter::{PaintBackend, Painter, PainterGuard, SoftwareBackend, TextAlign};
pub use region::{CombineMode, Region};
pub use styling_primitives::{Color, Font, FontWeight};
pub use theme::{ControlState, ExtraParams, NativeTheme, ThemePart};
#[cfg(target_os = "windows")]
pub use theme_windows::UxTheme;
pub use view::{Container, Drawable, ViewId, ViewInfo, ViewTree, WindowHost};
