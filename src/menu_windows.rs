/*
 * Win32 side of `MenuBase`: an owned HMENU that mirrors item insertions,
 * removals and updates by position. Item ids double as WM_COMMAND identifiers.
 */
use crate::error::{PlatformError, Result as PlatformResult};
use crate::menu::{MenuItem, MenuItemType, NativeMenu};

use log::{debug, warn};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateMenu, CreatePopupMenu, DestroyMenu, HMENU, InsertMenuItemW, MENU_ITEM_STATE,
    MENUITEMINFOW, MF_BYPOSITION, MFS_CHECKED, MFS_DISABLED, MFT_RADIOCHECK, MFT_SEPARATOR,
    MFT_STRING, MIIM_FTYPE, MIIM_ID, MIIM_STATE, MIIM_STRING, RemoveMenu, SetMenuItemInfoW,
};
use windows::core::PWSTR;

#[derive(Debug)]
pub struct Win32Menu {
    hmenu: HMENU,
}

impl Win32Menu {
    pub fn popup() -> PlatformResult<Self> {
        let hmenu = unsafe { CreatePopupMenu()? };
        debug!("Win32Menu: created popup menu {hmenu:?}");
        Ok(Self { hmenu })
    }

    pub fn menu_bar() -> PlatformResult<Self> {
        let hmenu = unsafe { CreateMenu()? };
        debug!("Win32Menu: created menu bar {hmenu:?}");
        Ok(Self { hmenu })
    }

    /// The underlying handle, still owned by this menu. Read it before handing
    /// the menu to `MenuBase::new`; it stays valid until the `MenuBase` drops.
    pub fn hmenu(&self) -> HMENU {
        self.hmenu
    }
}

fn native_position(index: usize) -> PlatformResult<u32> {
    u32::try_from(index).map_err(|_| {
        PlatformError::InvalidParameter(format!("Win32Menu: position {index} out of range"))
    })
}

fn item_text(item: &MenuItem) -> Vec<u16> {
    item.display_text()
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect()
}

/// Describes `item` for InsertMenuItemW/SetMenuItemInfoW. `text` must outlive the call.
fn item_info(item: &MenuItem, text: &mut [u16]) -> MENUITEMINFOW {
    let mut state = MENU_ITEM_STATE(0);
    if item.is_checked() {
        state |= MFS_CHECKED;
    }
    if !item.is_enabled() {
        state |= MFS_DISABLED;
    }
    let item_kind = match item.item_type() {
        MenuItemType::Separator => MFT_SEPARATOR,
        MenuItemType::Radio => MFT_STRING | MFT_RADIOCHECK,
        MenuItemType::Label | MenuItemType::Checkbox => MFT_STRING,
    };
    MENUITEMINFOW {
        cbSize: std::mem::size_of::<MENUITEMINFOW>() as u32,
        fMask: MIIM_ID | MIIM_STRING | MIIM_FTYPE | MIIM_STATE,
        fType: item_kind,
        fState: state,
        wID: item.id().raw(),
        dwTypeData: PWSTR(text.as_mut_ptr()),
        cch: text.len().saturating_sub(1) as u32,
        ..Default::default()
    }
}

impl NativeMenu for Win32Menu {
    fn insert_item(&mut self, item: &MenuItem, index: usize) -> PlatformResult<()> {
        let position = native_position(index)?;
        let mut text = item_text(item);
        let mii = item_info(item, &mut text);
        unsafe { InsertMenuItemW(self.hmenu, position, true, &mii)? };
        debug!(
            "Win32Menu: inserted {:?} ({:?}) at {position}",
            item.id(),
            item.label()
        );
        Ok(())
    }

    fn remove_item(&mut self, item: &MenuItem, index: usize) -> PlatformResult<()> {
        let position = native_position(index)?;
        unsafe { RemoveMenu(self.hmenu, position, MF_BYPOSITION)? };
        debug!("Win32Menu: removed {:?} from {position}", item.id());
        Ok(())
    }

    fn update_item(&mut self, item: &MenuItem, index: usize) -> PlatformResult<()> {
        let position = native_position(index)?;
        let mut text = item_text(item);
        let mii = item_info(item, &mut text);
        unsafe { SetMenuItemInfoW(self.hmenu, position, true, &mii)? };
        debug!("Win32Menu: updated {:?} at {position}", item.id());
        Ok(())
    }
}

impl Drop for Win32Menu {
    fn drop(&mut self) {
        if let Err(err) = unsafe { DestroyMenu(self.hmenu) } {
            warn!("Win32Menu: DestroyMenu({:?}) failed: {err}", self.hmenu);
        }
    }
}
