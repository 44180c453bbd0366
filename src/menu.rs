/*
 * Menu model: an ordered list of shared `MenuItem`s mirrored into a native menu.
 *
 * Items are reference counted so callers can keep handles to them; the menu only
 * drops its own reference on `remove`. An item records which menu holds it by
 * `MenuId` and which accelerator table it reports to by `Weak`, so neither edge
 * keeps the other side alive. Misuse (double insertion, bad index, removing an
 * absent item) is logged and ignored.
 */
use crate::error::{PlatformError, Result as PlatformResult};

use bitflags::bitflags;
use log::{debug, warn};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(u64);

impl MenuId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        MenuId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Process-unique item id, also used as the Win32 command id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuItemId(u32);

impl MenuItemId {
    // Below 100 is left to dialog controls (IDOK, IDCANCEL, ...).
    const FIRST: u32 = 100;

    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(MenuItemId::FIRST);
        MenuItemId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

/// A keyboard shortcut: a Win32 virtual-key code plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Accelerator {
    pub key: u16,
    pub modifiers: Modifiers,
}

const NAMED_KEYS: &[(&str, u16)] = &[
    ("backspace", 0x08),
    ("tab", 0x09),
    ("enter", 0x0D),
    ("return", 0x0D),
    ("escape", 0x1B),
    ("esc", 0x1B),
    ("space", 0x20),
    ("pageup", 0x21),
    ("pagedown", 0x22),
    ("end", 0x23),
    ("home", 0x24),
    ("left", 0x25),
    ("up", 0x26),
    ("right", 0x27),
    ("down", 0x28),
    ("insert", 0x2D),
    ("delete", 0x2E),
    ("plus", 0xBB),
    ("minus", 0xBD),
];

impl Accelerator {
    pub fn new(key: u16, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Parses descriptions such as `"Ctrl+Shift+S"`, `"Alt+F4"` or `"CmdOrCtrl+Plus"`.
    pub fn parse(description: &str) -> PlatformResult<Self> {
        let invalid = || {
            PlatformError::InvalidParameter(format!("Accelerator: cannot parse {description:?}"))
        };
        let mut parts: Vec<&str> = description.split('+').map(str::trim).collect();
        let key_part = parts.pop().filter(|k| !k.is_empty()).ok_or_else(invalid)?;

        let mut modifiers = Modifiers::empty();
        for part in parts {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "cmdorctrl" | "commandorcontrol" => Modifiers::CONTROL,
                "shift" => Modifiers::SHIFT,
                "alt" | "option" => Modifiers::ALT,
                "cmd" | "command" | "meta" | "super" => Modifiers::META,
                _ => return Err(invalid()),
            };
        }
        let key = parse_key(key_part).ok_or_else(invalid)?;
        Ok(Self { key, modifiers })
    }
}

fn parse_key(key: &str) -> Option<u16> {
    let lower = key.to_ascii_lowercase();
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphanumeric() {
            return Some(c.to_ascii_uppercase() as u16);
        }
    }
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u16>().ok()) {
        if (1..=24).contains(&n) {
            return Some(0x70 + n - 1);
        }
    }
    NAMED_KEYS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, vk)| *vk)
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CONTROL, "Ctrl+"),
            (Modifiers::ALT, "Alt+"),
            (Modifiers::SHIFT, "Shift+"),
            (Modifiers::META, "Win+"),
        ] {
            if self.modifiers.contains(flag) {
                f.write_str(name)?;
            }
        }
        match self.key {
            k @ (0x30..=0x39 | 0x41..=0x5A) => write!(f, "{}", k as u8 as char),
            k @ 0x70..=0x87 => write!(f, "F{}", k - 0x70 + 1),
            k => match NAMED_KEYS.iter().find(|(_, vk)| *vk == k) {
                Some((name, _)) => {
                    let mut chars = name.chars();
                    let first = chars.next().map(|c| c.to_ascii_uppercase());
                    write!(f, "{}{}", first.unwrap_or_default(), chars.as_str())
                }
                None => write!(f, "VK{k:#04X}"),
            },
        }
    }
}

/// Accelerator table shared by the menus of one window.
#[derive(Debug, Default)]
pub struct AcceleratorManager {
    bindings: RefCell<HashMap<Accelerator, MenuItemId>>,
}

impl AcceleratorManager {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn register(&self, accelerator: Accelerator, item: MenuItemId) {
        if let Some(previous) = self.bindings.borrow_mut().insert(accelerator, item) {
            if previous != item {
                warn!("AcceleratorManager: {accelerator} rebound from {previous:?} to {item:?}");
            }
        }
    }

    pub fn unregister(&self, item: MenuItemId) {
        self.bindings.borrow_mut().retain(|_, bound| *bound != item);
    }

    pub fn lookup(&self, accelerator: &Accelerator) -> Option<MenuItemId> {
        self.bindings.borrow().get(accelerator).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuItemType {
    #[default]
    Label,
    Checkbox,
    Radio,
    Separator,
}

/// One entry of a menu. Setters only change the model; once the item is in a
/// menu, `MenuBase::refresh` pushes the change to the native menu.
#[derive(Debug)]
pub struct MenuItem {
    id: MenuItemId,
    item_type: MenuItemType,
    label: RefCell<String>,
    checked: Cell<bool>,
    enabled: Cell<bool>,
    visible: Cell<bool>,
    accelerator: Cell<Option<Accelerator>>,
    menu: Cell<Option<MenuId>>,
    accel_manager: RefCell<Option<Weak<AcceleratorManager>>>,
}

impl MenuItem {
    pub fn new(item_type: MenuItemType) -> Rc<Self> {
        Rc::new(Self {
            id: MenuItemId::next(),
            item_type,
            label: RefCell::new(String::new()),
            checked: Cell::new(false),
            enabled: Cell::new(true),
            visible: Cell::new(true),
            accelerator: Cell::new(None),
            menu: Cell::new(None),
            accel_manager: RefCell::new(None),
        })
    }

    pub fn with_label(item_type: MenuItemType, label: impl Into<String>) -> Rc<Self> {
        let item = Self::new(item_type);
        item.set_label(label);
        item
    }

    pub fn id(&self) -> MenuItemId {
        self.id
    }

    pub fn item_type(&self) -> MenuItemType {
        self.item_type
    }

    pub fn set_label(&self, label: impl Into<String>) {
        *self.label.borrow_mut() = label.into();
    }

    pub fn label(&self) -> String {
        self.label.borrow().clone()
    }

    pub fn set_checked(&self, checked: bool) {
        if !matches!(self.item_type, MenuItemType::Checkbox | MenuItemType::Radio) {
            debug!("MenuItem: set_checked on {:?} item {:?} ignored", self.item_type, self.id);
            return;
        }
        self.checked.set(checked);
    }

    pub fn is_checked(&self) -> bool {
        self.checked.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// The menu currently holding this item.
    pub fn menu(&self) -> Option<MenuId> {
        self.menu.get()
    }

    pub(crate) fn set_menu(&self, menu: Option<MenuId>) {
        self.menu.set(menu);
    }

    pub fn accelerator(&self) -> Option<Accelerator> {
        self.accelerator.get()
    }

    /// Replaces the shortcut, keeping the attached accelerator table in sync.
    pub fn set_accelerator(&self, accelerator: Option<Accelerator>) {
        let manager = self.accelerator_manager();
        if let Some(manager) = &manager {
            manager.unregister(self.id);
        }
        self.accelerator.set(accelerator);
        if let (Some(manager), Some(accelerator)) = (manager, accelerator) {
            manager.register(accelerator, self.id);
        }
    }

    pub fn accelerator_manager(&self) -> Option<Rc<AcceleratorManager>> {
        self.accel_manager.borrow().as_ref().and_then(Weak::upgrade)
    }

    /// Moves this item's accelerator from the old table to `manager`.
    pub fn set_accelerator_manager(&self, manager: Option<Weak<AcceleratorManager>>) {
        if let Some(old) = self.accelerator_manager() {
            old.unregister(self.id);
        }
        if let (Some(new), Some(accelerator)) = (
            manager.as_ref().and_then(Weak::upgrade),
            self.accelerator.get(),
        ) {
            new.register(accelerator, self.id);
        }
        *self.accel_manager.borrow_mut() = manager;
    }

    /// Native menu text: the label plus a tab-separated shortcut hint.
    pub fn display_text(&self) -> String {
        match self.accelerator.get() {
            Some(accelerator) => format!("{}\t{accelerator}", self.label.borrow()),
            None => self.label(),
        }
    }
}

/// The platform menu a `MenuBase` mirrors its items into.
pub trait NativeMenu {
    fn insert_item(&mut self, item: &MenuItem, index: usize) -> PlatformResult<()>;
    fn remove_item(&mut self, item: &MenuItem, index: usize) -> PlatformResult<()>;

    /// Re-reads label, state and shortcut of the item at `index`.
    fn update_item(&mut self, _item: &MenuItem, _index: usize) -> PlatformResult<()> {
        Ok(())
    }
}

/// Native side for menus that are not (yet) backed by a platform menu.
#[derive(Debug, Default)]
pub struct DetachedMenu;

impl NativeMenu for DetachedMenu {
    fn insert_item(&mut self, _item: &MenuItem, _index: usize) -> PlatformResult<()> {
        Ok(())
    }

    fn remove_item(&mut self, _item: &MenuItem, _index: usize) -> PlatformResult<()> {
        Ok(())
    }
}

pub struct MenuBase {
    id: MenuId,
    native: Box<dyn NativeMenu>,
    items: Vec<Rc<MenuItem>>,
    accel_manager: Option<Weak<AcceleratorManager>>,
}

impl MenuBase {
    pub fn new(native: Box<dyn NativeMenu>) -> Self {
        Self {
            id: MenuId::next(),
            native,
            items: Vec::new(),
            accel_manager: None,
        }
    }

    pub fn detached() -> Self {
        Self::new(Box::new(DetachedMenu))
    }

    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item_at(&self, index: usize) -> Option<&Rc<MenuItem>> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[Rc<MenuItem>] {
        &self.items
    }

    pub fn find_item(&self, id: MenuItemId) -> Option<&Rc<MenuItem>> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn append(&mut self, item: Rc<MenuItem>) {
        let count = self.item_count();
        self.insert(item, count);
    }

    /*
     * Inserts `item` at `index` (0..=count). Ignored when the item already
     * belongs to a menu or the index is out of range. The native insertion runs
     * before the item is recorded; if it fails the item's back-references are
     * rolled back and the list is left untouched.
     */
    pub fn insert(&mut self, item: Rc<MenuItem>, index: usize) {
        if let Some(owner) = item.menu() {
            debug!("MenuBase: {:?} already belongs to {owner:?}; insert ignored", item.id());
            return;
        }
        if index > self.item_count() {
            debug!(
                "MenuBase: insert index {index} out of range 0..={}; ignored",
                self.item_count()
            );
            return;
        }
        item.set_menu(Some(self.id));
        item.set_accelerator_manager(self.accel_manager.clone());
        if let Err(err) = self.native.insert_item(&item, index) {
            warn!("MenuBase: native insertion of {:?} failed: {err}", item.id());
            item.set_accelerator_manager(None);
            item.set_menu(None);
            return;
        }
        self.items.insert(index, item);
    }

    /// Removes `item` if this menu holds it; otherwise does nothing. If the
    /// native removal fails the item stays in the menu with its references
    /// restored, so positions keep matching the native menu.
    pub fn remove(&mut self, item: &MenuItem) {
        let Some(index) = self.position_of(item) else {
            debug!("MenuBase: remove of foreign item {:?} ignored", item.id());
            return;
        };
        item.set_menu(None);
        item.set_accelerator_manager(None);
        if let Err(err) = self.native.remove_item(item, index) {
            warn!("MenuBase: native removal of {:?} failed: {err}", item.id());
            item.set_menu(Some(self.id));
            item.set_accelerator_manager(self.accel_manager.clone());
            return;
        }
        self.items.remove(index);
    }

    /// Pushes the current label, state and shortcut of a held item to the
    /// native menu.
    pub fn refresh(&mut self, item: &MenuItem) {
        let Some(index) = self.position_of(item) else {
            debug!("MenuBase: refresh of foreign item {:?} ignored", item.id());
            return;
        };
        if let Err(err) = self.native.update_item(item, index) {
            warn!("MenuBase: native update of {:?} failed: {err}", item.id());
        }
    }

    fn position_of(&self, item: &MenuItem) -> Option<usize> {
        self.items
            .iter()
            .position(|held| std::ptr::eq(Rc::as_ptr(held), item))
    }

    /// Attaches (or with `None`, detaches) the window accelerator table and
    /// hands it to every item.
    pub fn set_accelerator_manager(&mut self, manager: Option<&Rc<AcceleratorManager>>) {
        self.accel_manager = manager.map(Rc::downgrade);
        for item in &self.items {
            item.set_accelerator_manager(self.accel_manager.clone());
        }
    }

    pub fn accelerator_manager(&self) -> Option<Rc<AcceleratorManager>> {
        self.accel_manager.as_ref().and_then(Weak::upgrade)
    }
}

impl Drop for MenuBase {
    fn drop(&mut self) {
        // Items outliving the menu must be free to join another one.
        for item in &self.items {
            item.set_accelerator_manager(None);
            item.set_menu(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FlakyMenu {
        fail_inserts: bool,
        fail_removes: bool,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl NativeMenu for FlakyMenu {
        fn insert_item(&mut self, item: &MenuItem, index: usize) -> PlatformResult<()> {
            if self.fail_inserts {
                return Err(PlatformError::OperationFailed("insert".into()));
            }
            self.log
                .borrow_mut()
                .push(format!("insert {} at {index}", item.label()));
            Ok(())
        }

        fn remove_item(&mut self, item: &MenuItem, index: usize) -> PlatformResult<()> {
            if self.fail_removes {
                return Err(PlatformError::OperationFailed("remove".into()));
            }
            self.log
                .borrow_mut()
                .push(format!("remove {} at {index}", item.label()));
            Ok(())
        }

        fn update_item(&mut self, item: &MenuItem, index: usize) -> PlatformResult<()> {
            self.log.borrow_mut().push(format!(
                "update {} at {index} checked={}",
                item.display_text(),
                item.is_checked()
            ));
            Ok(())
        }
    }

    fn label(text: &str) -> Rc<MenuItem> {
        MenuItem::with_label(MenuItemType::Label, text)
    }

    fn labels(menu: &MenuBase) -> Vec<String> {
        menu.items().iter().map(|i| i.label()).collect()
    }

    #[test]
    fn append_and_insert_keep_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut menu = MenuBase::new(Box::new(FlakyMenu {
            log: log.clone(),
            ..Default::default()
        }));
        menu.append(label("a"));
        menu.append(label("c"));
        menu.insert(label("b"), 1);
        menu.insert(label("start"), 0);
        assert_eq!(labels(&menu), ["start", "a", "b", "c"]);
        assert_eq!(
            log.borrow().as_slice(),
            ["insert a at 0", "insert c at 1", "insert b at 1", "insert start at 0"]
        );
        assert!(menu.items().iter().all(|i| i.menu() == Some(menu.id())));
    }

    #[test]
    fn out_of_range_insert_is_ignored() {
        let mut menu = MenuBase::detached();
        menu.append(label("a"));
        let item = label("late");
        menu.insert(item.clone(), 2);
        assert_eq!(menu.item_count(), 1);
        assert_eq!(item.menu(), None);
    }

    #[test]
    fn item_owned_elsewhere_is_not_inserted() {
        let mut first = MenuBase::detached();
        let mut second = MenuBase::detached();
        let item = label("shared");
        first.append(item.clone());
        second.append(item.clone());
        first.append(item.clone());
        assert_eq!(first.item_count(), 1);
        assert_eq!(second.item_count(), 0);
        assert_eq!(item.menu(), Some(first.id()));
    }

    #[test]
    fn remove_clears_back_reference_and_keeps_item_alive() {
        let mut menu = MenuBase::detached();
        let keep = label("keep");
        let gone = label("gone");
        menu.append(keep.clone());
        menu.append(gone.clone());

        menu.remove(&gone);

        assert_eq!(menu.item_count(), 1);
        assert_eq!(gone.menu(), None);
        assert_eq!(Rc::strong_count(&gone), 1);
        assert_eq!(labels(&menu), ["keep"]);
    }

    #[test]
    fn removing_absent_item_changes_nothing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut menu = MenuBase::new(Box::new(FlakyMenu {
            log: log.clone(),
            ..Default::default()
        }));
        menu.append(label("a"));
        let stranger = label("stranger");
        menu.remove(&stranger);
        assert_eq!(labels(&menu), ["a"]);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn failed_native_insert_rolls_back() {
        let manager = AcceleratorManager::new();
        let mut menu = MenuBase::new(Box::new(FlakyMenu {
            fail_inserts: true,
            ..Default::default()
        }));
        menu.set_accelerator_manager(Some(&manager));
        let item = label("save");
        item.set_accelerator(Some(Accelerator::parse("Ctrl+S").unwrap()));

        menu.append(item.clone());

        assert_eq!(menu.item_count(), 0);
        assert_eq!(item.menu(), None);
        assert!(item.accelerator_manager().is_none());
        assert!(manager.is_empty());
    }

    #[test]
    fn accelerator_manager_propagates_to_items() {
        let manager = AcceleratorManager::new();
        let save = Accelerator::parse("Ctrl+S").unwrap();
        let mut menu = MenuBase::detached();
        let item = label("Save");
        item.set_accelerator(Some(save));
        menu.append(item.clone());
        assert!(manager.lookup(&save).is_none());

        menu.set_accelerator_manager(Some(&manager));
        assert_eq!(manager.lookup(&save), Some(item.id()));
        assert!(Rc::ptr_eq(&item.accelerator_manager().unwrap(), &manager));

        let late = label("Open");
        late.set_accelerator(Some(Accelerator::parse("Ctrl+O").unwrap()));
        menu.append(late.clone());
        assert_eq!(manager.len(), 2);

        menu.set_accelerator_manager(None);
        assert!(manager.is_empty());
        assert!(item.accelerator_manager().is_none());
    }

    #[test]
    fn removing_item_unregisters_its_accelerator() {
        let manager = AcceleratorManager::new();
        let mut menu = MenuBase::detached();
        menu.set_accelerator_manager(Some(&manager));
        let item = label("Quit");
        item.set_accelerator(Some(Accelerator::parse("Alt+F4").unwrap()));
        menu.append(item.clone());
        assert_eq!(manager.len(), 1);
        menu.remove(&item);
        assert!(manager.is_empty());
    }

    #[test]
    fn dropping_menu_frees_items_for_reuse() {
        let item = label("orphan");
        {
            let mut menu = MenuBase::detached();
            menu.append(item.clone());
        }
        assert_eq!(item.menu(), None);
        let mut other = MenuBase::detached();
        other.append(item.clone());
        assert_eq!(other.item_count(), 1);
    }

    #[test]
    fn accelerator_parse_and_display() {
        let accel = Accelerator::parse("CmdOrCtrl+Shift+s").unwrap();
        assert_eq!(accel.key, 'S' as u16);
        assert_eq!(accel.modifiers, Modifiers::CONTROL | Modifiers::SHIFT);
        assert_eq!(accel.to_string(), "Ctrl+Shift+S");

        assert_eq!(Accelerator::parse("Alt+F4").unwrap().to_string(), "Alt+F4");
        assert_eq!(Accelerator::parse("Escape").unwrap().to_string(), "Escape");
        assert!(Accelerator::parse("Hyper+K").is_err());
        assert!(Accelerator::parse("Ctrl+").is_err());
        assert!(Accelerator::parse("F25").is_err());
    }

    #[test]
    fn display_text_appends_shortcut() {
        let item = label("Save");
        assert_eq!(item.display_text(), "Save");
        item.set_accelerator(Some(Accelerator::parse("Ctrl+S").unwrap()));
        assert_eq!(item.display_text(), "Save\tCtrl+S");
    }

    #[test]
    fn only_check_items_can_be_checked() {
        let plain = label("plain");
        plain.set_checked(true);
        assert!(!plain.is_checked());
        let check = MenuItem::with_label(MenuItemType::Checkbox, "check");
        check.set_checked(true);
        assert!(check.is_checked());
    }

    #[test]
    fn failed_native_remove_keeps_item_in_place() {
        let manager = AcceleratorManager::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut menu = MenuBase::new(Box::new(FlakyMenu {
            fail_removes: true,
            log: log.clone(),
            ..Default::default()
        }));
        menu.set_accelerator_manager(Some(&manager));
        let first = label("first");
        let stuck = label("stuck");
        stuck.set_accelerator(Some(Accelerator::parse("Ctrl+K").unwrap()));
        menu.append(first.clone());
        menu.append(stuck.clone());

        menu.remove(&stuck);

        assert_eq!(labels(&menu), ["first", "stuck"]);
        assert_eq!(stuck.menu(), Some(menu.id()));
        assert_eq!(
            manager.lookup(&Accelerator::parse("Ctrl+K").unwrap()),
            Some(stuck.id())
        );
        menu.insert(label("second"), 1);
        assert_eq!(labels(&menu), ["first", "second", "stuck"]);
        assert_eq!(log.borrow().last().map(String::as_str), Some("insert second at 1"));
    }

    #[test]
    fn refresh_reaches_native_menu_at_item_position() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut menu = MenuBase::new(Box::new(FlakyMenu {
            log: log.clone(),
            ..Default::default()
        }));
        let wrap = MenuItem::with_label(MenuItemType::Checkbox, "Wrap");
        menu.append(label("Open"));
        menu.append(wrap.clone());

        wrap.set_label("Word wrap");
        wrap.set_checked(true);
        wrap.set_accelerator(Some(Accelerator::parse("Alt+Z").unwrap()));
        menu.refresh(&wrap);
        menu.refresh(&label("stranger"));

        assert_eq!(
            log.borrow().last().map(String::as_str),
            Some("update Word wrap\tAlt+Z at 1 checked=true")
        );
        assert_eq!(log.borrow().len(), 3);
    }
}
