/*
 * View tree: bounds, parenting, DPI scaling and invalidation for every view,
 * whether it owns a native window (`is_virtual == false`) or is drawn directly
 * by its ancestors.
 *
 * Views live in a `ViewTree` arena and refer to each other by `ViewId`; the
 * parent edge is a plain id and the host window a `Weak`, so neither keeps
 * anything alive. Window association flows down the tree: whatever window the
 * parent (or the content view) has, every descendant has too.
 *
 * Pixel bounds are authoritative. Logical bounds are derived on demand through
 * the view's scale factor, which is the host window's, or the process default
 * from `ScaleService` while detached.
 */
use crate::dpi::ScaleService;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::geometry::{Point, Rect, RectF, Size, Vector2d, to_logical_rect, to_pixel_rect};
use crate::painter::{PaintBackend, Painter};
use crate::region::CombineMode;
use crate::theme::{ControlState, NativeTheme};

use log::{debug, warn};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::Arc;

/// The native window a content view is mounted in.
pub trait WindowHost {
    /// Pixels per logical unit for this window.
    fn scale_factor(&self) -> f32;

    /// Marks `pixel_dirty` (window client coordinates) for a later repaint.
    fn schedule_repaint(&self, pixel_dirty: Rect);
}

/// Read-only snapshot of the view being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewInfo {
    pub id: ViewId,
    pub state: ControlState,
    /// Bounds relative to the parent view.
    pub pixel_bounds: Rect,
    pub is_virtual: bool,
}

impl ViewInfo {
    /// The view's own area in view-local pixels.
    pub fn local_pixel_rect(&self) -> Rect {
        Rect::from_size(self.pixel_bounds.size())
    }
}

/// Capability implemented by each kind of view to emit its own content.
pub trait Drawable {
    /// Paints the view. The painter's origin is the view's top-left corner and
    /// `dirty` is in view-local pixels.
    fn draw(&self, _view: &ViewInfo, _painter: &mut Painter<'_>, _dirty: Rect) {}
}

/// A view that only hosts children.
#[derive(Debug, Default)]
pub struct Container;

impl Drawable for Container {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u32);

impl ViewId {
    pub fn raw(&self) -> u32 {
        self.0
    }
}

struct ViewNode {
    is_virtual: bool,
    is_visible: bool,
    state: ControlState,
    is_content_view: bool,
    window: Option<Weak<dyn WindowHost>>,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    // Relative to the parent view.
    bounds: Rect,
    preferred_size: Size,
    drawable: Box<dyn Drawable>,
}

impl ViewNode {
    fn info(&self, id: ViewId) -> ViewInfo {
        ViewInfo {
            id,
            state: self.state,
            pixel_bounds: self.bounds,
            is_virtual: self.is_virtual,
        }
    }
}

pub struct ViewTree {
    nodes: HashMap<ViewId, ViewNode>,
    next_id: u32,
    scale: Arc<ScaleService>,
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new(ScaleService::global())
    }
}

impl ViewTree {
    pub fn new(scale: Arc<ScaleService>) -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 1,
            scale,
        }
    }

    pub fn create_view(&mut self, is_virtual: bool, drawable: Box<dyn Drawable>) -> ViewId {
        let id = ViewId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            ViewNode {
                is_virtual,
                is_visible: true,
                state: ControlState::Normal,
                is_content_view: false,
                window: None,
                parent: None,
                children: Vec::new(),
                bounds: Rect::default(),
                preferred_size: Size::default(),
                drawable,
            },
        );
        id
    }

    /// Removes `id` and its whole subtree.
    pub fn remove_view(&mut self, id: ViewId) -> PlatformResult<()> {
        self.node(id)?;
        self.detach_from_parent(id);
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                pending.extend(node.children);
            }
        }
        Ok(())
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Bounds ──────────────────────────────────────────────────────────────

    pub fn set_pixel_bounds(&mut self, id: ViewId, bounds: Rect) -> PlatformResult<()> {
        self.node_mut(id)?.bounds = bounds;
        Ok(())
    }

    pub fn pixel_bounds(&self, id: ViewId) -> Option<Rect> {
        self.nodes.get(&id).map(|n| n.bounds)
    }

    /// Sets bounds in logical units; stored as the enclosing pixel rect.
    pub fn set_bounds(&mut self, id: ViewId, bounds: RectF) -> PlatformResult<()> {
        let scale = self.scale_factor(id)?;
        self.set_pixel_bounds(id, to_pixel_rect(bounds, scale))
    }

    pub fn bounds(&self, id: ViewId) -> Option<RectF> {
        let pixel = self.pixel_bounds(id)?;
        let scale = self.scale_factor(id).ok()?;
        Some(to_logical_rect(pixel, scale))
    }

    /// Offset of the view's top-left corner from the host window's client origin.
    pub fn window_pixel_origin(&self, id: ViewId) -> Option<Point> {
        let mut origin = Point::default();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.nodes.get(&current)?;
            origin = origin + Vector2d::new(node.bounds.x, node.bounds.y);
            cursor = node.parent;
        }
        Some(origin)
    }

    pub fn window_pixel_bounds(&self, id: ViewId) -> Option<Rect> {
        let origin = self.window_pixel_origin(id)?;
        let size = self.nodes.get(&id)?.bounds.size();
        Some(Rect::new(origin.x, origin.y, size.width, size.height))
    }

    pub fn set_pixel_preferred_size(&mut self, id: ViewId, size: Size) -> PlatformResult<()> {
        self.node_mut(id)?.preferred_size = size;
        Ok(())
    }

    pub fn pixel_preferred_size(&self, id: ViewId) -> Option<Size> {
        self.nodes.get(&id).map(|n| n.preferred_size)
    }

    // ── Flags and state ─────────────────────────────────────────────────────

    pub fn set_visible(&mut self, id: ViewId, visible: bool) -> PlatformResult<()> {
        self.node_mut(id)?.is_visible = visible;
        Ok(())
    }

    pub fn is_visible(&self, id: ViewId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.is_visible)
    }

    pub fn set_state(&mut self, id: ViewId, state: ControlState) -> PlatformResult<()> {
        self.node_mut(id)?.state = state;
        Ok(())
    }

    pub fn state(&self, id: ViewId) -> Option<ControlState> {
        self.nodes.get(&id).map(|n| n.state)
    }

    pub fn is_content_view(&self, id: ViewId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.is_content_view)
    }

    pub fn is_virtual(&self, id: ViewId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.is_virtual)
    }

    // ── Hierarchy ───────────────────────────────────────────────────────────

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Host window, if the view is attached and the window is still alive.
    pub fn window(&self, id: ViewId) -> Option<Rc<dyn WindowHost>> {
        self.nodes
            .get(&id)
            .and_then(|n| n.window.as_ref())
            .and_then(Weak::upgrade)
    }

    /// Re-parents `id` (appending it to `parent`'s children) and hands the
    /// parent's window to the whole subtree. `None` detaches it.
    pub fn set_parent(&mut self, id: ViewId, parent: Option<ViewId>) -> PlatformResult<()> {
        self.node(id)?;
        if let Some(parent_id) = parent {
            self.node(parent_id)?;
            if parent_id == id || self.is_ancestor(id, parent_id) {
                return Err(PlatformError::InvalidParameter(format!(
                    "ViewTree: making {parent_id:?} the parent of {id:?} would create a cycle"
                )));
            }
        }

        self.detach_from_parent(id);
        let window = match parent {
            Some(parent_id) => {
                let parent_node = self.node_mut(parent_id)?;
                parent_node.children.push(id);
                parent_node.window.clone()
            }
            None => None,
        };
        let node = self.node_mut(id)?;
        node.is_content_view = false;
        node.parent = parent;
        self.propagate_window(id, window);
        debug!("ViewTree: {id:?} parent set to {parent:?}");
        Ok(())
    }

    /// Mounts `id` as the root content view of `window`.
    pub fn become_content_view(&mut self, id: ViewId, window: &Rc<dyn WindowHost>) -> PlatformResult<()> {
        self.node(id)?;
        self.detach_from_parent(id);
        let node = self.node_mut(id)?;
        node.is_content_view = true;
        node.parent = None;
        self.propagate_window(id, Some(Rc::downgrade(window)));
        Ok(())
    }

    // ── DPI ─────────────────────────────────────────────────────────────────

    /// The host window's scale factor, or the cached process default while detached.
    pub fn scale_factor(&self, id: ViewId) -> PlatformResult<f32> {
        self.node(id)?;
        Ok(match self.window(id) {
            Some(window) => window.scale_factor(),
            None => self.scale.default_scale_factor(),
        })
    }

    // ── Painting ────────────────────────────────────────────────────────────

    /// Schedules a repaint of `dirty` (view-local pixels), or of the whole view
    /// when `dirty` is `None` or empty. Nothing is drawn synchronously.
    pub fn invalidate(&self, id: ViewId, dirty: Option<Rect>) -> PlatformResult<()> {
        let node = self.node(id)?;
        if !node.is_visible {
            debug!("ViewTree: invalidate on hidden {id:?} ignored");
            return Ok(());
        }
        let Some(window) = self.window(id) else {
            debug!("ViewTree: invalidate on detached {id:?} ignored");
            return Ok(());
        };
        let Some(view_rect) = self.window_pixel_bounds(id) else {
            return Ok(());
        };
        let target = match dirty.filter(|d| !d.is_empty()) {
            Some(d) => d
                .offset(Vector2d::new(view_rect.x, view_rect.y))
                .intersect(&view_rect),
            None => view_rect,
        };
        if target.is_empty() {
            return Ok(());
        }
        window.schedule_repaint(target);
        Ok(())
    }

    /// Runs only this view's `Drawable`.
    pub fn draw(&self, id: ViewId, painter: &mut Painter<'_>, dirty: Rect) -> PlatformResult<()> {
        let node = self.node(id)?;
        node.drawable.draw(&node.info(id), painter, dirty);
        Ok(())
    }

    /// Draws `id` and then every visible child that intersects `dirty`, each
    /// in its own saved state translated and clipped to the child's bounds.
    pub fn paint_subtree(&self, id: ViewId, painter: &mut Painter<'_>, dirty: Rect) -> PlatformResult<()> {
        let node = self.node(id)?;
        node.drawable.draw(&node.info(id), painter, dirty);
        for child_id in &node.children {
            let child = self.node(*child_id)?;
            if !child.is_visible || !child.bounds.intersects(&dirty) {
                continue;
            }
            let offset = Vector2d::new(child.bounds.x, child.bounds.y);
            let child_dirty = dirty
                .intersect(&child.bounds)
                .offset(Vector2d::new(-offset.x, -offset.y));
            let mut guard = painter.save_guard();
            guard.translate_pixel(offset);
            guard.clip_pixel_rect(Rect::from_size(child.bounds.size()), CombineMode::Intersect);
            self.paint_subtree(*child_id, &mut guard, child_dirty)?;
        }
        Ok(())
    }

    /// One repaint pass: builds a painter over `backend` at the view's scale,
    /// clips to `dirty` (window pixels) and paints the content view's subtree.
    pub fn paint_window(
        &self,
        content_view: ViewId,
        backend: &mut dyn PaintBackend,
        theme: Option<&dyn NativeTheme>,
        dirty: Rect,
    ) -> PlatformResult<()> {
        let scale = self.scale_factor(content_view)?;
        let bounds = self
            .window_pixel_bounds(content_view)
            .ok_or_else(|| PlatformError::InvalidHandle(format!("ViewTree: unknown {content_view:?}")))?;
        if !self.is_visible(content_view) || !bounds.intersects(&dirty) {
            return Ok(());
        }
        let mut painter = Painter::new(backend, scale)?;
        if let Some(theme) = theme {
            painter = painter.with_theme(theme);
        }
        painter.clip_pixel_rect(dirty, CombineMode::Intersect);
        painter.translate_pixel(Vector2d::new(bounds.x, bounds.y));
        let local_dirty = dirty
            .intersect(&bounds)
            .offset(Vector2d::new(-bounds.x, -bounds.y));
        self.paint_subtree(content_view, &mut painter, local_dirty)
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn node(&self, id: ViewId) -> PlatformResult<&ViewNode> {
        self.nodes
            .get(&id)
            .ok_or_else(|| PlatformError::InvalidHandle(format!("ViewTree: unknown {id:?}")))
    }

    fn node_mut(&mut self, id: ViewId) -> PlatformResult<&mut ViewNode> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| PlatformError::InvalidHandle(format!("ViewTree: unknown {id:?}")))
    }

    fn is_ancestor(&self, ancestor: ViewId, of: ViewId) -> bool {
        let mut cursor = self.parent(of);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    fn detach_from_parent(&mut self, id: ViewId) {
        let Some(parent_id) = self.parent(id) else {
            return;
        };
        match self.nodes.get_mut(&parent_id) {
            Some(parent) => parent.children.retain(|c| *c != id),
            None => warn!("ViewTree: {id:?} pointed at missing parent {parent_id:?}"),
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
        }
    }

    fn propagate_window(&mut self, root: ViewId, window: Option<Weak<dyn WindowHost>>) {
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.window = window.clone();
                pending.extend(node.children.iter().copied());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector2dF;
    use crate::painter::{DeviceHandle, DrawOp, SoftwareBackend};
    use crate::theme::{ExtraParams, ThemePart};
    use crate::styling_primitives::Color;
    use std::cell::RefCell;

    struct MockWindow {
        scale: f32,
        repaints: RefCell<Vec<Rect>>,
    }

    impl MockWindow {
        fn new(scale: f32) -> Rc<Self> {
            Rc::new(Self {
                scale,
                repaints: RefCell::new(Vec::new()),
            })
        }
    }

    impl WindowHost for MockWindow {
        fn scale_factor(&self) -> f32 {
            self.scale
        }

        fn schedule_repaint(&self, pixel_dirty: Rect) {
            self.repaints.borrow_mut().push(pixel_dirty);
        }
    }

    struct Fill(Color);

    impl Drawable for Fill {
        fn draw(&self, _view: &ViewInfo, painter: &mut Painter<'_>, dirty: Rect) {
            painter.set_color(self.0);
            painter.fill_pixel_rect(dirty);
        }
    }

    struct Checkbox;

    impl Drawable for Checkbox {
        fn draw(&self, view: &ViewInfo, painter: &mut Painter<'_>, _dirty: Rect) {
            painter.draw_native_theme_pixel(
                ThemePart::Checkbox,
                view.state,
                view.local_pixel_rect(),
                &ExtraParams::None,
            );
        }
    }

    #[derive(Default)]
    struct RecordingTheme {
        parts: RefCell<Vec<(ThemePart, ControlState, Rect)>>,
    }

    impl NativeTheme for RecordingTheme {
        fn paint(
            &self,
            part: ThemePart,
            _device: DeviceHandle,
            state: ControlState,
            rect: Rect,
            _extra: &ExtraParams,
        ) {
            self.parts.borrow_mut().push((part, state, rect));
        }

        fn paint_focus_rect(&self, _device: DeviceHandle, _rect: Rect) {}
    }

    fn tree() -> ViewTree {
        ViewTree::new(Arc::new(ScaleService::fixed(1.25)))
    }

    fn host(window: &Rc<MockWindow>) -> Rc<dyn WindowHost> {
        window.clone()
    }

    #[test]
    fn detached_view_uses_default_scale() {
        let mut views = tree();
        let id = views.create_view(true, Box::new(Container));
        assert_eq!(views.scale_factor(id).unwrap(), 1.25);
        views.set_bounds(id, RectF::new(0.0, 0.0, 8.0, 8.0)).unwrap();
        assert_eq!(views.pixel_bounds(id), Some(Rect::new(0, 0, 10, 10)));
    }

    #[test]
    fn logical_bounds_follow_window_scale() {
        let mut views = tree();
        let window = MockWindow::new(2.0);
        let root = views.create_view(false, Box::new(Container));
        views.become_content_view(root, &host(&window)).unwrap();
        assert!(views.is_content_view(root));

        views.set_bounds(root, RectF::new(1.0, 2.0, 30.0, 40.0)).unwrap();
        assert_eq!(views.pixel_bounds(root), Some(Rect::new(2, 4, 60, 80)));
        assert_eq!(views.bounds(root), Some(RectF::new(1.0, 2.0, 30.0, 40.0)));
    }

    #[test]
    fn flags_state_and_preferred_size_are_stored_per_view() {
        let mut views = tree();
        let native = views.create_view(false, Box::new(Container));
        let drawn = views.create_view(true, Box::new(Container));
        assert!(!views.is_virtual(native));
        assert!(views.is_virtual(drawn));
        assert_eq!(views.state(drawn), Some(ControlState::Normal));

        views.set_state(drawn, ControlState::Pressed).unwrap();
        views
            .set_pixel_preferred_size(drawn, Size::new(80, 24))
            .unwrap();
        assert_eq!(views.state(drawn), Some(ControlState::Pressed));
        assert_eq!(views.state(native), Some(ControlState::Normal));
        assert_eq!(views.pixel_preferred_size(drawn), Some(Size::new(80, 24)));
        assert_eq!(views.pixel_preferred_size(native), Some(Size::default()));
    }

    #[test]
    fn set_parent_propagates_window_to_subtree() {
        let mut views = tree();
        let window = MockWindow::new(1.5);
        let root = views.create_view(false, Box::new(Container));
        let mid = views.create_view(true, Box::new(Container));
        let leaf = views.create_view(true, Box::new(Container));
        views.set_parent(leaf, Some(mid)).unwrap();
        assert!(views.window(leaf).is_none());

        views.become_content_view(root, &host(&window)).unwrap();
        views.set_parent(mid, Some(root)).unwrap();
        assert_eq!(views.scale_factor(leaf).unwrap(), 1.5);
        assert_eq!(views.children(root), &[mid]);

        views.set_parent(mid, None).unwrap();
        assert!(views.window(leaf).is_none());
        assert_eq!(views.scale_factor(leaf).unwrap(), 1.25);
        assert!(views.children(root).is_empty());
    }

    #[test]
    fn content_view_loses_flag_when_reparented() {
        let mut views = tree();
        let window = MockWindow::new(1.0);
        let a = views.create_view(false, Box::new(Container));
        let b = views.create_view(false, Box::new(Container));
        views.become_content_view(a, &host(&window)).unwrap();
        views.set_parent(a, Some(b)).unwrap();
        assert!(!views.is_content_view(a));
        assert!(views.window(a).is_none());
    }

    #[test]
    fn set_parent_rejects_cycles() {
        let mut views = tree();
        let a = views.create_view(true, Box::new(Container));
        let b = views.create_view(true, Box::new(Container));
        views.set_parent(b, Some(a)).unwrap();
        assert!(views.set_parent(a, Some(b)).is_err());
        assert!(views.set_parent(a, Some(a)).is_err());
        assert_eq!(views.parent(b), Some(a));
    }

    #[test]
    fn window_origin_accumulates_through_ancestors() {
        let mut views = tree();
        let root = views.create_view(false, Box::new(Container));
        let child = views.create_view(true, Box::new(Container));
        let grandchild = views.create_view(true, Box::new(Container));
        views.set_parent(child, Some(root)).unwrap();
        views.set_parent(grandchild, Some(child)).unwrap();
        views.set_pixel_bounds(root, Rect::new(0, 0, 200, 200)).unwrap();
        views.set_pixel_bounds(child, Rect::new(10, 20, 100, 100)).unwrap();
        views.set_pixel_bounds(grandchild, Rect::new(5, 5, 10, 10)).unwrap();
        assert_eq!(views.window_pixel_origin(grandchild), Some(Point::new(15, 25)));
        assert_eq!(views.window_pixel_bounds(grandchild), Some(Rect::new(15, 25, 10, 10)));
    }

    #[test]
    fn invalidate_schedules_window_relative_repaint() {
        let mut views = tree();
        let window = MockWindow::new(1.0);
        let root = views.create_view(false, Box::new(Container));
        let child = views.create_view(true, Box::new(Container));
        views.become_content_view(root, &host(&window)).unwrap();
        views.set_parent(child, Some(root)).unwrap();
        views.set_pixel_bounds(root, Rect::new(0, 0, 100, 100)).unwrap();
        views.set_pixel_bounds(child, Rect::new(10, 10, 20, 20)).unwrap();

        views.invalidate(child, None).unwrap();
        views.invalidate(child, Some(Rect::new(15, 15, 10, 10))).unwrap();
        views.invalidate(child, Some(Rect::default())).unwrap();

        assert_eq!(
            window.repaints.borrow().as_slice(),
            &[
                Rect::new(10, 10, 20, 20),
                Rect::from_ltrb(25, 25, 30, 30),
                Rect::new(10, 10, 20, 20),
            ]
        );
    }

    #[test]
    fn invalidate_is_a_no_op_when_detached_or_hidden() {
        let mut views = tree();
        let window = MockWindow::new(1.0);
        let detached = views.create_view(true, Box::new(Container));
        views.invalidate(detached, None).unwrap();

        let root = views.create_view(false, Box::new(Container));
        views.set_pixel_bounds(root, Rect::new(0, 0, 10, 10)).unwrap();
        views.become_content_view(root, &host(&window)).unwrap();
        views.set_visible(root, false).unwrap();
        views.invalidate(root, None).unwrap();
        assert!(window.repaints.borrow().is_empty());
    }

    #[test]
    fn dropped_window_detaches_views() {
        let mut views = tree();
        let root = views.create_view(false, Box::new(Container));
        {
            let window = MockWindow::new(3.0);
            views.become_content_view(root, &host(&window)).unwrap();
            assert_eq!(views.scale_factor(root).unwrap(), 3.0);
        }
        assert_eq!(views.scale_factor(root).unwrap(), 1.25);
    }

    #[test]
    fn remove_view_drops_subtree() {
        let mut views = tree();
        let root = views.create_view(false, Box::new(Container));
        let child = views.create_view(true, Box::new(Container));
        let grandchild = views.create_view(true, Box::new(Container));
        views.set_parent(child, Some(root)).unwrap();
        views.set_parent(grandchild, Some(child)).unwrap();
        views.remove_view(child).unwrap();
        assert!(!views.contains(grandchild));
        assert!(views.children(root).is_empty());
        assert_eq!(views.len(), 1);
        assert!(views.set_pixel_bounds(child, Rect::default()).is_err());
    }

    #[test]
    fn drawables_see_their_view_state() {
        let mut views = tree();
        let window = MockWindow::new(1.0);
        let theme = RecordingTheme::default();
        let root = views.create_view(false, Box::new(Container));
        let check = views.create_view(true, Box::new(Checkbox));
        views.become_content_view(root, &host(&window)).unwrap();
        views.set_parent(check, Some(root)).unwrap();
        views.set_pixel_bounds(root, Rect::new(0, 0, 100, 100)).unwrap();
        views.set_pixel_bounds(check, Rect::new(30, 40, 13, 13)).unwrap();
        views.set_state(check, ControlState::Pressed).unwrap();

        let mut backend = SoftwareBackend::new(Size::new(100, 100));
        views
            .paint_window(root, &mut backend, Some(&theme), Rect::new(0, 0, 100, 100))
            .unwrap();
        views.set_state(check, ControlState::Disabled).unwrap();
        views
            .paint_window(root, &mut backend, Some(&theme), Rect::new(0, 0, 100, 100))
            .unwrap();

        assert_eq!(
            theme.parts.borrow().as_slice(),
            &[
                (ThemePart::Checkbox, ControlState::Pressed, Rect::new(30, 40, 13, 13)),
                (ThemePart::Checkbox, ControlState::Disabled, Rect::new(30, 40, 13, 13)),
            ]
        );
        assert!(!backend.is_device_acquired());
    }

    #[test]
    fn paint_window_translates_and_clips_children() {
        let mut views = tree();
        let window = MockWindow::new(1.0);
        let root = views.create_view(false, Box::new(Fill(Color::WHITE)));
        let child = views.create_view(true, Box::new(Fill(Color::BLACK)));
        let hidden = views.create_view(true, Box::new(Fill(Color::rgb(1, 1, 1))));
        views.become_content_view(root, &host(&window)).unwrap();
        views.set_parent(child, Some(root)).unwrap();
        views.set_parent(hidden, Some(root)).unwrap();
        views.set_pixel_bounds(root, Rect::new(0, 0, 100, 100)).unwrap();
        views.set_pixel_bounds(child, Rect::new(10, 10, 20, 20)).unwrap();
        views.set_pixel_bounds(hidden, Rect::new(0, 0, 50, 50)).unwrap();
        views.set_visible(hidden, false).unwrap();

        let mut backend = SoftwareBackend::new(Size::new(100, 100));
        views
            .paint_window(root, &mut backend, None, Rect::new(0, 0, 25, 25))
            .unwrap();

        assert_eq!(
            backend.ops(),
            &[
                DrawOp::FillRect {
                    rect: Rect::new(0, 0, 25, 25),
                    color: Color::WHITE,
                },
                DrawOp::FillRect {
                    rect: Rect::new(10, 10, 15, 15),
                    color: Color::BLACK,
                },
            ]
        );
        // The child's save/restore is balanced and the pass-level clip remains.
        assert_eq!(backend.checkpoint_depth(), 0);
        assert_eq!(backend.clip_box(), Some(Rect::new(0, 0, 25, 25)));
    }

    #[test]
    fn draw_runs_only_the_views_own_drawable() {
        let mut views = tree();
        let root = views.create_view(true, Box::new(Fill(Color::WHITE)));
        let child = views.create_view(true, Box::new(Fill(Color::BLACK)));
        views.set_parent(child, Some(root)).unwrap();
        views.set_pixel_bounds(child, Rect::new(0, 0, 5, 5)).unwrap();

        let mut backend = SoftwareBackend::new(Size::new(50, 50));
        {
            let mut painter = Painter::new(&mut backend, 1.0).unwrap();
            painter.translate(Vector2dF::new(2.0, 2.0));
            views.draw(root, &mut painter, Rect::new(0, 0, 5, 5)).unwrap();
        }
        assert_eq!(backend.ops().len(), 1);
        assert_eq!(backend.ops()[0].rect(), Rect::new(2, 2, 5, 5));
    }
}
