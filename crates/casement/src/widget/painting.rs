//! Frame rendering and repaint management for widgets.
//!
//! This module provides the infrastructure for painting widget trees:
//!
//! - [`RepaintManager`]: Tracks widgets that need repainting and coalesces updates
//! - [`FrameRenderer`]: Paints the widget tree in correct order (parent-before-children)
//!
//! # Paint Event Flow
//!
//! 1. Widgets call `update()` or `update_rect()` to schedule repaints
//! 2. `RepaintManager` collects all pending updates
//! 3. At frame time, the window calls [`FrameRenderer::render_frame`] (or the
//!    region variant when only part of the window is damaged)
//! 4. Widgets are painted in depth-first preorder (parents before children)
//! 5. Damaged regions fully covered by an opaque child skip the parent paint
//!
//! # Example
//!
//! ```ignore
//! use casement::widget::{FrameRenderer, RepaintManager};
//!
//! // During event processing, widgets call update()
//! button.update();
//! label.update_rect(text_bounds);
//!
//! // At frame time, render all widgets that need painting
//! FrameRenderer::render_frame(&mut store, root_id, painter);
//! ```

use std::collections::HashMap;

use casement_core::ObjectId;

use crate::geometry::{Point, Rect};
use crate::paint::{PaintContext, Painter};

use super::WidgetAccess;
use super::events::{PaintEvent, WidgetEvent};

/// Manages repaint requests and coalesces updates.
///
/// Tracks which widgets need repainting and their dirty regions. Multiple
/// `update()` calls on the same widget between frames are coalesced into a
/// single entry with a combined dirty region.
///
/// ```ignore
/// let mut repaints = RepaintManager::new();
///
/// // Mark widgets as needing repaint
/// repaints.mark_dirty(widget_id, dirty_rect);
///
/// // At frame time, render the union of the damage, then clear
/// if let Some(region) = repaints.combined_region() {
///     FrameRenderer::render_frame_region(&mut store, root_id, painter, region);
/// }
/// repaints.clear();
/// ```
#[derive(Debug, Default)]
pub struct RepaintManager {
    /// Widgets that need repainting, with their dirty regions.
    /// The region is in window coordinates.
    pending: HashMap<ObjectId, Rect>,

    /// Whether a full window repaint is needed.
    full_repaint: bool,
}

impl RepaintManager {
    /// Create a new repaint manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a widget as needing repaint.
    ///
    /// # Arguments
    ///
    /// * `id` - The widget's ObjectId.
    /// * `window_rect` - The dirty region in window coordinates.
    pub fn mark_dirty(&mut self, id: ObjectId, window_rect: Rect) {
        if window_rect.is_empty() {
            return;
        }

        self.pending
            .entry(id)
            .and_modify(|existing| *existing = existing.union(&window_rect))
            .or_insert(window_rect);
    }

    /// Mark that a full repaint is needed.
    ///
    /// Typically called when the window is resized or first shown.
    pub fn invalidate_all(&mut self) {
        self.full_repaint = true;
    }

    /// Check if any widgets need repainting.
    pub fn has_pending(&self) -> bool {
        self.full_repaint || !self.pending.is_empty()
    }

    /// Check if a full repaint is needed.
    pub fn needs_full_repaint(&self) -> bool {
        self.full_repaint
    }

    /// Get the pending repaints.
    ///
    /// Returns an iterator over (widget_id, dirty_region) pairs.
    pub fn pending_repaints(&self) -> impl Iterator<Item = (ObjectId, Rect)> + '_ {
        self.pending.iter().map(|(&id, &rect)| (id, rect))
    }

    /// Get the number of pending repaints.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Union of all pending dirty regions, in window coordinates.
    ///
    /// Returns `None` when nothing is pending. A full repaint has no single
    /// region; callers should check [`needs_full_repaint`](Self::needs_full_repaint)
    /// first.
    pub fn combined_region(&self) -> Option<Rect> {
        self.pending
            .values()
            .copied()
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// Clear all pending repaints.
    ///
    /// Call this after rendering the frame.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.full_repaint = false;
    }
}

/// Result of rendering a frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    /// Number of widgets painted.
    pub widgets_painted: u32,
    /// Number of widgets skipped (not visible or no damage).
    pub widgets_skipped: u32,
    /// Number of parent paints skipped because opaque children fully
    /// covered the damaged region.
    pub opaque_optimizations: u32,
}

/// Renders widget trees with proper paint order and dirty region handling.
///
/// The `FrameRenderer` handles:
/// - Painting widgets in depth-first preorder (parents before children)
/// - Clipping to dirty regions
/// - Skipping parent paints covered by opaque children
/// - Coordinate transformations for child widgets
///
/// ```ignore
/// // Render all widgets flagged by update()
/// let stats = FrameRenderer::render_frame(&mut store, root_id, painter);
/// tracing::trace!(painted = stats.widgets_painted, "frame done");
/// ```
pub struct FrameRenderer;

impl FrameRenderer {
    /// Render a frame by painting all widgets that need updating.
    ///
    /// Walks the widget tree from `root_id` in depth-first preorder (parents
    /// before children). Only widgets with `needs_repaint()` set are painted;
    /// the surface is assumed to retain the previous frame elsewhere.
    ///
    /// # Arguments
    ///
    /// * `storage` - Widget storage implementing `WidgetAccess`.
    /// * `root_id` - The root widget to start painting from.
    /// * `painter` - The paint backend supplied by the embedding.
    ///
    /// # Returns
    ///
    /// Statistics about the frame rendering.
    pub fn render_frame<S: WidgetAccess>(
        storage: &mut S,
        root_id: ObjectId,
        painter: &mut dyn Painter,
    ) -> FrameStats {
        Self::render_frame_with_focus(storage, root_id, painter, None)
    }

    /// Render a frame with the focused widget highlighted.
    ///
    /// Same as [`render_frame`](Self::render_frame), but the widget whose ID
    /// matches `focused` paints with its focus indicator enabled. Pass the
    /// focus manager's current widget when the window is active, `None` when
    /// it is not.
    pub fn render_frame_with_focus<S: WidgetAccess>(
        storage: &mut S,
        root_id: ObjectId,
        painter: &mut dyn Painter,
        focused: Option<ObjectId>,
    ) -> FrameStats {
        let mut stats = FrameStats::default();
        Self::paint_widget(storage, root_id, painter, Point::ZERO, focused, &mut stats);
        stats
    }

    /// Render a frame with a specific dirty region.
    ///
    /// Every visible widget intersecting `dirty_region` is painted, whether
    /// or not its repaint flag is set. Use this after the surface contents
    /// were lost (expose, resize) or when replaying coalesced damage from
    /// [`RepaintManager::combined_region`].
    ///
    /// # Arguments
    ///
    /// * `storage` - Widget storage implementing `WidgetAccess`.
    /// * `root_id` - The root widget to start painting from.
    /// * `painter` - The paint backend supplied by the embedding.
    /// * `dirty_region` - The region that needs repainting (in window coordinates).
    pub fn render_frame_region<S: WidgetAccess>(
        storage: &mut S,
        root_id: ObjectId,
        painter: &mut dyn Painter,
        dirty_region: Rect,
    ) -> FrameStats {
        Self::render_frame_region_with_focus(storage, root_id, painter, dirty_region, None)
    }

    /// Render a dirty region with the focused widget highlighted.
    pub fn render_frame_region_with_focus<S: WidgetAccess>(
        storage: &mut S,
        root_id: ObjectId,
        painter: &mut dyn Painter,
        dirty_region: Rect,
        focused: Option<ObjectId>,
    ) -> FrameStats {
        let mut stats = FrameStats::default();

        painter.save();
        painter.clip_rect(dirty_region);

        Self::paint_widget_with_clip(
            storage,
            root_id,
            painter,
            Point::ZERO,
            &dirty_region,
            focused,
            &mut stats,
        );

        painter.restore();

        stats
    }

    /// Paint a single widget and its subtree.
    fn paint_widget<S: WidgetAccess>(
        storage: &mut S,
        widget_id: ObjectId,
        painter: &mut dyn Painter,
        parent_offset: Point,
        focused: Option<ObjectId>,
        stats: &mut FrameStats,
    ) {
        let (geometry, needs_paint, is_visible) = {
            let Some(widget) = storage.get_widget(widget_id) else {
                return;
            };
            (widget.geometry(), widget.needs_repaint(), widget.is_visible())
        };

        // A hidden widget hides its whole subtree.
        if !is_visible {
            stats.widgets_skipped += 1;
            return;
        }

        let window_pos = Point::new(
            parent_offset.x + geometry.origin.x,
            parent_offset.y + geometry.origin.y,
        );
        let local_rect = Rect::new(0.0, 0.0, geometry.size.width, geometry.size.height);

        if needs_paint {
            painter.save();
            painter.translate(window_pos.x, window_pos.y);

            {
                let Some(widget) = storage.get_widget_mut(widget_id) else {
                    painter.restore();
                    return;
                };

                let mut paint_event = WidgetEvent::Paint(PaintEvent::full(geometry.size));
                let _ = widget.event(&mut paint_event);

                let mut ctx = PaintContext::new(painter, local_rect)
                    .with_show_focus(focused == Some(widget_id));
                widget.paint(&mut ctx);

                widget.widget_base_mut().clear_repaint_flag();
            }

            painter.restore();
            stats.widgets_painted += 1;
        } else {
            stats.widgets_skipped += 1;
        }

        let children = storage.get_children(widget_id);
        for child_id in children {
            Self::paint_widget(storage, child_id, painter, window_pos, focused, stats);
        }
    }

    /// Paint a widget with dirty region clipping.
    fn paint_widget_with_clip<S: WidgetAccess>(
        storage: &mut S,
        widget_id: ObjectId,
        painter: &mut dyn Painter,
        parent_offset: Point,
        dirty_region: &Rect,
        focused: Option<ObjectId>,
        stats: &mut FrameStats,
    ) {
        let (geometry, is_visible) = {
            let Some(widget) = storage.get_widget(widget_id) else {
                return;
            };
            (widget.geometry(), widget.is_visible())
        };

        if !is_visible {
            stats.widgets_skipped += 1;
            return;
        }

        let window_pos = Point::new(
            parent_offset.x + geometry.origin.x,
            parent_offset.y + geometry.origin.y,
        );
        let window_rect = Rect::new(
            window_pos.x,
            window_pos.y,
            geometry.size.width,
            geometry.size.height,
        );

        // Widgets outside the damage are skipped along with their subtrees;
        // children never extend past the parent rect in window coordinates.
        let Some(intersect) = window_rect.intersect(dirty_region) else {
            stats.widgets_skipped += 1;
            return;
        };

        // When opaque children fully cover the damaged part of this widget,
        // painting it would be invisible work.
        if Self::covered_by_opaque_children(storage, widget_id, window_pos, &intersect) {
            stats.opaque_optimizations += 1;
        } else {
            let local_rect = Rect::new(0.0, 0.0, geometry.size.width, geometry.size.height);
            let local_dirty = Rect::new(
                intersect.origin.x - window_pos.x,
                intersect.origin.y - window_pos.y,
                intersect.size.width,
                intersect.size.height,
            );

            painter.save();
            painter.translate(window_pos.x, window_pos.y);
            painter.clip_rect(local_dirty);

            {
                let Some(widget) = storage.get_widget_mut(widget_id) else {
                    painter.restore();
                    return;
                };

                let mut paint_event = WidgetEvent::Paint(PaintEvent::new(local_dirty));
                let _ = widget.event(&mut paint_event);

                let mut ctx = PaintContext::new(painter, local_rect)
                    .with_show_focus(focused == Some(widget_id));
                widget.paint(&mut ctx);

                widget.widget_base_mut().clear_repaint_flag();
            }

            painter.restore();
            stats.widgets_painted += 1;
        }

        let children = storage.get_children(widget_id);
        for child_id in children {
            Self::paint_widget_with_clip(
                storage,
                child_id,
                painter,
                window_pos,
                dirty_region,
                focused,
                stats,
            );
        }
    }

    /// Check whether visible opaque children fully cover a damaged region.
    ///
    /// `window_pos` is the parent's origin in window coordinates; `region`
    /// is the damaged rect in window coordinates.
    fn covered_by_opaque_children<S: WidgetAccess>(
        storage: &S,
        widget_id: ObjectId,
        window_pos: Point,
        region: &Rect,
    ) -> bool {
        let children = storage.get_children(widget_id);

        let opaque_rects: Vec<Rect> = children
            .iter()
            .filter_map(|&child_id| {
                let widget = storage.get_widget(child_id)?;
                if widget.is_opaque() && widget.is_visible() {
                    Some(widget.geometry().offset(window_pos.x, window_pos.y))
                } else {
                    None
                }
            })
            .collect();

        if opaque_rects.is_empty() {
            return false;
        }

        Self::subtract_rects(*region, &opaque_rects).is_empty()
    }

    /// Simple rect subtraction. Returns regions of `rect` not covered by `subtract`.
    ///
    /// Only full coverage by a single rect is detected; partial overlaps
    /// return the original rect and the caller paints conservatively.
    fn subtract_rects(rect: Rect, subtract: &[Rect]) -> Vec<Rect> {
        for sub in subtract {
            if sub.origin.x <= rect.origin.x
                && sub.origin.y <= rect.origin.y
                && sub.right() >= rect.right()
                && sub.bottom() >= rect.bottom()
            {
                return vec![];
            }
        }

        vec![rect]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use casement_core::{Object, init_global_registry};

    use crate::geometry::Color;
    use crate::paint::{Stroke, TextAlign};
    use crate::widget::{SizeHint, Widget, WidgetBase, WidgetStore};

    use super::*;

    fn setup() {
        init_global_registry();
    }

    /// Create a test ObjectId without going through the registry.
    fn test_object_id(n: u64) -> ObjectId {
        ObjectId::from_raw((1_u64 << 32) | n).expect("valid test id")
    }

    /// Painter that ignores every drawing call.
    struct NullPainter;

    impl Painter for NullPainter {
        fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
        fn stroke_rect(&mut self, _rect: Rect, _stroke: &Stroke) {}
        fn draw_text(&mut self, _text: &str, _rect: Rect, _color: Color, _align: TextAlign) {}
        fn draw_image(&mut self, _rect: Rect, _width: u32, _height: u32, _pixels: &[u8]) {}
        fn save(&mut self) {}
        fn restore(&mut self) {}
        fn translate(&mut self, _dx: f32, _dy: f32) {}
        fn clip_rect(&mut self, _rect: Rect) {}
    }

    /// Widget that records its name when painted.
    struct ProbeWidget {
        base: WidgetBase,
        painted: Arc<Mutex<Vec<String>>>,
    }

    impl ProbeWidget {
        fn new(name: &str, rect: Rect, painted: Arc<Mutex<Vec<String>>>) -> Self {
            let mut widget = Self {
                base: WidgetBase::new::<Self>(),
                painted,
            };
            widget.base.set_name(name);
            widget.base.set_geometry(rect);
            widget
        }
    }

    impl Object for ProbeWidget {
        fn object_id(&self) -> ObjectId {
            self.base.object_id()
        }
    }

    impl Widget for ProbeWidget {
        fn widget_base(&self) -> &WidgetBase {
            &self.base
        }

        fn widget_base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }

        fn size_hint(&self) -> SizeHint {
            SizeHint::from_dimensions(50.0, 50.0)
        }

        fn paint(&self, _ctx: &mut PaintContext<'_>) {
            self.painted.lock().unwrap().push(self.base.name());
        }
    }

    struct Fixture {
        store: WidgetStore,
        root_id: ObjectId,
        child_a: ObjectId,
        child_b: ObjectId,
        log: Arc<Mutex<Vec<String>>>,
    }

    fn build_tree() -> Fixture {
        setup();
        let log = Arc::new(Mutex::new(Vec::new()));

        let root = ProbeWidget::new("root", Rect::new(0.0, 0.0, 200.0, 200.0), log.clone());
        let child_a = ProbeWidget::new("a", Rect::new(10.0, 10.0, 50.0, 50.0), log.clone());
        let child_b = ProbeWidget::new("b", Rect::new(70.0, 10.0, 50.0, 50.0), log.clone());

        let root_id = root.object_id();
        let a_id = child_a.object_id();
        let b_id = child_b.object_id();

        child_a.widget_base().set_parent(Some(root_id)).unwrap();
        child_b.widget_base().set_parent(Some(root_id)).unwrap();

        let mut store = WidgetStore::new();
        store.add(root);
        store.add(child_a);
        store.add(child_b);

        Fixture {
            store,
            root_id,
            child_a: a_id,
            child_b: b_id,
            log,
        }
    }

    #[test]
    fn test_repaint_manager_empty() {
        let mgr = RepaintManager::new();
        assert!(!mgr.has_pending());
        assert_eq!(mgr.pending_count(), 0);
        assert_eq!(mgr.combined_region(), None);
    }

    #[test]
    fn test_repaint_manager_mark_dirty() {
        let mut mgr = RepaintManager::new();
        mgr.mark_dirty(test_object_id(1), Rect::new(0.0, 0.0, 100.0, 50.0));

        assert!(mgr.has_pending());
        assert_eq!(mgr.pending_count(), 1);
    }

    #[test]
    fn test_repaint_manager_coalesce() {
        let mut mgr = RepaintManager::new();
        let id = test_object_id(1);

        mgr.mark_dirty(id, Rect::new(0.0, 0.0, 50.0, 50.0));
        mgr.mark_dirty(id, Rect::new(25.0, 25.0, 50.0, 50.0));

        assert_eq!(mgr.pending_count(), 1);

        let (_, region) = mgr.pending_repaints().next().unwrap();
        assert_eq!(region, Rect::new(0.0, 0.0, 75.0, 75.0));
    }

    #[test]
    fn test_repaint_manager_combined_region() {
        let mut mgr = RepaintManager::new();
        mgr.mark_dirty(test_object_id(1), Rect::new(0.0, 0.0, 20.0, 20.0));
        mgr.mark_dirty(test_object_id(2), Rect::new(80.0, 80.0, 20.0, 20.0));

        assert_eq!(mgr.combined_region(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn test_repaint_manager_clear() {
        let mut mgr = RepaintManager::new();
        mgr.mark_dirty(test_object_id(1), Rect::new(0.0, 0.0, 100.0, 50.0));
        mgr.invalidate_all();

        assert!(mgr.needs_full_repaint());

        mgr.clear();

        assert!(!mgr.has_pending());
        assert!(!mgr.needs_full_repaint());
    }

    #[test]
    fn test_repaint_manager_skip_empty() {
        let mut mgr = RepaintManager::new();
        let id = test_object_id(1);

        mgr.mark_dirty(id, Rect::new(0.0, 0.0, 0.0, 50.0)); // zero width
        mgr.mark_dirty(id, Rect::new(0.0, 0.0, 50.0, 0.0)); // zero height

        assert!(!mgr.has_pending());
    }

    #[test]
    fn test_subtract_rects_full_coverage() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let subtract = vec![Rect::new(-10.0, -10.0, 200.0, 200.0)];

        assert!(FrameRenderer::subtract_rects(rect, &subtract).is_empty());
    }

    #[test]
    fn test_subtract_rects_no_coverage() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let subtract = vec![Rect::new(200.0, 200.0, 50.0, 50.0)];

        let result = FrameRenderer::subtract_rects(rect, &subtract);
        assert_eq!(result, vec![rect]);
    }

    #[test]
    fn test_paint_order_parents_before_children() {
        let mut fx = build_tree();

        let stats = FrameRenderer::render_frame(&mut fx.store, fx.root_id, &mut NullPainter);

        assert_eq!(stats.widgets_painted, 3);
        assert_eq!(fx.log.lock().unwrap().as_slice(), &["root", "a", "b"]);
    }

    #[test]
    fn test_render_frame_respects_repaint_flags() {
        let mut fx = build_tree();

        FrameRenderer::render_frame(&mut fx.store, fx.root_id, &mut NullPainter);
        fx.log.lock().unwrap().clear();

        // Nothing dirty: nothing painted.
        let stats = FrameRenderer::render_frame(&mut fx.store, fx.root_id, &mut NullPainter);
        assert_eq!(stats.widgets_painted, 0);
        assert_eq!(stats.widgets_skipped, 3);

        // One update repaints just that widget.
        fx.store
            .get_widget_mut(fx.child_b)
            .unwrap()
            .widget_base_mut()
            .update();
        let stats = FrameRenderer::render_frame(&mut fx.store, fx.root_id, &mut NullPainter);
        assert_eq!(stats.widgets_painted, 1);
        assert_eq!(fx.log.lock().unwrap().as_slice(), &["b"]);
    }

    #[test]
    fn test_hidden_subtree_not_painted() {
        let mut fx = build_tree();

        fx.store
            .get_widget_mut(fx.child_a)
            .unwrap()
            .set_visible(false);

        let stats = FrameRenderer::render_frame(&mut fx.store, fx.root_id, &mut NullPainter);

        assert_eq!(stats.widgets_painted, 2);
        assert_eq!(fx.log.lock().unwrap().as_slice(), &["root", "b"]);
    }

    #[test]
    fn test_region_render_skips_widgets_outside_damage() {
        let mut fx = build_tree();

        // Damage only overlaps child a.
        let stats = FrameRenderer::render_frame_region(
            &mut fx.store,
            fx.root_id,
            &mut NullPainter,
            Rect::new(10.0, 10.0, 30.0, 30.0),
        );

        assert_eq!(stats.widgets_painted, 2);
        assert_eq!(fx.log.lock().unwrap().as_slice(), &["root", "a"]);
    }

    #[test]
    fn test_opaque_child_covers_parent_damage() {
        let mut fx = build_tree();

        fx.store
            .get_widget_mut(fx.child_a)
            .unwrap()
            .set_opaque(true);

        // Damage entirely inside the opaque child: the root paint is skipped.
        let stats = FrameRenderer::render_frame_region(
            &mut fx.store,
            fx.root_id,
            &mut NullPainter,
            Rect::new(20.0, 20.0, 10.0, 10.0),
        );

        assert_eq!(stats.opaque_optimizations, 1);
        assert_eq!(fx.log.lock().unwrap().as_slice(), &["a"]);
    }
}
