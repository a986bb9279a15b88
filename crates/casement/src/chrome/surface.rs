//! The root surface widget behind a chrome tree.
//!
//! Frameless windows and dialogs have no OS decoration at all, so the
//! bottom-most widget paints what the OS normally would: a solid dark
//! background and a one pixel border marking the window boundary.

use casement_core::{Object, ObjectId};

use crate::geometry::{Color, Size};
use crate::paint::{PaintContext, Stroke};
use crate::widget::{SizeHint, SizePolicyPair, Widget, WidgetBase};

/// Background color shared by windows and dialogs.
pub(crate) fn chrome_background() -> Color {
    Color::from_rgb8(0x1e, 0x1e, 0x1e)
}

/// Border color marking the window boundary.
pub(crate) fn chrome_border() -> Color {
    Color::from_rgb8(0x52, 0x52, 0x52)
}

/// Text color for chrome labels and caption glyphs.
pub(crate) fn chrome_text() -> Color {
    Color::from_rgb8(0xd4, 0xd4, 0xd4)
}

/// Root widget of a frameless window or dialog.
///
/// Paints the chrome background and border and hosts the content widgets as
/// children. The owning window sizes it directly to the client area, so its
/// size hint is never consulted by a layout.
pub(crate) struct ChromeSurface {
    base: WidgetBase,
}

impl ChromeSurface {
    pub(crate) fn new() -> Self {
        let mut base = WidgetBase::new::<Self>();
        base.set_opaque(true);
        base.set_size_policy(SizePolicyPair::expanding());
        Self { base }
    }
}

impl Object for ChromeSurface {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for ChromeSurface {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::new(Size::ZERO)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let rect = ctx.rect();
        // Center the one pixel stroke on the outermost pixel row.
        let border_rect = rect.deflate(0.5);
        let painter = ctx.painter();
        painter.fill_rect(rect, chrome_background());
        painter.stroke_rect(border_rect, &Stroke::new(chrome_border(), 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::paint::{Painter, TextAlign};
    use casement_core::init_global_registry;

    #[derive(Debug, PartialEq)]
    enum Op {
        Fill(Rect, Color),
        Stroke(Rect, f32, Color),
    }

    #[derive(Default)]
    struct RecordingPainter {
        ops: Vec<Op>,
    }

    impl Painter for RecordingPainter {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ops.push(Op::Fill(rect, color));
        }

        fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
            self.ops.push(Op::Stroke(rect, stroke.width, stroke.color));
        }

        fn draw_text(&mut self, _text: &str, _rect: Rect, _color: Color, _align: TextAlign) {}
        fn draw_image(&mut self, _rect: Rect, _width: u32, _height: u32, _pixels: &[u8]) {}
        fn save(&mut self) {}
        fn restore(&mut self) {}
        fn translate(&mut self, _dx: f32, _dy: f32) {}
        fn clip_rect(&mut self, _rect: Rect) {}
    }

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_surface_is_opaque() {
        setup();
        let surface = ChromeSurface::new();
        assert!(surface.is_opaque());
    }

    #[test]
    fn test_surface_paints_background_then_border() {
        setup();
        let surface = ChromeSurface::new();
        let mut painter = RecordingPainter::default();
        let rect = Rect::new(0.0, 0.0, 640.0, 480.0);

        let mut ctx = PaintContext::new(&mut painter, rect);
        surface.paint(&mut ctx);

        assert_eq!(painter.ops.len(), 2);
        assert_eq!(painter.ops[0], Op::Fill(rect, chrome_background()));
        assert_eq!(
            painter.ops[1],
            Op::Stroke(rect.deflate(0.5), 1.0, chrome_border())
        );
    }
}
