//! Painting abstractions for widget rendering.
//!
//! Casement does not ship a renderer. Widgets describe what to draw through
//! the [`Painter`] trait and the embedding application supplies the backend
//! (software rasterizer, GPU canvas, whatever composes its frames).
//!
//! # Key Types
//!
//! - [`Painter`] - Backend trait implemented by the embedding
//! - [`PaintContext`] - Context passed to `Widget::paint`
//! - [`Stroke`] - Outline style for rectangle borders
//!
//! # Coordinate System
//!
//! By the time a widget paints, the painter has been translated so (0, 0) is
//! the widget's top-left corner. Widgets draw in local coordinates only.

use crate::geometry::{Color, Rect, Size};

/// Outline style for stroked shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Line width in logical pixels.
    pub width: f32,
}

impl Stroke {
    /// Create a new stroke.
    #[inline]
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Horizontal text alignment within a target rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Align to the left edge.
    Left,
    /// Center horizontally.
    #[default]
    Center,
    /// Align to the right edge.
    Right,
}

/// Drawing backend implemented by the embedding application.
///
/// All coordinates are logical pixels in the painter's current transform.
/// Implementations must honor `save`/`restore` nesting: `restore` undoes the
/// translations and clips applied since the matching `save`.
pub trait Painter {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke a rectangle outline.
    ///
    /// The stroke is centered on the rectangle edges.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

    /// Draw text within a rectangle.
    ///
    /// Text is vertically centered in `rect`. How glyphs are shaped and which
    /// font is used is up to the backend.
    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, align: TextAlign);

    /// Draw an RGBA8 image scaled into a rectangle.
    ///
    /// `pixels` is tightly packed, `width * height * 4` bytes, row-major.
    fn draw_image(&mut self, rect: Rect, width: u32, height: u32, pixels: &[u8]);

    /// Push the current transform and clip state.
    fn save(&mut self);

    /// Pop to the most recent `save`.
    fn restore(&mut self);

    /// Translate the coordinate origin.
    fn translate(&mut self, dx: f32, dy: f32);

    /// Intersect the clip region with a rectangle.
    fn clip_rect(&mut self, rect: Rect);
}

/// Context provided during widget painting.
///
/// This wraps a painter and provides the widget's geometry information
/// for convenient access during the paint operation. Passed to
/// [`Widget::paint`](crate::widget::Widget::paint).
pub struct PaintContext<'a> {
    /// The painter to draw with.
    painter: &'a mut dyn Painter,
    /// The widget's local rectangle (origin always 0,0).
    widget_rect: Rect,
    /// Whether to show focus indicator (widget has focus and window is active).
    show_focus: bool,
}

impl<'a> PaintContext<'a> {
    /// Create a new paint context.
    pub fn new(painter: &'a mut dyn Painter, widget_rect: Rect) -> Self {
        Self {
            painter,
            widget_rect,
            show_focus: false,
        }
    }

    /// Set whether to show focus indicator (builder pattern).
    #[inline]
    pub fn with_show_focus(mut self, show_focus: bool) -> Self {
        self.show_focus = show_focus;
        self
    }

    /// Check if the focus indicator should be shown.
    ///
    /// Returns `true` when the widget has focus and should display a visual
    /// indicator. Widgets can check this in their `paint()` method to draw
    /// focus rectangles or other focus visualization.
    #[inline]
    pub fn should_show_focus(&self) -> bool {
        self.show_focus
    }

    /// Get the painter.
    #[inline]
    pub fn painter(&mut self) -> &mut dyn Painter {
        self.painter
    }

    /// Get the widget's local rectangle.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.widget_rect
    }

    /// Get the widget's width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.widget_rect.width()
    }

    /// Get the widget's height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.widget_rect.height()
    }

    /// Get the widget's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.widget_rect.size
    }

    /// Draw a focus indicator around the widget.
    ///
    /// This draws a standard focus rectangle around the widget's bounds.
    /// Widgets should call this in their `paint()` implementation when
    /// `should_show_focus()` returns `true`.
    ///
    /// # Arguments
    ///
    /// * `inset` - How much to inset the focus rectangle from the widget bounds.
    ///   Use 0.0 for a focus ring around the entire widget, or a positive value
    ///   to draw the indicator inside the widget's border.
    pub fn draw_focus_indicator(&mut self, inset: f32) {
        // Standard focus indicator color - platform-appropriate blue
        let focus_color = Color::from_rgb8(0, 120, 215);
        self.draw_focus_indicator_styled(inset, focus_color, 2.0);
    }

    /// Draw a focus indicator with custom color and width.
    ///
    /// Like `draw_focus_indicator` but allows customization of the appearance.
    pub fn draw_focus_indicator_styled(&mut self, inset: f32, color: Color, width: f32) {
        let rect = if inset > 0.0 {
            Rect::new(
                inset,
                inset,
                self.widget_rect.width() - inset * 2.0,
                self.widget_rect.height() - inset * 2.0,
            )
        } else {
            self.widget_rect
        };

        let stroke = Stroke::new(color, width);
        self.painter.stroke_rect(rect, &stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Op {
        Fill(Rect, Color),
        StrokeRect(Rect, Stroke),
        Text(String, Rect),
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
            self.ops.push(Op::StrokeRect(rect, *stroke));
        }

        fn draw_text(&mut self, text: &str, rect: Rect, _color: Color, _align: TextAlign) {
            self.ops.push(Op::Text(text.to_string(), rect));
        }

        fn draw_image(&mut self, _rect: Rect, _width: u32, _height: u32, _pixels: &[u8]) {}
        fn save(&mut self) {}
        fn restore(&mut self) {}
        fn translate(&mut self, _dx: f32, _dy: f32) {}
        fn clip_rect(&mut self, _rect: Rect) {}
    }

    #[test]
    fn test_context_geometry_accessors() {
        let mut painter = RecordingPainter::default();
        let ctx = PaintContext::new(&mut painter, Rect::new(0.0, 0.0, 120.0, 40.0));

        assert_eq!(ctx.width(), 120.0);
        assert_eq!(ctx.height(), 40.0);
        assert_eq!(ctx.size(), Size::new(120.0, 40.0));
        assert!(!ctx.should_show_focus());
    }

    #[test]
    fn test_focus_indicator_inset() {
        let mut painter = RecordingPainter::default();
        {
            let mut ctx = PaintContext::new(&mut painter, Rect::new(0.0, 0.0, 100.0, 50.0))
                .with_show_focus(true);
            assert!(ctx.should_show_focus());
            ctx.draw_focus_indicator(1.0);
        }

        assert_eq!(painter.ops.len(), 1);
        match &painter.ops[0] {
            Op::StrokeRect(rect, stroke) => {
                assert_eq!(*rect, Rect::new(1.0, 1.0, 98.0, 48.0));
                assert_eq!(stroke.width, 2.0);
            }
            other => panic!("unexpected op: {:?}", other),
        }
    }

    #[test]
    fn test_focus_indicator_no_inset_uses_full_rect() {
        let mut painter = RecordingPainter::default();
        {
            let mut ctx = PaintContext::new(&mut painter, Rect::new(0.0, 0.0, 100.0, 50.0));
            ctx.draw_focus_indicator(0.0);
        }

        match &painter.ops[0] {
            Op::StrokeRect(rect, _) => assert_eq!(*rect, Rect::new(0.0, 0.0, 100.0, 50.0)),
            other => panic!("unexpected op: {:?}", other),
        }
    }
}
