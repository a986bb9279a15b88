//! Custom title bar for frameless windows.
//!
//! The bar replaces the native caption: it shows the window icon and title,
//! hosts the minimize/maximize/close buttons, starts an OS window move when
//! its empty area is dragged, and toggles maximize on a double click.
//!
//! The bar never acts on the window directly. Every user action is exposed
//! as a typed signal ([`TitleBar::minimize_requested`] and friends) that the
//! owning [`FramelessWindow`](super::FramelessWindow) wires to the native
//! window when the bar is installed. A bar without an attached window is
//! fully functional for embedding and testing; its signals simply have no
//! subscribers.
//!
//! The caption buttons are painted regions with their own hover and pressed
//! tracking rather than child widgets. Their rectangles are derived from the
//! bar's width on every hit test, so no relayout is needed on resize.

use casement_core::{Object, ObjectId, Signal};

use crate::geometry::{Color, Point, Rect, Size};
use crate::paint::{PaintContext, TextAlign};
use crate::widget::layout::ContentMargins;
use crate::widget::{
    MouseButton, SizeHint, SizePolicy, SizePolicyPair, Widget, WidgetBase, WidgetEvent,
};
use crate::window::WindowIcon;

use super::surface::{chrome_background, chrome_text};

/// Content margins of the bar: icon inset on the left, buttons inset on
/// the right.
const MARGINS: ContentMargins = ContentMargins::new(10.0, 0.0, 6.0, 0.0);

/// Gap between the icon, the label, and between caption buttons.
const SPACING: f32 = 6.0;

/// Edge length of the window icon slot.
const ICON_SIZE: f32 = 20.0;

/// Caption button size.
const BUTTON_WIDTH: f32 = 36.0;
const BUTTON_HEIGHT: f32 = 28.0;

const GLYPH_MINIMIZE: &str = "\u{2013}";
const GLYPH_MAXIMIZE: &str = "\u{25a1}";
const GLYPH_RESTORE: &str = "\u{2750}";
const GLYPH_CLOSE: &str = "\u{2715}";

/// The three caption buttons, ordered left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionButton {
    /// Minimizes the window.
    Minimize,
    /// Toggles between maximized and restored.
    Maximize,
    /// Requests a window close.
    Close,
}

impl CaptionButton {
    /// All buttons in visual order.
    pub const ALL: [CaptionButton; 3] = [
        CaptionButton::Minimize,
        CaptionButton::Maximize,
        CaptionButton::Close,
    ];

    /// Slot index counted from the right edge of the bar.
    fn slot_from_right(self) -> f32 {
        match self {
            CaptionButton::Close => 0.0,
            CaptionButton::Maximize => 1.0,
            CaptionButton::Minimize => 2.0,
        }
    }
}

/// A widget drawing the window caption of a frameless window.
///
/// See the [module documentation](self) for the interaction model.
pub struct TitleBar {
    base: WidgetBase,
    title: String,
    icon: Option<WindowIcon>,
    /// Root widget id of the attached window's chrome tree, if any. The bar
    /// never owns its window.
    window_root: Option<ObjectId>,
    maximized: bool,
    hovered_button: Option<CaptionButton>,
    pressed_button: Option<CaptionButton>,

    /// Emitted when the minimize button is activated.
    pub minimize_requested: Signal<()>,
    /// Emitted when the maximize button is activated or the empty area is
    /// double clicked.
    pub maximize_toggle_requested: Signal<()>,
    /// Emitted when the close button is activated.
    pub close_requested: Signal<()>,
    /// Emitted when a drag begins on the empty area. The owning window
    /// responds by starting the OS move loop.
    pub drag_started: Signal<()>,
    /// Emitted by [`set_app_name`](Self::set_app_name) while a window is
    /// attached. The owning window responds by renaming itself.
    pub app_name_change_requested: Signal<String>,
}

impl TitleBar {
    /// Fixed logical height of the bar.
    pub const HEIGHT: f32 = 36.0;

    /// Create a detached title bar with an empty title.
    pub fn new() -> Self {
        let mut base = WidgetBase::new::<Self>();
        base.set_opaque(true);
        base.set_size_policy(SizePolicyPair::new(SizePolicy::Expanding, SizePolicy::Fixed));
        Self {
            base,
            title: String::new(),
            icon: None,
            window_root: None,
            maximized: false,
            hovered_button: None,
            pressed_button: None,
            minimize_requested: Signal::new(),
            maximize_toggle_requested: Signal::new(),
            close_requested: Signal::new(),
            drag_started: Signal::new(),
            app_name_change_requested: Signal::new(),
        }
    }

    // =========================================================================
    // Title, Icon, Window State
    // =========================================================================

    /// The displayed title text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the displayed title text.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if self.title != title {
            self.title = title;
            self.base.update();
        }
    }

    /// The icon shown at the left end of the bar.
    pub fn icon(&self) -> Option<&WindowIcon> {
        self.icon.as_ref()
    }

    /// Set the icon shown at the left end of the bar.
    ///
    /// `None` leaves the icon slot empty; the label moves up to the left
    /// margin.
    pub fn set_icon(&mut self, icon: Option<WindowIcon>) {
        self.icon = icon;
        self.base.update();
    }

    /// Whether the bar draws the restore glyph instead of the maximize glyph.
    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Update the maximize button glyph. The owning window pushes the native
    /// state in here whenever the OS reports a maximize or restore.
    pub fn set_maximized(&mut self, maximized: bool) {
        if self.maximized != maximized {
            self.maximized = maximized;
            self.base.update();
        }
    }

    /// Record the window this bar belongs to, identified by the root widget
    /// of its chrome tree.
    pub fn attach_to_window(&mut self, window_root: ObjectId) {
        self.window_root = Some(window_root);
    }

    /// The attached window's chrome root, if any.
    pub fn attached_window(&self) -> Option<ObjectId> {
        self.window_root
    }

    /// Ask the owning window to change the application name.
    ///
    /// The window updates its native title, this bar's label, and the
    /// process grouping identity. Without an attached window this does
    /// nothing.
    pub fn set_app_name(&self, name: impl Into<String>) {
        if self.window_root.is_some() {
            self.app_name_change_requested.emit(name.into());
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Rectangle of a caption button in bar-local coordinates.
    ///
    /// Buttons pack from the right edge inside the right margin and are
    /// vertically centered.
    pub fn button_rect(&self, button: CaptionButton) -> Rect {
        let slot = button.slot_from_right();
        let x = self.base.width() - MARGINS.right - (slot + 1.0) * BUTTON_WIDTH - slot * SPACING;
        let y = (Self::HEIGHT - BUTTON_HEIGHT) / 2.0;
        Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT)
    }

    /// The caption button at a bar-local position, if any.
    pub fn button_at(&self, pos: Point) -> Option<CaptionButton> {
        CaptionButton::ALL
            .into_iter()
            .find(|&button| self.button_rect(button).contains(pos))
    }

    /// Check if a bar-local position belongs to the draggable empty area.
    ///
    /// Everything except the caption buttons is draggable, icon and label
    /// included.
    pub fn is_draggable_area(&self, pos: Point) -> bool {
        self.button_at(pos).is_none()
    }

    /// The caption button currently under the pointer, if any.
    pub fn hovered_button(&self) -> Option<CaptionButton> {
        self.hovered_button
    }

    fn icon_rect(&self) -> Rect {
        Rect::new(
            MARGINS.left,
            (Self::HEIGHT - ICON_SIZE) / 2.0,
            ICON_SIZE,
            ICON_SIZE,
        )
    }

    fn label_rect(&self) -> Rect {
        let left = if self.icon.is_some() {
            self.icon_rect().right() + SPACING
        } else {
            MARGINS.left
        };
        let right = self.button_rect(CaptionButton::Minimize).left() - SPACING;
        Rect::new(left, 0.0, (right - left).max(0.0), Self::HEIGHT)
    }

    fn minimum_width() -> f32 {
        let buttons = 3.0 * BUTTON_WIDTH + 2.0 * SPACING;
        MARGINS.horizontal() + ICON_SIZE + SPACING + buttons + SPACING
    }

    // =========================================================================
    // Painting
    // =========================================================================

    fn paint_button(&self, ctx: &mut PaintContext<'_>, button: CaptionButton) {
        let rect = self.button_rect(button);
        let hovered = self.hovered_button == Some(button);
        let pressed = hovered && self.pressed_button == Some(button);

        let background = match (button, pressed, hovered) {
            (CaptionButton::Close, true, _) => Some(Color::from_rgb8(0xa6, 0x22, 0x16)),
            (CaptionButton::Close, false, true) => Some(Color::from_rgb8(0xc4, 0x2b, 0x1c)),
            (_, true, _) => Some(Color::from_rgba8(0xff, 0xff, 0xff, 0x14)),
            (_, false, true) => Some(Color::from_rgba8(0xff, 0xff, 0xff, 0x1f)),
            _ => None,
        };
        if let Some(background) = background {
            ctx.painter().fill_rect(rect, background);
        }

        let glyph = match button {
            CaptionButton::Minimize => GLYPH_MINIMIZE,
            CaptionButton::Maximize if self.maximized => GLYPH_RESTORE,
            CaptionButton::Maximize => GLYPH_MAXIMIZE,
            CaptionButton::Close => GLYPH_CLOSE,
        };
        ctx.painter()
            .draw_text(glyph, rect, chrome_text(), TextAlign::Center);
    }

    fn emit_button_signal(&self, button: CaptionButton) {
        tracing::debug!(
            target: casement_core::logging::targets::WINDOW,
            button = ?button,
            "caption button activated"
        );
        match button {
            CaptionButton::Minimize => self.minimize_requested.emit(()),
            CaptionButton::Maximize => self.maximize_toggle_requested.emit(()),
            CaptionButton::Close => self.close_requested.emit(()),
        }
    }
}

impl Default for TitleBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Object for TitleBar {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for TitleBar {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::new(Size::new(320.0, Self::HEIGHT))
            .with_minimum(Size::new(Self::minimum_width(), Self::HEIGHT))
            .with_maximum(Size::new(f32::MAX, Self::HEIGHT))
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let rect = ctx.rect();
        ctx.painter().fill_rect(rect, chrome_background());

        if let Some(ref icon) = self.icon {
            let icon_rect = self.icon_rect();
            ctx.painter()
                .draw_image(icon_rect, icon.width(), icon.height(), icon.rgba());
        }

        if !self.title.is_empty() {
            let label_rect = self.label_rect();
            ctx.painter()
                .draw_text(&self.title, label_rect, chrome_text(), TextAlign::Left);
        }

        for button in CaptionButton::ALL {
            self.paint_button(ctx, button);
        }
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        match event {
            WidgetEvent::MousePress(press) if press.button == MouseButton::Left => {
                match self.button_at(press.local_pos) {
                    Some(button) => {
                        self.pressed_button = Some(button);
                        self.hovered_button = Some(button);
                        self.base.update();
                    }
                    None => {
                        tracing::debug!(
                            target: casement_core::logging::targets::WINDOW,
                            "title bar drag started"
                        );
                        self.drag_started.emit(());
                    }
                }
                true
            }
            WidgetEvent::MouseRelease(release) if release.button == MouseButton::Left => {
                let Some(pressed) = self.pressed_button.take() else {
                    return false;
                };
                self.base.update();
                if self.button_at(release.local_pos) == Some(pressed) {
                    self.emit_button_signal(pressed);
                }
                true
            }
            WidgetEvent::DoubleClick(click) if click.button == MouseButton::Left => {
                match self.button_at(click.local_pos) {
                    // A double click on a button behaves like a second press.
                    Some(button) => {
                        self.pressed_button = Some(button);
                        self.hovered_button = Some(button);
                        self.base.update();
                    }
                    None => self.maximize_toggle_requested.emit(()),
                }
                true
            }
            WidgetEvent::MouseMove(mv) => {
                let hovered = self.button_at(mv.local_pos);
                if hovered != self.hovered_button {
                    self.hovered_button = hovered;
                    self.base.update();
                }
                true
            }
            WidgetEvent::Leave(_) => {
                if self.hovered_button.is_some() || self.pressed_button.is_some() {
                    self.hovered_button = None;
                    self.pressed_button = None;
                    self.base.update();
                }
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
static_assertions::assert_impl_all!(TitleBar: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{KeyboardModifiers, MousePressEvent, MouseReleaseEvent};
    use casement_core::init_global_registry;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn setup() -> TitleBar {
        init_global_registry();
        let mut bar = TitleBar::new();
        bar.set_geometry(Rect::new(0.0, 0.0, 400.0, TitleBar::HEIGHT));
        bar
    }

    fn press_at(x: f32, y: f32) -> WidgetEvent {
        let pos = Point::new(x, y);
        WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            pos,
            pos,
            KeyboardModifiers::NONE,
        ))
    }

    fn release_at(x: f32, y: f32) -> WidgetEvent {
        let pos = Point::new(x, y);
        WidgetEvent::MouseRelease(MouseReleaseEvent::new(
            MouseButton::Left,
            pos,
            pos,
            KeyboardModifiers::NONE,
        ))
    }

    fn double_click_at(x: f32, y: f32) -> WidgetEvent {
        let pos = Point::new(x, y);
        WidgetEvent::DoubleClick(crate::widget::MouseDoubleClickEvent::new(
            MouseButton::Left,
            pos,
            pos,
            KeyboardModifiers::NONE,
        ))
    }

    fn count_emissions(signal: &Signal<()>) -> Arc<Mutex<u32>> {
        let count = Arc::new(Mutex::new(0_u32));
        let captured = Arc::clone(&count);
        signal.connect(move |_| *captured.lock() += 1);
        count
    }

    #[test]
    fn test_buttons_pack_from_the_right() {
        let bar = setup();
        // 400 wide: close at 358, maximize at 316, minimize at 274, all
        // vertically centered in the 36px bar.
        assert_eq!(
            bar.button_rect(CaptionButton::Close),
            Rect::new(358.0, 4.0, 36.0, 28.0)
        );
        assert_eq!(
            bar.button_rect(CaptionButton::Maximize),
            Rect::new(316.0, 4.0, 36.0, 28.0)
        );
        assert_eq!(
            bar.button_rect(CaptionButton::Minimize),
            Rect::new(274.0, 4.0, 36.0, 28.0)
        );
    }

    #[test]
    fn test_button_hit_testing() {
        let bar = setup();
        assert_eq!(
            bar.button_at(Point::new(370.0, 18.0)),
            Some(CaptionButton::Close)
        );
        assert_eq!(
            bar.button_at(Point::new(320.0, 18.0)),
            Some(CaptionButton::Maximize)
        );
        assert_eq!(
            bar.button_at(Point::new(280.0, 18.0)),
            Some(CaptionButton::Minimize)
        );
        // Label area and the strip above the buttons are empty area.
        assert_eq!(bar.button_at(Point::new(60.0, 18.0)), None);
        assert_eq!(bar.button_at(Point::new(370.0, 2.0)), None);
        assert!(bar.is_draggable_area(Point::new(60.0, 18.0)));
        assert!(!bar.is_draggable_area(Point::new(370.0, 18.0)));
    }

    #[test]
    fn test_click_on_close_emits_close_requested() {
        let mut bar = setup();
        let closes = count_emissions(&bar.close_requested);

        assert!(bar.event(&mut press_at(370.0, 18.0)));
        assert_eq!(*closes.lock(), 0);

        assert!(bar.event(&mut release_at(370.0, 18.0)));
        assert_eq!(*closes.lock(), 1);
    }

    #[test]
    fn test_click_on_minimize_and_maximize() {
        let mut bar = setup();
        let minimizes = count_emissions(&bar.minimize_requested);
        let toggles = count_emissions(&bar.maximize_toggle_requested);

        bar.event(&mut press_at(280.0, 18.0));
        bar.event(&mut release_at(280.0, 18.0));
        assert_eq!(*minimizes.lock(), 1);

        bar.event(&mut press_at(320.0, 18.0));
        bar.event(&mut release_at(320.0, 18.0));
        assert_eq!(*toggles.lock(), 1);
    }

    #[test]
    fn test_release_off_button_cancels_activation() {
        let mut bar = setup();
        let closes = count_emissions(&bar.close_requested);

        bar.event(&mut press_at(370.0, 18.0));
        // Slide off to the maximize button before releasing.
        bar.event(&mut release_at(320.0, 18.0));

        assert_eq!(*closes.lock(), 0);
    }

    #[test]
    fn test_press_on_empty_area_starts_drag() {
        let mut bar = setup();
        let drags = count_emissions(&bar.drag_started);

        bar.event(&mut press_at(60.0, 18.0));
        assert_eq!(*drags.lock(), 1);

        // Button presses never start a drag.
        bar.event(&mut press_at(370.0, 18.0));
        assert_eq!(*drags.lock(), 1);
    }

    #[test]
    fn test_double_click_on_empty_area_toggles_maximize() {
        let mut bar = setup();
        let toggles = count_emissions(&bar.maximize_toggle_requested);

        bar.event(&mut double_click_at(60.0, 18.0));
        assert_eq!(*toggles.lock(), 1);

        bar.event(&mut double_click_at(370.0, 18.0));
        assert_eq!(*toggles.lock(), 1);
    }

    #[test]
    fn test_hover_tracking_follows_the_pointer() {
        let mut bar = setup();
        let pos = Point::new(370.0, 18.0);
        let mut mv = WidgetEvent::MouseMove(crate::widget::MouseMoveEvent::new(
            pos,
            pos,
            0,
            KeyboardModifiers::NONE,
        ));
        bar.event(&mut mv);
        assert_eq!(bar.hovered_button(), Some(CaptionButton::Close));

        let off = Point::new(60.0, 18.0);
        let mut away = WidgetEvent::MouseMove(crate::widget::MouseMoveEvent::new(
            off,
            off,
            0,
            KeyboardModifiers::NONE,
        ));
        bar.event(&mut away);
        assert_eq!(bar.hovered_button(), None);
    }

    #[test]
    fn test_leave_clears_hover_and_pressed_state() {
        let mut bar = setup();
        bar.event(&mut press_at(370.0, 18.0));
        assert_eq!(bar.hovered_button(), Some(CaptionButton::Close));

        let mut leave = WidgetEvent::Leave(crate::widget::LeaveEvent::new());
        bar.event(&mut leave);
        assert_eq!(bar.hovered_button(), None);

        // The stale press must not fire on a later release.
        let closes = count_emissions(&bar.close_requested);
        bar.event(&mut release_at(370.0, 18.0));
        assert_eq!(*closes.lock(), 0);
    }

    #[test]
    fn test_set_maximized_switches_glyph_state() {
        let mut bar = setup();
        assert!(!bar.is_maximized());

        bar.widget_base_mut().clear_repaint_flag();
        bar.set_maximized(true);
        assert!(bar.is_maximized());
        assert!(bar.needs_repaint());

        // No-op when unchanged.
        bar.widget_base_mut().clear_repaint_flag();
        bar.set_maximized(true);
        assert!(!bar.needs_repaint());
    }

    #[test]
    fn test_set_title_updates_text() {
        let mut bar = setup();
        bar.set_title("Crash Handler");
        assert_eq!(bar.title(), "Crash Handler");
    }

    #[test]
    fn test_set_app_name_without_window_is_silent() {
        let bar = setup();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&requests);
        bar.app_name_change_requested
            .connect(move |name: &String| captured.lock().push(name.clone()));

        bar.set_app_name("Ignored");
        assert!(requests.lock().is_empty());
    }

    #[test]
    fn test_set_app_name_with_window_delegates() {
        let mut bar = setup();
        let window_root = ObjectId::from_raw((1_u64 << 32) | 99).expect("valid test id");
        bar.attach_to_window(window_root);
        assert_eq!(bar.attached_window(), Some(window_root));

        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&requests);
        bar.app_name_change_requested
            .connect(move |name: &String| captured.lock().push(name.clone()));

        bar.set_app_name("Casement Demo");
        assert_eq!(requests.lock().as_slice(), ["Casement Demo".to_string()]);
    }

    #[test]
    fn test_size_hint_is_fixed_height() {
        let bar = setup();
        let hint = bar.size_hint();
        assert_eq!(hint.preferred.height, TitleBar::HEIGHT);
        assert_eq!(hint.effective_minimum().height, TitleBar::HEIGHT);
        assert_eq!(hint.effective_maximum().height, TitleBar::HEIGHT);
        assert_eq!(bar.size_policy().vertical, SizePolicy::Fixed);
    }

    #[test]
    fn test_label_rect_accounts_for_icon() {
        let mut bar = setup();
        assert_eq!(bar.label_rect().left(), MARGINS.left);

        let icon = WindowIcon::from_rgba(vec![0xff; 16 * 16 * 4], 16, 16).expect("icon");
        bar.set_icon(Some(icon));
        assert_eq!(
            bar.label_rect().left(),
            MARGINS.left + ICON_SIZE + SPACING
        );
        // The label always ends before the minimize button.
        assert!(bar.label_rect().right() <= bar.button_rect(CaptionButton::Minimize).left());
    }
}
