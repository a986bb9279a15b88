//! Casement Showcase
//!
//! End-to-end demo of the chrome layer:
//! - A frameless window with a title bar, caption buttons, and resize edges
//! - A clickable content widget receiving dispatched events
//! - An application-modal dialog blocking the main window while it runs
//!
//! Casement leaves rasterization to the host, so this example's "renderer"
//! logs every paint operation instead of drawing pixels; run with
//! `RUST_LOG=trace` to watch the frames go by.
//!
//! Run with: cargo run -p casement --example showcase
//!
//! Controls:
//!   Click / Space - increment the counter in the content pane
//!   D             - open the modal about dialog
//!   Escape        - close the dialog, or ask the window to close

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use casement::chrome::{DialogCode, FramelessDialog, FramelessWindow, TitleBar};
use casement::geometry::{Color, Rect};
use casement::init_global_registry;
use casement::paint::{PaintContext, Painter, Stroke, TextAlign};
use casement::widget::{
    FocusPolicy, Key as WidgetKey, KeyboardEvent, KeyboardInputHandler, SizeHint, SizePolicyPair,
    Widget, WidgetBase, WidgetEvent,
};
use casement::{Object, ObjectId};
use tracing::{info, trace};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

/// Paint backend that narrates instead of rasterizing.
struct TracePainter;

impl Painter for TracePainter {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        trace!(?rect, ?color, "fill_rect");
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        trace!(?rect, width = stroke.width, "stroke_rect");
    }

    fn draw_text(&mut self, text: &str, rect: Rect, _color: Color, align: TextAlign) {
        trace!(?rect, ?align, text, "draw_text");
    }

    fn draw_image(&mut self, rect: Rect, width: u32, height: u32, _pixels: &[u8]) {
        trace!(?rect, width, height, "draw_image");
    }

    fn save(&mut self) {
        trace!("save");
    }

    fn restore(&mut self) {
        trace!("restore");
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        trace!(dx, dy, "translate");
    }

    fn clip_rect(&mut self, rect: Rect) {
        trace!(?rect, "clip_rect");
    }
}

/// Content widget: counts clicks and key presses.
struct CounterPane {
    base: WidgetBase,
    clicks: u32,
}

impl CounterPane {
    fn new() -> Self {
        let mut base = WidgetBase::new::<Self>();
        base.set_opaque(true);
        base.set_size_policy(SizePolicyPair::expanding());
        base.set_focus_policy(FocusPolicy::StrongFocus);
        Self { base, clicks: 0 }
    }
}

impl Object for CounterPane {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for CounterPane {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::from_dimensions(400.0, 200.0)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let rect = ctx.rect();
        let label = rect.deflate(24.0);
        let painter = ctx.painter();
        painter.fill_rect(rect, Color::from_rgb8(0x26, 0x26, 0x26));
        let text = format!(
            "Clicked {} times. Press D for the about dialog.",
            self.clicks
        );
        painter.draw_text(&text, label, Color::from_rgb8(0xd4, 0xd4, 0xd4), TextAlign::Left);
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        match event {
            WidgetEvent::MousePress(_) => {
                self.clicks += 1;
                info!(clicks = self.clicks, "counter pane clicked");
                self.base.update();
                true
            }
            WidgetEvent::KeyPress(press) if press.key == WidgetKey::Space => {
                self.clicks += 1;
                self.base.update();
                true
            }
            _ => false,
        }
    }
}

/// Static text for the about dialog.
struct MessagePane {
    base: WidgetBase,
    message: &'static str,
}

impl MessagePane {
    fn new(message: &'static str) -> Self {
        let mut base = WidgetBase::new::<Self>();
        base.set_size_policy(SizePolicyPair::expanding());
        Self { base, message }
    }
}

impl Object for MessagePane {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for MessagePane {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::from_dimensions(360.0, 120.0)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let rect = ctx.rect();
        let painter = ctx.painter();
        painter.draw_text(
            self.message,
            rect,
            Color::from_rgb8(0xd4, 0xd4, 0xd4),
            TextAlign::Center,
        );
    }
}

struct App {
    window: Option<FramelessWindow>,
    dialog: Option<FramelessDialog>,
    dialog_keys: KeyboardInputHandler,
    painter: TracePainter,
    exit_requested: Arc<AtomicBool>,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            dialog: None,
            dialog_keys: KeyboardInputHandler::new(),
            painter: TracePainter,
            exit_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    fn open_dialog(&mut self) {
        if let Some(dialog) = &mut self.dialog {
            dialog.open();
            info!("about dialog opened; main window input is blocked");
        }
    }

    fn dialog_window_id(&self) -> Option<WindowId> {
        self.dialog
            .as_ref()
            .and_then(|dialog| dialog.native())
            .map(|native| native.winit_id())
    }

    /// Events carrying the dialog's window id go straight to the dialog.
    fn route_dialog_event(&mut self, event: &WindowEvent) {
        let Some(dialog) = &mut self.dialog else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => dialog.handle_close_request(),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.dialog_keys.update_modifiers(modifiers);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    let processed = self.dialog_keys.process_key_event(
                        &event.logical_key,
                        event.state,
                        event.text.as_deref(),
                        event.repeat,
                    );
                    if let KeyboardEvent::Press(press) = processed {
                        dialog.handle_key_press(press);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                dialog.render(&mut self.painter);
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let mut window = FramelessWindow::new(event_loop, "Casement Showcase", None)
            .expect("failed to create main window");
        window.set_title_bar(TitleBar::new());
        window.add_widget(CounterPane::new());

        let exit_flag = Arc::clone(&self.exit_requested);
        window
            .close_requested
            .connect(move |_| exit_flag.store(true, Ordering::Relaxed));
        window
            .resize_edge_changed
            .connect(|edges| trace!(?edges, "resize edges changed"));

        let mut dialog = FramelessDialog::new();
        dialog
            .create_window(event_loop, "About Casement")
            .expect("failed to create dialog window");
        dialog.add_content(MessagePane::new(
            "Casement paints its own window chrome. Escape closes this dialog.",
        ));
        dialog
            .finished
            .connect(|code: &DialogCode| info!(code = ?code, "about dialog finished"));

        window.show();
        self.window = Some(window);
        self.dialog = Some(dialog);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.dialog_window_id() == Some(id) {
            self.route_dialog_event(&event);
            return;
        }

        let dialog_running = self.dialog.as_ref().is_some_and(|d| d.is_running());

        // Showcase-level shortcut: D opens the about dialog.
        if !dialog_running
            && let WindowEvent::KeyboardInput { event: key, .. } = &event
            && key.state == ElementState::Pressed
            && let Key::Character(c) = &key.logical_key
            && (c == "d" || c == "D")
        {
            self.open_dialog();
            return;
        }

        let Some(window) = &mut self.window else {
            return;
        };

        match &event {
            WindowEvent::KeyboardInput { event: key, .. }
                if key.state == ElementState::Pressed
                    && !dialog_running
                    && key.logical_key == Key::Named(NamedKey::Escape) =>
            {
                window.request_close();
            }
            WindowEvent::RedrawRequested => {
                let stats = window.render(&mut self.painter);
                trace!(
                    painted = stats.widgets_painted,
                    skipped = stats.widgets_skipped,
                    "frame rendered"
                );
            }
            _ => window.handle_window_event(&event),
        }

        if self.exit_requested.load(Ordering::Relaxed) {
            event_loop.exit();
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    init_global_registry();

    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = App::new();
    event_loop.run_app(&mut app).expect("event loop error");
}
