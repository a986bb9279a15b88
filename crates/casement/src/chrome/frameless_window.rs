//! A top-level window that draws its own decorations.
//!
//! [`FramelessWindow`] is the chrome entry point: it creates an undecorated
//! native window, owns the widget tree behind it, and routes OS events into
//! that tree. The root widget is a dark surface with a one pixel border; a
//! vertical box layout with no margins stacks the optional [`TitleBar`] on
//! top of the host's content widgets.
//!
//! # Interactive resize
//!
//! With no native border, resize affordances come from pointer tracking:
//! every cursor move is tested against an 8 px margin along each edge (see
//! [`EdgeSet`]), the matching resize cursor is applied, and a press inside
//! the margin hands the gesture to the OS resize loop. A maximized window
//! has no resize edges.
//!
//! # Title bar plumbing
//!
//! The title bar communicates through signals only. When a bar is installed,
//! its signals are connected to a command queue that the window drains after
//! each OS event, so a button release observed deep in widget dispatch turns
//! into a native minimize/maximize/close/move without re-entrant borrows of
//! the window.
//!
//! # Closing
//!
//! A close request (OS or close button) runs the overridable close hook and
//! the root widget's event filters against a [`CloseEvent`] that starts out
//! accepted. If nobody vetoes, [`FramelessWindow::close_requested`] is
//! emitted and the window hides; dropping the window destroys the native
//! handle. A veto leaves the window up.

use std::sync::Arc;

use parking_lot::Mutex;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;

use casement_core::logging::targets;
use casement_core::{Object, ObjectId, Signal, object_cast_mut};

use crate::geometry::{Point, Rect, Size};
use crate::paint::Painter;
use crate::platform;
use crate::widget::keyboard::from_winit_modifiers;
use crate::widget::{
    BoxLayout, CloseEvent, ContentMargins, EnterEvent, EventDispatcher, FocusManager, FocusReason,
    FrameRenderer, FrameStats, Key, KeyboardEvent, KeyboardInputHandler, LeaveEvent, ModalManager,
    MouseButton, MouseEvent, MouseInputHandler, MouseMoveEvent, MousePressEvent,
    MouseReleaseEvent, RepaintManager, Widget, WidgetAccess, WidgetEvent, WidgetStore,
};
use crate::window::{NativeWindow, NativeWindowError, NativeWindowId, WindowConfig, WindowIcon};

use super::dialog::DialogHost;
use super::resize_edge::{EdgeSet, RESIZE_MARGIN};
use super::surface::ChromeSurface;
use super::title_bar::TitleBar;

/// Default logical client size of a new window.
const DEFAULT_SIZE: (u32, u32) = (1100, 700);

/// Vendor used for the process grouping identity until the host sets one.
const DEFAULT_VENDOR: &str = "casement";

type CloseHook = Box<dyn FnMut(&mut CloseEvent) + Send>;

/// Deferred actions requested by the title bar through its signals.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ChromeCommand {
    Minimize,
    ToggleMaximize,
    RequestClose,
    StartDrag,
    SetAppName(String),
}

type CommandQueue = Arc<Mutex<Vec<ChromeCommand>>>;

/// Connect a title bar's signals to the window's command queue.
fn wire_title_bar(commands: &CommandQueue, bar: &TitleBar) {
    let queue = Arc::clone(commands);
    bar.minimize_requested
        .connect(move |_| queue.lock().push(ChromeCommand::Minimize));

    let queue = Arc::clone(commands);
    bar.maximize_toggle_requested
        .connect(move |_| queue.lock().push(ChromeCommand::ToggleMaximize));

    let queue = Arc::clone(commands);
    bar.close_requested
        .connect(move |_| queue.lock().push(ChromeCommand::RequestClose));

    let queue = Arc::clone(commands);
    bar.drag_started
        .connect(move |_| queue.lock().push(ChromeCommand::StartDrag));

    let queue = Arc::clone(commands);
    bar.app_name_change_requested
        .connect(move |name: &String| queue.lock().push(ChromeCommand::SetAppName(name.clone())));
}

/// The resize edges under a pointer, honoring the maximized state.
///
/// A maximized window cannot be resized interactively, so the set is always
/// empty there regardless of pointer position.
fn hovered_edges_at(pos: Point, size: Size, maximized: bool) -> EdgeSet {
    if maximized {
        EdgeSet::EMPTY
    } else {
        EdgeSet::at(pos, size, RESIZE_MARGIN)
    }
}

/// The widget tree and layout of a frameless window, separated from the
/// native shell so the structure can be built and tested without an OS
/// window.
struct ChromeTree {
    store: WidgetStore,
    root_id: ObjectId,
    layout: BoxLayout,
    title_bar_id: Option<ObjectId>,
}

impl ChromeTree {
    fn new() -> Self {
        let mut store = WidgetStore::new();
        let root_id = store.add(ChromeSurface::new());

        let mut layout = BoxLayout::vertical();
        layout.set_content_margins(ContentMargins::ZERO);
        layout.set_spacing(0.0);

        Self {
            store,
            root_id,
            layout,
            title_bar_id: None,
        }
    }

    /// Resize the root surface and rerun the layout.
    fn relayout(&mut self, size: Size) {
        let rect = Rect::new(0.0, 0.0, size.width, size.height);
        if let Some(root) = self.store.get_widget_mut(self.root_id) {
            root.set_geometry(rect);
        }
        self.layout.set_geometry(rect);
        self.layout.activate(&mut self.store);
    }

    /// Install `bar` as layout item 0, replacing any previous bar.
    fn set_title_bar(&mut self, mut bar: TitleBar, commands: &CommandQueue) -> ObjectId {
        if let Some(old_id) = self.title_bar_id.take() {
            self.layout.remove_widget(old_id);
            self.store.remove_subtree(old_id);
        }

        bar.attach_to_window(self.root_id);
        wire_title_bar(commands, &bar);

        let bar_id = bar.object_id();
        if let Err(error) = bar.widget_base().set_parent(Some(self.root_id)) {
            tracing::warn!(target: targets::WINDOW, %error, "failed to parent title bar");
        }
        self.store.add(bar);
        self.layout.insert_widget(0, bar_id);
        self.title_bar_id = Some(bar_id);
        bar_id
    }

    /// Append a content widget below the title bar.
    fn add_widget(&mut self, widget: impl Widget + 'static) -> ObjectId {
        if let Err(error) = widget.widget_base().set_parent(Some(self.root_id)) {
            tracing::warn!(target: targets::WINDOW, %error, "failed to parent content widget");
        }
        let id = self.store.add(widget);
        self.layout.add_widget(id);
        id
    }

    /// Run `f` against the installed title bar, if there is one.
    fn with_title_bar<R>(&mut self, f: impl FnOnce(&mut TitleBar) -> R) -> Option<R> {
        let bar_id = self.title_bar_id?;
        let widget = self.store.get_widget_mut(bar_id)?;
        let bar = object_cast_mut::<TitleBar>(widget as &mut dyn Object)?;
        Some(f(bar))
    }
}

/// Evaluate a close request against the hook and the root's event filters.
///
/// The event starts accepted; any party may veto by calling `ignore`.
fn close_decision(tree: &mut ChromeTree, hook: Option<&mut CloseHook>) -> bool {
    let mut close = CloseEvent::new();
    if let Some(hook) = hook {
        hook(&mut close);
    }
    let mut event = WidgetEvent::Close(close);
    EventDispatcher::send_event_direct(&mut tree.store, tree.root_id, &mut event);
    event.is_accepted()
}

/// A decoration-less top-level window with widget-based chrome.
///
/// See the [module documentation](self) for the interaction model.
///
/// # Panics
///
/// Construction panics if the global object registry has not been
/// initialized with [`casement_core::init_global_registry`].
pub struct FramelessWindow {
    native: NativeWindow,
    tree: ChromeTree,
    focus: FocusManager,
    mouse: MouseInputHandler,
    keyboard: KeyboardInputHandler,
    repaints: RepaintManager,
    commands: CommandQueue,
    hovered_edges: EdgeSet,
    hovered_widget: Option<ObjectId>,
    grabbed_widget: Option<ObjectId>,
    maximized: bool,
    app_name: String,
    vendor: String,
    icon: Option<WindowIcon>,
    close_hook: Option<CloseHook>,

    /// Emitted whenever the set of resize edges under the pointer changes,
    /// including the transition back to empty.
    pub resize_edge_changed: Signal<EdgeSet>,
    /// Emitted when a close request was accepted. The window is hidden at
    /// this point; the host decides when to drop it.
    pub close_requested: Signal<()>,
}

impl FramelessWindow {
    /// Create a frameless window titled `app_name` with an optional icon.
    ///
    /// The window comes up at 1100x700 logical pixels with an empty chrome
    /// tree; install a [`TitleBar`] and content widgets afterwards. The
    /// process grouping identity is applied immediately from the default
    /// vendor and `app_name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform refuses to create the window.
    pub fn new(
        event_loop: &ActiveEventLoop,
        app_name: impl Into<String>,
        icon: Option<WindowIcon>,
    ) -> Result<Self, NativeWindowError> {
        let app_name = app_name.into();
        let mut config =
            WindowConfig::new(&app_name).with_size(DEFAULT_SIZE.0, DEFAULT_SIZE.1);
        if let Some(icon) = icon.clone() {
            config = config.with_icon(icon);
        }
        let native = NativeWindow::create(event_loop, config)?;

        let mut tree = ChromeTree::new();
        let logical = native.inner_size_logical();
        tree.relayout(Size::new(logical.width as f32, logical.height as f32));

        let mut window = Self {
            native,
            tree,
            focus: FocusManager::new(),
            mouse: MouseInputHandler::new(),
            keyboard: KeyboardInputHandler::new(),
            repaints: RepaintManager::new(),
            commands: Arc::new(Mutex::new(Vec::new())),
            hovered_edges: EdgeSet::EMPTY,
            hovered_widget: None,
            grabbed_widget: None,
            maximized: false,
            app_name,
            vendor: DEFAULT_VENDOR.to_string(),
            icon,
            close_hook: None,
            resize_edge_changed: Signal::new(),
            close_requested: Signal::new(),
        };
        window.repaints.invalidate_all();
        platform::apply_grouping_identity(&platform::grouping_identity(
            &window.vendor,
            &window.app_name,
        ));
        tracing::debug!(
            target: targets::WINDOW,
            title = %window.app_name,
            "frameless window created"
        );
        Ok(window)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The underlying native window.
    pub fn native(&self) -> &NativeWindow {
        &self.native
    }

    /// The native window id.
    pub fn id(&self) -> NativeWindowId {
        self.native.id()
    }

    /// Root widget of the chrome tree.
    pub fn root_widget_id(&self) -> ObjectId {
        self.tree.root_id
    }

    /// The installed title bar's widget id, if any.
    pub fn title_bar_id(&self) -> Option<ObjectId> {
        self.tree.title_bar_id
    }

    /// The widget store backing this window.
    pub fn widgets(&self) -> &WidgetStore {
        &self.tree.store
    }

    /// Mutable access to the widget store.
    pub fn widgets_mut(&mut self) -> &mut WidgetStore {
        &mut self.tree.store
    }

    /// The widget holding keyboard focus, if any.
    pub fn focused_widget(&self) -> Option<ObjectId> {
        self.focus.focused_widget()
    }

    /// The resize edges currently under the pointer.
    pub fn hovered_edges(&self) -> EdgeSet {
        self.hovered_edges
    }

    /// Whether the native window is maximized, as last reported by the OS.
    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// The application display name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// The vendor segment of the grouping identity.
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Set the vendor segment of the grouping identity.
    ///
    /// Takes effect on the next [`set_app_name`](Self::set_app_name) call.
    pub fn set_vendor(&mut self, vendor: impl Into<String>) {
        self.vendor = vendor.into();
    }

    /// Client area size in logical pixels.
    pub fn inner_size(&self) -> Size {
        let logical = self.native.inner_size_logical();
        Size::new(logical.width as f32, logical.height as f32)
    }

    /// Show the native window.
    pub fn show(&self) {
        self.native.show();
    }

    /// Hide the native window.
    pub fn hide(&self) {
        self.native.hide();
    }

    /// Schedule a redraw of the window content.
    pub fn request_redraw(&self) {
        self.native.request_redraw();
    }

    // =========================================================================
    // Chrome Structure
    // =========================================================================

    /// Install `bar` at the top of the window, replacing any previous bar.
    ///
    /// The bar is seeded with the current app name, icon, and maximized
    /// state, and its signals are wired to this window. Returns the bar's
    /// widget id.
    pub fn set_title_bar(&mut self, mut bar: TitleBar) -> ObjectId {
        bar.set_title(self.app_name.clone());
        bar.set_icon(self.icon.clone());
        bar.set_maximized(self.maximized);
        let bar_id = self.tree.set_title_bar(bar, &self.commands);
        self.relayout();
        bar_id
    }

    /// Append a content widget below the title bar.
    pub fn add_widget(&mut self, widget: impl Widget + 'static) -> ObjectId {
        let id = self.tree.add_widget(widget);
        self.relayout();
        id
    }

    /// Rename the application.
    ///
    /// Updates the native title, the title bar label when a bar is
    /// installed, and re-applies the process grouping identity.
    pub fn set_app_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.native.set_title(&name);
        self.tree.with_title_bar(|bar| bar.set_title(name.clone()));
        self.app_name = name;
        platform::apply_grouping_identity(&platform::grouping_identity(
            &self.vendor,
            &self.app_name,
        ));
    }

    /// Replace the window icon in both the native window and the title bar.
    ///
    /// `None` clears the icon; the bar then renders nothing in its icon
    /// slot.
    pub fn set_icon(&mut self, icon: Option<WindowIcon>) {
        self.native.set_icon(icon.as_ref());
        self.tree.with_title_bar(|bar| bar.set_icon(icon.clone()));
        self.icon = icon;
    }

    /// Replace the close hook.
    ///
    /// The hook observes every close request before it is granted and may
    /// veto it by calling `ignore` on the event.
    pub fn set_close_hook(&mut self, hook: impl FnMut(&mut CloseEvent) + Send + 'static) {
        self.close_hook = Some(Box::new(hook));
    }

    // =========================================================================
    // Window Operations
    // =========================================================================

    /// Run a close request through the hook and root event filters.
    ///
    /// When accepted, [`close_requested`](Self::close_requested) is emitted
    /// and the window hides. Returns whether the close was accepted.
    pub fn request_close(&mut self) -> bool {
        let accepted = close_decision(&mut self.tree, self.close_hook.as_mut());
        if accepted {
            tracing::debug!(target: targets::WINDOW, "close request accepted");
            self.close_requested.emit(());
            self.native.hide();
        } else {
            tracing::debug!(target: targets::WINDOW, "close request vetoed");
        }
        accepted
    }

    /// Toggle between maximized and restored.
    pub fn toggle_maximized(&mut self) {
        if self.native.is_maximized() {
            self.native.restore();
        } else {
            self.native.maximize();
        }
        self.sync_maximized_state();
    }

    /// Repaint everything on the next [`render`](Self::render).
    pub fn invalidate(&mut self) {
        self.repaints.invalidate_all();
    }

    /// Paint the chrome tree with the host's painter.
    ///
    /// Dirty-flag tracking decides which widgets actually paint unless a
    /// full repaint is pending.
    pub fn render(&mut self, painter: &mut dyn Painter) -> FrameStats {
        let focused = self.focus.focused_widget();
        let stats = if self.repaints.needs_full_repaint() {
            let size = self.inner_size();
            let full = Rect::new(0.0, 0.0, size.width, size.height);
            FrameRenderer::render_frame_region_with_focus(
                &mut self.tree.store,
                self.tree.root_id,
                painter,
                full,
                focused,
            )
        } else {
            FrameRenderer::render_frame_with_focus(
                &mut self.tree.store,
                self.tree.root_id,
                painter,
                focused,
            )
        };
        self.repaints.clear();
        stats
    }

    // =========================================================================
    // OS Event Routing
    // =========================================================================

    /// Feed a winit window event into the chrome.
    ///
    /// The host calls this for every event carrying this window's id, then
    /// presents on `RedrawRequested` using [`render`](Self::render).
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                if !self.input_blocked() {
                    let logical = position.to_logical::<f64>(self.native.scale_factor());
                    self.pointer_moved(Point::new(logical.x as f32, logical.y as f32));
                }
            }
            WindowEvent::CursorEntered { .. } => {
                self.mouse.handle_cursor_entered();
            }
            WindowEvent::CursorLeft { .. } => self.pointer_left(),
            WindowEvent::MouseInput { state, button, .. } => {
                if !self.input_blocked() {
                    self.mouse_input(*state, *button);
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.keyboard.update_modifiers(modifiers);
                self.mouse.update_modifiers(from_winit_modifiers(modifiers));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if !self.input_blocked() {
                    self.keyboard_input(event);
                }
            }
            WindowEvent::CloseRequested => {
                self.request_close();
            }
            WindowEvent::Resized(size) => self.resized(*size),
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self.inner_size();
                self.tree.relayout(size);
                self.repaints.invalidate_all();
            }
            WindowEvent::Focused(false) => self.release_transient_state(),
            _ => {}
        }

        self.apply_pending_commands();
        if self.has_dirty_widgets() {
            self.native.request_redraw();
        }
    }

    /// Whether an application-modal dialog is blocking this window's input.
    fn input_blocked(&self) -> bool {
        ModalManager::is_blocked(self.tree.root_id)
    }

    fn relayout(&mut self) {
        let size = self.inner_size();
        self.tree.relayout(size);
    }

    fn pointer_moved(&mut self, window_pos: Point) {
        let move_event = self.mouse.handle_cursor_moved(window_pos);

        let edges = hovered_edges_at(window_pos, self.inner_size(), self.maximized);
        if edges != self.hovered_edges {
            self.hovered_edges = edges;
            self.resize_edge_changed.emit(edges);
            self.apply_cursor();
        }

        if self.hovered_edges.is_empty() {
            self.route_mouse_move(move_event);
        } else if let Some(prev) = self.hovered_widget.take() {
            // The resize margin owns the pointer; widgets lose the hover.
            self.send_leave(prev);
            self.apply_cursor();
        }
    }

    fn route_mouse_move(&mut self, move_event: MouseMoveEvent) {
        if let Some(grab) = self.grabbed_widget {
            let local =
                EventDispatcher::window_to_local(&self.tree.store, grab, move_event.window_pos);
            let mut event = WidgetEvent::MouseMove(MouseMoveEvent::new(
                local,
                move_event.window_pos,
                move_event.buttons,
                move_event.modifiers,
            ));
            EventDispatcher::send_event(&mut self.tree.store, grab, &mut event);
            return;
        }

        let hit =
            EventDispatcher::hit_test(&self.tree.store, self.tree.root_id, move_event.window_pos);
        if hit != self.hovered_widget {
            if let Some(prev) = self.hovered_widget {
                self.send_leave(prev);
            }
            if let Some(next) = hit {
                let local =
                    EventDispatcher::window_to_local(&self.tree.store, next, move_event.window_pos);
                let mut enter = WidgetEvent::Enter(EnterEvent::new(local));
                EventDispatcher::send_event_direct(&mut self.tree.store, next, &mut enter);
                if let Some(widget) = self.tree.store.get_widget_mut(next) {
                    widget.widget_base_mut().set_hovered(true);
                }
            }
            self.hovered_widget = hit;
            self.apply_cursor();
        }

        if let Some(target) = self.hovered_widget {
            let local =
                EventDispatcher::window_to_local(&self.tree.store, target, move_event.window_pos);
            let mut event = WidgetEvent::MouseMove(MouseMoveEvent::new(
                local,
                move_event.window_pos,
                move_event.buttons,
                move_event.modifiers,
            ));
            EventDispatcher::send_event(&mut self.tree.store, target, &mut event);
        }
    }

    fn send_leave(&mut self, widget_id: ObjectId) {
        let mut leave = WidgetEvent::Leave(LeaveEvent::new());
        EventDispatcher::send_event_direct(&mut self.tree.store, widget_id, &mut leave);
        if let Some(widget) = self.tree.store.get_widget_mut(widget_id) {
            widget.widget_base_mut().set_hovered(false);
        }
    }

    fn apply_cursor(&self) {
        let shape = match self.hovered_edges.cursor_shape() {
            Some(shape) => shape,
            None => self
                .hovered_widget
                .map(|id| EventDispatcher::get_effective_cursor(&self.tree.store, id))
                .unwrap_or_default(),
        };
        self.native.set_cursor(shape.to_winit_cursor());
    }

    fn pointer_left(&mut self) {
        self.mouse.handle_cursor_left();
        if let Some(prev) = self.hovered_widget.take() {
            self.send_leave(prev);
        }
        if !self.hovered_edges.is_empty() {
            self.hovered_edges = EdgeSet::EMPTY;
            self.resize_edge_changed.emit(EdgeSet::EMPTY);
        }
    }

    fn mouse_input(&mut self, state: ElementState, button: WinitMouseButton) {
        let Some(event) = self.mouse.handle_mouse_input(state, button) else {
            return;
        };
        match event {
            MouseEvent::Press(press) => self.dispatch_press(press, false),
            MouseEvent::DoubleClick(click) => {
                let press = MousePressEvent::new(
                    click.button,
                    click.local_pos,
                    click.window_pos,
                    click.modifiers,
                );
                self.dispatch_press(press, true);
            }
            MouseEvent::Release(release) => self.dispatch_release(release),
            _ => {}
        }
    }

    fn dispatch_press(&mut self, press: MousePressEvent, double_click: bool) {
        // Resize margins take the gesture before any widget sees it.
        if press.button == MouseButton::Left
            && !self.maximized
            && let Some(direction) = self.hovered_edges.resize_direction()
        {
            tracing::debug!(
                target: targets::WINDOW,
                direction = ?direction,
                "starting interactive resize"
            );
            if let Err(error) = self.native.drag_resize_window(direction) {
                tracing::debug!(target: targets::WINDOW, %error, "interactive resize rejected");
            }
            return;
        }

        let Some(hit) =
            EventDispatcher::hit_test(&self.tree.store, self.tree.root_id, press.window_pos)
        else {
            return;
        };

        let wants_focus = self
            .tree
            .store
            .get_widget(hit)
            .is_some_and(|w| w.accepts_click_focus() && w.is_focusable());
        if wants_focus {
            self.focus
                .set_focus(&mut self.tree.store, hit, FocusReason::Mouse);
        }

        self.grabbed_widget = Some(hit);
        if let Some(widget) = self.tree.store.get_widget_mut(hit) {
            widget.widget_base_mut().set_pressed(true);
        }

        let local = EventDispatcher::window_to_local(&self.tree.store, hit, press.window_pos);
        let mut event = if double_click {
            WidgetEvent::DoubleClick(crate::widget::MouseDoubleClickEvent::new(
                press.button,
                local,
                press.window_pos,
                press.modifiers,
            ))
        } else {
            WidgetEvent::MousePress(MousePressEvent::new(
                press.button,
                local,
                press.window_pos,
                press.modifiers,
            ))
        };
        EventDispatcher::send_event(&mut self.tree.store, hit, &mut event);
    }

    fn dispatch_release(&mut self, release: MouseReleaseEvent) {
        let target = self.grabbed_widget.take().or_else(|| {
            EventDispatcher::hit_test(&self.tree.store, self.tree.root_id, release.window_pos)
        });
        let Some(target) = target else {
            return;
        };

        if let Some(widget) = self.tree.store.get_widget_mut(target) {
            widget.widget_base_mut().set_pressed(false);
        }

        let local = EventDispatcher::window_to_local(&self.tree.store, target, release.window_pos);
        let mut event = WidgetEvent::MouseRelease(MouseReleaseEvent::new(
            release.button,
            local,
            release.window_pos,
            release.modifiers,
        ));
        EventDispatcher::send_event(&mut self.tree.store, target, &mut event);
    }

    fn keyboard_input(&mut self, key_event: &KeyEvent) {
        let event = self.keyboard.process_key_event(
            &key_event.logical_key,
            key_event.state,
            key_event.text.as_deref(),
            key_event.repeat,
        );

        if let KeyboardEvent::Press(press) = &event
            && press.key == Key::Tab
        {
            if press.modifiers.shift {
                self.focus
                    .focus_previous(&mut self.tree.store, self.tree.root_id);
            } else {
                self.focus.focus_next(&mut self.tree.store, self.tree.root_id);
            }
            return;
        }

        let Some(target) = self.focus.focused_widget() else {
            return;
        };
        let mut widget_event = event.into_widget_event();
        EventDispatcher::send_event(&mut self.tree.store, target, &mut widget_event);
    }

    fn resized(&mut self, new_size: PhysicalSize<u32>) {
        let logical = new_size.to_logical::<f64>(self.native.scale_factor());
        self.tree
            .relayout(Size::new(logical.width as f32, logical.height as f32));
        self.sync_maximized_state();
    }

    /// Pull the native maximized state and propagate a change to the edge
    /// tracking and the title bar glyph.
    fn sync_maximized_state(&mut self) {
        let maximized = self.native.is_maximized();
        if maximized == self.maximized {
            return;
        }
        self.maximized = maximized;
        if maximized && !self.hovered_edges.is_empty() {
            self.hovered_edges = EdgeSet::EMPTY;
            self.resize_edge_changed.emit(EdgeSet::EMPTY);
            self.apply_cursor();
        }
        self.tree.with_title_bar(|bar| bar.set_maximized(maximized));
    }

    fn release_transient_state(&mut self) {
        if let Some(grab) = self.grabbed_widget.take()
            && let Some(widget) = self.tree.store.get_widget_mut(grab)
        {
            widget.widget_base_mut().set_pressed(false);
        }
        self.mouse.reset();
    }

    /// Execute the actions queued by title bar signals during dispatch.
    fn apply_pending_commands(&mut self) {
        loop {
            let pending: Vec<ChromeCommand> = std::mem::take(&mut *self.commands.lock());
            if pending.is_empty() {
                return;
            }
            for command in pending {
                match command {
                    ChromeCommand::Minimize => self.native.minimize(),
                    ChromeCommand::ToggleMaximize => self.toggle_maximized(),
                    ChromeCommand::RequestClose => {
                        self.request_close();
                    }
                    ChromeCommand::StartDrag => {
                        if let Err(error) = self.native.drag_window() {
                            tracing::debug!(
                                target: targets::WINDOW,
                                %error,
                                "window move rejected"
                            );
                        }
                    }
                    ChromeCommand::SetAppName(name) => self.set_app_name(name),
                }
            }
        }
    }

    fn has_dirty_widgets(&self) -> bool {
        self.repaints.has_pending()
            || self
                .tree
                .store
                .ids()
                .any(|id| {
                    self.tree
                        .store
                        .get_widget(id)
                        .is_some_and(|w| w.needs_repaint())
                })
    }
}

impl DialogHost for FramelessWindow {
    fn root_widget_id(&self) -> ObjectId {
        self.tree.root_id
    }

    fn frame_rect(&self) -> Option<Rect> {
        let position = self.native.outer_position().ok()?;
        let size = self.native.outer_size();
        Some(Rect::new(
            position.x as f32,
            position.y as f32,
            size.width as f32,
            size.height as f32,
        ))
    }

    fn focused_widget(&self) -> Option<ObjectId> {
        self.focus.focused_widget()
    }

    fn restore_focus(&mut self, widget: ObjectId) {
        self.focus
            .set_focus(&mut self.tree.store, widget, FocusReason::Other);
    }
}

#[cfg(test)]
static_assertions::assert_impl_all!(FramelessWindow: Send);
