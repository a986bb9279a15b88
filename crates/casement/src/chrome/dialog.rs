//! Application-modal dialogs.
//!
//! [`FramelessDialog`] is a fixed-size, undecorated dialog with the same
//! chrome surface as [`FramelessWindow`](super::FramelessWindow). It owns
//! its widget tree and focus chain; while it runs, the modal stack blocks
//! input to every other window and the parent's widget tree is disabled
//! through the object registry.
//!
//! # Running a dialog
//!
//! [`exec`](FramelessDialog::exec) blocks the calling thread until the
//! dialog resolves, so the resolution must arrive from somewhere else: a
//! [`DialogHandle`] is a cloneable remote that any thread may use to call
//! `accept`, `reject`, or `done`. Hosts that must keep their event loop
//! turning use [`open`](FramelessDialog::open) instead, which shows the
//! dialog with the same modal blocking but returns immediately; the run
//! then ends when the host calls [`done`](FramelessDialog::done) (or
//! `accept`/`reject`) while routing events.
//!
//! Either way the outcome is reported through
//! [`finished`](FramelessDialog::finished) and kept in
//! [`result`](FramelessDialog::result).
//!
//! # Parents
//!
//! `exec` takes the parent as a [`DialogHost`], which supplies the frame to
//! center over and the focus to restore afterwards. A dialog run without a
//! parent centers on the primary screen and skips the disable/restore
//! steps.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use winit::dpi::PhysicalPosition;
use winit::event_loop::ActiveEventLoop;

use casement_core::logging::targets;
use casement_core::{ObjectId, Signal, global_registry};

use crate::geometry::{Point, Rect, Size};
use crate::paint::Painter;
use crate::widget::{
    BoxLayout, ContentMargins, DispatchResult, EventDispatcher, FocusManager, FrameRenderer,
    FrameStats, Key, KeyPressEvent, ModalManager, Widget, WidgetAccess, WidgetEvent, WidgetStore,
    WindowModality,
};
use crate::window::{NativeWindow, NativeWindowError, WindowConfig};

use super::surface::ChromeSurface;

/// Logical client size of every dialog.
const WIDTH: f32 = 420.0;
const HEIGHT: f32 = 200.0;

/// How a dialog run ended.
///
/// The discriminants are stable: `Rejected` is zero so a code can be used
/// directly as a success flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum DialogCode {
    /// Dismissed without confirming: Escape, the close button, or an
    /// explicit `reject`.
    Rejected = 0,
    /// Confirmed.
    Accepted = 1,
}

/// Where a dialog is in its run lifecycle.
///
/// `Finished` is a handoff state: it holds the code until the blocked
/// `exec` picks it up, or goes stale and is overwritten by the next
/// `begin`.
enum ExecState {
    Idle,
    Running,
    Finished(DialogCode),
}

/// Synchronization between a blocked `exec` and whoever resolves it.
struct ExecGate {
    state: Mutex<ExecState>,
    dismissed: Condvar,
}

impl ExecGate {
    fn new() -> Self {
        Self {
            state: Mutex::new(ExecState::Idle),
            dismissed: Condvar::new(),
        }
    }

    /// Start a run. Fails only while another run is in progress; a stale
    /// `Finished` from an unobserved resolution is overwritten.
    fn begin(&self) -> bool {
        let mut state = self.state.lock();
        match *state {
            ExecState::Running => false,
            _ => {
                *state = ExecState::Running;
                true
            }
        }
    }

    /// Resolve the current run. Returns false when no run is in progress.
    fn finish(&self, code: DialogCode) -> bool {
        let mut state = self.state.lock();
        match *state {
            ExecState::Running => {
                *state = ExecState::Finished(code);
                self.dismissed.notify_all();
                true
            }
            _ => false,
        }
    }

    /// Block until the current run resolves, consuming the code and
    /// returning the gate to idle.
    fn wait(&self) -> DialogCode {
        let mut state = self.state.lock();
        loop {
            if let ExecState::Finished(code) = *state {
                *state = ExecState::Idle;
                return code;
            }
            self.dismissed.wait(&mut state);
        }
    }

    fn is_running(&self) -> bool {
        matches!(*self.state.lock(), ExecState::Running)
    }
}

/// A cloneable remote that resolves a running dialog from any thread.
///
/// Obtained from [`FramelessDialog::handle`]. Resolving through the handle
/// unblocks a thread sitting in [`FramelessDialog::exec`]; when no run is
/// in progress the call is logged and dropped.
#[derive(Clone)]
pub struct DialogHandle {
    gate: Arc<ExecGate>,
}

impl DialogHandle {
    /// Resolve the running dialog with [`DialogCode::Accepted`].
    pub fn accept(&self) {
        self.done(DialogCode::Accepted);
    }

    /// Resolve the running dialog with [`DialogCode::Rejected`].
    pub fn reject(&self) {
        self.done(DialogCode::Rejected);
    }

    /// Resolve the running dialog with `code`.
    pub fn done(&self, code: DialogCode) {
        if !self.gate.finish(code) {
            tracing::debug!(
                target: targets::DIALOG,
                code = ?code,
                "dialog resolution dropped; no run in progress"
            );
        }
    }
}

/// The parent-side surface a dialog needs from the window that spawned it.
///
/// [`FramelessWindow`](super::FramelessWindow) implements this; tests
/// substitute their own.
pub trait DialogHost {
    /// Root widget of the host's chrome tree, used as the modal blocking
    /// scope and disabled for the duration of the run.
    fn root_widget_id(&self) -> ObjectId;

    /// The host window's frame in desktop coordinates, for centering.
    /// `None` when the platform cannot report a position.
    fn frame_rect(&self) -> Option<Rect>;

    /// The widget holding keyboard focus, captured before the run.
    fn focused_widget(&self) -> Option<ObjectId>;

    /// Give focus back to `widget` after the run.
    fn restore_focus(&mut self, widget: ObjectId);
}

/// A fixed-size application-modal dialog.
///
/// See the [module documentation](self) for the run model.
///
/// # Panics
///
/// Construction panics if the global object registry has not been
/// initialized with [`casement_core::init_global_registry`].
pub struct FramelessDialog {
    store: WidgetStore,
    root_id: ObjectId,
    content_layout: BoxLayout,
    focus: FocusManager,
    gate: Arc<ExecGate>,
    result: DialogCode,
    /// Planned placement in desktop coordinates. Updated by centering;
    /// meaningful to callers even without a native window.
    frame: Rect,
    native: Option<NativeWindow>,
    open_run: bool,

    /// Emitted once per resolution with the final code.
    pub finished: Signal<DialogCode>,
}

impl FramelessDialog {
    /// Create a dialog with an empty content area and no native window.
    ///
    /// The dialog is fully functional headless; attach an OS window with
    /// [`create_window`](Self::create_window) before running it for real.
    pub fn new() -> Self {
        let mut store = WidgetStore::new();
        let root_id = store.add(ChromeSurface::new());

        let mut content_layout = BoxLayout::vertical();
        content_layout.set_content_margins(ContentMargins::uniform(16.0));
        content_layout.set_spacing(12.0);

        let mut dialog = Self {
            store,
            root_id,
            content_layout,
            focus: FocusManager::new(),
            gate: Arc::new(ExecGate::new()),
            result: DialogCode::Rejected,
            frame: Rect::new(0.0, 0.0, WIDTH, HEIGHT),
            native: None,
            open_run: false,
            finished: Signal::new(),
        };
        dialog.relayout();
        dialog
    }

    /// Create the native window backing this dialog.
    ///
    /// The window is fixed-size, undecorated, and stays hidden until a run
    /// starts, so it can be created well before it is needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform refuses to create the window.
    pub fn create_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        title: impl Into<String>,
    ) -> Result<(), NativeWindowError> {
        let config = WindowConfig::new(title)
            .with_size(WIDTH as u32, HEIGHT as u32)
            .with_resizable(false)
            .with_visible(false);
        self.native = Some(NativeWindow::create(event_loop, config)?);
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Root widget of the dialog's chrome tree.
    pub fn root_widget_id(&self) -> ObjectId {
        self.root_id
    }

    /// The widget store backing this dialog.
    pub fn widgets(&self) -> &WidgetStore {
        &self.store
    }

    /// Mutable access to the widget store.
    pub fn widgets_mut(&mut self) -> &mut WidgetStore {
        &mut self.store
    }

    /// The widget holding keyboard focus inside the dialog, if any.
    pub fn focused_widget(&self) -> Option<ObjectId> {
        self.focus.focused_widget()
    }

    /// The underlying native window, when one has been created.
    pub fn native(&self) -> Option<&NativeWindow> {
        self.native.as_ref()
    }

    /// The code of the most recent resolution.
    ///
    /// `Rejected` until a run has finished.
    pub fn result(&self) -> DialogCode {
        self.result
    }

    /// The planned placement in desktop coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.gate.is_running()
    }

    /// A remote control for resolving this dialog from another thread.
    pub fn handle(&self) -> DialogHandle {
        DialogHandle {
            gate: Arc::clone(&self.gate),
        }
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Append a widget to the dialog's content column.
    pub fn add_content(&mut self, widget: impl Widget + 'static) -> ObjectId {
        if let Err(error) = widget.widget_base().set_parent(Some(self.root_id)) {
            tracing::warn!(target: targets::DIALOG, %error, "failed to parent dialog content");
        }
        let id = self.store.add(widget);
        self.content_layout.add_widget(id);
        self.relayout();
        id
    }

    /// The layout managing the content column.
    pub fn content_layout(&mut self) -> &mut BoxLayout {
        &mut self.content_layout
    }

    fn relayout(&mut self) {
        let rect = Rect::new(0.0, 0.0, WIDTH, HEIGHT);
        if let Some(root) = self.store.get_widget_mut(self.root_id) {
            root.set_geometry(rect);
        }
        self.content_layout.set_geometry(rect);
        self.content_layout.activate(&mut self.store);
    }

    // =========================================================================
    // Running
    // =========================================================================

    /// Show the dialog and block until it resolves.
    ///
    /// With a parent, its widget tree is disabled and the dialog centers
    /// over its frame; focus returns to the parent's focused widget
    /// afterwards. Input blocking for every window is enforced through the
    /// modal stack regardless of parent.
    ///
    /// Calling `exec` while a run started by [`open`](Self::open) is still
    /// in progress returns the previous [`result`](Self::result)
    /// immediately instead of blocking.
    pub fn exec(&mut self, mut parent: Option<&mut dyn DialogHost>) -> DialogCode {
        if !self.gate.begin() {
            tracing::warn!(
                target: targets::DIALOG,
                "exec while a run is in progress; returning previous result"
            );
            return self.result;
        }

        let (saved_focus, parent_root, parent_frame) = match parent.as_deref() {
            Some(host) => (
                host.focused_widget(),
                Some(host.root_widget_id()),
                host.frame_rect(),
            ),
            None => (None, None, None),
        };

        if let Some(root) = parent_root
            && let Ok(registry) = global_registry()
        {
            let _ = registry.set_widget_enabled(root, false);
        }
        ModalManager::push_modal(
            self.root_id,
            WindowModality::ApplicationModal,
            parent_root,
        );
        self.center_on(parent_frame);
        self.show_and_raise();
        tracing::debug!(target: targets::DIALOG, "modal run started");

        let code = self.gate.wait();

        ModalManager::pop_modal(self.root_id);
        if let Some(root) = parent_root
            && let Ok(registry) = global_registry()
        {
            let _ = registry.set_widget_enabled(root, true);
        }
        if let Some(host) = parent.as_deref_mut()
            && let Some(widget) = saved_focus
        {
            host.restore_focus(widget);
        }
        self.hide_native();
        self.result = code;
        tracing::debug!(target: targets::DIALOG, code = ?code, "modal run finished");
        self.finished.emit(code);
        code
    }

    /// Show the dialog modally without blocking.
    ///
    /// The run has no parent: the dialog centers on the primary screen and
    /// no widget tree is disabled, though the modal stack still blocks
    /// input to other windows. The host ends the run with
    /// [`done`](Self::done), [`accept`](Self::accept), or
    /// [`reject`](Self::reject).
    pub fn open(&mut self) {
        if !self.gate.begin() {
            tracing::warn!(target: targets::DIALOG, "open while a run is in progress");
            return;
        }
        self.open_run = true;
        ModalManager::push_modal(self.root_id, WindowModality::ApplicationModal, None);
        self.center_on(None);
        self.show_and_raise();
        tracing::debug!(target: targets::DIALOG, "non-blocking modal run started");
    }

    /// Resolve the dialog with `code`.
    ///
    /// Ends an [`open`](Self::open) run in place, or releases a thread
    /// blocked in [`exec`](Self::exec) when called through a
    /// [`DialogHandle`]. Safe to call with no run in progress; the result
    /// is recorded either way.
    pub fn done(&mut self, code: DialogCode) {
        self.result = code;
        self.gate.finish(code);
        self.open_run = false;
        ModalManager::pop_modal(self.root_id);
        self.hide_native();
        self.finished.emit(code);
    }

    /// Resolve with [`DialogCode::Accepted`].
    pub fn accept(&mut self) {
        self.done(DialogCode::Accepted);
    }

    /// Resolve with [`DialogCode::Rejected`].
    pub fn reject(&mut self) {
        self.done(DialogCode::Rejected);
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// React to the OS asking the dialog to close. Closing rejects.
    pub fn handle_close_request(&mut self) {
        self.reject();
    }

    /// Route a key press into the dialog.
    ///
    /// Escape rejects; Tab and Shift+Tab cycle focus through the dialog's
    /// own widgets, wrapping at the ends. Anything else goes to the focused
    /// widget. Returns whether the press was consumed.
    pub fn handle_key_press(&mut self, press: KeyPressEvent) -> bool {
        if press.key == Key::Escape {
            self.reject();
            return true;
        }
        if press.key == Key::Tab {
            if press.modifiers.shift {
                self.focus.focus_previous(&mut self.store, self.root_id);
            } else {
                self.focus.focus_next(&mut self.store, self.root_id);
            }
            return true;
        }

        let Some(target) = self.focus.focused_widget() else {
            return false;
        };
        let mut event = WidgetEvent::KeyPress(press);
        matches!(
            EventDispatcher::send_event(&mut self.store, target, &mut event),
            DispatchResult::Accepted | DispatchResult::Filtered
        )
    }

    /// Paint the dialog with the host's painter.
    ///
    /// Dialogs are small and fixed-size, so every frame paints the whole
    /// tree.
    pub fn render(&mut self, painter: &mut dyn Painter) -> FrameStats {
        let full = Rect::new(0.0, 0.0, WIDTH, HEIGHT);
        FrameRenderer::render_frame_region_with_focus(
            &mut self.store,
            self.root_id,
            painter,
            full,
            self.focus.focused_widget(),
        )
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Center the frame on the parent, falling back to the primary screen,
    /// and move the native window there. Without either metric the frame
    /// is left unchanged.
    fn center_on(&mut self, parent_frame: Option<Rect>) {
        let target = parent_frame
            .map(|frame| frame.center())
            .or_else(|| self.primary_screen_center());
        let Some(center) = target else {
            return;
        };

        self.frame = Rect::from_center(center, Size::new(WIDTH, HEIGHT));
        if let Some(native) = &self.native {
            native.set_outer_position(PhysicalPosition::new(
                self.frame.left() as i32,
                self.frame.top() as i32,
            ));
        }
    }

    fn primary_screen_center(&self) -> Option<Point> {
        let native = self.native.as_ref()?;
        let monitor = native.primary_monitor()?;
        let position = monitor.position();
        let size = monitor.size();
        Some(Point::new(
            position.x as f32 + size.width as f32 / 2.0,
            position.y as f32 + size.height as f32 / 2.0,
        ))
    }

    fn show_and_raise(&self) {
        if let Some(native) = &self.native {
            native.show();
            native.focus();
        }
    }

    fn hide_native(&self) {
        if let Some(native) = &self.native {
            native.hide();
        }
    }
}

impl Default for FramelessDialog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
static_assertions::assert_impl_all!(DialogHandle: Send, Sync);
#[cfg(test)]
static_assertions::assert_impl_all!(FramelessDialog: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::PaintContext;
    use crate::widget::{FocusPolicy, KeyboardModifiers, SizeHint, WidgetBase};
    use casement_core::{Object, init_global_registry};
    use serial_test::serial;
    use std::thread;
    use std::time::Duration;

    struct Probe {
        base: WidgetBase,
    }

    impl Probe {
        fn new() -> Self {
            Self {
                base: WidgetBase::new::<Self>(),
            }
        }

        fn focusable() -> Self {
            let mut probe = Self::new();
            probe.base.set_focus_policy(FocusPolicy::StrongFocus);
            probe
        }
    }

    impl Object for Probe {
        fn object_id(&self) -> ObjectId {
            self.base.object_id()
        }
    }

    impl Widget for Probe {
        fn widget_base(&self) -> &WidgetBase {
            &self.base
        }

        fn widget_base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }

        fn size_hint(&self) -> SizeHint {
            SizeHint::from_dimensions(80.0, 24.0)
        }

        fn paint(&self, _ctx: &mut PaintContext<'_>) {}
    }

    struct MockHost {
        root_id: ObjectId,
        frame: Rect,
        focused: Option<ObjectId>,
        restored: Vec<ObjectId>,
    }

    impl DialogHost for MockHost {
        fn root_widget_id(&self) -> ObjectId {
            self.root_id
        }

        fn frame_rect(&self) -> Option<Rect> {
            Some(self.frame)
        }

        fn focused_widget(&self) -> Option<ObjectId> {
            self.focused
        }

        fn restore_focus(&mut self, widget: ObjectId) {
            self.restored.push(widget);
        }
    }

    fn setup() {
        init_global_registry();
        ModalManager::clear();
    }

    fn tab(shift: bool) -> KeyPressEvent {
        let modifiers = if shift {
            KeyboardModifiers::SHIFT
        } else {
            KeyboardModifiers::NONE
        };
        KeyPressEvent::new(Key::Tab, modifiers, "", false)
    }

    #[test]
    fn test_dialog_code_discriminants_are_stable() {
        assert_eq!(DialogCode::Rejected as i32, 0);
        assert_eq!(DialogCode::Accepted as i32, 1);
    }

    #[test]
    #[serial]
    fn test_exec_blocks_until_the_handle_resolves() {
        setup();
        let mut dialog = FramelessDialog::new();
        let handle = dialog.handle();

        let resolver = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            handle.accept();
        });

        let code = dialog.exec(None);
        resolver.join().expect("resolver thread");

        assert_eq!(code, DialogCode::Accepted);
        assert_eq!(dialog.result(), DialogCode::Accepted);
        assert!(!dialog.is_running());
        assert!(ModalManager::active_modal().is_none());
    }

    #[test]
    #[serial]
    fn test_handle_can_reject() {
        setup();
        let mut dialog = FramelessDialog::new();
        let handle = dialog.handle();

        let resolver = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.reject();
        });

        assert_eq!(dialog.exec(None), DialogCode::Rejected);
        resolver.join().expect("resolver thread");
    }

    #[test]
    #[serial]
    fn test_exec_disables_the_parent_for_the_duration() {
        setup();
        let mut parent_store = WidgetStore::new();
        let parent_root = parent_store.add(Probe::new());
        let mut host = MockHost {
            root_id: parent_root,
            frame: Rect::new(100.0, 100.0, 1000.0, 600.0),
            focused: Some(parent_root),
            restored: Vec::new(),
        };

        let mut dialog = FramelessDialog::new();
        let handle = dialog.handle();
        let observer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            let registry = global_registry().expect("registry");
            let during = registry
                .is_effectively_enabled(parent_root)
                .expect("known id");
            handle.accept();
            during
        });

        let code = dialog.exec(Some(&mut host));
        let during = observer.join().expect("observer thread");

        assert_eq!(code, DialogCode::Accepted);
        assert_eq!(during, Some(false));
        let after = global_registry()
            .expect("registry")
            .is_effectively_enabled(parent_root)
            .expect("known id");
        assert_eq!(after, Some(true));
        assert_eq!(host.restored, [parent_root]);
    }

    #[test]
    #[serial]
    fn test_exec_centers_over_the_parent_frame() {
        setup();
        let mut parent_store = WidgetStore::new();
        let parent_root = parent_store.add(Probe::new());
        let mut host = MockHost {
            root_id: parent_root,
            frame: Rect::new(100.0, 100.0, 1000.0, 600.0),
            focused: None,
            restored: Vec::new(),
        };

        let mut dialog = FramelessDialog::new();
        let handle = dialog.handle();
        let resolver = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.accept();
        });
        dialog.exec(Some(&mut host));
        resolver.join().expect("resolver thread");

        let center = dialog.frame().center();
        assert!((center.x - 600.0).abs() < 1.0);
        assert!((center.y - 400.0).abs() < 1.0);
        assert!(host.restored.is_empty());
    }

    #[test]
    #[serial]
    fn test_headless_parentless_exec_keeps_the_default_frame() {
        setup();
        let mut dialog = FramelessDialog::new();
        let before = dialog.frame();

        let handle = dialog.handle();
        let resolver = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.accept();
        });
        dialog.exec(None);
        resolver.join().expect("resolver thread");

        assert_eq!(dialog.frame(), before);
    }

    #[test]
    #[serial]
    fn test_exec_during_an_open_run_returns_without_blocking() {
        setup();
        let mut dialog = FramelessDialog::new();
        dialog.open();
        assert!(dialog.is_running());
        assert_eq!(ModalManager::active_modal(), Some(dialog.root_widget_id()));

        // Blocking here would deadlock the test; the stale result comes
        // back instead.
        assert_eq!(dialog.exec(None), DialogCode::Rejected);

        dialog.reject();
        assert!(!dialog.is_running());
        assert!(ModalManager::active_modal().is_none());
    }

    #[test]
    #[serial]
    fn test_open_run_resolves_in_place() {
        setup();
        let mut dialog = FramelessDialog::new();
        let emissions = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&emissions);
        dialog
            .finished
            .connect(move |code: &DialogCode| seen.lock().push(*code));

        dialog.open();
        dialog.accept();

        assert_eq!(dialog.result(), DialogCode::Accepted);
        assert!(!dialog.is_running());
        assert_eq!(emissions.lock().as_slice(), [DialogCode::Accepted]);
    }

    #[test]
    #[serial]
    fn test_dismissal_before_any_run_leaves_the_gate_reusable() {
        setup();
        let mut dialog = FramelessDialog::new();
        dialog.accept();
        assert_eq!(dialog.result(), DialogCode::Accepted);
        assert!(!dialog.is_running());

        let handle = dialog.handle();
        let resolver = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.reject();
        });
        assert_eq!(dialog.exec(None), DialogCode::Rejected);
        resolver.join().expect("resolver thread");
    }

    #[test]
    #[serial]
    fn test_escape_rejects() {
        setup();
        let mut dialog = FramelessDialog::new();
        dialog.open();

        let consumed = dialog.handle_key_press(KeyPressEvent::new(
            Key::Escape,
            KeyboardModifiers::NONE,
            "",
            false,
        ));

        assert!(consumed);
        assert!(!dialog.is_running());
        assert_eq!(dialog.result(), DialogCode::Rejected);
    }

    #[test]
    #[serial]
    fn test_close_request_rejects() {
        setup();
        let mut dialog = FramelessDialog::new();
        dialog.open();
        dialog.handle_close_request();
        assert_eq!(dialog.result(), DialogCode::Rejected);
        assert!(!dialog.is_running());
    }

    #[test]
    #[serial]
    fn test_tab_cycles_focus_inside_the_dialog() {
        setup();
        let mut dialog = FramelessDialog::new();
        let first = dialog.add_content(Probe::focusable());
        let second = dialog.add_content(Probe::focusable());
        let third = dialog.add_content(Probe::focusable());

        assert!(dialog.handle_key_press(tab(false)));
        assert_eq!(dialog.focused_widget(), Some(first));
        dialog.handle_key_press(tab(false));
        assert_eq!(dialog.focused_widget(), Some(second));
        dialog.handle_key_press(tab(false));
        assert_eq!(dialog.focused_widget(), Some(third));

        // Wraps instead of escaping the dialog.
        dialog.handle_key_press(tab(false));
        assert_eq!(dialog.focused_widget(), Some(first));

        dialog.handle_key_press(tab(true));
        assert_eq!(dialog.focused_widget(), Some(third));
    }

    #[test]
    #[serial]
    fn test_content_stacks_below_the_margins() {
        setup();
        let mut dialog = FramelessDialog::new();
        let first = dialog.add_content(Probe::new());
        let second = dialog.add_content(Probe::new());

        let first_rect = dialog.widgets().get_widget(first).expect("first").geometry();
        let second_rect = dialog
            .widgets()
            .get_widget(second)
            .expect("second")
            .geometry();

        assert_eq!(first_rect.top(), 16.0);
        assert_eq!(first_rect.left(), 16.0);
        assert!(second_rect.top() >= first_rect.bottom() + 12.0);
    }
}
