//! Native window wrapper.
//!
//! `NativeWindow` wraps the platform window (`winit::window::Window`) behind
//! the narrow surface the chrome layer needs: title and visibility, logical
//! geometry, minimize/maximize state, and the OS-driven interactive move and
//! resize loops.

use std::sync::Arc;

use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};
use thiserror::Error;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{ResizeDirection, Window, WindowId};

use super::window_config::WindowConfig;
use super::window_icon::WindowIcon;

/// Unique identifier for a native window.
///
/// This wraps winit's `WindowId` so chrome code never names winit types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeWindowId(WindowId);

impl NativeWindowId {
    /// Create from a winit `WindowId`.
    pub fn from_winit(id: WindowId) -> Self {
        Self(id)
    }

    /// Get the underlying winit `WindowId`.
    pub fn winit_id(&self) -> WindowId {
        self.0
    }
}

impl From<WindowId> for NativeWindowId {
    fn from(id: WindowId) -> Self {
        Self(id)
    }
}

impl From<NativeWindowId> for WindowId {
    fn from(id: NativeWindowId) -> Self {
        id.0
    }
}

/// A native platform window.
///
/// Every casement window is created undecorated. The chrome layer paints the
/// frame and title bar itself and calls back into this type for the
/// operations only the OS can perform:
///
/// - Interactive move ([`drag_window`](Self::drag_window))
/// - Interactive resize ([`drag_resize_window`](Self::drag_resize_window))
/// - Minimize/maximize state changes
///
/// # Example
///
/// ```ignore
/// use casement::window::{NativeWindow, WindowConfig};
///
/// // Inside the event loop, typically in `resumed()`:
/// let config = WindowConfig::new("My App").with_size(1100, 700);
/// let mut window = NativeWindow::create(event_loop, config)?;
///
/// window.set_title("My App - untitled");
/// window.request_redraw();
/// ```
pub struct NativeWindow {
    /// The underlying winit window.
    window: Arc<Window>,
    /// Title mirror; winit's getter is not reliable on every backend.
    title: String,
}

impl NativeWindow {
    /// Create a native window from a configuration.
    ///
    /// This must be called from within the event loop (typically in
    /// `resumed()`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects window creation.
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: WindowConfig,
    ) -> Result<Self, NativeWindowError> {
        let attrs = config.to_window_attributes();
        let window = event_loop
            .create_window(attrs)
            .map_err(|e| NativeWindowError::creation_failed(e.to_string()))?;

        Ok(Self {
            window: Arc::new(window),
            title: config.title().to_string(),
        })
    }

    /// Get the unique window identifier.
    pub fn id(&self) -> NativeWindowId {
        NativeWindowId(self.window.id())
    }

    /// Get the winit window ID.
    pub fn winit_id(&self) -> WindowId {
        self.window.id()
    }

    /// Get a reference to the underlying winit window.
    ///
    /// Provided for embeddings that need direct access, such as surface
    /// creation for a renderer.
    pub fn winit_window(&self) -> &Window {
        &self.window
    }

    /// Get an `Arc` reference to the underlying winit window.
    ///
    /// Useful when the window must be stored for later use or shared with a
    /// rendering thread.
    pub fn winit_window_arc(&self) -> Arc<Window> {
        Arc::clone(&self.window)
    }

    // =========================================================================
    // Title
    // =========================================================================

    /// Get the window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the window title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.window.set_title(&title);
        self.title = title;
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Check if the window is visible.
    pub fn is_visible(&self) -> bool {
        self.window.is_visible().unwrap_or(true)
    }

    /// Set window visibility.
    pub fn set_visible(&self, visible: bool) {
        self.window.set_visible(visible);
    }

    /// Show the window.
    pub fn show(&self) {
        self.window.set_visible(true);
    }

    /// Hide the window.
    pub fn hide(&self) {
        self.window.set_visible(false);
    }

    // =========================================================================
    // Size and Position
    // =========================================================================

    /// Get the inner size of the window in physical pixels.
    pub fn inner_size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    /// Get the inner size of the window in logical pixels.
    pub fn inner_size_logical(&self) -> LogicalSize<f64> {
        self.window.inner_size().to_logical(self.scale_factor())
    }

    /// Get the outer size of the window in physical pixels.
    ///
    /// Identical to the inner size for undecorated windows; kept separate so
    /// frame math reads as frame math.
    pub fn outer_size(&self) -> PhysicalSize<u32> {
        self.window.outer_size()
    }

    /// Get the outer position of the window in physical pixels.
    ///
    /// # Errors
    ///
    /// Returns an error where the concept does not exist (Wayland has no
    /// global coordinates).
    pub fn outer_position(&self) -> Result<PhysicalPosition<i32>, NativeWindowError> {
        self.window
            .outer_position()
            .map_err(|_| NativeWindowError::PositionUnavailable)
    }

    /// Set the outer position of the window in physical pixels.
    pub fn set_outer_position(&self, position: PhysicalPosition<i32>) {
        self.window.set_outer_position(position);
    }

    // =========================================================================
    // Window State
    // =========================================================================

    /// Check if the window is minimized.
    ///
    /// Returns `None` when the platform cannot tell.
    pub fn is_minimized(&self) -> Option<bool> {
        self.window.is_minimized()
    }

    /// Minimize the window.
    pub fn minimize(&self) {
        self.window.set_minimized(true);
    }

    /// Check if the window is maximized.
    pub fn is_maximized(&self) -> bool {
        self.window.is_maximized()
    }

    /// Set the window maximized state.
    pub fn set_maximized(&self, maximized: bool) {
        self.window.set_maximized(maximized);
    }

    /// Maximize the window.
    pub fn maximize(&self) {
        self.window.set_maximized(true);
    }

    /// Restore the window from minimized/maximized state.
    pub fn restore(&self) {
        self.window.set_minimized(false);
        self.window.set_maximized(false);
    }

    // =========================================================================
    // Window Attributes
    // =========================================================================

    /// Check if the window is resizable.
    pub fn is_resizable(&self) -> bool {
        self.window.is_resizable()
    }

    /// Set whether the window is resizable.
    pub fn set_resizable(&self, resizable: bool) {
        self.window.set_resizable(resizable);
    }

    /// Set the window icon shown by the taskbar and window switcher.
    pub fn set_icon(&self, icon: Option<&WindowIcon>) {
        let winit_icon = icon.and_then(|i| i.to_winit_icon().ok());
        self.window.set_window_icon(winit_icon);
    }

    // =========================================================================
    // Scale Factor
    // =========================================================================

    /// Get the window's scale factor.
    ///
    /// This is typically 1.0 for standard displays and 2.0 for HiDPI displays.
    pub fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Check if the window has keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.window.has_focus()
    }

    /// Request focus for the window.
    pub fn focus(&self) {
        self.window.focus_window();
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    /// Set the cursor shown while the pointer is over this window.
    pub fn set_cursor(&self, cursor: impl Into<winit::window::Cursor>) {
        self.window.set_cursor(cursor.into());
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Request a redraw of the window content.
    ///
    /// This schedules a `RedrawRequested` event for the window.
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Notify the platform that the next frame is about to be presented.
    pub fn pre_present_notify(&self) {
        self.window.pre_present_notify();
    }

    // =========================================================================
    // Drag Operations
    // =========================================================================

    /// Start the OS interactive move loop.
    ///
    /// Called by the title bar when a drag begins on its empty area. The OS
    /// takes over pointer tracking until the button is released.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the move loop.
    pub fn drag_window(&self) -> Result<(), NativeWindowError> {
        self.window
            .drag_window()
            .map_err(|_| NativeWindowError::DragFailed)
    }

    /// Start the OS interactive resize loop for the given direction.
    ///
    /// Called by the frameless container when a press lands on a resize edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the resize loop.
    pub fn drag_resize_window(&self, direction: ResizeDirection) -> Result<(), NativeWindowError> {
        self.window
            .drag_resize_window(direction)
            .map_err(|_| NativeWindowError::ResizeFailed)
    }

    // =========================================================================
    // Monitor
    // =========================================================================

    /// Get the monitor the window is currently on.
    pub fn current_monitor(&self) -> Option<winit::monitor::MonitorHandle> {
        self.window.current_monitor()
    }

    /// Get the primary monitor, when the platform can identify one.
    pub fn primary_monitor(&self) -> Option<winit::monitor::MonitorHandle> {
        self.window.primary_monitor()
    }
}

/// Renderer backends take a `NativeWindow` wherever they accept a handle
/// source, so a surface can be created against it directly.
impl HasWindowHandle for NativeWindow {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        self.window.window_handle()
    }
}

impl HasDisplayHandle for NativeWindow {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        self.window.display_handle()
    }
}

impl std::fmt::Debug for NativeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeWindow")
            .field("id", &self.id())
            .field("title", &self.title)
            .field("size", &self.inner_size())
            .finish()
    }
}

/// Error type for native window operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NativeWindowError {
    /// Window creation failed.
    #[error("window creation failed: {0}")]
    CreationFailed(String),
    /// Window position is unavailable (e.g., on Wayland).
    #[error("window position is unavailable")]
    PositionUnavailable,
    /// The OS rejected the interactive move loop.
    #[error("window drag operation failed")]
    DragFailed,
    /// The OS rejected the interactive resize loop.
    #[error("window resize operation failed")]
    ResizeFailed,
}

impl NativeWindowError {
    fn creation_failed(message: impl Into<String>) -> Self {
        Self::CreationFailed(message.into())
    }
}
