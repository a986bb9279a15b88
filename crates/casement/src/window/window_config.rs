//! Window configuration and builder.
//!
//! `WindowConfig` collects native window creation options and converts them
//! to winit `WindowAttributes`. Every casement window is created without
//! native decorations (the chrome draws the frame itself), so the builder
//! deliberately has no decorations knob.

use winit::dpi::{LogicalPosition, LogicalSize, Position, Size};
use winit::window::{Window, WindowAttributes, WindowLevel};

use super::native_window::NativeWindowId;
use super::window_icon::WindowIcon;

/// Configuration for creating a native window.
///
/// # Example
///
/// ```ignore
/// use casement::window::{NativeWindow, WindowConfig};
///
/// let config = WindowConfig::new("My Application")
///     .with_size(1100, 700)
///     .with_min_size(400, 300)
///     .with_icon(icon);
///
/// let window = NativeWindow::create(event_loop, config)?;
/// ```
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Window title.
    title: String,
    /// Initial inner size (width, height) in logical pixels.
    size: Option<(u32, u32)>,
    /// Minimum inner size in logical pixels.
    min_size: Option<(u32, u32)>,
    /// Initial outer position in logical pixels.
    position: Option<(i32, i32)>,
    /// Whether the window is resizable.
    resizable: bool,
    /// Whether the window supports per-pixel transparency.
    transparent: bool,
    /// Whether the window is visible on creation.
    visible: bool,
    /// Whether the window starts maximized.
    maximized: bool,
    /// Window icon.
    icon: Option<WindowIcon>,
    /// Owning window for dialogs. The chrome uses it for centering and
    /// modality; winit receives no attribute for it.
    parent: Option<NativeWindowId>,
    /// Window level (z-ordering).
    level: WindowLevel,
}

impl WindowConfig {
    /// Create a new window configuration with the given title.
    ///
    /// Defaults: resizable, opaque, visible, not maximized, normal z-order,
    /// no explicit size or position.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            size: None,
            min_size: None,
            position: None,
            resizable: true,
            transparent: false,
            visible: true,
            maximized: false,
            icon: None,
            parent: None,
            level: WindowLevel::Normal,
        }
    }

    /// Set the initial inner size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Set the minimum inner size in logical pixels.
    pub fn with_min_size(mut self, width: u32, height: u32) -> Self {
        self.min_size = Some((width, height));
        self
    }

    /// Set the initial window position in logical pixels.
    ///
    /// The position is relative to the top-left corner of the primary
    /// monitor.
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = Some((x, y));
        self
    }

    /// Set whether the window is resizable. Defaults to `true`.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set whether the window has a transparent background.
    ///
    /// Transparent windows let content behind them show through where the
    /// chrome draws nothing.
    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Set whether the window is visible when created.
    ///
    /// Defaults to `true`. Set to `false` to create a hidden window that is
    /// shown later, which is how dialogs avoid flashing before they are
    /// centered.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set whether the window starts maximized.
    pub fn with_maximized(mut self, maximized: bool) -> Self {
        self.maximized = maximized;
        self
    }

    /// Set the window icon.
    pub fn with_icon(mut self, icon: WindowIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set the window level (z-ordering).
    ///
    /// - `WindowLevel::AlwaysOnBottom` - below normal windows
    /// - `WindowLevel::Normal` - normal z-order
    /// - `WindowLevel::AlwaysOnTop` - above normal windows
    pub fn with_level(mut self, level: WindowLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the owning window for a dialog.
    ///
    /// The chrome centers the dialog on this window's frame and disables it
    /// for the duration of a modal run. The relationship is chrome-level
    /// bookkeeping; no platform parent/child link is created.
    pub fn with_parent(mut self, parent: NativeWindowId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Get the window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the configured inner size in logical pixels, if set.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Get the owning window, if set.
    pub fn parent(&self) -> Option<NativeWindowId> {
        self.parent
    }

    /// Convert to winit `WindowAttributes`.
    ///
    /// Decorations are always disabled; the chrome paints its own frame and
    /// title bar.
    pub fn to_window_attributes(&self) -> WindowAttributes {
        let mut attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_decorations(false);

        if let Some((w, h)) = self.size {
            attrs = attrs.with_inner_size(Size::Logical(LogicalSize::new(w as f64, h as f64)));
        }

        if let Some((w, h)) = self.min_size {
            attrs = attrs.with_min_inner_size(Size::Logical(LogicalSize::new(w as f64, h as f64)));
        }

        if let Some((x, y)) = self.position {
            attrs =
                attrs.with_position(Position::Logical(LogicalPosition::new(x as f64, y as f64)));
        }

        attrs = attrs
            .with_resizable(self.resizable)
            .with_transparent(self.transparent)
            .with_visible(self.visible)
            .with_maximized(self.maximized)
            .with_window_level(self.level);

        if let Some(ref icon) = self.icon
            && let Ok(winit_icon) = icon.to_winit_icon()
        {
            attrs = attrs.with_window_icon(Some(winit_icon));
        }

        attrs
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("Casement Window")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_config_defaults() {
        let config = WindowConfig::new("Test Window");
        assert_eq!(config.title(), "Test Window");
        assert!(config.resizable);
        assert!(!config.transparent);
        assert!(config.visible);
        assert!(!config.maximized);
        assert_eq!(config.level, WindowLevel::Normal);
        assert_eq!(config.size(), None);
        assert_eq!(config.parent(), None);
    }

    #[test]
    fn test_window_config_builder() {
        let config = WindowConfig::new("Test")
            .with_size(1100, 700)
            .with_min_size(400, 300)
            .with_position(100, 100)
            .with_resizable(false)
            .with_visible(false);

        assert_eq!(config.size(), Some((1100, 700)));
        assert_eq!(config.min_size, Some((400, 300)));
        assert_eq!(config.position, Some((100, 100)));
        assert!(!config.resizable);
        assert!(!config.visible);
    }

    #[test]
    fn test_window_config_with_all_options() {
        let icon = WindowIcon::from_rgba(vec![255; 16], 2, 2).unwrap();
        let config = WindowConfig::new("Full Test")
            .with_size(420, 200)
            .with_min_size(200, 150)
            .with_position(50, 50)
            .with_resizable(true)
            .with_transparent(true)
            .with_maximized(false)
            .with_icon(icon)
            .with_level(WindowLevel::AlwaysOnTop);

        assert_eq!(config.title(), "Full Test");
        assert_eq!(config.size(), Some((420, 200)));
        assert!(config.transparent);
        assert!(config.icon.is_some());
        assert_eq!(config.level, WindowLevel::AlwaysOnTop);
    }

    #[test]
    fn test_window_config_parent() {
        use winit::window::WindowId;

        // Real window ids only exist once a window is open; fabricate one.
        fn fake_id(n: u64) -> NativeWindowId {
            NativeWindowId::from_winit(WindowId::from(n))
        }

        let config = WindowConfig::new("Test");
        assert_eq!(config.parent(), None);

        let parent_id = fake_id(42);
        let config = WindowConfig::new("Dialog")
            .with_parent(parent_id)
            .with_size(420, 200);

        assert_eq!(config.parent(), Some(parent_id));
        assert_eq!(config.size(), Some((420, 200)));
    }
}
