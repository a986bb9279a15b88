//! Window icon support.
//!
//! Icons are plain RGBA pixel buffers. The same icon feeds two consumers:
//! the native window (taskbar, window switcher) and the chrome title bar,
//! which paints it at 20x20 logical pixels.

use std::path::Path;

use thiserror::Error;

/// A window icon backed by raw RGBA pixel data.
///
/// Icons can be built from a pixel buffer, decoded from a file, or decoded
/// from an in-memory image (PNG, ICO, BMP, and the other formats the `image`
/// crate understands).
///
/// # Example
///
/// ```ignore
/// use casement::window::WindowIcon;
///
/// // 1x1 opaque red pixel
/// let icon = WindowIcon::from_rgba(vec![255, 0, 0, 255], 1, 1)?;
///
/// // Decode from a file
/// let icon = WindowIcon::from_path("assets/app.png")?;
/// ```
#[derive(Clone)]
pub struct WindowIcon {
    /// RGBA pixel data, 4 bytes per pixel, row-major.
    rgba: Vec<u8>,
    width: u32,
    height: u32,
}

/// Error type for icon construction and decoding.
#[derive(Debug, Error)]
pub enum IconError {
    /// Width or height is zero, or the platform rejected the dimensions.
    #[error("invalid icon dimensions: {0}")]
    InvalidDimensions(String),
    /// Pixel buffer length does not match `width * height * 4`.
    #[error("icon data size mismatch: expected {expected} bytes, got {actual}")]
    DataSizeMismatch {
        /// Bytes the dimensions call for.
        expected: usize,
        /// Bytes actually provided.
        actual: usize,
    },
    /// File or in-memory image could not be decoded.
    #[error("failed to load icon: {0}")]
    LoadFailed(String),
}

impl WindowIcon {
    /// Create a window icon from raw RGBA pixel data.
    ///
    /// The buffer must hold `width * height * 4` bytes in row-major order.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the buffer length
    /// does not match the dimensions.
    pub fn from_rgba(rgba: Vec<u8>, width: u32, height: u32) -> Result<Self, IconError> {
        if width == 0 || height == 0 {
            return Err(IconError::InvalidDimensions(
                "width and height must be non-zero".to_string(),
            ));
        }

        let expected = (width as usize) * (height as usize) * 4;
        if rgba.len() != expected {
            return Err(IconError::DataSizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }

        Ok(Self {
            rgba,
            width,
            height,
        })
    }

    /// Decode a window icon from an image file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IconError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| IconError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_image(img))
    }

    /// Decode a window icon from in-memory image data.
    ///
    /// The format is auto-detected.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be decoded.
    pub fn from_memory(data: &[u8]) -> Result<Self, IconError> {
        let img =
            image::load_from_memory(data).map_err(|e| IconError::LoadFailed(e.to_string()))?;
        Ok(Self::from_image(img))
    }

    fn from_image(img: image::DynamicImage) -> Self {
        let rgba_image = img.to_rgba8();
        let width = rgba_image.width();
        let height = rgba_image.height();
        Self {
            rgba: rgba_image.into_raw(),
            width,
            height,
        }
    }

    /// Icon width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Icon height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Convert to a winit icon for the native window.
    pub(crate) fn to_winit_icon(&self) -> Result<winit::window::Icon, IconError> {
        winit::window::Icon::from_rgba(self.rgba.clone(), self.width, self.height)
            .map_err(|e| IconError::InvalidDimensions(e.to_string()))
    }
}

impl std::fmt::Debug for WindowIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowIcon")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.rgba.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_from_rgba_valid() {
        // 2x2 opaque red square
        let rgba = vec![
            255, 0, 0, 255, 255, 0, 0, 255, // row 1
            255, 0, 0, 255, 255, 0, 0, 255, // row 2
        ];
        let icon = WindowIcon::from_rgba(rgba, 2, 2).unwrap();
        assert_eq!(icon.width(), 2);
        assert_eq!(icon.height(), 2);
        assert_eq!(icon.rgba().len(), 16);
    }

    #[test]
    fn test_icon_from_rgba_zero_dimensions() {
        assert!(WindowIcon::from_rgba(vec![], 0, 10).is_err());
        assert!(WindowIcon::from_rgba(vec![], 10, 0).is_err());
    }

    #[test]
    fn test_icon_from_rgba_size_mismatch() {
        // 2x2 needs 16 bytes
        let err = WindowIcon::from_rgba(vec![255; 8], 2, 2).unwrap_err();
        match err {
            IconError::DataSizeMismatch { expected, actual } => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 8);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_icon_from_memory_rejects_garbage() {
        assert!(WindowIcon::from_memory(&[0, 1, 2, 3]).is_err());
    }

    #[test]
    fn test_icon_debug_omits_pixel_data() {
        let icon = WindowIcon::from_rgba(vec![0; 16], 2, 2).unwrap();
        let debug_str = format!("{:?}", icon);
        assert!(debug_str.contains("WindowIcon"));
        assert!(debug_str.contains("width: 2"));
        assert!(debug_str.contains("data_len: 16"));
    }
}
