use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement};

use crate::error::{GpuError, Result};

/// Color buffer size of the canvas, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// Size a bare `<canvas>` gets when nothing sets it.
    pub const DEFAULT: CanvasSize = CanvasSize { width: 300, height: 150 };

    /// Size matching the parent's client box. A zero dimension (parent not
    /// laid out yet) takes the fallback's value instead, since a 0-sized
    /// swap chain texture is invalid.
    pub fn from_client(client_width: i32, client_height: i32, fallback: CanvasSize) -> Self {
        let width = u32::try_from(client_width).unwrap_or(0);
        let height = u32::try_from(client_height).unwrap_or(0);
        Self {
            width: if width == 0 { fallback.width } else { width },
            height: if height == 0 { fallback.height } else { height },
        }
    }

    pub fn of(canvas: &HtmlCanvasElement) -> Self {
        Self {
            width: canvas.width(),
            height: canvas.height(),
        }
    }
}

/// Creates a canvas filling `root` and appends it.
pub fn create_canvas(root: &HtmlElement, fallback: CanvasSize) -> Result<HtmlCanvasElement> {
    let size = CanvasSize::from_client(root.client_width(), root.client_height(), fallback);

    let document = root.owner_document().ok_or(GpuError::Dom("document"))?;
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| GpuError::Dom("canvas element"))?;

    canvas.set_width(size.width);
    canvas.set_height(size.height);

    // Display size follows the parent; the color buffer keeps the size above.
    let style = canvas.style();
    style.set_property("width", "100%")?;
    style.set_property("height", "100%")?;

    root.append_child(&canvas)?;
    log::debug!("created {}x{} canvas", size.width, size.height);

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_parent_client_size() {
        let size = CanvasSize::from_client(1280, 720, CanvasSize::DEFAULT);
        assert_eq!(size, CanvasSize { width: 1280, height: 720 });
    }

    #[test]
    fn zero_dimension_uses_fallback() {
        let size = CanvasSize::from_client(0, 720, CanvasSize::DEFAULT);
        assert_eq!(size, CanvasSize { width: 300, height: 720 });

        let size = CanvasSize::from_client(0, 0, CanvasSize { width: 64, height: 32 });
        assert_eq!(size, CanvasSize { width: 64, height: 32 });
    }

    #[test]
    fn negative_client_size_is_treated_as_unset() {
        let size = CanvasSize::from_client(-5, 10, CanvasSize::DEFAULT);
        assert_eq!(size.width, 300);
        assert_eq!(size.height, 10);
    }
}
