//! Image element builder
//!
//! Layout only needs an image's intrinsic size, so a [`Pixmap`] keeps the
//! decoded header dimensions and the resource path. The renderer resolves
//! pixels through the [`ImageId`].

use std::hash::{Hash, Hasher};
use std::io::Cursor;

use rustc_hash::FxHasher;
use strata_core::{ImageId, ResourceBundle};
use taffy::prelude::*;

use crate::div::{ElementBuilder, ElementTypeId, ImageRenderInfo};
use crate::element::RenderProps;
use crate::tree::{LayoutNodeId, LayoutTree};

/// Intrinsic description of an image resource
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pixmap {
    source: String,
    width: u32,
    height: u32,
}

impl Pixmap {
    /// A pixmap with no pixels
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read the image header from encoded bytes
    pub fn from_bytes(source: impl Into<String>, bytes: &[u8]) -> Result<Self, image::ImageError> {
        let (width, height) = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .into_dimensions()?;
        Ok(Self {
            source: source.into(),
            width,
            height,
        })
    }

    /// Load an image by logical path; anything unreadable gives an empty pixmap
    pub fn load(resources: &ResourceBundle, path: &str) -> Self {
        let bytes = match resources.read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(path, %err, "image not found, using empty pixmap");
                return Self::empty();
            }
        };

        Self::from_bytes(path, &bytes).unwrap_or_else(|err| {
            tracing::debug!(path, %err, "image not decodable, using empty pixmap");
            Self::empty()
        })
    }

    pub fn is_null(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Renderer handle derived from the source path
    pub fn id(&self) -> ImageId {
        let mut hasher = FxHasher::default();
        self.source.hash(&mut hasher);
        ImageId(hasher.finish())
    }

    /// Largest size fitting `max_width × max_height` with the same aspect ratio
    pub fn scaled_to_fit(&self, max_width: f32, max_height: f32) -> (f32, f32) {
        if self.is_null() {
            return (0.0, 0.0);
        }
        let (w, h) = (self.width as f32, self.height as f32);
        let scale = (max_width / w).min(max_height / h);
        ((w * scale).round(), (h * scale).round())
    }
}

/// An image element
pub struct Image {
    pixmap: Pixmap,
    style: Style,
    opacity: f32,
}

impl Image {
    /// Image at its intrinsic size
    pub fn new(pixmap: Pixmap) -> Self {
        let (width, height) = (pixmap.width as f32, pixmap.height as f32);
        Self {
            pixmap,
            style: Style {
                size: Size {
                    width: Dimension::Length(width),
                    height: Dimension::Length(height),
                },
                flex_shrink: 0.0,
                ..Style::default()
            },
            opacity: 1.0,
        }
    }

    /// Scale to fit a box, keeping the aspect ratio
    pub fn fit(mut self, max_width: f32, max_height: f32) -> Self {
        let (width, height) = self.pixmap.scaled_to_fit(max_width, max_height);
        self.style.size.width = Dimension::Length(width);
        self.style.size.height = Dimension::Length(height);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

impl ElementBuilder for Image {
    fn build(&self, tree: &mut LayoutTree) -> LayoutNodeId {
        tree.create_node(self.style.clone())
    }

    fn render_props(&self) -> RenderProps {
        RenderProps::default()
    }

    fn children_builders(&self) -> &[Box<dyn ElementBuilder>] {
        &[]
    }

    fn element_type_id(&self) -> ElementTypeId {
        ElementTypeId::Image
    }

    fn image_render_info(&self) -> Option<ImageRenderInfo> {
        if self.pixmap.is_null() {
            return None;
        }
        Some(ImageRenderInfo {
            image: self.pixmap.id(),
            opacity: self.opacity,
        })
    }
}

/// Convenience function to create an image element
pub fn img(pixmap: Pixmap) -> Image {
    Image::new(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::RgbaImage::new(width, height)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_load_embedded_png() {
        let resources = ResourceBundle::new().with(":icons/wide.png", png_bytes(80, 40));
        let pixmap = Pixmap::load(&resources, ":icons/wide.png");

        assert!(!pixmap.is_null());
        assert_eq!((pixmap.width(), pixmap.height()), (80, 40));
        assert_eq!(pixmap.scaled_to_fit(40.0, 40.0), (40.0, 20.0));
    }

    #[test]
    fn test_missing_or_corrupt_gives_empty() {
        let resources = ResourceBundle::new().with(":icons/bad.png", b"not a png".as_slice());

        assert!(Pixmap::load(&resources, ":icons/missing.png").is_null());
        assert!(Pixmap::load(&resources, ":icons/bad.png").is_null());
        assert_eq!(Pixmap::empty().scaled_to_fit(40.0, 40.0), (0.0, 0.0));
    }

    #[test]
    fn test_empty_image_has_no_render_info() {
        let image = img(Pixmap::empty()).fit(40.0, 40.0);
        assert!(image.image_render_info().is_none());
    }
}
