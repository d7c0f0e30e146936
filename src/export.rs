//! Offscreen presentation: frames into `image` buffers and PNG files

use std::path::Path;
use image::RgbaImage;
use crate::rasterizer::{Framebuffer, Surface};

/// Error type for snapshot export
#[derive(Debug)]
pub enum ExportError {
    ImageError(image::ImageError),
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::ImageError(e)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::ImageError(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

/// A surface backed by an in-memory RGBA image
pub struct ImageSurface {
    pub image: RgbaImage,
}

impl ImageSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            image: RgbaImage::new(width as u32, height as u32),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        self.image.save(path)?;
        Ok(())
    }
}

impl Surface for ImageSurface {
    fn size(&self) -> (usize, usize) {
        (self.image.width() as usize, self.image.height() as usize)
    }

    fn put_image_data(&mut self, pixels: &[u8], width: usize, height: usize) {
        if self.size() != (width, height) {
            self.image = RgbaImage::new(width as u32, height as u32);
        }
        self.image.copy_from_slice(pixels);
    }
}

/// Present `fb` into a fresh image and write it as PNG
pub fn save_png<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<(), ExportError> {
    let mut surface = ImageSurface::new(fb.width, fb.height);
    fb.present(&mut surface);
    surface.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Color, ScreenVertex};
    use tempfile::TempDir;

    #[test]
    fn test_surface_matches_framebuffer() {
        let mut fb = Framebuffer::new(8, 4);
        fb.clear(Color::BLUE);
        fb.draw_point(ScreenVertex::new(3.0, 2.0, 0.5), Color::RED);

        let mut surface = ImageSurface::new(1, 1);
        fb.present(&mut surface);
        assert_eq!(surface.size(), (8, 4));
        assert_eq!(surface.image.get_pixel(3, 2).0, [255, 0, 0, 255]);
        assert_eq!(surface.image.get_pixel(0, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_png_written_and_decodable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("frame.png");

        let mut fb = Framebuffer::new(16, 16);
        fb.clear(Color::BLACK);
        fb.draw_triangle(
            ScreenVertex::new(8.0, 1.0, 1.0),
            ScreenVertex::new(1.0, 15.0, 1.0),
            ScreenVertex::new(15.0, 15.0, 1.0),
            Color::GREEN,
        );
        save_png(&fb, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 16));
        assert_eq!(decoded.as_raw(), &fb.pixels);
    }
}
