//! Framebuffer and scanline triangle rasterization

use super::math::{interpolate, Mat4, Vec3};
use super::types::{Color, ScreenVertex};

/// Where a finished frame goes
pub trait Surface {
    /// Current size in pixels
    fn size(&self) -> (usize, usize);

    /// Replace the visible image with `pixels` (RGBA, 4 bytes per pixel)
    fn put_image_data(&mut self, pixels: &[u8], width: usize, height: usize);
}

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>,    // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f32>,  // Depth buffer
    pub width: usize,
    pub height: usize,
    /// Per-pixel count of in-bounds `draw_point` calls since the last clear
    #[cfg(test)]
    hits: Vec<u32>,
}

impl Framebuffer {
    /// Depth every cell is reset to on `clear`
    pub const FAR: f32 = f32::MAX;

    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "framebuffer size must be at least 1x1, got {}x{}", width, height);
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![Self::FAR; width * height],
            width,
            height,
            #[cfg(test)]
            hits: vec![0; width * height],
        }
    }

    /// Reallocate both buffers if the size changed. Contents are lost.
    pub fn resize(&mut self, width: usize, height: usize) {
        assert!(width > 0 && height > 0, "framebuffer size must be at least 1x1, got {}x{}", width, height);
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![0; width * height * 4];
            self.zbuffer = vec![Self::FAR; width * height];
            #[cfg(test)]
            {
                self.hits = vec![0; width * height];
            }
        }
    }

    /// Start a new frame
    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
        self.zbuffer.fill(Self::FAR);
        #[cfg(test)]
        self.hits.fill(0);
    }

    /// Depth-tested write. Coordinates are truncated and not bounds checked.
    ///
    /// The pixel is only written when `z` is strictly closer than what the
    /// depth buffer holds, so on a tie the first writer keeps the pixel.
    pub fn put_pixel(&mut self, x: f32, y: f32, z: f32, color: Color) {
        let idx = x as usize + y as usize * self.width;
        if self.zbuffer[idx] <= z {
            return;
        }
        self.zbuffer[idx] = z;

        let pixel_idx = idx * 4;
        self.pixels[pixel_idx..pixel_idx + 4].copy_from_slice(&color.to_bytes());
    }

    /// Clip to the viewport, then `put_pixel`
    pub fn draw_point(&mut self, point: ScreenVertex, color: Color) {
        if point.x >= 0.0
            && point.y >= 0.0
            && point.x < self.width as f32
            && point.y < self.height as f32
        {
            #[cfg(test)]
            {
                self.hits[point.x as usize + point.y as usize * self.width] += 1;
            }
            self.put_pixel(point.x, point.y, point.z, color);
        }
    }

    /// Map a mesh-space point through `transform` into pixel space.
    ///
    /// Normalized x/y are scaled by the full width/height around the center
    /// and y is flipped. The projected z is kept as the depth.
    pub fn project(&self, coord: Vec3, transform: &Mat4) -> ScreenVertex {
        let point = coord.transform_coordinates(transform);
        let w = self.width as f32;
        let h = self.height as f32;
        ScreenVertex {
            x: point.x * w + w / 2.0,
            y: -point.y * h + h / 2.0,
            z: point.z,
        }
    }

    /// Fill one row between edges `pa-pb` (left) and `pc-pd` (right).
    ///
    /// The right end is exclusive so triangles sharing an edge never write
    /// the same column twice.
    pub fn process_scan_line(
        &mut self,
        y: i32,
        pa: ScreenVertex,
        pb: ScreenVertex,
        pc: ScreenVertex,
        pd: ScreenVertex,
        color: Color,
    ) {
        if y < 0 || y >= self.height as i32 {
            return;
        }

        let yf = y as f32;
        let gradient1 = if pa.y != pb.y { (yf - pa.y) / (pb.y - pa.y) } else { 1.0 };
        let gradient2 = if pc.y != pd.y { (yf - pc.y) / (pd.y - pc.y) } else { 1.0 };

        let sx = interpolate(pa.x, pb.x, gradient1) as i32;
        let ex = interpolate(pc.x, pd.x, gradient2) as i32;

        let z1 = interpolate(pa.z, pb.z, gradient1);
        let z2 = interpolate(pc.z, pd.z, gradient2);

        // Span ends saturate for vertices near the camera plane. The width is
        // taken in f64 so it cannot overflow, and only visible columns are walked.
        let span = ex as f64 - sx as f64;
        for x in sx.max(0)..ex.min(self.width as i32) {
            let gradient = ((x as f64 - sx as f64) / span) as f32;
            let z = interpolate(z1, z2, gradient);
            self.draw_point(ScreenVertex::new(x as f32, yf, z), color);
        }
    }

    /// Rasterize a screen-space triangle with a solid color
    pub fn draw_triangle(
        &mut self,
        mut p1: ScreenVertex,
        mut p2: ScreenVertex,
        mut p3: ScreenVertex,
        color: Color,
    ) {
        // p1 on top, p3 at the bottom
        if p1.y > p2.y {
            std::mem::swap(&mut p1, &mut p2);
        }
        if p2.y > p3.y {
            std::mem::swap(&mut p2, &mut p3);
        }
        if p1.y > p2.y {
            std::mem::swap(&mut p1, &mut p2);
        }

        // Inverse slopes, zero for flat edges
        let d_p1p2 = if p2.y - p1.y > 0.0 { (p2.x - p1.x) / (p2.y - p1.y) } else { 0.0 };
        let d_p1p3 = if p3.y - p1.y > 0.0 { (p3.x - p1.x) / (p3.y - p1.y) } else { 0.0 };

        // Rows outside the buffer would be clipped anyway
        let first_row = (p1.y.floor() as i32).max(0);
        let last_row = (p3.y.floor() as i32).min(self.height as i32 - 1);

        if d_p1p2 > d_p1p3 {
            // p2 is right of the long edge p1-p3
            for y in first_row..=last_row {
                if (y as f32) < p2.y {
                    self.process_scan_line(y, p1, p3, p1, p2, color);
                } else {
                    self.process_scan_line(y, p1, p3, p2, p3, color);
                }
            }
        } else {
            // p2 is left of the long edge
            for y in first_row..=last_row {
                if (y as f32) < p2.y {
                    self.process_scan_line(y, p1, p2, p1, p3, color);
                } else {
                    self.process_scan_line(y, p2, p3, p1, p3, color);
                }
            }
        }
    }

    /// Copy the color buffer to the output surface as-is
    pub fn present(&self, surface: &mut dyn Surface) {
        surface.put_image_data(&self.pixels, self.width, self.height);
    }

    /// RGBA at (x, y), or None outside the buffer
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let mut out = [0u8; 4];
            out.copy_from_slice(&self.pixels[idx..idx + 4]);
            Some(out)
        } else {
            None
        }
    }

    /// Depth at (x, y), or None outside the buffer
    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.zbuffer[y * self.width + x])
        } else {
            None
        }
    }
}
