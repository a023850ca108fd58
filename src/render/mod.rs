//! Software rasterizer for pixel observations
//!
//! Every environment renders into a fixed 210x160 RGB [`Frame`]. The
//! drawing primitives mirror the fills the games need: axis-aligned
//! rectangles with inclusive corners, ellipses inscribed in a bounding
//! box, and filled triangles. All primitives clip against the frame
//! bounds, so callers may draw partially (or fully) off-screen entities.

/// Frame width in pixels
pub const FRAME_WIDTH: usize = 160;

/// Frame height in pixels
pub const FRAME_HEIGHT: usize = 210;

/// Frame width as a coordinate value
pub const WIDTH: i32 = FRAME_WIDTH as i32;

/// Frame height as a coordinate value
pub const HEIGHT: i32 = FRAME_HEIGHT as i32;

/// An RGB color triple
pub type Rgb = (u8, u8, u8);

/// A fixed-size RGB raster, stored row-major as height x width x 3 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: Vec<u8>,
}

impl Frame {
    /// Create a frame filled with a single background color
    pub fn filled(color: Rgb) -> Self {
        let mut data = Vec::with_capacity(FRAME_HEIGHT * FRAME_WIDTH * 3);
        for _ in 0..FRAME_HEIGHT * FRAME_WIDTH {
            data.push(color.0);
            data.push(color.1);
            data.push(color.2);
        }
        Self { data }
    }

    /// Observation shape as (height, width, channels)
    pub fn shape() -> [usize; 3] {
        [FRAME_HEIGHT, FRAME_WIDTH, 3]
    }

    /// Raw bytes in height x width x 3 order
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Color at a pixel; panics if out of bounds
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        assert!(x < FRAME_WIDTH && y < FRAME_HEIGHT, "pixel ({x}, {y}) out of bounds");
        let i = (y * FRAME_WIDTH + x) * 3;
        (self.data[i], self.data[i + 1], self.data[i + 2])
    }

    fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 || x >= WIDTH || y >= HEIGHT {
            return;
        }
        let i = (y as usize * FRAME_WIDTH + x as usize) * 3;
        self.data[i] = color.0;
        self.data[i + 1] = color.1;
        self.data[i + 2] = color.2;
    }

    /// Fill the rectangle spanning (x0, y0) to (x1, y1), corners inclusive
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        if x1 < x0 || y1 < y0 {
            return;
        }
        let xa = x0.max(0);
        let xb = x1.min(WIDTH - 1);
        let ya = y0.max(0);
        let yb = y1.min(HEIGHT - 1);
        for y in ya..=yb {
            for x in xa..=xb {
                self.set(x, y, color);
            }
        }
    }

    /// Fill the ellipse inscribed in the bounding box (x0, y0)-(x1, y1)
    pub fn fill_ellipse(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        if x1 < x0 || y1 < y0 {
            return;
        }
        let cx = (x0 + x1) as f32 / 2.0;
        let cy = (y0 + y1) as f32 / 2.0;
        let rx = ((x1 - x0) as f32 / 2.0).max(0.5);
        let ry = ((y1 - y0) as f32 / 2.0).max(0.5);
        for y in y0.max(0)..=y1.min(HEIGHT - 1) {
            for x in x0.max(0)..=x1.min(WIDTH - 1) {
                let dx = (x as f32 - cx) / rx;
                let dy = (y as f32 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.set(x, y, color);
                }
            }
        }
    }

    /// Fill the triangle with the given vertices (either winding order)
    pub fn fill_triangle(&mut self, pts: [(f32, f32); 3], color: Rgb) {
        let [a, b, c] = pts;
        let min_x = (a.0.min(b.0).min(c.0).floor() as i32).max(0);
        let max_x = (a.0.max(b.0).max(c.0).ceil() as i32).min(WIDTH - 1);
        let min_y = (a.1.min(b.1).min(c.1).floor() as i32).max(0);
        let max_y = (a.1.max(b.1).max(c.1).ceil() as i32).min(HEIGHT - 1);

        let edge = |p: (f32, f32), q: (f32, f32), r: (f32, f32)| -> f32 {
            (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
        };

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32, y as f32);
                let d0 = edge(a, b, p);
                let d1 = edge(b, c, p);
                let d2 = edge(c, a, p);
                let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
                let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
                if !(has_neg && has_pos) {
                    self.set(x, y, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb = (50, 50, 100);
    const FG: Rgb = (255, 0, 0);

    #[test]
    fn test_frame_shape_and_fill() {
        let frame = Frame::filled(BG);
        assert_eq!(Frame::shape(), [210, 160, 3]);
        assert_eq!(frame.as_bytes().len(), 210 * 160 * 3);
        assert_eq!(frame.pixel(0, 0), BG);
        assert_eq!(frame.pixel(159, 209), BG);
    }

    #[test]
    fn test_rect_corners_inclusive() {
        let mut frame = Frame::filled(BG);
        frame.fill_rect(2, 3, 5, 6, FG);
        assert_eq!(frame.pixel(2, 3), FG);
        assert_eq!(frame.pixel(5, 6), FG);
        assert_eq!(frame.pixel(6, 6), BG, "pixel past the inclusive corner stays background");
        assert_eq!(frame.pixel(1, 3), BG);
    }

    #[test]
    fn test_rect_clips_out_of_bounds() {
        let mut frame = Frame::filled(BG);
        frame.fill_rect(-10, -10, 0, 0, FG);
        frame.fill_rect(150, 200, 400, 400, FG);
        assert_eq!(frame.pixel(0, 0), FG);
        assert_eq!(frame.pixel(159, 209), FG);
        // inverted box draws nothing
        frame.fill_rect(10, 10, 5, 5, (0, 255, 0));
        assert_eq!(frame.pixel(7, 7), BG);
    }

    #[test]
    fn test_ellipse_center_inside_corner_outside() {
        let mut frame = Frame::filled(BG);
        frame.fill_ellipse(10, 10, 30, 30, FG);
        assert_eq!(frame.pixel(20, 20), FG, "ellipse center is filled");
        assert_eq!(frame.pixel(10, 10), BG, "bounding-box corner lies outside the ellipse");
    }

    #[test]
    fn test_triangle_contains_centroid() {
        let mut frame = Frame::filled(BG);
        frame.fill_triangle([(10.0, 10.0), (40.0, 10.0), (25.0, 40.0)], FG);
        assert_eq!(frame.pixel(25, 15), FG);
        assert_eq!(frame.pixel(10, 40), BG);
    }

    #[test]
    fn test_triangle_winding_independent() {
        let mut cw = Frame::filled(BG);
        let mut ccw = Frame::filled(BG);
        cw.fill_triangle([(10.0, 10.0), (40.0, 10.0), (25.0, 40.0)], FG);
        ccw.fill_triangle([(25.0, 40.0), (40.0, 10.0), (10.0, 10.0)], FG);
        assert_eq!(cw, ccw);
    }
}
