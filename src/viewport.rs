// Container geometry in CSS pixels plus the device pixel ratio. The drawing
// origin sits at the container's centre, so particle bounds are +/- half extent.

use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Viewport {
        let device_pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Viewport {
            width: width.max(0.0),
            height: height.max(0.0),
            device_pixel_ratio,
        }
    }

    pub fn half_extent(&self) -> Vector2<f64> {
        [self.width / 2.0, self.height / 2.0]
    }

    /// Backing store size of the canvas in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.device_pixel_ratio) as u32,
            (self.height * self.device_pixel_ratio) as u32,
        )
    }

    /// Top-left corner and size of the visible region in centred coordinates.
    pub fn clear_rect(&self) -> (f64, f64, f64, f64) {
        let [hw, hh] = self.half_extent();
        (-hw, -hh, self.width, self.height)
    }

    /// Canvas transform `[a, b, c, d, e, f]`: scale by the pixel ratio, then
    /// move the origin to the centre of the container.
    pub fn transform(&self) -> [f64; 6] {
        let dpr = self.device_pixel_ratio;
        let [hw, hh] = self.half_extent();
        [dpr, 0.0, 0.0, dpr, hw * dpr, hh * dpr]
    }
}
