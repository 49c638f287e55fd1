use glam::DVec2;

/// Axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub min: DVec2,
    pub max: DVec2,
}

impl WorldRect {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Persistent camera state: zoom and the manual camera center.
///
/// The center actually used for a frame may differ (a centered body or an
/// in-progress pan overrides it); resolve it with [`Camera::view`] every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Zoom, always > 0.
    pub pixels_per_meter: f64,
    /// Manual camera center in world space.
    pub center: DVec2,
    /// Viewport size in pixels.
    pub viewport: DVec2,
}

impl Camera {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            pixels_per_meter: 100.0,
            center: DVec2::ZERO,
            viewport: DVec2::new(viewport_width, viewport_height),
        }
    }

    pub fn meters_to_pixels(&self, meters: f64) -> f64 {
        meters * self.pixels_per_meter
    }

    pub fn pixels_to_meters(&self, pixels: f64) -> f64 {
        pixels / self.pixels_per_meter
    }

    /// Convert a screen-space drag (Y-down pixels) into a world displacement (Y-up meters).
    pub fn screen_delta_to_world(&self, delta: DVec2) -> DVec2 {
        DVec2::new(delta.x, -delta.y) / self.pixels_per_meter
    }

    /// Set the zoom. Non-positive or non-finite values are ignored.
    pub fn set_zoom(&mut self, pixels_per_meter: f64) -> bool {
        if pixels_per_meter.is_finite() && pixels_per_meter > 0.0 {
            self.pixels_per_meter = pixels_per_meter;
            true
        } else {
            false
        }
    }

    /// Resize the pixel viewport (e.g. on window resize).
    pub fn resize(&mut self, viewport_width: f64, viewport_height: f64) {
        self.viewport = DVec2::new(viewport_width.max(1.0), viewport_height.max(1.0));
    }

    /// Resolve the effective camera center for this frame.
    ///
    /// A centered body wins; otherwise an active pan drag (screen-pixel delta
    /// from drag start to now) displaces the manual center; otherwise the
    /// manual center is used as is.
    pub fn effective_center(&self, centered_on: Option<DVec2>, pan_drag: Option<DVec2>) -> DVec2 {
        if let Some(body_center) = centered_on {
            return body_center;
        }
        match pan_drag {
            Some(delta) => self.center - self.screen_delta_to_world(delta),
            None => self.center,
        }
    }

    /// Freeze a transform for the given overrides.
    pub fn view(&self, centered_on: Option<DVec2>, pan_drag: Option<DVec2>) -> View {
        View {
            center: self.effective_center(centered_on, pan_drag),
            pixels_per_meter: self.pixels_per_meter,
            viewport: self.viewport,
        }
    }
}

/// A resolved world ↔ screen transform for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub center: DVec2,
    pub pixels_per_meter: f64,
    pub viewport: DVec2,
}

impl View {
    /// World (meters, Y-up) → screen (pixels, Y-down, origin top-left).
    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        DVec2::new(
            self.viewport.x / 2.0 + (world.x - self.center.x) * self.pixels_per_meter,
            self.viewport.y / 2.0 - (world.y - self.center.y) * self.pixels_per_meter,
        )
    }

    /// Exact inverse of [`View::world_to_screen`].
    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        DVec2::new(
            self.center.x + (screen.x - self.viewport.x / 2.0) / self.pixels_per_meter,
            self.center.y - (screen.y - self.viewport.y / 2.0) / self.pixels_per_meter,
        )
    }

    /// The world rectangle currently visible.
    pub fn world_viewport(&self) -> WorldRect {
        let half = self.viewport / self.pixels_per_meter / 2.0;
        WorldRect::new(self.center - half, self.center + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec2, b: DVec2, tol: f64) -> bool {
        (a - b).abs().max_element() <= tol
    }

    #[test]
    fn origin_maps_to_screen_center() {
        let cam = Camera::new(800.0, 600.0);
        let view = cam.view(None, None);
        assert_eq!(view.world_to_screen(DVec2::ZERO), DVec2::new(400.0, 300.0));
    }

    #[test]
    fn y_axis_is_flipped() {
        let cam = Camera::new(800.0, 600.0);
        let view = cam.view(None, None);
        let s = view.world_to_screen(DVec2::new(1.0, 1.0));
        assert_eq!(s, DVec2::new(500.0, 200.0));
    }

    #[test]
    fn round_trip_under_pan_and_zoom() {
        let mut cam = Camera::new(1024.0, 768.0);
        cam.center = DVec2::new(-12.5, 3.25);
        for &ppm in &[0.01, 1.0, 37.3, 1e4] {
            cam.set_zoom(ppm);
            for &centered in &[None, Some(DVec2::new(7.0, -2.0))] {
                for &pan in &[None, Some(DVec2::new(13.0, -40.0))] {
                    let view = cam.view(centered, pan);
                    for &p in &[DVec2::ZERO, DVec2::new(1e3, -5e2), DVec2::new(-0.001, 0.002)] {
                        let back = view.screen_to_world(view.world_to_screen(p));
                        assert!(approx(back, p, 1e-9 * (1.0 + p.length())), "{:?} vs {:?}", back, p);
                    }
                }
            }
        }
    }

    #[test]
    fn centered_body_overrides_pan() {
        let cam = Camera::new(800.0, 600.0);
        let c = cam.effective_center(Some(DVec2::new(5.0, 5.0)), Some(DVec2::new(100.0, 0.0)));
        assert_eq!(c, DVec2::new(5.0, 5.0));
    }

    #[test]
    fn pan_drag_moves_center_opposite_to_drag() {
        let cam = Camera::new(800.0, 600.0);
        // Dragging right by 100 px at 100 px/m moves the camera 1 m left,
        // dragging down moves it up.
        let c = cam.effective_center(None, Some(DVec2::new(100.0, 50.0)));
        assert!(approx(c, DVec2::new(-1.0, 0.5), 1e-12));
    }

    #[test]
    fn world_viewport_matches_zoom() {
        let mut cam = Camera::new(1000.0, 1000.0);
        cam.set_zoom(100.0);
        let rect = cam.view(None, None).world_viewport();
        assert_eq!(rect, WorldRect::new(DVec2::splat(-5.0), DVec2::splat(5.0)));
        assert!(rect.contains(DVec2::new(4.9, 0.0)));
    }

    #[test]
    fn invalid_zoom_ignored() {
        let mut cam = Camera::new(800.0, 600.0);
        assert!(!cam.set_zoom(0.0));
        assert!(!cam.set_zoom(f64::NAN));
        assert!(!cam.set_zoom(-3.0));
        assert_eq!(cam.pixels_per_meter, 100.0);
    }
}
