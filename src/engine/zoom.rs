/// Default pixels per day.
pub const DEFAULT_PIXELS_PER_DAY: f32 = 40.0;
pub const MIN_PIXELS_PER_DAY: f32 = 20.0;
pub const MAX_PIXELS_PER_DAY: f32 = 120.0;
pub const ZOOM_STEP: f32 = 10.0;

/// Owns the pixels-per-day factor.
///
/// Callers read [`ZoomController::pixels_per_day`] on every use; zoom can
/// change between any two frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomController {
    pixels_per_day: f32,
    min: f32,
    max: f32,
    step: f32,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(
            DEFAULT_PIXELS_PER_DAY,
            MIN_PIXELS_PER_DAY,
            MAX_PIXELS_PER_DAY,
            ZOOM_STEP,
        )
    }
}

impl ZoomController {
    /// Bounds are swapped if given backwards; the initial value is clamped.
    pub fn new(pixels_per_day: f32, min: f32, max: f32, step: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            pixels_per_day: pixels_per_day.clamp(min, max),
            min,
            max,
            step: step.abs(),
        }
    }

    pub fn pixels_per_day(&self) -> f32 {
        self.pixels_per_day
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Step in or out. Returns true if the factor changed.
    pub fn zoom(&mut self, zoom_in: bool) -> bool {
        let delta = if zoom_in { self.step } else { -self.step };
        self.set(self.pixels_per_day + delta)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom(true)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom(false)
    }

    /// Set the factor, silently clamped into bounds.
    pub fn set(&mut self, pixels_per_day: f32) -> bool {
        let clamped = if pixels_per_day.is_nan() {
            self.pixels_per_day
        } else {
            pixels_per_day.clamp(self.min, self.max)
        };
        let changed = clamped != self.pixels_per_day;
        self.pixels_per_day = clamped;
        changed
    }

    pub fn can_zoom_in(&self) -> bool {
        self.pixels_per_day < self.max
    }

    pub fn can_zoom_out(&self) -> bool {
        self.pixels_per_day > self.min
    }

    /// Current zoom relative to the default, for display.
    pub fn percent_of_default(&self) -> f32 {
        self.pixels_per_day / DEFAULT_PIXELS_PER_DAY * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_by_fixed_increment() {
        let mut zoom = ZoomController::default();
        assert!(zoom.zoom_in());
        assert_eq!(zoom.pixels_per_day(), 50.0);
        assert!(zoom.zoom_out());
        assert!(zoom.zoom_out());
        assert_eq!(zoom.pixels_per_day(), 30.0);
    }

    #[test]
    fn test_clamps_at_bounds() {
        let mut zoom = ZoomController::default();
        for _ in 0..20 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.pixels_per_day(), MAX_PIXELS_PER_DAY);
        assert!(!zoom.can_zoom_in());
        assert!(!zoom.zoom_in());

        assert!(zoom.set(1.0));
        assert_eq!(zoom.pixels_per_day(), MIN_PIXELS_PER_DAY);
        assert!(!zoom.zoom_out());
    }

    #[test]
    fn test_out_of_range_construction_is_clamped() {
        let zoom = ZoomController::new(500.0, 120.0, 20.0, -5.0);
        assert_eq!(zoom.bounds(), (20.0, 120.0));
        assert_eq!(zoom.pixels_per_day(), 120.0);
        let mut zoom = zoom;
        zoom.zoom_out();
        assert_eq!(zoom.pixels_per_day(), 115.0);
    }

    #[test]
    fn test_nan_is_ignored() {
        let mut zoom = ZoomController::default();
        assert!(!zoom.set(f32::NAN));
        assert_eq!(zoom.pixels_per_day(), DEFAULT_PIXELS_PER_DAY);
    }
}
