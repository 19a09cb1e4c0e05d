// Viewport transform state: a diagram point c lands on screen at
// translate + scale * c, i.e. CSS "translate(..) scale(..)" with origin 0 0.

use crate::state::gesture::GestureDelta;

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl Transform {
    /// Zoom by `factor`, keeping the pivot (in the element's untransformed
    /// local space) visually fixed. The scale is clamped before the
    /// translation recompute so hitting a bound never overshoots the pan.
    pub fn zoom_about(&mut self, factor: f64, pivot_x: f64, pivot_y: f64) {
        if factor <= 0.0 {
            return;
        }
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        if new_scale == self.scale {
            return;
        }
        let ratio = new_scale / self.scale;
        self.translate_x = pivot_x - (pivot_x - self.translate_x) * ratio;
        self.translate_y = pivot_y - (pivot_y - self.translate_y) * ratio;
        self.scale = new_scale;
    }

    /// Move the view to an absolute translation. Unclamped: panning past the
    /// content bounds is permitted.
    pub fn pan_to(&mut self, translate_x: f64, translate_y: f64) {
        self.translate_x = translate_x;
        self.translate_y = translate_y;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn apply(&mut self, delta: &GestureDelta) {
        match *delta {
            GestureDelta::ZoomAbout {
                factor,
                pivot_x,
                pivot_y,
            } => self.zoom_about(factor, pivot_x, pivot_y),
            GestureDelta::PanTo {
                translate_x,
                translate_y,
            } => self.pan_to(translate_x, translate_y),
        }
    }

    /// CSS value for the `transform` property. Translation comes first, to
    /// match the pre-scale translation semantics of `zoom_about`.
    pub fn css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_zoom_in_from_identity_matches_worked_example() {
        // Wheel tick at cursor (100, 50): scale 1.0 -> 1.1, translation
        // recomputed so the cursor point stays put.
        let mut t = Transform::default();
        t.zoom_about(1.1, 100.0, 50.0);
        assert!((t.scale - 1.1).abs() < 1e-12);
        assert!((t.translate_x + 10.0).abs() < 1e-9);
        assert!((t.translate_y + 5.0).abs() < 1e-9);
    }

    #[test]
    fn pivot_point_stays_fixed_across_zooms() {
        for start_scale in [0.5, 1.0, 1.3, 2.9] {
            let mut t = Transform {
                scale: start_scale,
                translate_x: 40.0,
                translate_y: -25.0,
            };
            let (pivot_x, pivot_y) = (120.0, 80.0);
            // Diagram coordinate currently under the pivot.
            let cx = (pivot_x - t.translate_x) / t.scale;
            let cy = (pivot_y - t.translate_y) / t.scale;
            t.zoom_about(1.15, pivot_x, pivot_y);
            assert!((t.scale * cx + t.translate_x - pivot_x).abs() < 1e-9);
            assert!((t.scale * cy + t.translate_y - pivot_y).abs() < 1e-9);
        }
    }

    #[test]
    fn scale_never_leaves_bounds() {
        let mut t = Transform::default();
        for _ in 0..50 {
            t.zoom_about(1.1, 10.0, 20.0);
            assert!(t.scale >= MIN_SCALE && t.scale <= MAX_SCALE);
        }
        assert_eq!(t.scale, MAX_SCALE);
        for _ in 0..100 {
            t.zoom_about(0.9, -30.0, 5.0);
            assert!(t.scale >= MIN_SCALE && t.scale <= MAX_SCALE);
        }
        assert_eq!(t.scale, MIN_SCALE);
    }

    #[test]
    fn overshooting_pinch_lands_exactly_on_max() {
        let mut t = Transform {
            scale: 2.9,
            translate_x: 10.0,
            translate_y: 10.0,
        };
        t.zoom_about(1.5, 50.0, 50.0);
        assert_eq!(t.scale, MAX_SCALE);
    }

    #[test]
    fn zoom_at_bound_is_a_noop() {
        let mut t = Transform {
            scale: MAX_SCALE,
            translate_x: -7.0,
            translate_y: 3.0,
        };
        let before = t;
        t.zoom_about(1.2, 200.0, 100.0);
        assert_eq!(t, before);
    }

    #[test]
    fn non_positive_factor_is_ignored() {
        let mut t = Transform::default();
        t.zoom_about(0.0, 10.0, 10.0);
        t.zoom_about(-1.5, 10.0, 10.0);
        assert_eq!(t, Transform::default());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut t = Transform::default();
        t.zoom_about(1.1, 100.0, 50.0);
        t.pan_to(33.0, -12.0);
        t.reset();
        let once = t;
        t.reset();
        assert_eq!(once, t);
        assert_eq!(t, Transform::default());
    }

    #[test]
    fn apply_dispatches_both_delta_kinds() {
        let mut t = Transform::default();
        t.apply(&GestureDelta::PanTo {
            translate_x: 12.0,
            translate_y: -4.0,
        });
        assert_eq!((t.translate_x, t.translate_y), (12.0, -4.0));
        t.apply(&GestureDelta::ZoomAbout {
            factor: 2.0,
            pivot_x: 0.0,
            pivot_y: 0.0,
        });
        assert!((t.scale - 2.0).abs() < 1e-12);
    }

    #[test]
    fn css_orders_translate_before_scale() {
        let t = Transform {
            scale: 2.0,
            translate_x: -10.0,
            translate_y: 5.0,
        };
        assert_eq!(t.css(), "translate(-10px, 5px) scale(2)");
    }
}
