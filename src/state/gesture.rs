// Gesture interpreter: turns raw pointer/touch/wheel coordinates into
// transform deltas. One session per viewport; at most one phase is active.

use crate::state::transform::Transform;

/// Fixed zoom step per wheel tick, regardless of delta magnitude.
pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureDelta {
    ZoomAbout {
        factor: f64,
        pivot_x: f64,
        pivot_y: f64,
    },
    PanTo {
        translate_x: f64,
        translate_y: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Idle,
    Dragging {
        start_x: f64,
        start_y: f64,
        origin_x: f64,
        origin_y: f64,
    },
    Pinching {
        last_distance: f64,
    },
}

#[derive(Debug, Clone, Default)]
pub struct GestureSession {
    phase: Phase,
}

impl GestureSession {
    /// Wheel ticks are valid from any phase and do not change it.
    pub fn wheel(&self, delta_y: f64, cursor_x: f64, cursor_y: f64) -> GestureDelta {
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        GestureDelta::ZoomAbout {
            factor,
            pivot_x: cursor_x,
            pivot_y: cursor_y,
        }
    }

    /// Records the pointer position and the translation at drag start, so
    /// every subsequent move recomputes from the origin instead of
    /// accumulating increments.
    pub fn begin_drag(&mut self, x: f64, y: f64, transform: &Transform) {
        self.phase = Phase::Dragging {
            start_x: x,
            start_y: y,
            origin_x: transform.translate_x,
            origin_y: transform.translate_y,
        };
    }

    pub fn drag_to(&mut self, x: f64, y: f64) -> Option<GestureDelta> {
        match self.phase {
            Phase::Dragging {
                start_x,
                start_y,
                origin_x,
                origin_y,
            } => Some(GestureDelta::PanTo {
                translate_x: origin_x + (x - start_x),
                translate_y: origin_y + (y - start_y),
            }),
            _ => None,
        }
    }

    pub fn end_drag(&mut self) {
        self.phase = Phase::Idle;
    }

    /// A second contact supersedes any single-finger drag on this viewport.
    pub fn begin_pinch(&mut self, distance: f64) {
        self.phase = if distance > 0.0 {
            Phase::Pinching {
                last_distance: distance,
            }
        } else {
            Phase::Idle
        };
    }

    /// Zoom factor is the ratio of consecutive two-finger distances; the
    /// pivot is the current midpoint of the contacts.
    pub fn pinch_to(&mut self, distance: f64, mid_x: f64, mid_y: f64) -> Option<GestureDelta> {
        match &mut self.phase {
            Phase::Pinching { last_distance } if distance > 0.0 => {
                let factor = distance / *last_distance;
                *last_distance = distance;
                Some(GestureDelta::ZoomAbout {
                    factor,
                    pivot_x: mid_x,
                    pivot_y: mid_y,
                })
            }
            _ => None,
        }
    }

    /// Contact count dropped. Below two fingers the whole gesture ends; a
    /// drag is never resumed mid-gesture.
    pub fn touch_released(&mut self, remaining: u32) {
        if remaining < 2 {
            self.phase = Phase::Idle;
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }
}

/// Midpoint and distance of a two-finger contact pair.
pub fn pinch_geometry(x0: f64, y0: f64, x1: f64, y1: f64) -> (f64, f64, f64) {
    let mid_x = (x0 + x1) / 2.0;
    let mid_y = (y0 + y1) / 2.0;
    let distance = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
    (mid_x, mid_y, distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::transform::{MAX_SCALE, Transform};

    #[test]
    fn wheel_step_ignores_delta_magnitude() {
        let session = GestureSession::default();
        let small = session.wheel(1.0, 10.0, 20.0);
        let large = session.wheel(120.0, 10.0, 20.0);
        assert_eq!(small, large);
        assert_eq!(
            small,
            GestureDelta::ZoomAbout {
                factor: WHEEL_ZOOM_OUT,
                pivot_x: 10.0,
                pivot_y: 20.0,
            }
        );
        let zoom_in = session.wheel(-120.0, 10.0, 20.0);
        assert_eq!(
            zoom_in,
            GestureDelta::ZoomAbout {
                factor: WHEEL_ZOOM_IN,
                pivot_x: 10.0,
                pivot_y: 20.0,
            }
        );
    }

    #[test]
    fn drag_recomputes_from_origin() {
        let mut session = GestureSession::default();
        let transform = Transform {
            scale: 1.0,
            translate_x: 5.0,
            translate_y: 5.0,
        };
        session.begin_drag(10.0, 10.0, &transform);
        assert_eq!(
            session.drag_to(14.0, 13.0),
            Some(GestureDelta::PanTo {
                translate_x: 9.0,
                translate_y: 8.0,
            })
        );
        // Back to the press point restores the origin translation exactly.
        assert_eq!(
            session.drag_to(10.0, 10.0),
            Some(GestureDelta::PanTo {
                translate_x: 5.0,
                translate_y: 5.0,
            })
        );
    }

    #[test]
    fn drag_round_trip_restores_translation() {
        let mut session = GestureSession::default();
        let mut transform = Transform::default();
        session.begin_drag(0.0, 0.0, &transform);
        transform.apply(&session.drag_to(37.0, -12.0).unwrap());
        session.end_drag();
        session.begin_drag(37.0, -12.0, &transform);
        transform.apply(&session.drag_to(0.0, 0.0).unwrap());
        session.end_drag();
        assert_eq!(transform, Transform::default());
    }

    #[test]
    fn moves_without_a_session_are_ignored() {
        let mut session = GestureSession::default();
        assert_eq!(session.drag_to(50.0, 50.0), None);
        assert_eq!(session.pinch_to(100.0, 0.0, 0.0), None);
        // Stray releases land back in Idle, never panic.
        session.end_drag();
        session.touch_released(0);
        assert!(session.is_idle());
    }

    #[test]
    fn second_finger_supersedes_drag() {
        let mut session = GestureSession::default();
        session.begin_drag(10.0, 10.0, &Transform::default());
        assert!(session.is_dragging());
        session.begin_pinch(100.0);
        assert!(!session.is_dragging());
        assert_eq!(session.drag_to(20.0, 20.0), None);
        let delta = session.pinch_to(110.0, 15.0, 15.0).unwrap();
        assert_eq!(
            delta,
            GestureDelta::ZoomAbout {
                factor: 110.0 / 100.0,
                pivot_x: 15.0,
                pivot_y: 15.0,
            }
        );
    }

    #[test]
    fn pinch_factor_tracks_consecutive_distances() {
        let mut session = GestureSession::default();
        session.begin_pinch(100.0);
        let grow = session.pinch_to(120.0, 0.0, 0.0).unwrap();
        let shrink = session.pinch_to(60.0, 0.0, 0.0).unwrap();
        match (grow, shrink) {
            (
                GestureDelta::ZoomAbout { factor: f1, .. },
                GestureDelta::ZoomAbout { factor: f2, .. },
            ) => {
                assert!((f1 - 1.2).abs() < 1e-12);
                assert!((f2 - 0.5).abs() < 1e-12);
            }
            other => panic!("expected zoom deltas, got {other:?}"),
        }
    }

    #[test]
    fn lifting_a_finger_ends_the_gesture_without_resuming_the_drag() {
        let mut session = GestureSession::default();
        session.begin_drag(0.0, 0.0, &Transform::default());
        session.begin_pinch(80.0);
        session.touch_released(1);
        assert!(session.is_idle());
        assert_eq!(session.drag_to(5.0, 5.0), None);
        // Two remaining contacts keep the pinch alive.
        session.begin_pinch(80.0);
        session.touch_released(2);
        assert!(session.pinch_to(90.0, 0.0, 0.0).is_some());
    }

    #[test]
    fn degenerate_pinch_distances_are_rejected() {
        let mut session = GestureSession::default();
        session.begin_pinch(0.0);
        assert!(session.is_idle());
        session.begin_pinch(50.0);
        assert_eq!(session.pinch_to(0.0, 0.0, 0.0), None);
    }

    #[test]
    fn pinch_overshoot_clamps_scale_exactly() {
        let mut session = GestureSession::default();
        let mut transform = Transform::default();
        session.begin_pinch(50.0);
        // 50 -> 400 would be an 8x zoom; the transform clamps it.
        transform.apply(&session.pinch_to(400.0, 30.0, 40.0).unwrap());
        assert_eq!(transform.scale, MAX_SCALE);
    }

    #[test]
    fn pinch_geometry_midpoint_and_distance() {
        let (mid_x, mid_y, distance) = pinch_geometry(0.0, 0.0, 6.0, 8.0);
        assert_eq!((mid_x, mid_y), (3.0, 4.0));
        assert!((distance - 10.0).abs() < 1e-12);
    }
}
