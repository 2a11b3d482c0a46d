//! Cursor-anchored zoom/pan state for the viewer.
//!
//! Kept free of DOM types so the zoom properties can be unit tested
//! natively. The canvas side applies the returned [`ZoomStep`] to the 2d
//! context; transforms compose multiplicatively in application order, so
//! the translate/scale/translate sequence must be applied exactly as
//! returned.

/// Normalized wheel direction. Raw wheel deltas vary wildly between
/// devices, so only the sign is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// From a wheel event's delta-y (negative delta means zoom in).
    pub fn from_delta_y(delta_y: f64) -> Self {
        if delta_y < 0.0 { Self::In } else { Self::Out }
    }

    fn sign(self) -> f64 {
        match self {
            Self::In => 1.0,
            Self::Out => -1.0,
        }
    }
}

/// The context-transform sequence for one zoom step, in application order:
/// translate by the old origin, scale by `factor`, translate by the negated
/// new origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomStep {
    pub factor: f64,
    pub pre_translate: (f64, f64),
    pub post_translate: (f64, f64),
}

/// Visible-area state for one viewer instance.
///
/// `origin_*` is the image-space point aligned with the canvas top-left;
/// `visible_*` is derived as canvas size / scale and holds
/// `visible_width * scale == width` within floating-point tolerance.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub origin_x: f64,
    pub origin_y: f64,
    pub visible_width: f64,
    pub visible_height: f64,
    width: f64,
    height: f64,
    min_scale: f64,
    max_scale: f64,
    zoom_intensity: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, min_scale: f64, max_scale: f64, zoom_intensity: f64) -> Self {
        Self {
            scale: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
            visible_width: width,
            visible_height: height,
            width,
            height,
            min_scale,
            max_scale,
            zoom_intensity,
        }
    }

    /// One wheel step at the given canvas-local cursor position.
    ///
    /// Returns `None` when the event is ignored: non-finite cursor
    /// coordinates, or already at the boundary in the zoom direction
    /// (silently, no user feedback). Otherwise mutates scale/origin and
    /// returns the transform sequence to apply to the context, chosen so
    /// the image point under the cursor stays visually fixed.
    pub fn zoom_at(&mut self, cursor_x: f64, cursor_y: f64, dir: ZoomDirection) -> Option<ZoomStep> {
        if !cursor_x.is_finite() || !cursor_y.is_finite() {
            return None;
        }
        if (dir == ZoomDirection::Out && self.scale <= self.min_scale)
            || (dir == ZoomDirection::In && self.scale >= self.max_scale)
        {
            return None;
        }

        // Multiplicative step; clamp the target so scale never leaves
        // [min, max] even by one overshooting step.
        let raw = (dir.sign() * self.zoom_intensity).exp();
        let new_scale = (self.scale * raw).clamp(self.min_scale, self.max_scale);
        let factor = new_scale / self.scale;

        let pre_translate = (self.origin_x, self.origin_y);
        self.origin_x -= cursor_x / (self.scale * factor) - cursor_x / self.scale;
        self.origin_y -= cursor_y / (self.scale * factor) - cursor_y / self.scale;
        let post_translate = (-self.origin_x, -self.origin_y);

        self.scale = new_scale;
        self.visible_width = self.width / self.scale;
        self.visible_height = self.height / self.scale;

        Some(ZoomStep {
            factor,
            pre_translate,
            post_translate,
        })
    }

    /// Back to the canonical view: unit scale, origin at the image-space
    /// top-left, full canvas visible. The caller resets the context
    /// transform to identity alongside.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.origin_x = 0.0;
        self.origin_y = 0.0;
        self.visible_width = self.width;
        self.visible_height = self.height;
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Image-space point currently under the given canvas position.
    pub fn image_point_at(&self, canvas_x: f64, canvas_y: f64) -> (f64, f64) {
        (
            self.origin_x + canvas_x / self.scale,
            self.origin_y + canvas_y / self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn viewport() -> Viewport {
        Viewport::new(500.0, 500.0, 0.5, 2.0, 0.2)
    }

    #[test]
    fn single_step_matches_worked_example() {
        // 500x500 canvas, intensity 0.2, cursor dead center, scale 1.
        let mut vp = viewport();
        let step = vp.zoom_at(250.0, 250.0, ZoomDirection::In).unwrap();

        let expected = (0.2f64).exp();
        assert!((step.factor - expected).abs() < TOL);
        assert!((vp.scale - expected).abs() < TOL);
        // origin -= 250/exp(0.2) - 250/1  =>  origin grows by ~45.32
        let shift = 250.0 - 250.0 / expected;
        assert!((vp.origin_x - shift).abs() < TOL);
        assert!((vp.origin_y - shift).abs() < TOL);
        assert!((shift - 45.32).abs() < 0.01);
    }

    #[test]
    fn zoom_in_then_out_restores_scale() {
        let mut vp = viewport();
        for _ in 0..3 {
            vp.zoom_at(120.0, 310.0, ZoomDirection::In).unwrap();
        }
        for _ in 0..3 {
            vp.zoom_at(120.0, 310.0, ZoomDirection::Out).unwrap();
        }
        assert!((vp.scale - 1.0).abs() < TOL);
    }

    #[test]
    fn cursor_point_is_anchored_across_zoom() {
        let mut vp = viewport();
        let cursor = (137.0, 402.0);
        for dir in [
            ZoomDirection::In,
            ZoomDirection::In,
            ZoomDirection::Out,
            ZoomDirection::In,
        ] {
            let before = vp.image_point_at(cursor.0, cursor.1);
            vp.zoom_at(cursor.0, cursor.1, dir).unwrap();
            let after = vp.image_point_at(cursor.0, cursor.1);
            assert!((before.0 - after.0).abs() < TOL);
            assert!((before.1 - after.1).abs() < TOL);
        }
    }

    #[test]
    fn scale_stays_within_bounds_for_any_sequence() {
        let mut vp = viewport();
        // Hammer one direction well past the bound, then the other.
        for _ in 0..50 {
            vp.zoom_at(250.0, 250.0, ZoomDirection::In);
            assert!(vp.scale <= 2.0 + TOL);
        }
        assert!((vp.scale - 2.0).abs() < TOL);
        for _ in 0..50 {
            vp.zoom_at(250.0, 250.0, ZoomDirection::Out);
            assert!(vp.scale >= 0.5 - TOL);
        }
        assert!((vp.scale - 0.5).abs() < TOL);
    }

    #[test]
    fn event_at_boundary_is_ignored_entirely() {
        let mut vp = viewport();
        while vp.zoom_at(100.0, 100.0, ZoomDirection::In).is_some() {}
        let frozen = vp.clone();
        assert!(vp.zoom_at(100.0, 100.0, ZoomDirection::In).is_none());
        assert_eq!(vp, frozen);
    }

    #[test]
    fn visible_size_tracks_scale() {
        let mut vp = viewport();
        for dir in [ZoomDirection::In, ZoomDirection::In, ZoomDirection::Out] {
            vp.zoom_at(33.0, 441.0, dir).unwrap();
            assert!((vp.visible_width * vp.scale - 500.0).abs() < TOL);
            assert!((vp.visible_height * vp.scale - 500.0).abs() < TOL);
        }
    }

    #[test]
    fn reset_restores_canonical_view() {
        let mut vp = viewport();
        for _ in 0..4 {
            vp.zoom_at(480.0, 20.0, ZoomDirection::In);
        }
        vp.reset();
        assert_eq!(vp.scale, 1.0);
        assert_eq!((vp.origin_x, vp.origin_y), (0.0, 0.0));
        assert_eq!(vp.visible_width, 500.0);
        assert_eq!(vp.visible_height, 500.0);
    }

    #[test]
    fn non_finite_cursor_is_ignored() {
        let mut vp = viewport();
        assert!(vp.zoom_at(f64::NAN, 10.0, ZoomDirection::In).is_none());
        assert!(vp.zoom_at(10.0, f64::INFINITY, ZoomDirection::In).is_none());
        assert_eq!(vp.scale, 1.0);
        assert_eq!((vp.origin_x, vp.origin_y), (0.0, 0.0));
    }

    #[test]
    fn step_carries_old_and_negated_new_origin() {
        let mut vp = viewport();
        vp.zoom_at(250.0, 250.0, ZoomDirection::In).unwrap();
        let before = (vp.origin_x, vp.origin_y);
        let step = vp.zoom_at(100.0, 200.0, ZoomDirection::In).unwrap();
        assert_eq!(step.pre_translate, before);
        assert_eq!(step.post_translate, (-vp.origin_x, -vp.origin_y));
    }

    #[test]
    fn direction_from_wheel_delta() {
        assert_eq!(ZoomDirection::from_delta_y(-120.0), ZoomDirection::In);
        assert_eq!(ZoomDirection::from_delta_y(3.0), ZoomDirection::Out);
        assert_eq!(ZoomDirection::from_delta_y(0.0), ZoomDirection::Out);
    }
}
