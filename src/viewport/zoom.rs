// mviewport -- Zoom, rotate, pan and swipe gesture engine for media viewers
//
// Copyright (c) 2024-2025 Martin van der Werff <github (at) newinnovations.nl>
//
// This file is part of mviewport.
//
// mviewport is free software: you can redistribute it and/or modify it under the terms of
// the GNU Affero General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR
// IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND
// FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR
// BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
// STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! Zoom engine.
//!
//! Button zoom, wheel zoom and pinch zoom all end up in the same scale update: snap
//! to 1.0 or to the native-resolution scale when close, clamp to the configured range,
//! remember the previous scale, re-clamp the position.

use log::trace;

use crate::point::{PointD, VectorD};

use super::{geometry::max_native_scale, stage::Stage, transform::SCALE_EPSILON};

/// Snap distance for the zoom buttons
pub const DISCRETE_SNAP_EPSILON: f64 = 0.05;
/// Snap distance for wheel and pinch zoom
pub const ANCHORED_SNAP_EPSILON: f64 = 0.5;

impl Stage<'_> {
    fn snap_scale(&self, scale: f64, epsilon: f64) -> f64 {
        let native = max_native_scale(self.layout);
        if (1.0 - scale).abs() < epsilon {
            1.0
        } else if (native - scale).abs() < epsilon {
            native
        } else {
            scale
        }
    }

    fn limit_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.transform.scale;
        }
        let (min, max) = self.config.zoom_range();
        scale.clamp(min, max)
    }

    /// Snaps, clamps and applies a new scale without moving the image center
    pub fn set_scale(&mut self, new_scale: f64, epsilon: f64) {
        let new_scale = self.limit_scale(self.snap_scale(new_scale, epsilon));
        self.transform.last_scale = self.transform.scale;
        self.transform.scale = new_scale;
        self.clamp_position();
    }

    fn min_zoom(&self) -> f64 {
        self.config.zoom_range().0
    }

    fn max_zoom(&self) -> f64 {
        self.config.zoom_range().1
    }

    pub fn is_at_max_zoom(&self) -> bool {
        self.transform.scale >= self.max_zoom() - SCALE_EPSILON
    }

    pub fn is_at_min_zoom(&self) -> bool {
        self.transform.scale <= self.min_zoom() + SCALE_EPSILON
    }

    /// One `zoom_step` up, stopping at `max_zoom`
    pub fn zoom_in_step(&mut self) {
        if self.is_at_max_zoom() {
            return;
        }
        let target = (self.transform.scale + self.config.zoom_step).min(self.max_zoom());
        self.set_scale(target, DISCRETE_SNAP_EPSILON);
    }

    /// One `zoom_step` down, stopping at `min_zoom`
    pub fn zoom_out_step(&mut self) {
        if self.is_at_min_zoom() {
            return;
        }
        let target = (self.transform.scale - self.config.zoom_step).max(self.min_zoom());
        self.set_scale(target, DISCRETE_SNAP_EPSILON);
    }

    /// Updates the scale while keeping the image pixel under `anchor` in place.
    ///
    /// The anchor is mapped to image-local coordinates at the current scale, the same
    /// local point is scaled by `new / previous` and projected back with the translation
    /// unchanged; the difference to the anchor is then added to the translation.
    pub fn zoom_around_point(&mut self, target: f64, anchor: PointD) {
        let target = self.snap_scale(target, ANCHORED_SNAP_EPSILON);
        let before = self.screen_to_image(anchor);

        let previous = self.transform.scale;
        self.transform.last_scale = previous;
        self.transform.scale = self.limit_scale(target);

        let ratio = self.transform.scale / previous;
        let after = self.image_to_screen(before.scale(ratio));
        let shift: VectorD = anchor - after;
        self.transform.translate += shift;
        trace!(
            "zoom around ({:.1}, {:.1}): {previous:.3} -> {:.3}",
            anchor.x(),
            anchor.y(),
            self.transform.scale
        );

        self.clamp_position();
    }

    /// Switches between scale 1 and `max_zoom`, recentering the image
    pub fn toggle_resize(&mut self) {
        self.transform.scale = if (self.transform.scale - 1.0).abs() < SCALE_EPSILON {
            self.max_zoom()
        } else {
            1.0
        };
        self.transform.translate = VectorD::default();
        self.clamp_position();
    }

    /// Jumps to `max_zoom`, or back to the remembered scale when already there
    pub fn double_tap_zoom(&mut self) {
        let max = self.max_zoom();
        if self.transform.scale != max {
            self.transform.last_scale = self.transform.scale;
            self.transform.scale = max;
        } else {
            self.transform.scale = self.limit_scale(self.transform.last_scale);
        }
        self.clamp_position();
    }

    /// Wheel notch: up zooms in, down zooms out, around the cursor
    pub fn wheel_zoom(&mut self, delta_y: f64, anchor: PointD) {
        let direction = if delta_y < 0.0 { 1.0 } else { -1.0 };
        let target = self.transform.scale + direction * self.config.zoom_step;
        self.zoom_around_point(target, anchor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ViewportConfig,
        point::SizeD,
        viewport::{geometry::FixedLayout, status::GestureStatus, transform::TransformState},
    };

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    fn approx_eq_point(a: &PointD, b: &PointD, tolerance: f64) -> bool {
        approx_eq(a.x(), b.x(), tolerance) && approx_eq(a.y(), b.y(), tolerance)
    }

    struct Fixture {
        layout: FixedLayout,
        config: ViewportConfig,
        transform: TransformState,
        status: GestureStatus,
    }

    impl Fixture {
        fn new(viewport: SizeD, image: SizeD) -> Self {
            Self {
                layout: FixedLayout::new(viewport, image),
                config: ViewportConfig::default(),
                transform: TransformState::default(),
                status: GestureStatus::default(),
            }
        }

        fn stage(&mut self) -> Stage<'_> {
            Stage::new(
                &mut self.transform,
                &mut self.status,
                &self.layout,
                &self.config,
            )
        }
    }

    #[test]
    fn test_zoom_in_seventeen_steps() {
        let mut f = Fixture::new(SizeD::new(800.0, 600.0), SizeD::new(400.0, 300.0));
        let mut stage = f.stage();
        let mut previous = stage.transform.scale;
        for _ in 0..17 {
            stage.zoom_in_step();
            assert!(stage.transform.scale >= previous);
            assert!(stage.transform.scale <= 3.0);
            previous = stage.transform.scale;
        }
        assert_eq!(stage.transform.scale, 3.0);

        // further steps are no-ops
        stage.zoom_in_step();
        assert_eq!(stage.transform.scale, 3.0);
    }

    #[test]
    fn test_zoom_out_stops_at_min() {
        let mut f = Fixture::new(SizeD::new(800.0, 600.0), SizeD::new(400.0, 300.0));
        let mut stage = f.stage();
        for _ in 0..10 {
            stage.zoom_out_step();
            assert!(stage.transform.scale >= 0.5);
        }
        assert_eq!(stage.transform.scale, 0.5);
    }

    #[test]
    fn test_set_scale_snaps_and_records_last() {
        let mut f = Fixture::new(SizeD::new(800.0, 600.0), SizeD::new(400.0, 300.0));
        f.layout.native = SizeD::new(800.0, 600.0); // native scale 2.0
        let mut stage = f.stage();

        stage.set_scale(1.04, DISCRETE_SNAP_EPSILON);
        assert_eq!(stage.transform.scale, 1.0);

        stage.set_scale(1.96, DISCRETE_SNAP_EPSILON);
        assert_eq!(stage.transform.scale, 2.0);
        assert_eq!(stage.transform.last_scale, 1.0);

        stage.set_scale(1.8, DISCRETE_SNAP_EPSILON);
        assert_eq!(stage.transform.scale, 1.8);
        assert_eq!(stage.transform.last_scale, 2.0);

        stage.set_scale(1.6, ANCHORED_SNAP_EPSILON);
        assert_eq!(stage.transform.scale, 2.0);

        stage.set_scale(25.0, DISCRETE_SNAP_EPSILON);
        assert_eq!(stage.transform.scale, 3.0);
        stage.set_scale(0.01, DISCRETE_SNAP_EPSILON);
        assert_eq!(stage.transform.scale, 0.5);
    }

    #[test]
    fn test_zoom_around_point_is_anchor_stable() {
        let mut f = Fixture::new(SizeD::new(800.0, 600.0), SizeD::new(1600.0, 1200.0));
        for rotation in [0, 90, 180, 270, -90] {
            f.transform = TransformState::default();
            f.transform.rotation = rotation;
            let mut stage = f.stage();
            let anchor = PointD::new(300.0, 200.0);

            let before = stage.screen_to_image(anchor).unscale(stage.transform.scale);
            stage.zoom_around_point(2.4, anchor);
            assert_eq!(stage.transform.scale, 2.4);
            let after = stage.screen_to_image(anchor).unscale(stage.transform.scale);

            assert!(
                approx_eq_point(&before, &after, 1e-9),
                "anchor moved at rotation {rotation}"
            );
            assert_eq!(stage.transform.last_scale, 1.0);
        }
    }

    #[test]
    fn test_zoom_around_point_from_panned_position_clamps() {
        let mut f = Fixture::new(SizeD::new(800.0, 600.0), SizeD::new(1600.0, 1200.0));
        f.transform.scale = 2.0;
        f.transform.translate = VectorD::new(1100.0, 200.0);
        let mut stage = f.stage();

        // zooming out around the right edge: x would land at 750, beyond the bound of 400
        stage.zoom_around_point(1.0, PointD::new(800.0, 300.0));
        assert_eq!(stage.transform.scale, 1.0);
        let bounds = stage.pan_bounds();
        assert_eq!(bounds.max_x, 400.0);
        assert_eq!(bounds.max_y, 300.0);
        assert_eq!(stage.transform.translate.x(), 400.0);
        // y stays inside its bounds and keeps the anchored result
        assert!(approx_eq(stage.transform.translate.y(), 100.0, 1e-9));
    }

    #[test]
    fn test_swapped_zoom_limits() {
        let mut f = Fixture::new(SizeD::new(800.0, 600.0), SizeD::new(400.0, 300.0));
        f.config.min_zoom = 4.0;
        f.config.max_zoom = 3.0;
        let mut stage = f.stage();
        stage.zoom_in_step();
        assert_eq!(stage.transform.scale, 3.0);
        stage.zoom_around_point(10.0, PointD::new(0.0, 0.0));
        assert_eq!(stage.transform.scale, 4.0);
        stage.double_tap_zoom();
        assert_eq!(stage.transform.scale, 3.0);
    }

    #[test]
    fn test_zoom_around_point_shifts_towards_anchor() {
        let mut f = Fixture::new(SizeD::new(800.0, 600.0), SizeD::new(1600.0, 1200.0));
        let mut stage = f.stage();
        // anchor 100px left of and 100px above the center, scale doubles
        stage.zoom_around_point(2.0, PointD::new(300.0, 200.0));
        assert!(approx_eq(stage.transform.translate.x(), 100.0, 1e-9));
        assert!(approx_eq(stage.transform.translate.y(), 100.0, 1e-9));
    }

    #[test]
    fn test_zoom_around_point_snaps_loosely() {
        let mut f = Fixture::new(SizeD::new(800.0, 600.0), SizeD::new(400.0, 300.0));
        let mut stage = f.stage();
        stage.zoom_around_point(1.4, PointD::new(10.0, 10.0));
        assert_eq!(stage.transform.scale, 1.0);
        assert_eq!(stage.transform.translate, VectorD::new(0.0, 0.0));
    }

    #[test]
    fn test_zoom_around_point_clamps() {
        let mut f = Fixture::new(SizeD::new(800.0, 600.0), SizeD::new(400.0, 300.0));
        let mut stage = f.stage();
        stage.zoom_around_point(2.0, PointD::new(0.0, 0.0));
        // displayed 800x600 exactly fills the viewport: nothing to pan
        assert_eq!(stage.transform.translate, VectorD::new(0.0, 0.0));

        stage.zoom_around_point(10.0, PointD::new(0.0, 0.0));
        assert_eq!(stage.transform.scale, 3.0);
        let bounds = stage.pan_bounds();
        assert_eq!(bounds.max_x, 200.0);
        assert_eq!(bounds.max_y, 150.0);
        assert!(stage.transform.translate.x().abs() <= bounds.max_x);
        assert!(stage.transform.translate.y().abs() <= bounds.max_y);
    }

    #[test]
    fn test_toggle_resize() {
        let mut f = Fixture::new(SizeD::new(800.0, 600.0), SizeD::new(800.0, 600.0));
        let mut stage = f.stage();
        stage.toggle_resize();
        assert_eq!(stage.transform.scale, 3.0);
        assert_eq!(stage.transform.translate, VectorD::new(0.0, 0.0));

        stage.pan_by(-50.0, 20.0);
        assert_ne!(stage.transform.translate, VectorD::new(0.0, 0.0));

        stage.toggle_resize();
        assert_eq!(stage.transform.scale, 1.0);
        assert_eq!(stage.transform.translate, VectorD::new(0.0, 0.0));
    }

    #[test]
    fn test_double_tap_zoom_restores() {
        let mut f = Fixture::new(SizeD::new(800.0, 600.0), SizeD::new(400.0, 300.0));
        let mut stage = f.stage();
        stage.set_scale(1.5, DISCRETE_SNAP_EPSILON);

        stage.double_tap_zoom();
        assert_eq!(stage.transform.scale, 3.0);
        assert_eq!(stage.transform.last_scale, 1.5);

        stage.double_tap_zoom();
        assert_eq!(stage.transform.scale, 1.5);
    }

    #[test]
    fn test_wheel_direction() {
        let mut f = Fixture::new(SizeD::new(800.0, 600.0), SizeD::new(400.0, 300.0));
        f.transform.scale = 2.0;
        let mut stage = f.stage();
        stage.wheel_zoom(-120.0, PointD::new(400.0, 300.0));
        assert!(approx_eq(stage.transform.scale, 2.12, 1e-9));
        stage.wheel_zoom(120.0, PointD::new(400.0, 300.0));
        assert!(approx_eq(stage.transform.scale, 2.0, 1e-9));
    }
}
