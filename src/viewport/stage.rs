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

use crate::{
    config::ViewportConfig,
    point::{PointD, SizeD},
};

use super::{
    clamp::{Axis, PanBounds},
    geometry::{self, Layout},
    status::GestureStatus,
    transform::TransformState,
};

/// Mutable view of the viewport state, lent to the gesture trackers and the zoom engine
/// for the duration of one event.
pub struct Stage<'a> {
    pub transform: &'a mut TransformState,
    pub status: &'a mut GestureStatus,
    pub layout: &'a dyn Layout,
    pub config: &'a ViewportConfig,
}

impl<'a> Stage<'a> {
    pub fn new(
        transform: &'a mut TransformState,
        status: &'a mut GestureStatus,
        layout: &'a dyn Layout,
        config: &'a ViewportConfig,
    ) -> Self {
        Self {
            transform,
            status,
            layout,
            config,
        }
    }

    pub fn viewport_frame(&self) -> SizeD {
        geometry::viewport_frame(self.layout)
    }

    pub fn displayed_image_frame(&self) -> SizeD {
        geometry::displayed_image_frame(
            self.layout.image(),
            self.transform.scale,
            self.transform.rotation,
        )
    }

    pub fn image_center(&self) -> PointD {
        geometry::image_center(self.viewport_frame(), self.transform.translate)
    }

    pub fn screen_to_image(&self, screen: PointD) -> PointD {
        geometry::screen_to_image(
            screen,
            self.image_center(),
            self.displayed_image_frame(),
            self.transform.rotation,
        )
    }

    pub fn image_to_screen(&self, local: PointD) -> PointD {
        geometry::image_to_screen(
            local,
            self.image_center(),
            self.displayed_image_frame(),
            self.transform.rotation,
        )
    }

    pub fn pan_bounds(&self) -> PanBounds {
        PanBounds::new(self.viewport_frame(), self.displayed_image_frame())
    }

    pub fn clamp_position(&mut self) {
        self.transform.translate = self.pan_bounds().clamp(self.transform.translate);
    }

    /// Panning is enabled and the image overflows the viewport on some axis
    pub fn can_pan(&self) -> bool {
        !self.config.pan_disabled && self.pan_bounds().any_pannable()
    }

    pub fn can_move(&self, axis: Axis, delta: f64) -> bool {
        self.pan_bounds()
            .can_move(self.transform.translate, axis, delta)
    }

    pub fn can_shift_further(&self, axis: Axis, delta: f64) -> bool {
        self.pan_bounds()
            .can_shift_further(self.transform.translate, axis, delta)
    }

    /// Moves the image by the parts of `(dx, dy)` that keep it within bounds, then clamps
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if self.can_move(Axis::X, dx) {
            let x = self.transform.translate.x() + dx;
            self.transform.translate.set_x(x);
        }
        if self.can_move(Axis::Y, dy) {
            let y = self.transform.translate.y() + dy;
            self.transform.translate.set_y(y);
        }
        self.clamp_position();
    }

    /// Adds a quarter-turn multiple to the rotation and clamps for the swapped axes
    pub fn rotate_by(&mut self, delta: i32) {
        self.transform.rotation += delta;
        self.clamp_position();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{point::VectorD, viewport::geometry::FixedLayout};

    #[test]
    fn test_pan_by_is_gated_per_axis() {
        let layout = FixedLayout::new(SizeD::new(800.0, 600.0), SizeD::new(1000.0, 500.0));
        let config = ViewportConfig::default();
        let mut transform = TransformState::default();
        let mut status = GestureStatus::default();
        let mut stage = Stage::new(&mut transform, &mut status, &layout, &config);

        // only x overflows
        stage.pan_by(-40.0, 25.0);
        assert_eq!(stage.transform.translate, VectorD::new(-40.0, 0.0));

        // a delta that would pass the boundary is dropped, not truncated
        stage.pan_by(-80.0, 0.0);
        assert_eq!(stage.transform.translate, VectorD::new(-40.0, 0.0));
        stage.pan_by(-60.0, 0.0);
        assert_eq!(stage.transform.translate, VectorD::new(-100.0, 0.0));
    }

    #[test]
    fn test_rotation_reclamps() {
        let layout = FixedLayout::new(SizeD::new(800.0, 600.0), SizeD::new(1000.0, 500.0));
        let config = ViewportConfig::default();
        let mut transform = TransformState::default();
        let mut status = GestureStatus::default();
        let mut stage = Stage::new(&mut transform, &mut status, &layout, &config);

        stage.pan_by(-100.0, 0.0);
        assert_eq!(stage.transform.translate.x(), -100.0);

        // displayed frame becomes 500x1000: x no longer overflows, y does
        stage.rotate_by(90);
        assert_eq!(stage.transform.translate, VectorD::new(0.0, 0.0));
        assert!(!stage.pan_bounds().is_pannable(Axis::X));
        assert_eq!(stage.pan_bounds().max_y, 200.0);
    }
}
