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

use serde::Serialize;

use crate::point::{PointD, SizeD, VectorD};

/// Floating point comparison epsilon for zoom state detection
pub const SCALE_EPSILON: f64 = 1.0e-6;

/// Represents the current zoom state of the image relative to its laid out size.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Copy)]
pub enum ZoomState {
    /// Image is displayed at scale 1.0
    NoZoom,
    /// Image is enlarged (scale > 1.0)
    ZoomedIn,
    /// Image is reduced (scale < 1.0)
    ZoomedOut,
}

/// Scale, rotation and translation of the displayed image.
///
/// The transform is applied around the container center in the order translate,
/// scale, rotate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformState {
    /// Current scale factor (1.0 = laid out size)
    pub(crate) scale: f64,
    /// Scale before the most recent scale change, restored by double tap
    pub(crate) last_scale: f64,
    /// Rotation in degrees, a multiple of 90. Accumulates without wrapping so that a
    /// rotate animation never runs the long way round.
    pub(crate) rotation: i32,
    /// Offset of the image center from the container center (screen coords)
    pub(crate) translate: VectorD,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            last_scale: 1.0,
            rotation: 0,
            translate: VectorD::default(),
        }
    }
}

impl TransformState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns scale, rotation and translation to their initial values
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn last_scale(&self) -> f64 {
        self.last_scale
    }

    pub fn translate(&self) -> VectorD {
        self.translate
    }

    pub fn translate_x(&self) -> f64 {
        self.translate.x()
    }

    pub fn translate_y(&self) -> f64 {
        self.translate.y()
    }

    /// The accumulated rotation, possibly beyond ±360
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    /// Rotation normalized into 0, 90, 180 or 270 degrees
    pub fn rotation_degrees(&self) -> i32 {
        self.rotation.rem_euclid(360)
    }

    pub fn is_rotated(&self) -> bool {
        self.rotation_degrees() != 0
    }

    pub fn state(&self) -> ZoomState {
        if self.scale > 1.0 + SCALE_EPSILON {
            ZoomState::ZoomedIn
        } else if self.scale < 1.0 - SCALE_EPSILON {
            ZoomState::ZoomedOut
        } else {
            ZoomState::NoZoom
        }
    }

    pub fn is_zoomed(&self) -> bool {
        self.state() != ZoomState::NoZoom
    }

    /// CSS transform for an element centered in its container
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({}) rotate({}deg)",
            self.translate.x(),
            self.translate.y(),
            self.scale,
            self.rotation
        )
    }

    /// Creates a transformation matrix for rendering the image.
    ///
    /// The matrix maps image coordinates relative to the image center (at scale 1,
    /// rotation 0) to screen coordinates of a viewport of the given size.
    pub fn matrix(&self, viewport: SizeD) -> Matrix {
        let s = self.scale;
        let center = viewport.center() + self.translate;
        let (xx, yx, xy, yy) = match self.rotation_degrees() {
            90 => (0.0, s, -s, 0.0),
            180 => (-s, 0.0, 0.0, -s),
            270 => (0.0, -s, s, 0.0),
            _ => (s, 0.0, 0.0, s),
        };
        Matrix {
            xx,
            yx,
            xy,
            yy,
            x0: center.x(),
            y0: center.y(),
        }
    }
}

/// 2D affine matrix in the cairo layout: `x' = xx*x + xy*y + x0`, `y' = yx*x + yy*y + y0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matrix {
    pub xx: f64,
    pub yx: f64,
    pub xy: f64,
    pub yy: f64,
    pub x0: f64,
    pub y0: f64,
}

impl Matrix {
    pub fn transform_point(&self, p: PointD) -> PointD {
        PointD::new(
            self.xx * p.x() + self.xy * p.y() + self.x0,
            self.yx * p.x() + self.yy * p.y() + self.y0,
        )
    }
}
