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

//! Pan boundary policy.
//!
//! The image may be panned only along an axis where its displayed size exceeds the
//! viewport, and only as far as keeps the viewport covered: the translation on that axis
//! stays within `±(displayed - viewport) / 2`. Where the image fits, the bounds collapse
//! to `[0, 0]` and the translation is pinned at zero.

use crate::point::{SizeD, VectorD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Symmetric translation limits, as half extents per axis
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PanBounds {
    pub max_x: f64,
    pub max_y: f64,
}

fn half_extent(displayed: f64, viewport: f64) -> f64 {
    let usable = displayed.is_finite() && viewport.is_finite() && displayed > 0.0 && viewport > 0.0;
    if usable && displayed > viewport {
        (displayed - viewport) / 2.0
    } else {
        0.0
    }
}

impl PanBounds {
    pub fn new(viewport: SizeD, displayed: SizeD) -> Self {
        Self {
            max_x: half_extent(displayed.width(), viewport.width()),
            max_y: half_extent(displayed.height(), viewport.height()),
        }
    }

    pub fn max(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.max_x,
            Axis::Y => self.max_y,
        }
    }

    pub fn is_pannable(&self, axis: Axis) -> bool {
        self.max(axis) > 0.0
    }

    pub fn any_pannable(&self) -> bool {
        self.is_pannable(Axis::X) || self.is_pannable(Axis::Y)
    }

    /// Clamps the translation into the bounds. Applying it twice is the same as once.
    pub fn clamp(&self, translate: VectorD) -> VectorD {
        VectorD::new(
            translate.x().clamp(-self.max_x, self.max_x),
            translate.y().clamp(-self.max_y, self.max_y),
        )
    }

    /// Would a drag by `delta` along `axis` stay within the bounds?
    ///
    /// Reaching the boundary exactly is allowed. A zero delta is allowed on any pannable
    /// axis.
    pub fn can_move(&self, translate: VectorD, axis: Axis, delta: f64) -> bool {
        if !self.is_pannable(axis) {
            return false;
        }
        let max = self.max(axis);
        let next = component(translate, axis) + delta;
        if delta < 0.0 {
            next >= -max
        } else if delta > 0.0 {
            next <= max
        } else {
            true
        }
    }

    /// Is there room left to move by `delta` along `axis`?
    ///
    /// Strict version of `can_move`: false once the translation is pinned at the boundary
    /// in the direction of `delta`.
    pub fn can_shift_further(&self, translate: VectorD, axis: Axis, delta: f64) -> bool {
        if !self.is_pannable(axis) {
            return false;
        }
        let max = self.max(axis);
        let next = component(translate, axis) + delta;
        if delta < 0.0 {
            next > -max
        } else if delta > 0.0 {
            next < max
        } else {
            true
        }
    }
}

fn component(v: VectorD, axis: Axis) -> f64 {
    match axis {
        Axis::X => v.x(),
        Axis::Y => v.y(),
    }
}
