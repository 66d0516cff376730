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

//! Classification of a finished drag into pan, navigate or dismiss.

use crate::{event::Direction, point::PointD};

/// Start and latest position of a drag.
///
/// Reset when a gesture starts, updated on every move and read once when it ends.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GestureOrigin {
    pub init: PointD,
    pub last: PointD,
}

impl GestureOrigin {
    pub fn new(position: PointD) -> Self {
        Self {
            init: position,
            last: position,
        }
    }

    pub fn displacement(&self) -> (f64, f64) {
        (
            self.last.x() - self.init.x(),
            self.last.y() - self.init.y(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Ordinary pan, nothing to do
    Pan,
    Navigate(Direction),
    Dismiss,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeRules {
    pub tolerance_x: f64,
    pub tolerance_y: f64,
    pub right_to_left: bool,
}

/// Resolves what a completed drag meant.
///
/// A horizontal swipe only navigates once the image cannot be panned any further in
/// the swipe direction; `can_shift_further` is asked with the sign of the displacement.
/// A vertical swipe always dismisses.
pub fn resolve<F>(origin: &GestureOrigin, rules: &SwipeRules, can_shift_further: F) -> Intent
where
    F: Fn(f64) -> bool,
{
    let (dx, dy) = origin.displacement();

    if dx.abs() > dy.abs() && dx.abs() > rules.tolerance_x {
        let step = if dx < 0.0 { -1.0 } else { 1.0 };
        if can_shift_further(step) {
            return Intent::Pan;
        }
        let direction = if dx < 0.0 {
            Direction::Next
        } else {
            Direction::Prev
        };
        if rules.right_to_left {
            Intent::Navigate(direction.mirrored())
        } else {
            Intent::Navigate(direction)
        }
    } else if dy.abs() > dx.abs() && dy.abs() > rules.tolerance_y {
        Intent::Dismiss
    } else {
        Intent::Pan
    }
}
