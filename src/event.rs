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

//! Input events fed into a viewport and the notifications it emits.
//!
//! Positions are in screen pixels relative to the top-left corner of the viewport
//! container. Every timed event carries the instant it happened; the engine never reads
//! the clock itself.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::point::PointD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: PointD,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: PointD::new(x, y),
            button: PointerButton::Primary,
        }
    }

    pub fn with_button(self, button: PointerButton) -> Self {
        Self { button, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub position: PointD,
}

impl TouchPoint {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id,
            position: PointD::new(x, y),
        }
    }
}

/// A touch event listing every touch still on the surface after the change, in the
/// order the touches were placed.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub touches: Vec<TouchPoint>,
    pub time: Instant,
}

impl TouchEvent {
    pub fn new(touches: Vec<TouchPoint>, time: Instant) -> Self {
        Self { touches, time }
    }

    /// Event with no touches left on the surface
    pub fn released(time: Instant) -> Self {
        Self {
            touches: Vec::new(),
            time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub position: PointD,
    /// Negative values scroll up
    pub delta_y: f64,
    pub time: Instant,
}

impl WheelEvent {
    pub fn new(x: f64, y: f64, delta_y: f64, time: Instant) -> Self {
        Self {
            position: PointD::new(x, y),
            delta_y,
            time,
        }
    }
}

/// Events of the surrounding window, delivered only while the viewport is attached.
/// They end gestures whose own end event went elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowEvent {
    Resize,
    Blur,
    PointerUp,
    PointerLeave,
    TouchCancel,
}

/// Logical navigation direction through the item list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    pub fn mirrored(self) -> Self {
        match self {
            Direction::Prev => Direction::Next,
            Direction::Next => Direction::Prev,
        }
    }
}

/// Notifications emitted synchronously by a viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewportEvent {
    /// Transform, status or index changed
    Changed,
    Prev { old: usize, new: usize },
    Next { old: usize, new: usize },
    IndexChanged { old: usize, new: usize },
    /// New rotation, normalized to 0, 90, 180 or 270
    Rotated(i32),
    /// A vertical swipe asked to close the viewer
    Dismiss,
}
