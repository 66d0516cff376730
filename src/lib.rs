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

//! Zoom, rotate, pan and swipe handling for a media viewer.
//!
//! A [`Viewport`] turns pointer, touch and wheel input into a scale, rotation and
//! translation of the displayed image, and into navigation requests for the item list
//! around it. Painting, loading and the list itself belong to the host.

pub mod config;
pub mod error;
pub mod event;
pub mod gesture;
pub mod point;
pub mod replay;
pub mod viewport;

pub use config::ViewportConfig;
pub use error::{Error, Result};
pub use event::{
    Direction, PointerButton, PointerEvent, TouchEvent, TouchPoint, ViewportEvent, WheelEvent,
    WindowEvent,
};
pub use point::{PointD, SizeD, VectorD};
pub use viewport::{
    FixedLayout, GestureStatus, Layout, Matrix, NavButtons, SubscriptionId, ToolbarState,
    TransformState, ViewCursor, Viewport,
};
