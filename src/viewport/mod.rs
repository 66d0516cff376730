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

//! Viewport controller.
//!
//! [`Viewport`] owns the transform, the gesture status and the trackers. Every public
//! operation runs to completion, re-clamps the position and then notifies subscribers.

mod clamp;
mod geometry;
mod input;
mod navigate;
mod stage;
mod status;
mod transform;
mod zoom;

use std::time::Instant;

use log::debug;
use serde::Serialize;

pub use clamp::{Axis, PanBounds};
pub use geometry::{
    displayed_image_frame, image_center, image_to_screen, max_native_scale, screen_to_image,
    viewport_frame, FixedLayout, Layout,
};
pub use input::WHEEL_COOLDOWN;
pub use stage::Stage;
pub use status::{GestureStatus, ViewCursor};
pub use transform::{Matrix, TransformState, ZoomState, SCALE_EPSILON};
pub use zoom::{ANCHORED_SNAP_EPSILON, DISCRETE_SNAP_EPSILON};

use crate::{
    config::ViewportConfig,
    event::{Direction, ViewportEvent},
    gesture::{PointerTracker, TouchTracker},
    point::SizeD,
};

/// Handle returned by [`Viewport::connect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&ViewportEvent)>;

/// Enabled state of the zoom and rotate controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolbarState {
    pub zoom_in_disabled: bool,
    pub zoom_out_disabled: bool,
    /// Image is at scale 1, so toggle resize would enlarge it
    pub resize_in: bool,
    pub zoom_disabled: bool,
    pub rotate_disabled: bool,
}

/// Previous/next buttons. `left` and `right` tell which direction the button on that
/// side navigates, which flips for right-to-left layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavButtons {
    pub left: Direction,
    pub right: Direction,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Snapshot {
    transform: TransformState,
    status: GestureStatus,
    index: usize,
}

pub struct Viewport {
    config: ViewportConfig,
    layout: Box<dyn Layout>,
    transform: TransformState,
    status: GestureStatus,
    pointer: PointerTracker,
    touch: TouchTracker,
    index: usize,
    item_count: usize,
    attached: bool,
    wheel_deadline: Option<Instant>,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_subscription: u64,
}

impl Viewport {
    pub fn new(config: ViewportConfig, layout: Box<dyn Layout>) -> Self {
        Self {
            config,
            layout,
            transform: TransformState::default(),
            status: GestureStatus::default(),
            pointer: PointerTracker::default(),
            touch: TouchTracker::default(),
            index: 0,
            item_count: 1,
            attached: false,
            wheel_deadline: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn layout(&self) -> &dyn Layout {
        self.layout.as_ref()
    }

    /// Replaces the size source and re-clamps the position against it
    pub fn set_layout(&mut self, layout: Box<dyn Layout>) {
        self.layout = layout;
        self.track(|vp| vp.stage().clamp_position());
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn status(&self) -> &GestureStatus {
        &self.status
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn css_transform(&self) -> String {
        self.transform.css_transform()
    }

    pub fn matrix(&self, viewport: SizeD) -> Matrix {
        self.transform.matrix(viewport)
    }

    pub fn animate(&self) -> bool {
        self.status.animate()
    }

    fn bounds(&self) -> PanBounds {
        PanBounds::new(
            viewport_frame(self.layout.as_ref()),
            displayed_image_frame(
                self.layout.image(),
                self.transform.scale,
                self.transform.rotation,
            ),
        )
    }

    pub fn cursor(&self) -> ViewCursor {
        if self.status.dragging {
            ViewCursor::Drag
        } else if !self.status.is_blocked()
            && !self.config.pan_disabled
            && self.bounds().any_pannable()
        {
            ViewCursor::Grab
        } else {
            ViewCursor::Normal
        }
    }

    pub fn toolbar(&self) -> ToolbarState {
        let scale = self.transform.scale;
        let (min, max) = self.config.zoom_range();
        ToolbarState {
            zoom_in_disabled: scale >= max - SCALE_EPSILON,
            zoom_out_disabled: scale <= min + SCALE_EPSILON,
            resize_in: (scale - 1.0).abs() < SCALE_EPSILON,
            zoom_disabled: self.config.zoom_disabled,
            rotate_disabled: self.config.rotate_disabled,
        }
    }

    pub fn nav_buttons(&self) -> NavButtons {
        let looping = self.config.loop_navigation && self.item_count > 0;
        let (left, right) = if self.config.right_to_left {
            (Direction::Next, Direction::Prev)
        } else {
            (Direction::Prev, Direction::Next)
        };
        NavButtons {
            left,
            right,
            prev_disabled: !looping && self.index == 0,
            next_disabled: !looping && self.index + 1 >= self.item_count,
        }
    }

    /// Registers a callback for every [`ViewportEvent`]. Callbacks run synchronously,
    /// in registration order, before the operation that triggered them returns.
    pub fn connect<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ViewportEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns false if the id was not connected.
    pub fn disconnect(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn emit(&mut self, event: ViewportEvent) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&event);
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            transform: self.transform,
            status: self.status,
            index: self.index,
        }
    }

    /// Runs `f` and emits [`ViewportEvent::Changed`] when it changed the observable state
    fn track<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let before = self.snapshot();
        let result = f(self);
        if self.snapshot() != before {
            self.emit(ViewportEvent::Changed);
        }
        result
    }

    fn stage(&mut self) -> Stage<'_> {
        Stage::new(
            &mut self.transform,
            &mut self.status,
            self.layout.as_ref(),
            &self.config,
        )
    }

    /// Stage together with the trackers that drive it
    fn parts(&mut self) -> (Stage<'_>, &mut PointerTracker, &mut TouchTracker) {
        (
            Stage::new(
                &mut self.transform,
                &mut self.status,
                self.layout.as_ref(),
                &self.config,
            ),
            &mut self.pointer,
            &mut self.touch,
        )
    }

    /// Zoom buttons and toggle resize are available
    fn zoom_enabled(&self) -> bool {
        !self.config.zoom_disabled && !self.status.is_blocked()
    }

    pub fn zoom_in(&mut self) {
        if !self.zoom_enabled() {
            return;
        }
        self.track(|vp| vp.stage().zoom_in_step());
    }

    pub fn zoom_out(&mut self) {
        if !self.zoom_enabled() {
            return;
        }
        self.track(|vp| vp.stage().zoom_out_step());
    }

    /// Switches between scale 1 and `max_zoom`
    pub fn toggle_resize(&mut self) {
        if !self.zoom_enabled() {
            return;
        }
        self.track(|vp| vp.stage().toggle_resize());
    }

    pub fn rotate_left(&mut self) {
        self.rotate(-90);
    }

    pub fn rotate_right(&mut self) {
        self.rotate(90);
    }

    fn rotate(&mut self, delta: i32) {
        if self.config.rotate_disabled {
            return;
        }
        self.track(|vp| {
            vp.stage().rotate_by(delta);
            let degrees = vp.transform.rotation_degrees();
            debug!("rotated to {degrees}");
            vp.emit(ViewportEvent::Rotated(degrees));
        });
    }

    /// Puts the viewport into its initial state for a new item: identity transform,
    /// no gesture in flight, no load error unless the list is empty. `loading` is left
    /// to the host.
    pub fn reset_for_new_item(&mut self) {
        self.track(|vp| vp.reset_item());
    }

    fn reset_item(&mut self) {
        self.cancel_gestures();
        self.transform.reset();
        self.status.load_error = self.item_count == 0;
    }

    fn cancel_gestures(&mut self) {
        let (mut stage, pointer, touch) = self.parts();
        pointer.cancel(&mut stage);
        touch.cancel(&mut stage);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.track(|vp| vp.status.loading = loading);
    }

    pub fn set_load_error(&mut self, load_error: bool) {
        self.track(|vp| vp.status.load_error = load_error);
    }

    /// Starts listening to window events. Calling it again has no effect.
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        debug!("viewport attached");
        self.attached = true;
        self.track(|vp| vp.reset_item());
    }

    /// Stops listening to window events and drops any gesture in flight without
    /// resolving it. Calling it again has no effect.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        debug!("viewport detached");
        self.attached = false;
        self.track(|vp| {
            vp.cancel_gestures();
            vp.wheel_deadline = None;
            vp.status.wheeling = false;
        });
    }

    /// Fires the wheel cooldown expiry once `now` has reached it
    pub fn tick(&mut self, now: Instant) {
        self.track(|vp| vp.expire_wheel(now));
    }

    fn expire_wheel(&mut self, now: Instant) {
        if let Some(deadline) = self.wheel_deadline {
            if now >= deadline {
                self.wheel_deadline = None;
                self.status.wheeling = false;
            }
        }
    }
}
