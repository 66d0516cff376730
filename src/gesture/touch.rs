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

use std::time::{Duration, Instant};

use log::trace;

use crate::{event::TouchEvent, point::PointD, viewport::Stage};

use super::intent::GestureOrigin;

/// Longest press that still counts as a tap
pub const TAP_DURATION: Duration = Duration::from_millis(250);
/// Movement allowed during a tap
pub const TAP_SLOP: f64 = 10.0;
/// Delay between the first tap's release and the second tap's press
pub const DOUBLE_TAP_INTERVAL: Duration = Duration::from_millis(300);
/// Distance allowed between the two taps of a double tap
pub const DOUBLE_TAP_SLOP: f64 = 30.0;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
enum TouchState {
    #[default]
    Idle,
    Pan(GestureOrigin),
    Pinch {
        initial_distance: f64,
        initial_scale: f64,
        last_mid: PointD,
    },
    /// Two fingers while pinch zoom is disabled
    TwoFingerPan { last_mid: PointD },
}

#[derive(Debug, Clone, Copy)]
struct TapCandidate {
    pressed_at: Instant,
    position: PointD,
    moved: bool,
}

#[derive(Debug, Clone, Copy)]
struct CompletedTap {
    released_at: Instant,
    position: PointD,
}

/// Touch state machine covering one-finger pan, two-finger pinch and double tap
#[derive(Debug, Default)]
pub struct TouchTracker {
    state: TouchState,
    tap: Option<TapCandidate>,
    last_tap: Option<CompletedTap>,
}

fn pair(event: &TouchEvent) -> Option<(PointD, PointD)> {
    match event.touches.as_slice() {
        [a, b, ..] => Some((a.position, b.position)),
        _ => None,
    }
}

impl TouchTracker {
    pub fn is_active(&self) -> bool {
        self.state != TouchState::Idle
    }

    pub fn start(&mut self, stage: &mut Stage, event: &TouchEvent) {
        match event.touches.len() {
            0 => {}
            1 => {
                let position = event.touches[0].position;
                if self.state == TouchState::Idle {
                    self.tap = Some(TapCandidate {
                        pressed_at: event.time,
                        position,
                        moved: false,
                    });
                    self.begin_pan(stage, position);
                }
            }
            _ => {
                self.tap = None;
                self.last_tap = None;
                self.begin_two_finger(stage, event);
            }
        }
    }

    pub fn motion(&mut self, stage: &mut Stage, event: &TouchEvent) {
        match self.state {
            TouchState::Idle => {
                if let (Some(tap), Some(touch)) = (self.tap.as_mut(), event.touches.first()) {
                    tap.moved |= tap.position.distance(&touch.position) > TAP_SLOP;
                }
            }
            TouchState::Pan(mut origin) => {
                let Some(touch) = event.touches.first() else {
                    return;
                };
                if let Some(tap) = self.tap.as_mut() {
                    tap.moved |= tap.position.distance(&touch.position) > TAP_SLOP;
                }
                stage.pan_by(
                    touch.position.x() - origin.last.x(),
                    touch.position.y() - origin.last.y(),
                );
                origin.last = touch.position;
                self.state = TouchState::Pan(origin);
            }
            TouchState::Pinch {
                initial_distance,
                initial_scale,
                last_mid,
            } => {
                let Some((a, b)) = pair(event) else {
                    return;
                };
                let mid = a.midpoint(&b);
                if !stage.config.pan_disabled {
                    stage.pan_by(mid.x() - last_mid.x(), mid.y() - last_mid.y());
                }
                let distance = a.distance(&b);
                if initial_distance > 0.0 && distance > 0.0 {
                    stage.zoom_around_point(initial_scale * distance / initial_distance, mid);
                }
                self.state = TouchState::Pinch {
                    initial_distance,
                    initial_scale,
                    last_mid: mid,
                };
            }
            TouchState::TwoFingerPan { last_mid } => {
                let Some((a, b)) = pair(event) else {
                    return;
                };
                let mid = a.midpoint(&b);
                if !stage.config.pan_disabled {
                    stage.pan_by(mid.x() - last_mid.x(), mid.y() - last_mid.y());
                }
                self.state = TouchState::TwoFingerPan { last_mid: mid };
            }
        }
    }

    /// Handles lifted touches. Returns the origin of a finished one-finger pan, which
    /// is the only gesture whose intent gets resolved.
    pub fn end(&mut self, stage: &mut Stage, event: &TouchEvent) -> Option<GestureOrigin> {
        match (self.state, event.touches.len()) {
            (TouchState::Pinch { .. } | TouchState::TwoFingerPan { .. }, 1) => {
                // continue with the remaining finger without a jump
                stage.status.pinching = false;
                self.state = TouchState::Idle;
                self.begin_pan(stage, event.touches[0].position);
                None
            }
            (TouchState::Pinch { .. } | TouchState::TwoFingerPan { .. }, 0) => {
                trace!("two-finger gesture end");
                self.reset(stage);
                None
            }
            (TouchState::Pinch { .. } | TouchState::TwoFingerPan { .. }, _) => {
                // still two fingers down, re-anchor on the current pair
                self.begin_two_finger(stage, event);
                None
            }
            (TouchState::Pan(origin), 0) => {
                stage.status.dragging = false;
                self.state = TouchState::Idle;
                self.finish_tap(stage, event.time);
                trace!("touch pan end, displacement {:?}", origin.displacement());
                Some(origin)
            }
            (TouchState::Idle, 0) => {
                self.finish_tap(stage, event.time);
                None
            }
            _ => None,
        }
    }

    /// Abandons whatever is in flight without resolving it
    pub fn cancel(&mut self, stage: &mut Stage) {
        self.tap = None;
        self.last_tap = None;
        self.reset(stage);
    }

    fn reset(&mut self, stage: &mut Stage) {
        self.state = TouchState::Idle;
        stage.status.dragging = false;
        stage.status.pinching = false;
    }

    fn begin_pan(&mut self, stage: &mut Stage, position: PointD) {
        if stage.config.pan_disabled {
            return;
        }
        self.state = TouchState::Pan(GestureOrigin::new(position));
        stage.status.dragging = true;
    }

    fn begin_two_finger(&mut self, stage: &mut Stage, event: &TouchEvent) {
        let Some((a, b)) = pair(event) else {
            return;
        };
        let mid = a.midpoint(&b);
        stage.status.dragging = false;
        if stage.config.pinch_disabled || stage.config.zoom_disabled {
            stage.status.pinching = false;
            self.state = TouchState::TwoFingerPan { last_mid: mid };
        } else {
            stage.status.pinching = true;
            self.state = TouchState::Pinch {
                initial_distance: a.distance(&b),
                initial_scale: stage.transform.scale,
                last_mid: mid,
            };
            trace!(
                "pinch start, distance {:.1}, scale {:.3}",
                a.distance(&b),
                stage.transform.scale
            );
        }
    }

    fn finish_tap(&mut self, stage: &mut Stage, released_at: Instant) {
        let Some(tap) = self.tap.take() else {
            return;
        };
        if tap.moved || released_at.saturating_duration_since(tap.pressed_at) > TAP_DURATION {
            self.last_tap = None;
            return;
        }

        let is_double = self.last_tap.is_some_and(|previous| {
            tap.pressed_at.saturating_duration_since(previous.released_at) <= DOUBLE_TAP_INTERVAL
                && previous.position.distance(&tap.position) <= DOUBLE_TAP_SLOP
        });

        if is_double {
            self.last_tap = None;
            if !stage.config.double_tap_disabled && !stage.config.zoom_disabled {
                trace!("double tap");
                stage.double_tap_zoom();
            }
        } else {
            self.last_tap = Some(CompletedTap {
                released_at,
                position: tap.position,
            });
        }
    }
}
