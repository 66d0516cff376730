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

use std::time::Duration;

use log::{debug, trace};

use crate::{
    event::{PointerButton, PointerEvent, TouchEvent, ViewportEvent, WheelEvent, WindowEvent},
    gesture::{intent, GestureOrigin, Intent, SwipeRules},
};

use super::{clamp::Axis, Viewport};

/// Wheel events closer together than this are dropped
pub const WHEEL_COOLDOWN: Duration = Duration::from_millis(80);

impl Viewport {
    pub fn on_pointer_down(&mut self, event: &PointerEvent) {
        if self.status.is_blocked() {
            return;
        }
        self.track(|vp| {
            let (mut stage, pointer, _) = vp.parts();
            pointer.press(&mut stage, event);
        });
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent) {
        if self.status.is_blocked() || !self.pointer.is_dragging() {
            return;
        }
        self.track(|vp| {
            let (mut stage, pointer, _) = vp.parts();
            pointer.motion(&mut stage, event.position);
        });
    }

    pub fn on_pointer_up(&mut self, event: &PointerEvent) {
        if event.button != PointerButton::Primary {
            return;
        }
        self.track(|vp| vp.end_pointer_drag());
    }

    fn end_pointer_drag(&mut self) {
        let origin = {
            let (mut stage, pointer, _) = self.parts();
            pointer.release(&mut stage)
        };
        if let Some(origin) = origin {
            self.resolve_gesture(&origin);
        }
    }

    pub fn on_touch_start(&mut self, event: &TouchEvent) {
        if self.status.is_blocked() {
            return;
        }
        self.track(|vp| {
            let (mut stage, _, touch) = vp.parts();
            touch.start(&mut stage, event);
        });
    }

    pub fn on_touch_move(&mut self, event: &TouchEvent) {
        if self.status.is_blocked() {
            return;
        }
        self.track(|vp| {
            let (mut stage, _, touch) = vp.parts();
            touch.motion(&mut stage, event);
        });
    }

    pub fn on_touch_end(&mut self, event: &TouchEvent) {
        self.track(|vp| {
            let origin = {
                let (mut stage, _, touch) = vp.parts();
                touch.end(&mut stage, event)
            };
            if let Some(origin) = origin {
                vp.resolve_gesture(&origin);
            }
        });
    }

    /// Zooms one step around the cursor. Events arriving during the cooldown of the
    /// previous one are dropped without extending it.
    pub fn on_wheel(&mut self, event: &WheelEvent) {
        if self.status.is_blocked()
            || self.status.dragging
            || self.status.pinching
            || !self.config.wheel_zoom
            || self.config.zoom_disabled
        {
            return;
        }
        self.track(|vp| {
            vp.expire_wheel(event.time);
            if vp.status.wheeling {
                trace!("wheel event dropped during cooldown");
                return;
            }
            vp.status.wheeling = true;
            vp.wheel_deadline = Some(event.time + WHEEL_COOLDOWN);
            vp.stage().wheel_zoom(event.delta_y, event.position);
        });
    }

    pub fn on_double_click(&mut self) {
        if self.status.is_blocked() || self.config.double_tap_disabled || self.config.zoom_disabled
        {
            return;
        }
        self.track(|vp| vp.stage().double_tap_zoom());
    }

    /// Window-level events, only honoured while attached
    pub fn on_window_event(&mut self, event: WindowEvent) {
        if !self.attached {
            return;
        }
        trace!("window event {event:?}");
        match event {
            WindowEvent::Resize => self.track(|vp| vp.stage().clamp_position()),
            WindowEvent::Blur | WindowEvent::PointerUp | WindowEvent::PointerLeave => {
                self.track(|vp| vp.end_pointer_drag())
            }
            WindowEvent::TouchCancel => self.track(|vp| {
                let (mut stage, _, touch) = vp.parts();
                touch.cancel(&mut stage);
            }),
        }
    }

    fn resolve_gesture(&mut self, origin: &GestureOrigin) {
        let rules = SwipeRules {
            tolerance_x: self.config.swipe_tolerance_x,
            tolerance_y: self.config.swipe_tolerance_y,
            right_to_left: self.config.right_to_left,
        };
        let intent = {
            let stage = self.stage();
            intent::resolve(origin, &rules, |step| {
                stage.can_shift_further(Axis::X, step)
            })
        };
        match intent {
            Intent::Pan => {}
            Intent::Navigate(direction) => {
                debug!("swipe {direction:?}");
                self.step(direction);
            }
            Intent::Dismiss => {
                debug!("swipe dismiss");
                self.emit(ViewportEvent::Dismiss);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::{
        config::ViewportConfig,
        event::TouchPoint,
        gesture::testing::at,
        point::{SizeD, VectorD},
        viewport::tests::{recorded, Recorded},
    };

    fn gallery(config: ViewportConfig) -> Recorded {
        recorded(
            config,
            SizeD::new(800.0, 600.0),
            SizeD::new(400.0, 300.0),
            3,
        )
    }

    fn touch(x: f64, y: f64, time: Instant) -> TouchEvent {
        TouchEvent::new(vec![TouchPoint::new(1, x, y)], time)
    }

    fn swipe(vp: &mut Viewport, from: (f64, f64), to: (f64, f64), t0: Instant) {
        vp.on_touch_start(&touch(from.0, from.1, t0));
        vp.on_touch_move(&touch(to.0, to.1, at(t0, 100)));
        vp.on_touch_end(&TouchEvent::released(at(t0, 400)));
    }

    #[test]
    fn test_swipe_navigates_unzoomed_image() {
        let (mut vp, events) = gallery(ViewportConfig::default());
        swipe(&mut vp, (100.0, 100.0), (10.0, 100.0), Instant::now());
        assert_eq!(vp.index(), 1);
        assert!(events
            .borrow()
            .contains(&ViewportEvent::Next { old: 0, new: 1 }));
        assert!(!vp.status().dragging);
    }

    #[test]
    fn test_swipe_on_zoomed_image_pans() {
        let (mut vp, events) = gallery(ViewportConfig::default());
        vp.toggle_resize();
        vp.on_pointer_down(&PointerEvent::new(100.0, 100.0));
        assert!(vp.status().dragging);
        vp.on_pointer_move(&PointerEvent::new(10.0, 100.0));
        vp.on_pointer_up(&PointerEvent::new(10.0, 100.0));

        assert_eq!(vp.index(), 0);
        assert_eq!(vp.transform().translate(), VectorD::new(-90.0, 0.0));
        assert!(!events
            .borrow()
            .iter()
            .any(|e| matches!(e, ViewportEvent::Next { .. })));
    }

    #[test]
    fn test_swipe_at_pan_limit_navigates() {
        let (mut vp, _) = gallery(ViewportConfig::default());
        vp.toggle_resize();
        // bounds are +-200 at scale 3
        vp.on_pointer_down(&PointerEvent::new(400.0, 300.0));
        vp.on_pointer_move(&PointerEvent::new(250.0, 300.0));
        vp.on_pointer_up(&PointerEvent::new(250.0, 300.0));
        assert_eq!(vp.index(), 0);
        assert_eq!(vp.transform().translate_x(), -150.0);

        vp.on_pointer_down(&PointerEvent::new(400.0, 300.0));
        for x in [380.0, 350.0, 320.0] {
            vp.on_pointer_move(&PointerEvent::new(x, 300.0));
        }
        assert_eq!(vp.transform().translate_x(), -200.0);
        vp.on_pointer_up(&PointerEvent::new(320.0, 300.0));
        assert_eq!(vp.index(), 1);
        assert_eq!(*vp.transform(), crate::viewport::TransformState::default());
    }

    #[test]
    fn test_vertical_swipe_dismisses() {
        let (mut vp, events) = gallery(ViewportConfig::default());
        swipe(&mut vp, (100.0, 100.0), (100.0, 220.0), Instant::now());
        assert!(events.borrow().contains(&ViewportEvent::Dismiss));
        assert_eq!(vp.index(), 0);
    }

    #[test]
    fn test_right_to_left_swipe() {
        let config = ViewportConfig {
            right_to_left: true,
            loop_navigation: true,
            ..ViewportConfig::default()
        };
        let (mut vp, _) = gallery(config);
        swipe(&mut vp, (100.0, 100.0), (10.0, 100.0), Instant::now());
        assert_eq!(vp.index(), 2);
    }

    #[test]
    fn test_pan_disabled_disables_swipe() {
        let config = ViewportConfig {
            pan_disabled: true,
            ..ViewportConfig::default()
        };
        let (mut vp, events) = gallery(config);
        swipe(&mut vp, (100.0, 100.0), (10.0, 100.0), Instant::now());
        assert_eq!(vp.index(), 0);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_pinch_through_viewport() {
        let (mut vp, _) = gallery(ViewportConfig::default());
        let t0 = Instant::now();
        let pair = |a: f64, b: f64, t| {
            TouchEvent::new(
                vec![TouchPoint::new(1, a, 300.0), TouchPoint::new(2, b, 300.0)],
                t,
            )
        };
        vp.on_touch_start(&pair(350.0, 450.0, t0));
        assert!(!vp.animate());
        vp.on_touch_move(&pair(300.0, 500.0, at(t0, 16)));
        assert!((vp.transform().scale() - 2.0).abs() < 1e-9);
        vp.on_touch_end(&TouchEvent::released(at(t0, 32)));
        assert!(vp.animate());
        assert_eq!(vp.index(), 0);
    }

    #[test]
    fn test_wheel_cooldown_is_not_extended() {
        let (mut vp, _) = gallery(ViewportConfig::default());
        vp.toggle_resize();
        let t0 = Instant::now();

        vp.on_wheel(&WheelEvent::new(400.0, 300.0, 100.0, t0));
        assert!((vp.transform().scale() - 2.88).abs() < 1e-9);
        assert!(vp.status().wheeling);

        // dropped, and the cooldown still ends 80ms after the first event
        vp.on_wheel(&WheelEvent::new(400.0, 300.0, 100.0, at(t0, 50)));
        assert!((vp.transform().scale() - 2.88).abs() < 1e-9);
        vp.tick(at(t0, 79));
        assert!(vp.status().wheeling);
        vp.tick(at(t0, 80));
        assert!(!vp.status().wheeling);

        vp.on_wheel(&WheelEvent::new(400.0, 300.0, -100.0, at(t0, 90)));
        assert!((vp.transform().scale() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_expires_without_tick() {
        let (mut vp, _) = gallery(ViewportConfig::default());
        vp.toggle_resize();
        let t0 = Instant::now();
        vp.on_wheel(&WheelEvent::new(400.0, 300.0, 100.0, t0));
        vp.on_wheel(&WheelEvent::new(400.0, 300.0, 100.0, at(t0, 200)));
        assert!((vp.transform().scale() - 2.76).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_switch() {
        let config = ViewportConfig {
            wheel_zoom: false,
            ..ViewportConfig::default()
        };
        let (mut vp, events) = gallery(config);
        vp.on_wheel(&WheelEvent::new(400.0, 300.0, -100.0, Instant::now()));
        assert!(events.borrow().is_empty());
        assert!(!vp.status().wheeling);
    }

    #[test]
    fn test_loading_suppresses_gestures() {
        let (mut vp, _) = gallery(ViewportConfig::default());
        vp.toggle_resize();
        vp.set_loading(true);
        vp.on_pointer_down(&PointerEvent::new(100.0, 100.0));
        assert!(!vp.status().dragging);
        vp.on_wheel(&WheelEvent::new(400.0, 300.0, 100.0, Instant::now()));
        assert_eq!(vp.transform().scale(), 3.0);
        vp.on_double_click();
        assert_eq!(vp.transform().scale(), 3.0);
    }

    #[test]
    fn test_double_click() {
        let (mut vp, _) = gallery(ViewportConfig::default());
        vp.on_double_click();
        assert_eq!(vp.transform().scale(), 3.0);
        vp.on_double_click();
        assert_eq!(vp.transform().scale(), 1.0);
    }

    #[test]
    fn test_window_pointer_up_ends_drag() {
        let (mut vp, _) = gallery(ViewportConfig::default());
        vp.toggle_resize();
        vp.on_pointer_down(&PointerEvent::new(100.0, 100.0));
        vp.on_pointer_move(&PointerEvent::new(120.0, 100.0));
        vp.on_window_event(WindowEvent::PointerLeave);
        assert!(!vp.status().dragging);
        assert_eq!(vp.cursor(), crate::viewport::ViewCursor::Grab);
    }

    #[test]
    fn test_detach_cancels_without_resolving() {
        let (mut vp, events) = gallery(ViewportConfig::default());
        let t0 = Instant::now();
        vp.on_touch_start(&touch(100.0, 100.0, t0));
        vp.on_touch_move(&touch(10.0, 100.0, at(t0, 50)));
        vp.detach();
        assert!(!vp.status().dragging);

        vp.on_touch_end(&TouchEvent::released(at(t0, 100)));
        assert_eq!(vp.index(), 0);
        assert!(!events.borrow().contains(&ViewportEvent::Dismiss));

        // window events are ignored once detached
        vp.toggle_resize();
        vp.on_pointer_down(&PointerEvent::new(100.0, 100.0));
        vp.on_window_event(WindowEvent::PointerUp);
        assert!(vp.status().dragging);
    }
}
