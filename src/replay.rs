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

//! Scripted input for driving a [`Viewport`] without a window system.
//!
//! A script fixes the layout sizes and the length of the item list, then lists timed
//! steps. Running it feeds the steps to a viewport in order and collects everything it
//! emitted together with its final state.

use std::{
    cell::{Cell, RefCell},
    fs::File,
    io::{BufReader, Read},
    path::Path,
    rc::Rc,
    time::{Duration, Instant},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    config::ViewportConfig,
    error::Result,
    event::{
        PointerButton, PointerEvent, TouchEvent, TouchPoint, ViewportEvent, WheelEvent,
        WindowEvent,
    },
    point::{PointD, SizeD},
    viewport::{
        FixedLayout, GestureStatus, NavButtons, ToolbarState, TransformState, ViewCursor,
        Viewport,
    },
};

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub viewport: SizeD,
    pub image: SizeD,
    /// Natural size of the media, defaults to `image`
    #[serde(default)]
    pub native: Option<SizeD>,
    #[serde(default = "default_items")]
    pub items: usize,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_items() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// Offset from the start of the script
    #[serde(default)]
    pub t_ms: u64,
    #[serde(flatten)]
    pub op: Op,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    PointerDown {
        x: f64,
        y: f64,
        /// DOM button number, 0 is the primary button
        #[serde(default)]
        button: u16,
    },
    PointerMove { x: f64, y: f64 },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: u16,
    },
    TouchStart { touches: Vec<PointD> },
    TouchMove { touches: Vec<PointD> },
    TouchEnd { touches: Vec<PointD> },
    Wheel { x: f64, y: f64, delta_y: f64 },
    DoubleClick,
    ZoomIn,
    ZoomOut,
    RotateLeft,
    RotateRight,
    ToggleResize,
    NavigatePrev,
    NavigateNext,
    JumpToIndex { index: usize },
    Reset,
    Attach,
    Detach,
    Window { event: WindowEvent },
    /// Resizes the container and delivers the window resize event
    Resize { viewport: SizeD },
    SetLoading { value: bool },
    SetLoadError { value: bool },
    Tick,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimedEvent {
    pub t_ms: u64,
    pub event: ViewportEvent,
}

/// Everything a script run produced
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub events: Vec<TimedEvent>,
    pub transform: TransformState,
    pub css_transform: String,
    pub status: GestureStatus,
    pub index: usize,
    pub cursor: ViewCursor,
    pub toolbar: ToolbarState,
    pub nav_buttons: NavButtons,
}

fn button(number: u16) -> PointerButton {
    match number {
        0 => PointerButton::Primary,
        1 => PointerButton::Middle,
        2 => PointerButton::Secondary,
        other => PointerButton::Other(other),
    }
}

fn touch_event(touches: &[PointD], time: Instant) -> TouchEvent {
    TouchEvent::new(
        touches
            .iter()
            .enumerate()
            .map(|(id, p)| TouchPoint::new(id as u64, p.x(), p.y()))
            .collect(),
        time,
    )
}

impl Script {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let script = Self::from_reader(BufReader::new(file))?;
        debug!(
            "read script {} with {} steps",
            path.as_ref().display(),
            script.steps.len()
        );
        Ok(script)
    }

    fn layout(&self, viewport: SizeD) -> FixedLayout {
        FixedLayout {
            viewport,
            image: self.image,
            native: self.native.unwrap_or(self.image),
        }
    }

    /// Runs all steps against a fresh, attached viewport
    pub fn run(&self, config: ViewportConfig) -> Report {
        let mut vp = Viewport::new(config, Box::new(self.layout(self.viewport)));
        vp.set_item_count(self.items);
        vp.attach();

        let clock = Rc::new(Cell::new(0_u64));
        let events = Rc::new(RefCell::new(Vec::new()));
        {
            let clock = clock.clone();
            let events = events.clone();
            vp.connect(move |event| {
                events.borrow_mut().push(TimedEvent {
                    t_ms: clock.get(),
                    event: *event,
                })
            });
        }

        let t0 = Instant::now();
        for step in &self.steps {
            clock.set(step.t_ms);
            let time = t0 + Duration::from_millis(step.t_ms);
            vp.tick(time);
            self.apply(&mut vp, &step.op, time);
        }
        info!("replayed {} steps", self.steps.len());

        let events = events.take();
        Report {
            events,
            transform: *vp.transform(),
            css_transform: vp.css_transform(),
            status: *vp.status(),
            index: vp.index(),
            cursor: vp.cursor(),
            toolbar: vp.toolbar(),
            nav_buttons: vp.nav_buttons(),
        }
    }

    fn apply(&self, vp: &mut Viewport, op: &Op, time: Instant) {
        match op {
            Op::PointerDown { x, y, button: b } => {
                vp.on_pointer_down(&PointerEvent::new(*x, *y).with_button(button(*b)))
            }
            Op::PointerMove { x, y } => vp.on_pointer_move(&PointerEvent::new(*x, *y)),
            Op::PointerUp { x, y, button: b } => {
                vp.on_pointer_up(&PointerEvent::new(*x, *y).with_button(button(*b)))
            }
            Op::TouchStart { touches } => vp.on_touch_start(&touch_event(touches, time)),
            Op::TouchMove { touches } => vp.on_touch_move(&touch_event(touches, time)),
            Op::TouchEnd { touches } => vp.on_touch_end(&touch_event(touches, time)),
            Op::Wheel { x, y, delta_y } => vp.on_wheel(&WheelEvent::new(*x, *y, *delta_y, time)),
            Op::DoubleClick => vp.on_double_click(),
            Op::ZoomIn => vp.zoom_in(),
            Op::ZoomOut => vp.zoom_out(),
            Op::RotateLeft => vp.rotate_left(),
            Op::RotateRight => vp.rotate_right(),
            Op::ToggleResize => vp.toggle_resize(),
            Op::NavigatePrev => vp.navigate_prev(),
            Op::NavigateNext => vp.navigate_next(),
            Op::JumpToIndex { index } => vp.jump_to_index(*index),
            Op::Reset => vp.reset_for_new_item(),
            Op::Attach => vp.attach(),
            Op::Detach => vp.detach(),
            Op::Window { event } => vp.on_window_event(*event),
            Op::Resize { viewport } => {
                vp.set_layout(Box::new(self.layout(*viewport)));
                vp.on_window_event(WindowEvent::Resize);
            }
            Op::SetLoading { value } => vp.set_loading(*value),
            Op::SetLoadError { value } => vp.set_load_error(*value),
            Op::Tick => {}
        }
    }
}
