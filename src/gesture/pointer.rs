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

use log::trace;

use crate::{
    event::{PointerButton, PointerEvent},
    point::PointD,
    viewport::Stage,
};

use super::intent::GestureOrigin;

/// Mouse drag-to-pan state machine
#[derive(Debug, Default)]
pub struct PointerTracker {
    drag: Option<GestureOrigin>,
}

impl PointerTracker {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Starts a drag when the primary button goes down on a pannable image.
    /// Returns whether a drag started.
    pub fn press(&mut self, stage: &mut Stage, event: &PointerEvent) -> bool {
        if event.button != PointerButton::Primary || !stage.can_pan() {
            return false;
        }
        trace!(
            "pointer drag start at ({:.1}, {:.1})",
            event.position.x(),
            event.position.y()
        );
        self.drag = Some(GestureOrigin::new(event.position));
        stage.status.dragging = true;
        true
    }

    pub fn motion(&mut self, stage: &mut Stage, position: PointD) {
        let Some(origin) = self.drag.as_mut() else {
            return;
        };
        let dx = position.x() - origin.last.x();
        let dy = position.y() - origin.last.y();
        stage.pan_by(dx, dy);
        origin.last = position;
    }

    /// Ends the drag and hands back its origin for intent resolution
    pub fn release(&mut self, stage: &mut Stage) -> Option<GestureOrigin> {
        let origin = self.drag.take()?;
        stage.status.dragging = false;
        trace!("pointer drag end, displacement {:?}", origin.displacement());
        Some(origin)
    }

    /// Drops an in-flight drag without resolving it
    pub fn cancel(&mut self, stage: &mut Stage) {
        if self.drag.take().is_some() {
            stage.status.dragging = false;
        }
    }
}
