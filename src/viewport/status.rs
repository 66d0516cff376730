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

/// Gesture and loading flags of a viewport.
///
/// `dragging` and `pinching` never hold at the same time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GestureStatus {
    pub dragging: bool,
    pub pinching: bool,
    /// Wheel zoom cooldown is active
    pub wheeling: bool,
    pub load_error: bool,
    pub loading: bool,
}

impl GestureStatus {
    /// True while the media is not ready to be manipulated
    pub fn is_blocked(&self) -> bool {
        self.loading || self.load_error
    }

    /// Whether the presentation layer should animate transform changes.
    /// Direct manipulation has to follow the fingers without delay.
    pub fn animate(&self) -> bool {
        !(self.dragging || self.pinching)
    }
}

/// Cursor affordance for the image surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewCursor {
    Normal,
    /// Image can be grabbed and panned
    Grab,
    /// Image is being panned
    Drag,
}
