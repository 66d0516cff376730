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

//! Screen/image coordinate mapping.
//!
//! Screen coordinates are relative to the top-left corner of the viewport container.
//! Image-local coordinates are relative to the top-left corner of the displayed image
//! frame before rotation, measured in screen pixels (so they grow with the scale).

use crate::point::{PointD, SizeD, VectorD};

/// Some source of the current box sizes.
///
/// Implementations are queried on every use: the container can be resized and the
/// image can finish loading between two events, so nothing here is cached.
pub trait Layout {
    /// Size of the visible container
    fn viewport(&self) -> SizeD;
    /// Size of the image as laid out at scale 1, rotation 0
    fn image(&self) -> SizeD;
    /// Natural pixel size of the media
    fn native(&self) -> SizeD;
}

/// A layout with fixed sizes, for headless use
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedLayout {
    pub viewport: SizeD,
    pub image: SizeD,
    pub native: SizeD,
}

impl FixedLayout {
    /// Layout where the image is displayed at its natural size
    pub fn new(viewport: SizeD, image: SizeD) -> Self {
        Self {
            viewport,
            image,
            native: image,
        }
    }
}

impl Layout for FixedLayout {
    fn viewport(&self) -> SizeD {
        self.viewport
    }

    fn image(&self) -> SizeD {
        self.image
    }

    fn native(&self) -> SizeD {
        self.native
    }
}

pub fn viewport_frame(layout: &dyn Layout) -> SizeD {
    layout.viewport()
}

/// On-screen size of the image after scaling and rotation.
///
/// A quarter turn exchanges the visual axes, so at 90 and 270 degrees width and height
/// swap before scaling.
pub fn displayed_image_frame(image: SizeD, scale: f64, rotation: i32) -> SizeD {
    if rotation.rem_euclid(180) == 90 {
        image.swap().scale(scale)
    } else {
        image.scale(scale)
    }
}

/// The scale at which the image renders at native pixel resolution
pub fn max_native_scale(layout: &dyn Layout) -> f64 {
    let image = layout.image();
    let native = layout.native();
    if image.is_usable() && native.is_usable() {
        native.width() / image.width()
    } else {
        1.0
    }
}

/// Center of the image on screen: the container center shifted by the translation
pub fn image_center(viewport: SizeD, translate: VectorD) -> PointD {
    viewport.center() + translate
}

/// Converts a screen point to image-local coordinates.
///
/// The offset from the image center is rotated back by `-rotation` and then re-centered
/// into the frame.
pub fn screen_to_image(screen: PointD, center: PointD, frame: SizeD, rotation: i32) -> PointD {
    (screen - center).rotate(-rotation) + frame.center()
}

/// Converts an image-local point to screen coordinates, the inverse of `screen_to_image`
pub fn image_to_screen(local: PointD, center: PointD, frame: SizeD, rotation: i32) -> PointD {
    (local - frame.center()).rotate(rotation) + center
}
