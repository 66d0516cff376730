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

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size<T> {
    width: T,
    height: T,
}

impl<T> Size<T>
where
    T: Copy,
{
    pub fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> T {
        self.width
    }

    pub fn height(&self) -> T {
        self.height
    }

    /// Returns the size with width and height exchanged
    pub fn swap(&self) -> Self {
        Self::new(self.height, self.width)
    }
}

impl Size<f64> {
    /// Returns a new size scaled by the given scale.
    pub fn scale(&self, scale: f64) -> Self {
        Self::new(self.width * scale, self.height * scale)
    }

    pub fn center(&self) -> PointD {
        PointD::new(self.width / 2.0, self.height / 2.0)
    }

    /// True when both dimensions are finite and larger than zero
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorPoint<T> {
    x: T,
    y: T,
}

impl<T> VectorPoint<T>
where
    T: Default
        + Copy
        + std::ops::Add<Output = T>
        + std::ops::Sub<Output = T>
        + std::ops::Mul<Output = T>
        + std::ops::Div<Output = T>,
{
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> T {
        self.x
    }

    pub fn y(&self) -> T {
        self.y
    }

    /// Returns a new vector scaled by the given scale.
    pub fn scale(&self, scale: T) -> Self {
        Self::new(self.x * scale, self.y * scale)
    }

    /// Returns a new vector unscaled by the given scale.
    pub fn unscale(&self, scale: T) -> Self {
        Self::new(self.x / scale, self.y / scale)
    }

    /// Returns the vector rotated by 180 degrees
    pub fn neg(&self) -> Self {
        Self::new(T::default() - self.x, T::default() - self.y)
    }

    /// Rotates the vector clockwise (screen coordinates, y down) by a multiple of 90
    /// degrees. Any multiple is accepted, including values beyond ±360. Values that
    /// are not a multiple of 90 are treated as the multiple below them.
    pub fn rotate(&self, rotation: i32) -> Self {
        match rotation.rem_euclid(360) / 90 {
            1 => Self::new(T::default() - self.y, self.x),
            2 => Self::new(T::default() - self.x, T::default() - self.y),
            3 => Self::new(self.y, T::default() - self.x),
            _ => Self::new(self.x, self.y),
        }
    }
}

impl<T> std::ops::Add for VectorPoint<T>
where
    T: Copy + std::ops::Add<Output = T>,
{
    type Output = VectorPoint<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T> std::ops::AddAssign for VectorPoint<T>
where
    T: Copy + std::ops::Add<Output = T>,
{
    fn add_assign(&mut self, rhs: Self) {
        self.x = self.x + rhs.x;
        self.y = self.y + rhs.y;
    }
}

impl<T> std::ops::Sub for VectorPoint<T>
where
    T: Copy + std::ops::Sub<Output = T>,
{
    type Output = VectorPoint<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl VectorPoint<f64> {
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }
}

// Type aliases for convenience
pub type SizeD = Size<f64>;
pub type PointD = VectorPoint<f64>;
pub type VectorD = VectorPoint<f64>;
