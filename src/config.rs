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

use std::{
    fs::{create_dir_all, File},
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Behaviour switches and limits of a viewport.
///
/// Every field has a default, so a config file only needs to list what it changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Lower scale limit
    pub min_zoom: f64,
    /// Upper scale limit, also the target of toggle resize and double tap
    pub max_zoom: f64,
    /// Scale increment of the zoom buttons and of one wheel notch
    pub zoom_step: f64,
    /// Horizontal displacement (px) a drag must exceed to count as a swipe
    pub swipe_tolerance_x: f64,
    /// Vertical displacement (px) a drag must exceed to dismiss
    pub swipe_tolerance_y: f64,
    /// Disables mouse and touch panning, and with it swipe detection
    pub pan_disabled: bool,
    /// Two-finger gestures pan by their midpoint instead of zooming
    pub pinch_disabled: bool,
    /// Ignore double tap and double click
    pub double_tap_disabled: bool,
    /// Wrap around at the ends of the item list
    pub loop_navigation: bool,
    /// Mirror swipe direction and the prev/next buttons
    pub right_to_left: bool,
    /// Disable every zoom operation
    pub zoom_disabled: bool,
    /// Disable rotate left/right
    pub rotate_disabled: bool,
    /// Zoom on mouse wheel
    pub wheel_zoom: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 3.0,
            zoom_step: 0.12,
            swipe_tolerance_x: 50.0,
            swipe_tolerance_y: 50.0,
            pan_disabled: false,
            pinch_disabled: false,
            double_tap_disabled: false,
            loop_navigation: false,
            right_to_left: false,
            zoom_disabled: false,
            rotate_disabled: false,
            wheel_zoom: true,
        }
    }
}

impl ViewportConfig {
    fn config_dir() -> PathBuf {
        let mut dir = dirs::config_dir().unwrap_or_default();
        dir.push("mviewport");
        dir
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("viewport.json")
    }

    /// Scale limits usable by the zoom math.
    ///
    /// A bound that is not a positive finite number falls back to its default, and
    /// swapped bounds are put back in order.
    pub fn zoom_range(&self) -> (f64, f64) {
        let defaults = Self::default();
        let usable = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        let min = usable(self.min_zoom, defaults.min_zoom);
        let max = usable(self.max_zoom, defaults.max_zoom);
        (min.min(max), min.max(max))
    }

    /// Checks the limits for values the zoom and clamp math cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "min_zoom must be positive, got {}",
                self.min_zoom
            )));
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            return Err(Error::InvalidConfig(format!(
                "max_zoom ({}) must not be below min_zoom ({})",
                self.max_zoom, self.min_zoom
            )));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "zoom_step must be positive, got {}",
                self.zoom_step
            )));
        }
        if !(self.swipe_tolerance_x >= 0.0 && self.swipe_tolerance_y >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "swipe tolerances must not be negative, got ({}, {})",
                self.swipe_tolerance_x, self.swipe_tolerance_y
            )));
        }
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config = Self::from_reader(BufReader::new(file))?;
        debug!("read viewport config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Reads the user config file, falling back to the defaults when it is missing
    /// or unusable.
    pub fn load() -> Self {
        let file = Self::config_file();
        match Self::from_path(&file) {
            Ok(config) => config,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no viewport config at {}, using defaults", file.display());
                Self::default()
            }
            Err(e) => {
                warn!("ignoring viewport config {}: {e}", file.display());
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        create_dir_all(Self::config_dir())?;
        let file = File::create(Self::config_file())?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
