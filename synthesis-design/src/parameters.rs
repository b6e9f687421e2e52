/*
Strand synthesis, an assembly engine for paired DNA and RNA strands.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
//! Tuning parameters of the slot model.

use super::PairingRules;
use std::path::Path;

/// The smallest track on which a strand can be surrounded by empty slots on both sides.
pub const MIN_TRACK_LENGTH: usize = 5;

/// Geometric and combinatorial parameters of a `SlotTrackModel`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Parameters {
    /// Number of slots of each track.
    pub track_length: usize,
    /// Horizontal distance between the centers of two consecutive units, in presentation units.
    pub unit_pitch: f32,
    /// Vertical offset of the upper track relatively to the reference coordinate.
    pub upper_track_offset: f32,
    /// Vertical offset of the lower track relatively to the reference coordinate.
    pub lower_track_offset: f32,
    /// Vertical offset of the row in which decoding units dock, relatively to the reference
    /// coordinate.
    pub docking_row_offset: f32,
    /// The rules used to decide if two units can pair across tracks.
    pub pairing_rules: PairingRules,
}

impl Parameters {
    /// Default values, matching the size of a unit body drawn at 60% of its nominal size
    /// (140 x 100).
    pub const DEFAULT: Parameters = Parameters {
        track_length: 100,
        unit_pitch: 84.,
        upper_track_offset: 0.,
        lower_track_offset: 90.,
        // The template strand is moved away during translation, decoding units take its place
        docking_row_offset: 0.,
        pairing_rules: PairingRules::Extended,
    };

    /// The index of the slot located at the reference coordinate
    pub fn center_index(&self) -> usize {
        self.track_length / 2
    }

    pub fn from_json_str(json: &str) -> Result<Self, ErrParameters> {
        let parameters: Self = serde_json::from_str(json).map_err(ErrParameters::Json)?;
        parameters.validated()
    }

    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, ErrParameters> {
        let json = std::fs::read_to_string(path).map_err(ErrParameters::Io)?;
        Self::from_json_str(&json)
    }

    fn validated(self) -> Result<Self, ErrParameters> {
        if self.track_length < MIN_TRACK_LENGTH {
            Err(ErrParameters::TrackTooShort {
                actual: self.track_length,
                needed: MIN_TRACK_LENGTH,
            })
        } else if !(self.unit_pitch > 0.) {
            Err(ErrParameters::NonPositivePitch(self.unit_pitch))
        } else {
            Ok(self)
        }
    }

    pub fn formated_string(&self) -> String {
        use std::fmt::Write;
        let mut ret = String::new();
        writeln!(&mut ret, "  Track length: {}", self.track_length).unwrap_or_default();
        writeln!(&mut ret, "  Unit pitch: {:.1}", self.unit_pitch).unwrap_or_default();
        writeln!(
            &mut ret,
            "  Track offsets: {:.1} / {:.1}",
            self.upper_track_offset, self.lower_track_offset
        )
        .unwrap_or_default();
        writeln!(&mut ret, "  Docking row offset: {:.1}", self.docking_row_offset)
            .unwrap_or_default();
        writeln!(&mut ret, "  Pairing rules: {:?}", self.pairing_rules).unwrap_or_default();
        ret
    }
}

impl std::default::Default for Parameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An error that occured when loading parameters.
#[derive(Debug)]
pub enum ErrParameters {
    Io(std::io::Error),
    Json(serde_json::Error),
    TrackTooShort { actual: usize, needed: usize },
    NonPositivePitch(f32),
}
