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

use synthesis_design::{SlotTrackModel, TrackObserver};
use ultraviolet::Vec2;

/// The dotted outline showing where the first unit must be dropped. It is only visible while the
/// model is empty.
#[derive(Debug, Clone)]
pub struct DefaultTargetMarker {
    position: Vec2,
    visible: bool,
}

impl DefaultTargetMarker {
    pub fn new(model: &SlotTrackModel) -> Self {
        Self {
            position: model.reference(),
            visible: model.is_empty(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl TrackObserver for DefaultTargetMarker {
    fn on_tracks_changed(&mut self, model: &SlotTrackModel) {
        if self.visible != model.is_empty() {
            log::debug!("default target visible: {}", model.is_empty());
        }
        self.visible = model.is_empty();
    }
}
