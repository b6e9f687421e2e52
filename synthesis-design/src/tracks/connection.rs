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
//! Computation of the places where a unit being dragged may attach.

use super::{ErrPlacement, SlotTrackModel, CODON_LENGTH};
use crate::{Orientation, Track, Unit};
use ahash::RandomState;
use std::collections::HashSet;
use ultraviolet::Vec2;

/// The bond that will be created when a connection point is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondType {
    /// Extension of a strand along its backbone
    Backbone,
    /// Pairing with a unit on the opposite track
    Hydrogen,
    /// First unit of an empty model
    Anchor,
    /// Docking of a decoding element on the active codon
    Codon,
}

/// The modification of the model performed when a connection point is committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Single {
        track: Track,
        index: usize,
        unit: Unit,
    },
    Codon {
        start: usize,
        units: [Unit; 3],
    },
}

/// A place where a unit, or a decoding element, may be attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPoint {
    /// Where the body center of the unit must be drawn
    pub position: Vec2,
    /// How the unit must be drawn
    pub orientation: Orientation,
    pub bond: BondType,
    pub placement: Placement,
}

impl ConnectionPoint {
    /// The track on which the unit will be placed, `None` for the docking of a decoding element.
    pub fn track(&self) -> Option<Track> {
        match self.placement {
            Placement::Single { track, .. } => Some(track),
            Placement::Codon { .. } => None,
        }
    }

    /// The index of the (first) slot that will be filled
    pub fn index(&self) -> usize {
        match self.placement {
            Placement::Single { index, .. } => index,
            Placement::Codon { start, .. } => start,
        }
    }

    pub fn distance_to(&self, position: Vec2) -> f32 {
        (self.position - position).mag()
    }
}

/// The neighbour of a slot along a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Left, Direction::Right];

    /// The index of the neighbour of `index`, if it is in `0..length`.
    pub fn neighbour(&self, index: usize, length: usize) -> Option<usize> {
        match self {
            Self::Left => index.checked_sub(1),
            Self::Right => Some(index + 1).filter(|i| *i < length),
        }
    }
}

impl SlotTrackModel {
    /// Commit a connection point obtained from this model.
    pub fn connect(&mut self, point: &ConnectionPoint) -> Result<(), ErrPlacement> {
        match point.placement {
            Placement::Single { track, index, unit } => self.place(index, track, unit),
            Placement::Codon { start, units } => self.dock_triplet(start, units),
        }
    }

    /// All the places where `candidate` may currently be attached. The order of the result is
    /// not significant.
    pub fn connection_points(&self, candidate: &Unit) -> Vec<ConnectionPoint> {
        let mut ret = Vec::new();
        for track in Track::ALL.iter() {
            for direction in Direction::ALL.iter() {
                ret.extend(self.backbone_extensions(candidate, *track, *direction));
            }
        }
        for track in Track::ALL.iter() {
            ret.extend(self.cross_track_pairings(candidate, *track));
        }
        if ret.is_empty() {
            ret.push(self.anchor_point(candidate));
        }
        if candidate.backbone().is_product_material() {
            ret.retain(|point| point.track() != Some(Track::Upper));
        }

        let mut seen = HashSet::with_hasher(RandomState::new());
        ret.retain(|point| seen.insert((point.track(), point.index())));
        ret
    }

    /// Points where `candidate` extends a strand of `track` in `direction`.
    ///
    /// A point is offered on each empty slot next to an occupied one, unless the slot facing it
    /// on the opposite track holds a unit that cannot pair with `candidate`.
    pub fn backbone_extensions(
        &self,
        candidate: &Unit,
        track: Track,
        direction: Direction,
    ) -> Vec<ConnectionPoint> {
        let length = self.track_length();
        let rules = self.parameters().pairing_rules;
        let mut ret = Vec::new();
        for (i, slot) in self.slots(track).iter().enumerate() {
            if slot.is_none() {
                continue;
            }
            let target = if let Some(target) = direction.neighbour(i, length) {
                target
            } else {
                continue;
            };
            if self.is_occupied(track, target) {
                continue;
            }
            let pairing_ok = self
                .get(track.opposite(), target)
                .map(|across| rules.can_pair(across.kind(), candidate.kind()))
                .unwrap_or(true);
            if pairing_ok {
                ret.push(self.single_point(candidate, track, target, BondType::Backbone));
            }
        }
        ret
    }

    /// Points on `track` facing a unit of the opposite track that can pair with `candidate`.
    pub fn cross_track_pairings(&self, candidate: &Unit, track: Track) -> Vec<ConnectionPoint> {
        let rules = self.parameters().pairing_rules;
        let mut ret = Vec::new();
        for (i, across) in self.slots(track.opposite()).iter().enumerate() {
            if let Some(across) = across {
                if !self.is_occupied(track, i) && rules.can_pair(across.kind(), candidate.kind()) {
                    ret.push(self.single_point(candidate, track, i, BondType::Hydrogen));
                }
            }
        }
        ret
    }

    fn anchor_point(&self, candidate: &Unit) -> ConnectionPoint {
        self.single_point(candidate, Track::Upper, self.center_index(), BondType::Anchor)
    }

    fn single_point(
        &self,
        candidate: &Unit,
        track: Track,
        index: usize,
        bond: BondType,
    ) -> ConnectionPoint {
        ConnectionPoint {
            position: self.slot_position(track, index),
            orientation: track.orientation(),
            bond,
            placement: Placement::Single {
                track,
                index,
                unit: *candidate,
            },
        }
    }

    /// The place where a decoding element carrying `triplet` may dock.
    ///
    /// Only the codon currently held by the decoder is considered, so the result has at most one
    /// element. It is empty unless the three slots of this codon are occupied and pair, position
    /// for position, with `triplet`.
    pub fn triplet_connection_points(&self, triplet: &[Unit; 3]) -> Vec<ConnectionPoint> {
        let rules = self.parameters().pairing_rules;
        let start = if let Some(start) = self.active_codon_start() {
            start
        } else {
            return vec![];
        };
        let matching = triplet.iter().enumerate().all(|(i, unit)| {
            self.get(Track::Lower, start + i)
                .map(|codon_unit| rules.can_pair(codon_unit.kind(), unit.kind()))
                .unwrap_or(false)
        });
        let docking_free = (start..start + CODON_LENGTH)
            .all(|i| self.docked.get(i).map(Option::is_none).unwrap_or(false));
        if !matching || !docking_free {
            return vec![];
        }

        // The decoder does not move, the product strand slides under it instead.
        let middle = self.slot_position(Track::Lower, start + 1);
        let position = Vec2::new(
            middle.x - self.product_shift(),
            self.reference().y + self.parameters().docking_row_offset,
        );
        vec![ConnectionPoint {
            position,
            orientation: Track::Upper.orientation(),
            bond: BondType::Codon,
            placement: Placement::Codon {
                start,
                units: *triplet,
            },
        }]
    }
}
