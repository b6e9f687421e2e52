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
//! The positional slot model on which strands are assembled.
//!
//! A `SlotTrackModel` has two tracks of the same length. The upper track holds the template
//! strand and the lower track holds the product strand. A third row, the docking row, receives
//! the units of decoding elements during translation.

use super::{Parameters, Track, Unit, UnitId, UnitKind};
use std::sync::{Arc, Mutex};
use ultraviolet::Vec2;

mod connection;
pub use connection::*;

/// The number of units in a codon
pub const CODON_LENGTH: usize = 3;

/// An object that must be notified each time the content of a `SlotTrackModel` changes.
pub trait TrackObserver {
    fn on_tracks_changed(&mut self, model: &SlotTrackModel);
}

pub type TrackObserverPtr = Arc<Mutex<dyn TrackObserver>>;

/// An error that occured when trying to place units in the model.
///
/// These errors are contract violations: callers are expected to obtain legal slots from
/// `SlotTrackModel::connection_points` before placing units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrPlacement {
    IndexOutOfRange { index: usize, length: usize },
    SlotAlreadyOccupied { track: Track, index: usize },
    DockingSlotAlreadyOccupied { index: usize },
    UnitAlreadyPlaced(UnitId),
}

/// Two parallel tracks of slots, each slot being empty or holding a unit.
pub struct SlotTrackModel {
    upper: Vec<Option<Unit>>,
    lower: Vec<Option<Unit>>,
    docked: Vec<Option<Unit>>,
    /// The presentation coordinate of the center slot
    reference: Vec2,
    parameters: Parameters,
    /// The number of codons that have already been decoded
    translocation_steps: usize,
    observers: Vec<TrackObserverPtr>,
}

impl SlotTrackModel {
    pub fn new(reference_x: f32, reference_y: f32) -> Self {
        Self::with_parameters(Vec2::new(reference_x, reference_y), Parameters::DEFAULT)
    }

    pub fn with_parameters(reference: Vec2, parameters: Parameters) -> Self {
        let length = parameters.track_length;
        Self {
            upper: vec![None; length],
            lower: vec![None; length],
            docked: vec![None; length],
            reference,
            parameters,
            translocation_steps: 0,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: TrackObserverPtr) {
        self.observers.push(observer)
    }

    fn notify_observers(&self) {
        for observer in self.observers.iter() {
            match observer.lock() {
                Ok(mut observer) => observer.on_tracks_changed(self),
                Err(_) => log::error!("Could not notify poisoned track observer"),
            }
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn reference(&self) -> Vec2 {
        self.reference
    }

    pub fn track_length(&self) -> usize {
        self.parameters.track_length
    }

    pub fn center_index(&self) -> usize {
        self.parameters.center_index()
    }

    pub fn translocation_steps(&self) -> usize {
        self.translocation_steps
    }

    pub fn slots(&self, track: Track) -> &[Option<Unit>] {
        match track {
            Track::Upper => &self.upper,
            Track::Lower => &self.lower,
        }
    }

    fn slots_mut(&mut self, track: Track) -> &mut Vec<Option<Unit>> {
        match track {
            Track::Upper => &mut self.upper,
            Track::Lower => &mut self.lower,
        }
    }

    /// The unit at a given slot, `None` if the slot is empty or out of range.
    pub fn get(&self, track: Track, index: usize) -> Option<Unit> {
        self.slots(track).get(index).copied().flatten()
    }

    pub fn is_occupied(&self, track: Track, index: usize) -> bool {
        self.get(track, index).is_some()
    }

    /// Store `unit` at `index` on `track`.
    ///
    /// Fails if the index is out of range, if the slot is occupied, or if `unit` is already
    /// somewhere in the model. The model is left unchanged on failure.
    pub fn place(&mut self, index: usize, track: Track, unit: Unit) -> Result<(), ErrPlacement> {
        let length = self.track_length();
        if index >= length {
            return Err(ErrPlacement::IndexOutOfRange { index, length });
        }
        if self.is_occupied(track, index) {
            return Err(ErrPlacement::SlotAlreadyOccupied { track, index });
        }
        if self.contains(&unit) || self.is_docked(&unit) {
            return Err(ErrPlacement::UnitAlreadyPlaced(unit.id()));
        }
        log::debug!("place {} at {} {}", unit, track, index);
        self.slots_mut(track)[index] = Some(unit);
        self.notify_observers();
        Ok(())
    }

    /// Clear every slot holding `unit`, in both tracks and in the docking row.
    ///
    /// Return true and notify the observers iff at least one slot was cleared.
    pub fn remove(&mut self, unit: &Unit) -> bool {
        let mut removed = false;
        for slot in self
            .upper
            .iter_mut()
            .chain(self.lower.iter_mut())
            .chain(self.docked.iter_mut())
        {
            if slot.as_ref() == Some(unit) {
                *slot = None;
                removed = true;
            }
        }
        if removed {
            log::debug!("removed {}", unit);
            self.notify_observers();
        }
        removed
    }

    /// Remove all the units of a track and return them in increasing index order.
    ///
    /// Observers are notified once if the track was not empty.
    pub fn take_track(&mut self, track: Track) -> Vec<Unit> {
        let ret: Vec<Unit> = self.slots_mut(track).iter_mut().filter_map(Option::take).collect();
        if !ret.is_empty() {
            log::debug!("took {} units from {} track", ret.len(), track);
            self.notify_observers();
        }
        ret
    }

    pub fn contains(&self, unit: &Unit) -> bool {
        self.upper_contains(unit) || self.lower_contains(unit)
    }

    pub fn upper_contains(&self, unit: &Unit) -> bool {
        self.track_contains(Track::Upper, unit)
    }

    pub fn lower_contains(&self, unit: &Unit) -> bool {
        self.track_contains(Track::Lower, unit)
    }

    pub fn track_contains(&self, track: Track, unit: &Unit) -> bool {
        self.slots(track).iter().any(|slot| slot.as_ref() == Some(unit))
    }

    /// Return true if `unit` is docked as part of a decoding element.
    pub fn is_docked(&self, unit: &Unit) -> bool {
        self.docked.iter().any(|slot| slot.as_ref() == Some(unit))
    }

    /// The number of occupied slots on both tracks. Docked units are not counted.
    pub fn size(&self) -> usize {
        self.upper_size() + self.lower_size()
    }

    pub fn upper_size(&self) -> usize {
        self.track_size(Track::Upper)
    }

    pub fn lower_size(&self) -> usize {
        self.track_size(Track::Lower)
    }

    pub fn track_size(&self, track: Track) -> usize {
        self.slots(track).iter().filter(|slot| slot.is_some()).count()
    }

    pub fn docked_size(&self) -> usize {
        self.docked.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn upper_units(&self) -> Vec<Unit> {
        self.units(Track::Upper)
    }

    pub fn lower_units(&self) -> Vec<Unit> {
        self.units(Track::Lower)
    }

    /// The units of a track in increasing index order
    pub fn units(&self, track: Track) -> Vec<Unit> {
        self.slots(track).iter().flatten().copied().collect()
    }

    /// The docked units in increasing index order
    pub fn docked_units(&self) -> Vec<Unit> {
        self.docked.iter().flatten().copied().collect()
    }

    /// The number of times the occupancy changes when walking along the track.
    ///
    /// A value of 2 means that the track holds exactly one contiguous run of units, and that
    /// this run touches neither end of the track.
    pub fn boundary_transition_count(&self, track: Track) -> usize {
        let slots = self.slots(track);
        let mut ret = 0;
        if let Some(first) = slots.first() {
            let mut previous = first.is_some();
            for slot in slots.iter().skip(1) {
                if slot.is_some() != previous {
                    ret += 1;
                    previous = slot.is_some();
                }
            }
        }
        ret
    }

    /// Return true if `track` holds a single strand of at least three units that does not touch
    /// the ends of the track.
    pub fn is_track_ready(&self, track: Track) -> bool {
        self.track_size(track) >= CODON_LENGTH && self.boundary_transition_count(track) == 2
    }

    /// Return true if the template strand is complete
    pub fn is_ready_for_stage2(&self) -> bool {
        self.is_track_ready(Track::Upper)
    }

    /// Return true if the product strand is complete
    pub fn is_ready_for_stage3(&self) -> bool {
        self.is_track_ready(Track::Lower)
    }

    /// The smallest index `i` such that `i`, `i + 1` and `i + 2` are occupied on `track`.
    pub fn find_triplet_start(&self, track: Track) -> Option<usize> {
        self.slots(track)
            .windows(CODON_LENGTH)
            .position(|window| window.iter().all(Option::is_some))
    }

    /// The index of the first slot of the codon currently held by the decoder.
    ///
    /// The result may be out of range once every codon has been decoded.
    pub fn active_codon_start(&self) -> Option<usize> {
        self.find_triplet_start(Track::Lower)
            .map(|start| start + self.translocation_steps * CODON_LENGTH)
    }

    /// The kinds of the codon currently held by the decoder, if it is complete.
    pub fn active_codon(&self) -> Option<[UnitKind; 3]> {
        let start = self.active_codon_start()?;
        let first = self.get(Track::Lower, start)?;
        let second = self.get(Track::Lower, start + 1)?;
        let third = self.get(Track::Lower, start + 2)?;
        Some([first.kind(), second.kind(), third.kind()])
    }

    /// Shift the active codon window by one codon. Must be called once per successful docking of
    /// a decoding element.
    pub fn advance_translocation(&mut self) {
        self.translocation_steps += 1;
        log::debug!("translocation step {}", self.translocation_steps);
    }

    /// Place the three units of a decoding element in the docking row, starting at `start`.
    ///
    /// Either all three units are placed or none of them.
    pub fn dock_triplet(&mut self, start: usize, units: [Unit; 3]) -> Result<(), ErrPlacement> {
        let length = self.track_length();
        for (i, unit) in units.iter().enumerate() {
            let index = start + i;
            if index >= length {
                return Err(ErrPlacement::IndexOutOfRange { index, length });
            }
            if self.docked[index].is_some() {
                return Err(ErrPlacement::DockingSlotAlreadyOccupied { index });
            }
            let duplicated = units[..i].contains(unit);
            if duplicated || self.contains(unit) || self.is_docked(unit) {
                return Err(ErrPlacement::UnitAlreadyPlaced(unit.id()));
            }
        }
        for (i, unit) in units.iter().enumerate() {
            self.docked[start + i] = Some(*unit);
        }
        log::debug!("docked {} {} {} at {}", units[0], units[1], units[2], start);
        self.notify_observers();
        Ok(())
    }

    /// The presentation coordinate of the center of a slot
    pub fn slot_position(&self, track: Track, index: usize) -> Vec2 {
        let offset = match track {
            Track::Upper => self.parameters.upper_track_offset,
            Track::Lower => self.parameters.lower_track_offset,
        };
        Vec2::new(
            self.reference.x + self.signed_distance_to_center(index),
            self.reference.y + offset,
        )
    }

    /// The horizontal distance by which the product strand has been moved by decoding steps.
    pub fn product_shift(&self) -> f32 {
        (self.translocation_steps * CODON_LENGTH) as f32 * self.parameters.unit_pitch
    }

    fn signed_distance_to_center(&self, index: usize) -> f32 {
        (index as f32 - self.center_index() as f32) * self.parameters.unit_pitch
    }

    /// A compact representation of a track, `.` standing for empty slots. Only the range between
    /// the first and the last occupied slots is shown.
    pub fn formated_track(&self, track: Track) -> String {
        let slots = self.slots(track);
        let first = slots.iter().position(Option::is_some);
        let last = slots.iter().rposition(Option::is_some);
        match first.zip(last) {
            Some((first, last)) => slots[first..=last]
                .iter()
                .map(|slot| slot.map(|u| u.kind().abbreviation()).unwrap_or('.'))
                .collect(),
            None => String::new(),
        }
    }
}
