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
//! This crate defines the data model of the strand assembly engine.
//!
//! Units are placed on a `SlotTrackModel`, made of two parallel tracks of fixed length. The
//! model answers the questions asked by the graphical component while a unit is being dragged
//! (where can it attach ?) and the questions asked when moving from one stage of the synthesis
//! to the next one (is the strand complete ?).

#[macro_use]
extern crate serde_derive;
extern crate serde;

/// Re-export ultraviolet for linear algebra
pub use ultraviolet;

pub mod codon_table;
mod pairing;
pub use pairing::*;
mod parameters;
pub use parameters::*;
mod random_strand;
pub use random_strand::build_random_strand;
mod tracks;
pub use tracks::*;

#[cfg(test)]
mod tests;

/// The identifier of a unit. Two units are the same unit if and only if they have the same
/// identifier.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct UnitId(pub usize);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The nucleobase carried by a unit.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum UnitKind {
    Adenine,
    Thymine,
    Guanine,
    Cytosine,
    /// Replaces thymine in the product strand
    Uracil,
}

impl UnitKind {
    /// The kinds that can be used to build a DNA strand
    pub const DNA_KINDS: [UnitKind; 4] = [
        UnitKind::Adenine,
        UnitKind::Thymine,
        UnitKind::Guanine,
        UnitKind::Cytosine,
    ];

    /// The kinds that can be used to build a RNA strand
    pub const RNA_KINDS: [UnitKind; 4] = [
        UnitKind::Adenine,
        UnitKind::Uracil,
        UnitKind::Guanine,
        UnitKind::Cytosine,
    ];

    pub fn abbreviation(&self) -> char {
        match self {
            Self::Adenine => 'A',
            Self::Thymine => 'T',
            Self::Guanine => 'G',
            Self::Cytosine => 'C',
            Self::Uracil => 'U',
        }
    }

    pub fn from_abbreviation(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::Adenine),
            'T' => Some(Self::Thymine),
            'G' => Some(Self::Guanine),
            'C' => Some(Self::Cytosine),
            'U' => Some(Self::Uracil),
            _ => None,
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// The sugar of a unit's backbone. It tells on which kind of strand the unit can be used.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Backbone {
    /// Template material (DNA)
    Deoxyribose,
    /// Product material (RNA)
    Ribose,
}

impl Backbone {
    /// Return true if units with this backbone belong to the product strand. Such units are never
    /// allowed to anchor the template track.
    pub fn is_product_material(&self) -> bool {
        matches!(self, Self::Ribose)
    }
}

/// The direction in which a unit is drawn.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Orientation {
    /// Pointing up, the hydrogen bond connector on top
    Forward,
    /// Pointing down
    Reversed,
}

impl Orientation {
    pub fn flipped(&self) -> Self {
        match self {
            Self::Forward => Self::Reversed,
            Self::Reversed => Self::Forward,
        }
    }
}

/// One of the two tracks of a `SlotTrackModel`.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Track {
    /// The template track
    Upper,
    /// The product track
    Lower,
}

impl Track {
    pub const ALL: [Track; 2] = [Track::Upper, Track::Lower];

    pub fn opposite(&self) -> Self {
        match self {
            Self::Upper => Self::Lower,
            Self::Lower => Self::Upper,
        }
    }

    /// The orientation that a unit must have to be drawn on this track. Units of the upper track
    /// point down toward their partner on the lower track.
    pub fn orientation(&self) -> Orientation {
        match self {
            Self::Upper => Orientation::Reversed,
            Self::Lower => Orientation::Forward,
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upper => write!(f, "upper"),
            Self::Lower => write!(f, "lower"),
        }
    }
}

/// A piece that can be placed in a slot.
///
/// The kind and the backbone of a unit never change. The orientation is owned by the graphical
/// component and is ignored by the placement rules. Equality of units is equality of identifiers.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct Unit {
    id: UnitId,
    kind: UnitKind,
    backbone: Backbone,
    pub orientation: Orientation,
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Unit {}

impl std::hash::Hash for Unit {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl Unit {
    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn backbone(&self) -> Backbone {
        self.backbone
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind, self.id)
    }
}

/// Hands out units with fresh identifiers.
#[derive(Default, Debug, Clone)]
pub struct UnitFactory {
    next_id: usize,
}

impl UnitFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, kind: UnitKind, backbone: Backbone) -> Unit {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        Unit {
            id,
            kind,
            backbone,
            orientation: Orientation::Forward,
        }
    }

    /// Create the three units carried by a decoding element, in 5' to 3' order.
    pub fn decoding_triplet(&mut self, kinds: [UnitKind; 3]) -> [Unit; 3] {
        [
            self.create(kinds[0], Backbone::Ribose),
            self.create(kinds[1], Backbone::Ribose),
            self.create(kinds[2], Backbone::Ribose),
        ]
    }

    /// The number of units created so far
    pub fn nb_created(&self) -> usize {
        self.next_id
    }
}
