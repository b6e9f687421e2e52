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
//! Hydrogen bonding rules between unit kinds.

use super::{Backbone, UnitKind};

/// The set of rules deciding which kinds may pair across tracks.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Debug)]
pub enum PairingRules {
    /// A-T and G-C only
    Dna,
    /// The DNA rules, plus A-U for the product stage
    Extended,
}

impl Default for PairingRules {
    fn default() -> Self {
        Self::Extended
    }
}

impl PairingRules {
    /// Return true iff units of kind `a` and `b` may hydrogen bond. This relation is symmetric.
    pub fn can_pair(&self, a: UnitKind, b: UnitKind) -> bool {
        use UnitKind::*;
        match (a, b) {
            (Adenine, Thymine) | (Thymine, Adenine) => true,
            (Guanine, Cytosine) | (Cytosine, Guanine) => true,
            (Adenine, Uracil) | (Uracil, Adenine) => *self == Self::Extended,
            _ => false,
        }
    }
}

/// The kind that pairs with `kind` on a strand made of `backbone` material.
pub fn complement(kind: UnitKind, backbone: Backbone) -> UnitKind {
    match kind {
        UnitKind::Adenine => match backbone {
            Backbone::Deoxyribose => UnitKind::Thymine,
            Backbone::Ribose => UnitKind::Uracil,
        },
        UnitKind::Thymine | UnitKind::Uracil => UnitKind::Adenine,
        UnitKind::Guanine => UnitKind::Cytosine,
        UnitKind::Cytosine => UnitKind::Guanine,
    }
}
