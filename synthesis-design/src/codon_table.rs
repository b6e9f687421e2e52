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
//! The standard RNA codon table.

use super::{complement, Backbone, UnitKind};

pub type Codon = [UnitKind; 3];

/// The codon at which translation starts
pub const START_CODON: Codon = [UnitKind::Adenine, UnitKind::Uracil, UnitKind::Guanine];

/// The order in which bases index the table
const TABLE_ORDER: [UnitKind; 4] = [
    UnitKind::Uracil,
    UnitKind::Cytosine,
    UnitKind::Adenine,
    UnitKind::Guanine,
];

/// One letter codes of the translations of the 64 codons, `*` standing for stop codons.
const TABLE: &[u8; 64] = b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum AminoAcid {
    Alanine,
    Arginine,
    Asparagine,
    AsparticAcid,
    Cysteine,
    GlutamicAcid,
    Glutamine,
    Glycine,
    Histidine,
    Isoleucine,
    Leucine,
    Lysine,
    Methionine,
    Phenylalanine,
    Proline,
    Serine,
    Threonine,
    Tryptophan,
    Tyrosine,
    Valine,
}

impl AminoAcid {
    pub fn from_one_letter_code(c: char) -> Option<Self> {
        use AminoAcid::*;
        Some(match c {
            'A' => Alanine,
            'R' => Arginine,
            'N' => Asparagine,
            'D' => AsparticAcid,
            'C' => Cysteine,
            'E' => GlutamicAcid,
            'Q' => Glutamine,
            'G' => Glycine,
            'H' => Histidine,
            'I' => Isoleucine,
            'L' => Leucine,
            'K' => Lysine,
            'M' => Methionine,
            'F' => Phenylalanine,
            'P' => Proline,
            'S' => Serine,
            'T' => Threonine,
            'W' => Tryptophan,
            'Y' => Tyrosine,
            'V' => Valine,
            _ => return None,
        })
    }

    pub fn one_letter_code(&self) -> char {
        use AminoAcid::*;
        match self {
            Alanine => 'A',
            Arginine => 'R',
            Asparagine => 'N',
            AsparticAcid => 'D',
            Cysteine => 'C',
            GlutamicAcid => 'E',
            Glutamine => 'Q',
            Glycine => 'G',
            Histidine => 'H',
            Isoleucine => 'I',
            Leucine => 'L',
            Lysine => 'K',
            Methionine => 'M',
            Phenylalanine => 'F',
            Proline => 'P',
            Serine => 'S',
            Threonine => 'T',
            Tryptophan => 'W',
            Tyrosine => 'Y',
            Valine => 'V',
        }
    }

    pub fn three_letter_code(&self) -> &'static str {
        use AminoAcid::*;
        match self {
            Alanine => "Ala",
            Arginine => "Arg",
            Asparagine => "Asn",
            AsparticAcid => "Asp",
            Cysteine => "Cys",
            GlutamicAcid => "Glu",
            Glutamine => "Gln",
            Glycine => "Gly",
            Histidine => "His",
            Isoleucine => "Ile",
            Leucine => "Leu",
            Lysine => "Lys",
            Methionine => "Met",
            Phenylalanine => "Phe",
            Proline => "Pro",
            Serine => "Ser",
            Threonine => "Thr",
            Tryptophan => "Trp",
            Tyrosine => "Tyr",
            Valine => "Val",
        }
    }
}

impl std::fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.three_letter_code())
    }
}

/// The meaning of a codon
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Translation {
    AminoAcid(AminoAcid),
    Stop,
}

fn table_index(kind: UnitKind) -> Option<usize> {
    TABLE_ORDER.iter().position(|k| *k == kind)
}

/// Decode a codon. Return `None` if the codon is not made of RNA kinds.
pub fn translate(codon: Codon) -> Option<Translation> {
    let mut index = 0;
    for kind in codon.iter() {
        index = index * 4 + table_index(*kind)?;
    }
    let code = TABLE[index] as char;
    if code == '*' {
        Some(Translation::Stop)
    } else {
        AminoAcid::from_one_letter_code(code).map(Translation::AminoAcid)
    }
}

/// The kinds carried by the decoding element that binds `codon`, in the same order as the codon.
pub fn anticodon(codon: Codon) -> Codon {
    [
        complement(codon[0], Backbone::Ribose),
        complement(codon[1], Backbone::Ribose),
        complement(codon[2], Backbone::Ribose),
    ]
}

/// Read a codon from its abbreviation, e.g. "AUG".
pub fn parse_codon(s: &str) -> Option<Codon> {
    let mut chars = s.chars().map(UnitKind::from_abbreviation);
    let codon = [chars.next()??, chars.next()??, chars.next()??];
    if chars.next().is_some() {
        None
    } else {
        Some(codon)
    }
}

pub fn formated_codon(codon: &Codon) -> String {
    codon.iter().map(UnitKind::abbreviation).collect()
}

/// The 64 codons, in the order in which they are displayed in the codon table.
pub fn all_codons() -> Vec<Codon> {
    let mut ret = Vec::with_capacity(64);
    for a in TABLE_ORDER.iter() {
        for b in TABLE_ORDER.iter() {
            for c in TABLE_ORDER.iter() {
                ret.push([*a, *b, *c]);
            }
        }
    }
    ret
}
