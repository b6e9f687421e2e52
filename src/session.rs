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

//! A headless run of the three stages, driving the model exactly like the graphical component
//! does: every unit is attached through one of the connection points offered by the model.

use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::{Arc, Mutex};
use synthesis_design::ultraviolet::Vec2;
use synthesis_design::codon_table::{self, AminoAcid, Codon, Translation, START_CODON};
use synthesis_design::{
    complement, Backbone, Direction, ErrPlacement, Parameters, SlotTrackModel, Track, Unit,
    UnitFactory, UnitKind, CODON_LENGTH,
};
use synthesis_interactor::{DefaultTargetMarker, Stage, StageController};

#[derive(Debug)]
pub enum ErrSession {
    Placement(ErrPlacement),
    /// The model offered no connection point for `unit` at the wanted slot.
    NoConnectionPoint { unit: Unit, track: Track, index: usize },
    /// No decoding element can dock on the active codon.
    NoDockingPoint(Codon),
    StageRefused { from: Stage, to: Stage },
    /// The gene does not fit between the center of the tracks and their right end.
    GeneTooLong { length: usize, available: usize },
}

impl From<ErrPlacement> for ErrSession {
    fn from(e: ErrPlacement) -> Self {
        Self::Placement(e)
    }
}

/// The outcome of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub template: String,
    pub product: String,
    pub peptide: Vec<String>,
    pub nb_decoding_elements: usize,
}

pub struct Session {
    model: SlotTrackModel,
    controller: StageController,
    factory: UnitFactory,
    marker: Arc<Mutex<DefaultTargetMarker>>,
}

impl Session {
    pub fn new(parameters: Parameters) -> Self {
        let mut model = SlotTrackModel::with_parameters(Vec2::zero(), parameters);
        let marker = Arc::new(Mutex::new(DefaultTargetMarker::new(&model)));
        model.add_observer(marker.clone());
        Self {
            model,
            controller: StageController::new(),
            factory: UnitFactory::new(),
            marker,
        }
    }

    pub fn model(&self) -> &SlotTrackModel {
        &self.model
    }

    pub fn stage(&self) -> Stage {
        self.controller.current()
    }

    /// The maximal number of units of a gene
    pub fn gene_capacity(&self) -> usize {
        // The strand starts at the center and must not touch the right end of the track.
        self.model.track_length() - 1 - self.model.center_index()
    }

    /// Run the three stages on `gene`, the sequence that the product strand must carry.
    pub fn run(&mut self, gene: &[UnitKind]) -> Result<Report, ErrSession> {
        let available = self.gene_capacity();
        if gene.len() > available {
            return Err(ErrSession::GeneTooLong {
                length: gene.len(),
                available,
            });
        }
        self.assemble_template(gene)?;
        self.select(Stage::Intermediate)?;
        self.model.take_track(Track::Lower);
        self.transcribe()?;
        self.select(Stage::Final)?;
        let peptide = self.translate()?;
        Ok(Report {
            template: self.model.formated_track(Track::Upper),
            product: self.model.formated_track(Track::Lower),
            peptide: peptide.iter().map(|a| a.three_letter_code().to_owned()).collect(),
            nb_decoding_elements: self.model.translocation_steps(),
        })
    }

    fn select(&mut self, stage: Stage) -> Result<(), ErrSession> {
        let from = self.controller.current();
        self.controller
            .select(stage, &self.model)
            .map(|_| ())
            .ok_or(ErrSession::StageRefused { from, to: stage })
    }

    /// Build the double stranded template: the upper strand is extended to the right one unit at
    /// a time, then each of its units receives a partner on the lower track.
    fn assemble_template(&mut self, gene: &[UnitKind]) -> Result<(), ErrSession> {
        if let Ok(marker) = self.marker.lock() {
            log::info!(
                "Dropping the first unit at {:?} (target visible: {})",
                marker.position(),
                marker.is_visible()
            );
        }
        for kind in gene.iter() {
            let template_kind = complement(*kind, Backbone::Deoxyribose);
            let unit = self.factory.create(template_kind, Backbone::Deoxyribose);
            let points = if self.model.is_empty() {
                self.model.connection_points(&unit)
            } else {
                self.model
                    .backbone_extensions(&unit, Track::Upper, Direction::Right)
            };
            let point = points
                .iter()
                .max_by_key(|p| p.index())
                .ok_or(ErrSession::NoConnectionPoint {
                    unit,
                    track: Track::Upper,
                    index: self.model.center_index(),
                })?;
            self.model.connect(point)?;
        }
        self.pair_upper_strand(Backbone::Deoxyribose)
    }

    fn transcribe(&mut self) -> Result<(), ErrSession> {
        self.pair_upper_strand(Backbone::Ribose)
    }

    /// Attach a partner made of `backbone` facing each unit of the upper track.
    fn pair_upper_strand(&mut self, backbone: Backbone) -> Result<(), ErrSession> {
        let template: Vec<(usize, Unit)> = self
            .model
            .slots(Track::Upper)
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|u| (i, u)))
            .collect();
        for (index, template_unit) in template {
            let unit = self
                .factory
                .create(complement(template_unit.kind(), backbone), backbone);
            let point = self
                .model
                .connection_points(&unit)
                .into_iter()
                .find(|p| p.track() == Some(Track::Lower) && p.index() == index)
                .ok_or(ErrSession::NoConnectionPoint {
                    unit,
                    track: Track::Lower,
                    index,
                })?;
            self.model.connect(&point)?;
        }
        Ok(())
    }

    /// Dock one decoding element per codon until a stop codon or the end of the product strand.
    fn translate(&mut self) -> Result<Vec<AminoAcid>, ErrSession> {
        let mut peptide = Vec::new();
        while let Some(codon) = self.model.active_codon() {
            let amino_acid = match codon_table::translate(codon) {
                Some(Translation::AminoAcid(a)) => a,
                Some(Translation::Stop) => {
                    log::info!("Stop codon {}", codon_table::formated_codon(&codon));
                    break;
                }
                None => {
                    log::warn!("{} is not a codon", codon_table::formated_codon(&codon));
                    break;
                }
            };
            let triplet = self
                .factory
                .decoding_triplet(codon_table::anticodon(codon));
            let point = self
                .model
                .triplet_connection_points(&triplet)
                .first()
                .copied()
                .ok_or(ErrSession::NoDockingPoint(codon))?;
            self.model.connect(&point)?;
            self.model.advance_translocation();
            log::info!("{} -> {}", codon_table::formated_codon(&codon), amino_acid);
            peptide.push(amino_acid);
        }
        Ok(peptide)
    }
}

/// A random gene: a start codon, `nb_codons` sense codons and a stop codon.
pub fn random_gene<R: Rng>(nb_codons: usize, rng: &mut R) -> Vec<UnitKind> {
    let codons = codon_table::all_codons();
    let (stops, senses): (Vec<Codon>, Vec<Codon>) = codons
        .into_iter()
        .partition(|c| codon_table::translate(*c) == Some(Translation::Stop));
    let mut ret = Vec::with_capacity((nb_codons + 2) * CODON_LENGTH);
    ret.extend_from_slice(&START_CODON);
    for _ in 0..nb_codons {
        if let Some(codon) = senses.choose(rng) {
            ret.extend_from_slice(codon);
        }
    }
    if let Some(stop) = stops.choose(rng) {
        ret.extend_from_slice(stop);
    }
    ret
}
