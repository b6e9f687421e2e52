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
//! The three stages of the synthesis and the rules that decide when they can be entered.

use synthesis_design::{Backbone, SlotTrackModel, UnitKind};

#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Stage {
    /// Assembly of the template strand
    Initial,
    /// Copy of the template into the product strand
    Intermediate,
    /// Decoding of the product strand
    Final,
}

impl Default for Stage {
    fn default() -> Self {
        Self::Initial
    }
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Initial, Stage::Intermediate, Stage::Final];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Initial => "DNA",
            Self::Intermediate => "Transcription",
            Self::Final => "Translation",
        }
    }

    /// The units that the user can pick during this stage.
    pub fn toolbox(&self) -> Toolbox {
        match self {
            Self::Initial => Toolbox {
                kinds: UnitKind::DNA_KINDS,
                backbone: Backbone::Deoxyribose,
            },
            Self::Intermediate | Self::Final => Toolbox {
                kinds: UnitKind::RNA_KINDS,
                backbone: Backbone::Ribose,
            },
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The kinds of unit offered to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Toolbox {
    pub kinds: [UnitKind; 4],
    pub backbone: Backbone,
}

/// A change of stage. The graphical component reacts to it, for example by moving the strands
/// that are not used anymore.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageTransition {
    pub from: Stage,
    pub to: Stage,
}

impl StageTransition {
    pub fn is_forward(&self) -> bool {
        stage_rank(self.to) > stage_rank(self.from)
    }
}

fn stage_rank(stage: Stage) -> usize {
    match stage {
        Stage::Initial => 0,
        Stage::Intermediate => 1,
        Stage::Final => 2,
    }
}

/// Holds the current stage. This is the only object that can modify it.
///
/// The guards are evaluated against the model each time they are needed and are never cached.
#[derive(Default, Debug, Clone)]
pub struct StageController {
    current: Stage,
}

impl StageController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Stage {
        self.current
    }

    /// Return true if the action selecting `stage` must be enabled.
    pub fn is_selectable(&self, stage: Stage, model: &SlotTrackModel) -> bool {
        match stage {
            Stage::Initial => true,
            Stage::Intermediate => {
                self.current == Stage::Intermediate
                    || (self.current == Stage::Initial && model.is_ready_for_stage2())
            }
            Stage::Final => {
                self.current == Stage::Final
                    || (self.current == Stage::Intermediate && model.is_ready_for_stage3())
            }
        }
    }

    /// The stages whose selection action must be enabled, in order.
    pub fn selectable_stages(&self, model: &SlotTrackModel) -> Vec<Stage> {
        Stage::ALL
            .iter()
            .copied()
            .filter(|s| self.is_selectable(*s, model))
            .collect()
    }

    /// Try to enter `stage`.
    ///
    /// Nothing happens if the stage is not selectable or if it is already the current stage.
    /// Otherwise the transition that was performed is returned.
    pub fn select(&mut self, stage: Stage, model: &SlotTrackModel) -> Option<StageTransition> {
        if !self.is_selectable(stage, model) {
            log::info!("Ignoring selection of {} from {}", stage, self.current);
            return None;
        }
        if stage == self.current {
            return None;
        }
        let transition = StageTransition {
            from: self.current,
            to: stage,
        };
        log::info!("Stage {} -> {}", transition.from, transition.to);
        self.current = stage;
        Some(transition)
    }

    pub fn reset(&mut self) {
        self.current = Stage::Initial;
    }
}
