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

use super::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use ultraviolet::Vec2;

fn model_of_length(track_length: usize) -> SlotTrackModel {
    let parameters = Parameters {
        track_length,
        ..Parameters::DEFAULT
    };
    SlotTrackModel::with_parameters(Vec2::zero(), parameters)
}

/// Place the units described by `kinds` (e.g. "ATG") on `track`, starting at `start`.
fn place_kinds(
    model: &mut SlotTrackModel,
    factory: &mut UnitFactory,
    track: Track,
    start: usize,
    kinds: &str,
    backbone: Backbone,
) -> Vec<Unit> {
    let mut ret = Vec::new();
    for (i, c) in kinds.chars().enumerate() {
        let kind = UnitKind::from_abbreviation(c).expect("Not a unit kind");
        let unit = factory.create(kind, backbone);
        model.place(start + i, track, unit).unwrap();
        ret.push(unit);
    }
    ret
}

fn point_set(points: &[ConnectionPoint]) -> HashSet<(Option<Track>, usize)> {
    points.iter().map(|p| (p.track(), p.index())).collect()
}

#[derive(Default)]
struct NotificationCounter {
    count: usize,
    last_size: usize,
}

impl TrackObserver for NotificationCounter {
    fn on_tracks_changed(&mut self, model: &SlotTrackModel) {
        self.count += 1;
        self.last_size = model.size();
    }
}

fn counted_model(track_length: usize) -> (SlotTrackModel, Arc<Mutex<NotificationCounter>>) {
    let mut model = model_of_length(track_length);
    let counter = Arc::new(Mutex::new(NotificationCounter::default()));
    model.add_observer(counter.clone());
    (model, counter)
}

#[test]
fn sizes_are_consistent() {
    let mut model = model_of_length(20);
    let mut factory = UnitFactory::new();
    place_kinds(&mut model, &mut factory, Track::Upper, 3, "ATGC", Backbone::Deoxyribose);
    place_kinds(&mut model, &mut factory, Track::Lower, 4, "AC", Backbone::Deoxyribose);
    place_kinds(&mut model, &mut factory, Track::Lower, 12, "G", Backbone::Deoxyribose);
    assert_eq!(model.upper_size(), 4);
    assert_eq!(model.lower_size(), 3);
    assert_eq!(model.size(), model.upper_size() + model.lower_size());
    assert_eq!(
        model.size(),
        model.upper_units().len() + model.lower_units().len()
    );
    assert!(!model.is_empty());
}

#[test]
fn sizes_are_consistent_for_random_strands() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let mut model = model_of_length(30);
        let mut factory = UnitFactory::new();
        let count = rng.gen_range(0..25);
        let placed =
            build_random_strand(&mut model, &mut factory, Backbone::Deoxyribose, count, &mut rng)
                .unwrap();
        assert_eq!(placed.len(), model.size());
        assert_eq!(
            model.size(),
            model.upper_units().len() + model.lower_units().len()
        );
        let distinct: HashSet<UnitId> = placed.iter().map(Unit::id).collect();
        assert_eq!(distinct.len(), placed.len());
        for unit in placed.iter() {
            assert!(model.upper_contains(unit) != model.lower_contains(unit));
        }
    }
}

#[test]
fn units_are_listed_in_index_order() {
    let mut model = model_of_length(10);
    let mut factory = UnitFactory::new();
    let a = factory.create(UnitKind::Adenine, Backbone::Deoxyribose);
    let t = factory.create(UnitKind::Thymine, Backbone::Deoxyribose);
    let g = factory.create(UnitKind::Guanine, Backbone::Deoxyribose);
    model.place(6, Track::Upper, a).unwrap();
    model.place(2, Track::Upper, t).unwrap();
    model.place(4, Track::Upper, g).unwrap();
    assert_eq!(model.upper_units(), vec![t, g, a]);
    assert!(model.lower_units().is_empty());
}

#[test]
fn empty_model() {
    let model = model_of_length(10);
    assert!(model.is_empty());
    assert_eq!(model.size(), 0);
    assert!(!model.is_ready_for_stage2());
    assert!(!model.is_ready_for_stage3());
    assert_eq!(model.find_triplet_start(Track::Lower), None);
    assert_eq!(model.active_codon(), None);
    assert_eq!(model.formated_track(Track::Upper), "");
}

#[test]
fn remove_is_idempotent() {
    let (mut model, counter) = counted_model(10);
    let mut factory = UnitFactory::new();
    let units = place_kinds(&mut model, &mut factory, Track::Upper, 2, "AT", Backbone::Deoxyribose);
    assert_eq!(counter.lock().unwrap().count, 2);

    assert!(model.remove(&units[0]));
    assert!(!model.contains(&units[0]));
    assert_eq!(counter.lock().unwrap().count, 3);
    assert_eq!(counter.lock().unwrap().last_size, 1);

    assert!(!model.remove(&units[0]));
    assert_eq!(counter.lock().unwrap().count, 3);
    assert!(model.contains(&units[1]));
}

#[test]
fn remove_unknown_unit_does_not_notify() {
    let (mut model, counter) = counted_model(10);
    let mut factory = UnitFactory::new();
    let stranger = factory.create(UnitKind::Guanine, Backbone::Ribose);
    assert!(!model.remove(&stranger));
    assert_eq!(counter.lock().unwrap().count, 0);
}

#[test]
fn invalid_placements_are_rejected() {
    let (mut model, counter) = counted_model(10);
    let mut factory = UnitFactory::new();
    let a = factory.create(UnitKind::Adenine, Backbone::Deoxyribose);
    let t = factory.create(UnitKind::Thymine, Backbone::Deoxyribose);

    assert_eq!(
        model.place(10, Track::Upper, a),
        Err(ErrPlacement::IndexOutOfRange {
            index: 10,
            length: 10
        })
    );
    model.place(3, Track::Upper, a).unwrap();
    assert_eq!(
        model.place(3, Track::Upper, t),
        Err(ErrPlacement::SlotAlreadyOccupied {
            track: Track::Upper,
            index: 3
        })
    );
    assert_eq!(
        model.place(3, Track::Lower, a),
        Err(ErrPlacement::UnitAlreadyPlaced(a.id()))
    );
    assert_eq!(model.size(), 1);
    assert_eq!(counter.lock().unwrap().count, 1);
}

#[test]
fn ready_when_one_run_away_from_the_edges() {
    let mut model = model_of_length(10);
    let mut factory = UnitFactory::new();
    place_kinds(&mut model, &mut factory, Track::Upper, 2, "ATG", Backbone::Deoxyribose);
    assert_eq!(model.boundary_transition_count(Track::Upper), 2);
    assert!(model.is_ready_for_stage2());
    assert!(!model.is_ready_for_stage3());
}

#[test]
fn not_ready_when_touching_the_first_slot() {
    let mut model = model_of_length(10);
    let mut factory = UnitFactory::new();
    place_kinds(&mut model, &mut factory, Track::Upper, 0, "ATG", Backbone::Deoxyribose);
    assert_eq!(model.upper_size(), 3);
    assert_eq!(model.boundary_transition_count(Track::Upper), 1);
    assert!(!model.is_ready_for_stage2());
}

#[test]
fn not_ready_when_touching_the_last_slot() {
    let mut model = model_of_length(10);
    let mut factory = UnitFactory::new();
    place_kinds(&mut model, &mut factory, Track::Upper, 7, "ATG", Backbone::Deoxyribose);
    assert!(!model.is_ready_for_stage2());
}

#[test]
fn not_ready_with_two_runs_or_too_few_units() {
    let mut model = model_of_length(10);
    let mut factory = UnitFactory::new();
    place_kinds(&mut model, &mut factory, Track::Upper, 1, "AT", Backbone::Deoxyribose);
    assert!(!model.is_ready_for_stage2());
    place_kinds(&mut model, &mut factory, Track::Upper, 5, "GC", Backbone::Deoxyribose);
    assert_eq!(model.boundary_transition_count(Track::Upper), 4);
    assert!(!model.is_ready_for_stage2());
}

#[test]
fn product_readiness_uses_lower_track() {
    let mut model = model_of_length(10);
    let mut factory = UnitFactory::new();
    place_kinds(&mut model, &mut factory, Track::Lower, 3, "AUGC", Backbone::Ribose);
    assert!(model.is_ready_for_stage3());
    assert!(!model.is_ready_for_stage2());
    assert_eq!(model.formated_track(Track::Lower), "AUGC");
}

#[test]
fn triplet_start_skips_short_runs() {
    let mut model = model_of_length(20);
    let mut factory = UnitFactory::new();
    place_kinds(&mut model, &mut factory, Track::Lower, 1, "AU", Backbone::Ribose);
    assert_eq!(model.find_triplet_start(Track::Lower), None);
    place_kinds(&mut model, &mut factory, Track::Lower, 6, "GCAU", Backbone::Ribose);
    assert_eq!(model.find_triplet_start(Track::Lower), Some(6));
    assert_eq!(model.find_triplet_start(Track::Upper), None);
    assert_eq!(model.formated_track(Track::Lower), "AU...GCAU");
}

#[test]
fn empty_model_offers_the_anchor() {
    let model = SlotTrackModel::new(120., 150.);
    let mut factory = UnitFactory::new();
    let a = factory.create(UnitKind::Adenine, Backbone::Deoxyribose);
    let points = model.connection_points(&a);
    assert_eq!(points.len(), 1);
    let point = points[0];
    assert_eq!(point.track(), Some(Track::Upper));
    assert_eq!(point.index(), model.center_index());
    assert_eq!(point.bond, BondType::Anchor);
    assert_eq!(point.position, Vec2::new(120., 150.));
    assert_eq!(point.orientation, Orientation::Reversed);
}

#[test]
fn product_material_never_anchors_template() {
    let model = model_of_length(10);
    let mut factory = UnitFactory::new();
    let u = factory.create(UnitKind::Uracil, Backbone::Ribose);
    assert!(model.connection_points(&u).is_empty());
}

#[test]
fn product_material_never_goes_on_upper_track() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut model = model_of_length(20);
        let mut factory = UnitFactory::new();
        let count = rng.gen_range(1..15);
        build_random_strand(&mut model, &mut factory, Backbone::Deoxyribose, count, &mut rng)
            .unwrap();
        for kind in UnitKind::RNA_KINDS.iter() {
            let candidate = factory.create(*kind, Backbone::Ribose);
            for point in model.connection_points(&candidate) {
                assert_eq!(point.track(), Some(Track::Lower));
            }
        }
    }
}

#[test]
fn backbone_and_hydrogen_points() {
    let mut model = model_of_length(10);
    let mut factory = UnitFactory::new();
    place_kinds(&mut model, &mut factory, Track::Upper, 4, "A", Backbone::Deoxyribose);

    let t = factory.create(UnitKind::Thymine, Backbone::Deoxyribose);
    let expected: HashSet<_> = vec![
        (Some(Track::Upper), 3),
        (Some(Track::Upper), 5),
        (Some(Track::Lower), 4),
    ]
    .into_iter()
    .collect();
    let points = model.connection_points(&t);
    assert_eq!(points.len(), 3);
    assert_eq!(point_set(&points), expected);

    let g = factory.create(UnitKind::Guanine, Backbone::Deoxyribose);
    let expected: HashSet<_> = vec![(Some(Track::Upper), 3), (Some(Track::Upper), 5)]
        .into_iter()
        .collect();
    assert_eq!(point_set(&model.connection_points(&g)), expected);
}

#[test]
fn extension_must_pair_with_opposite_unit() {
    let mut model = model_of_length(10);
    let mut factory = UnitFactory::new();
    place_kinds(&mut model, &mut factory, Track::Upper, 4, "A", Backbone::Deoxyribose);
    place_kinds(&mut model, &mut factory, Track::Lower, 5, "C", Backbone::Deoxyribose);

    let a = factory.create(UnitKind::Adenine, Backbone::Deoxyribose);
    let expected: HashSet<_> = vec![(Some(Track::Upper), 3), (Some(Track::Lower), 6)]
        .into_iter()
        .collect();
    assert_eq!(point_set(&model.connection_points(&a)), expected);

    let g = factory.create(UnitKind::Guanine, Backbone::Deoxyribose);
    let points = model.connection_points(&g);
    let expected: HashSet<_> = vec![
        (Some(Track::Upper), 3),
        (Some(Track::Upper), 5),
        (Some(Track::Lower), 6),
    ]
    .into_iter()
    .collect();
    assert_eq!(points.len(), 3);
    assert_eq!(point_set(&points), expected);

    let u = factory.create(UnitKind::Uracil, Backbone::Ribose);
    let expected: HashSet<_> = vec![(Some(Track::Lower), 4), (Some(Track::Lower), 6)]
        .into_iter()
        .collect();
    assert_eq!(point_set(&model.connection_points(&u)), expected);
}

#[test]
fn explicit_direction_helpers() {
    let mut model = model_of_length(10);
    let mut factory = UnitFactory::new();
    place_kinds(&mut model, &mut factory, Track::Upper, 0, "AT", Backbone::Deoxyribose);
    let c = factory.create(UnitKind::Cytosine, Backbone::Deoxyribose);
    assert!(model
        .backbone_extensions(&c, Track::Upper, Direction::Left)
        .is_empty());
    let right = model.backbone_extensions(&c, Track::Upper, Direction::Right);
    assert_eq!(right.len(), 1);
    assert_eq!(right[0].index(), 2);
    assert_eq!(right[0].bond, BondType::Backbone);
    assert!(model.cross_track_pairings(&c, Track::Lower).is_empty());
    let a = factory.create(UnitKind::Adenine, Backbone::Deoxyribose);
    let across = model.cross_track_pairings(&a, Track::Lower);
    assert_eq!(across.len(), 1);
    assert_eq!(across[0].index(), 1);
    assert_eq!(across[0].orientation, Orientation::Forward);
}

#[test]
fn point_positions_follow_the_slots() {
    let mut model = model_of_length(10);
    let mut factory = UnitFactory::new();
    place_kinds(&mut model, &mut factory, Track::Upper, 4, "A", Backbone::Deoxyribose);
    let t = factory.create(UnitKind::Thymine, Backbone::Deoxyribose);
    let pitch = Parameters::DEFAULT.unit_pitch;
    for point in model.connection_points(&t) {
        let expected_x = (point.index() as f32 - 5.) * pitch;
        assert!((point.position.x - expected_x).abs() < 1e-4);
        let expected_y = match point.track() {
            Some(Track::Upper) => Parameters::DEFAULT.upper_track_offset,
            _ => Parameters::DEFAULT.lower_track_offset,
        };
        assert!((point.position.y - expected_y).abs() < 1e-4);
    }
}

#[test]
fn connecting_a_point_places_the_unit() {
    let (mut model, counter) = counted_model(10);
    let mut factory = UnitFactory::new();
    let a = factory.create(UnitKind::Adenine, Backbone::Deoxyribose);
    let point = model.connection_points(&a)[0];
    model.connect(&point).unwrap();
    assert!(model.upper_contains(&a));
    assert_eq!(model.get(Track::Upper, 5), Some(a));
    assert_eq!(counter.lock().unwrap().count, 1);
    assert_eq!(model.connect(&point), Err(ErrPlacement::SlotAlreadyOccupied {
        track: Track::Upper,
        index: 5
    }));
}

fn model_with_codon(codon: &str) -> (SlotTrackModel, UnitFactory) {
    let mut model = model_of_length(20);
    let mut factory = UnitFactory::new();
    place_kinds(&mut model, &mut factory, Track::Lower, 5, codon, Backbone::Ribose);
    (model, factory)
}

#[test]
fn decoding_element_docks_on_matching_codon() {
    let (mut model, mut factory) = model_with_codon("AUG");
    let triplet = factory.decoding_triplet(codon_table::parse_codon("UAC").unwrap());
    let points = model.triplet_connection_points(&triplet);
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].index(), 5);
    assert_eq!(points[0].bond, BondType::Codon);
    assert_eq!(points[0].track(), None);

    model.connect(&points[0]).unwrap();
    assert_eq!(model.docked_units(), triplet.to_vec());
    assert_eq!(model.docked_size(), 3);
    assert_eq!(model.size(), 3);
    assert!(model.is_docked(&triplet[1]));
    assert!(model.triplet_connection_points(&triplet).is_empty());
}

#[test]
fn decoding_element_rejects_mismatching_codon() {
    let (mut model, mut factory) = model_with_codon("AUG");
    let middle = model.get(Track::Lower, 6).unwrap();
    model.remove(&middle);
    let c = factory.create(UnitKind::Cytosine, Backbone::Ribose);
    model.place(6, Track::Lower, c).unwrap();
    let triplet = factory.decoding_triplet(codon_table::parse_codon("UAC").unwrap());
    assert!(model.triplet_connection_points(&triplet).is_empty());
}

#[test]
fn decoding_element_needs_a_complete_codon() {
    let (model, mut factory) = model_with_codon("AU");
    let triplet = factory.decoding_triplet(codon_table::parse_codon("UAC").unwrap());
    assert!(model.triplet_connection_points(&triplet).is_empty());
}

#[test]
fn translocation_shifts_the_codon_window() {
    let (mut model, mut factory) = model_with_codon("AUGGAG");
    assert_eq!(model.find_triplet_start(Track::Lower), Some(5));
    assert_eq!(model.active_codon_start(), Some(5));
    assert_eq!(model.active_codon(), codon_table::parse_codon("AUG"));

    let first = factory.decoding_triplet(codon_table::parse_codon("UAC").unwrap());
    let point = model.triplet_connection_points(&first)[0];
    model.connect(&point).unwrap();
    model.advance_translocation();

    assert_eq!(model.translocation_steps(), 1);
    assert_eq!(model.active_codon_start(), Some(8));
    assert_eq!(model.active_codon(), codon_table::parse_codon("GAG"));

    let stale = factory.decoding_triplet(codon_table::parse_codon("UAC").unwrap());
    assert!(model.triplet_connection_points(&stale).is_empty());
    let second = factory.decoding_triplet(codon_table::parse_codon("CUC").unwrap());
    let points = model.triplet_connection_points(&second);
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].index(), 8);
    // The decoder does not move: both docking points are at the same place.
    assert!((points[0].position - point.position).mag() < 1e-4);

    model.connect(&points[0]).unwrap();
    model.advance_translocation();
    assert_eq!(model.active_codon(), None);
}

#[test]
fn failed_docking_leaves_the_model_unchanged() {
    let (mut model, mut factory) = model_with_codon("AUG");
    let triplet = factory.decoding_triplet(codon_table::parse_codon("UAC").unwrap());
    let intruder = model.get(Track::Lower, 5).unwrap();
    let err = model.dock_triplet(5, [triplet[0], triplet[1], intruder]);
    assert_eq!(err, Err(ErrPlacement::UnitAlreadyPlaced(intruder.id())));
    assert_eq!(model.docked_size(), 0);
    let err = model.dock_triplet(18, triplet);
    assert_eq!(
        err,
        Err(ErrPlacement::IndexOutOfRange {
            index: 20,
            length: 20
        })
    );
    assert_eq!(model.docked_size(), 0);
}

#[test]
fn take_track_empties_one_track() {
    let (mut model, counter) = counted_model(10);
    let mut factory = UnitFactory::new();
    let upper = place_kinds(&mut model, &mut factory, Track::Upper, 3, "ATG", Backbone::Deoxyribose);
    let lower = place_kinds(&mut model, &mut factory, Track::Lower, 3, "TAC", Backbone::Deoxyribose);
    assert_eq!(counter.lock().unwrap().count, 6);

    assert_eq!(model.take_track(Track::Lower), lower);
    assert_eq!(counter.lock().unwrap().count, 7);
    assert_eq!(model.upper_units(), upper);
    assert_eq!(model.lower_size(), 0);

    assert!(model.take_track(Track::Lower).is_empty());
    assert_eq!(counter.lock().unwrap().count, 7);
}

#[test]
fn random_strand_respects_placement_rules() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut model = SlotTrackModel::new(0., 0.);
    let mut factory = UnitFactory::new();
    let placed =
        build_random_strand(&mut model, &mut factory, Backbone::Deoxyribose, 60, &mut rng)
            .unwrap();
    assert!(!placed.is_empty());
    assert_eq!(placed.len(), model.size());
    let rules = model.parameters().pairing_rules;
    for i in 0..model.track_length() {
        if let (Some(up), Some(down)) = (model.get(Track::Upper, i), model.get(Track::Lower, i)) {
            assert!(rules.can_pair(up.kind(), down.kind()));
        }
    }
}
