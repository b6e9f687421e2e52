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

use super::{Backbone, ErrPlacement, SlotTrackModel, Unit, UnitFactory, UnitKind};
use rand::Rng;

/// Fill the model with `count` units, each one attached at a random connection point.
///
/// The kinds of the units cycle through the kinds available for `backbone`. Stops early if a
/// unit has nowhere to go, and return the units that were placed in placement order.
pub fn build_random_strand<R: Rng>(
    model: &mut SlotTrackModel,
    factory: &mut UnitFactory,
    backbone: Backbone,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Unit>, ErrPlacement> {
    let kinds = match backbone {
        Backbone::Deoxyribose => UnitKind::DNA_KINDS,
        Backbone::Ribose => UnitKind::RNA_KINDS,
    };
    let mut ret = Vec::with_capacity(count);
    for k in 0..count {
        let unit = factory.create(kinds[k % kinds.len()], backbone);
        let points = model.connection_points(&unit);
        if points.is_empty() {
            log::warn!("No room left for {}, stopping after {} units", unit, k);
            break;
        }
        let point = points[rng.gen_range(0..points.len())];
        model.connect(&point)?;
        ret.push(unit);
    }
    Ok(ret)
}
