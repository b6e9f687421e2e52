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

use ordered_float::OrderedFloat;
use synthesis_design::ConnectionPoint;
use ultraviolet::Vec2;

/// Maximal distance at which a unit being dragged snaps to a connection point
pub const DRAG_SNAP_DISTANCE: f32 = 30.;
/// Maximal distance at which a released unit connects to a connection point
pub const RELEASE_SNAP_DISTANCE: f32 = 45.;

/// The connection point closest to `proposed`, if it is closer than `threshold`.
pub fn closest_connection_point(
    points: &[ConnectionPoint],
    proposed: Vec2,
    threshold: f32,
) -> Option<&ConnectionPoint> {
    points
        .iter()
        .min_by_key(|point| OrderedFloat(point.distance_to(proposed)))
        .filter(|point| point.distance_to(proposed) < threshold)
}

/// Where a unit being dragged must be drawn: on the closest connection point if there is one
/// close enough, under the pointer otherwise.
pub fn dragged_position(points: &[ConnectionPoint], proposed: Vec2) -> Vec2 {
    closest_connection_point(points, proposed, DRAG_SNAP_DISTANCE)
        .map(|point| point.position)
        .unwrap_or(proposed)
}
