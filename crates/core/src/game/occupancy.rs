//! Pure cell-occupancy queries over the unit collection.
//! Bodies are disjoint (placement is validated by the scenario and every move
//! checks `overlaps_anything`), so the first match in slot order is the only one.

use std::collections::BTreeSet;

use slotmap::SlotMap;

use super::*;

pub fn overlaps(positions: &[Pos], pos: Pos) -> bool {
    positions.contains(&pos)
}

pub fn unit_at(units: &SlotMap<UnitId, Unit>, pos: Pos) -> Option<&Unit> {
    units.values().find(|unit| overlaps(&unit.positions, pos))
}

pub fn overlaps_anything(units: &SlotMap<UnitId, Unit>, pos: Pos) -> bool {
    unit_at(units, pos).is_some()
}

/// Every cell covered by some unit body.
pub fn occupied_cells(units: &SlotMap<UnitId, Unit>) -> BTreeSet<Pos> {
    units.values().flat_map(|unit| unit.positions.iter().copied()).collect()
}
