//! Read-only per-cell descriptors for whatever front end renders the board.

use std::collections::{BTreeMap, BTreeSet};

use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub pos: Pos,
    pub playable: bool,
    pub unit: Option<UnitId>,
    pub is_head: bool,
    /// Relative to the active player.
    pub ownership: Option<Ownership>,
    pub selected: bool,
    pub move_highlight: bool,
    pub attack_highlight: bool,
    /// Set on cells one step from the selected head that the unit can move to now.
    pub immediate_move: Option<Direction>,
    /// From this segment toward the next one nearer the head.
    pub link: Option<Direction>,
}

#[derive(Default)]
struct Highlights {
    moves: BTreeSet<Pos>,
    attacks: BTreeSet<Pos>,
    immediate: BTreeMap<Pos, Direction>,
}

impl Game {
    /// Cells the selected unit could reach this turn; empty outside the move phase.
    pub fn valid_moves(&self) -> Vec<Pos> {
        let Ok(unit) = self.acting_unit(Phase::Move) else {
            return Vec::new();
        };
        if unit.attack_used {
            return Vec::new();
        }
        let occupied = occupied_cells(&self.state.units);
        unit_movement(&self.state.grid, &occupied, unit, None).reachable
    }

    /// Cells the selected unit could fire on; empty outside the attack phase.
    pub fn attack_cells(&self) -> Vec<Pos> {
        let Ok(unit) = self.acting_unit(Phase::Attack) else {
            return Vec::new();
        };
        if unit.attack_used {
            return Vec::new();
        }
        let head = unit.head();
        self.state
            .grid
            .cells()
            .filter(|pos| pos.manhattan(head) <= unit.stats.range && !unit.occupies(*pos))
            .collect()
    }

    /// Row-major descriptors covering the grid's bounding rectangle.
    pub fn cells(&self) -> Vec<CellView> {
        let highlights = self.highlights();
        let (width, height) = self.state.grid.dimensions();
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                cells.push(self.cell_view(Pos { x, y }, &highlights));
            }
        }
        cells
    }

    pub fn cell(&self, pos: Pos) -> CellView {
        self.cell_view(pos, &self.highlights())
    }

    fn highlights(&self) -> Highlights {
        let moves: BTreeSet<Pos> = self.valid_moves().into_iter().collect();
        let attacks = self.attack_cells().into_iter().collect();
        let immediate = match self.state.selected_unit() {
            Some(unit) => {
                let head = unit.head();
                head.neighbors()
                    .into_iter()
                    .filter(|pos| moves.contains(pos))
                    .filter_map(|pos| Direction::between(head, pos).map(|dir| (pos, dir)))
                    .collect()
            }
            None => BTreeMap::new(),
        };
        Highlights { moves, attacks, immediate }
    }

    fn cell_view(&self, pos: Pos, highlights: &Highlights) -> CellView {
        let occupant = unit_at(&self.state.units, pos);
        let ownership = occupant.map(|unit| match self.state.is_active_players_unit(unit.id) {
            true => Ownership::Ally,
            false => Ownership::Enemy,
        });
        let link = occupant.and_then(|unit| {
            let index = unit.positions.iter().position(|segment| *segment == pos)?;
            let next = unit.positions.get(index + 1)?;
            Direction::between(pos, *next)
        });

        CellView {
            pos,
            playable: self.state.grid.in_grid(pos),
            unit: occupant.map(|unit| unit.id),
            is_head: occupant.is_some_and(|unit| unit.head() == pos),
            ownership,
            selected: occupant.is_some_and(|unit| Some(unit.id) == self.state.selected),
            move_highlight: highlights.moves.contains(&pos),
            attack_highlight: highlights.attacks.contains(&pos),
            immediate_move: highlights.immediate.get(&pos).copied(),
            link,
        }
    }
}
