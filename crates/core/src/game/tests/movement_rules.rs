//! Tests for move validation, body growth and tail shedding.

use super::support::*;

fn body(game: &Game) -> Vec<Pos> {
    game.selected_unit().map(|unit| unit.positions.clone()).unwrap_or_default()
}

fn walker(body: &[(i32, i32)]) -> Game {
    duel(unit(stats("h", 2, 1, 3, 1), body), unit(stats("r", 1, 1, 1, 1), &[(9, 9)]))
}

#[test]
fn body_grows_to_max_length_then_sheds_the_tail() {
    let mut game = walker(&[(0, 0)]);
    game.select(Pos::new(0, 0));

    game.move_unit(Pos::new(1, 0));
    assert_eq!(body(&game), vec![Pos::new(0, 0), Pos::new(1, 0)]);

    game.move_unit(Pos::new(2, 0));
    assert_eq!(body(&game), vec![Pos::new(1, 0), Pos::new(2, 0)]);
    assert!(matches!(
        game.log().last(),
        Some(LogEvent::UnitMoved { dropped_tail: Some(tail), .. }) if *tail == Pos::new(0, 0)
    ));
    assert_eq!(game.phase(), Phase::Move);

    game.move_unit(Pos::new(3, 0));
    let unit = game.selected_unit().expect("selected");
    assert_eq!(unit.positions, vec![Pos::new(2, 0), Pos::new(3, 0)]);
    assert_eq!(unit.moves_used, 3);
    assert_eq!(game.phase(), Phase::Attack, "spending the last move advances the phase");
}

#[test]
fn vacated_tail_cell_can_be_entered_again() {
    let mut game = walker(&[(0, 0), (1, 0)]);
    game.select(Pos::new(1, 0));
    game.move_unit(Pos::new(1, 1));
    game.move_unit(Pos::new(0, 1));
    game.move_unit(Pos::new(0, 0));
    assert_eq!(
        game.selected_unit().map(|u| u.positions.clone()),
        Some(vec![Pos::new(0, 1), Pos::new(0, 0)])
    );
}

#[test]
fn moves_must_be_a_single_cardinal_step() {
    let mut game = walker(&[(3, 3)]);
    game.select(Pos::new(3, 3));
    for target in [Pos::new(5, 3), Pos::new(4, 4), Pos::new(3, 3)] {
        assert_eq!(game.check(&Action::Move(target)), Err(Rejection::NotAdjacent));
    }
}

#[test]
fn occupied_cells_holes_and_the_board_edge_block_moves() {
    let mut scenario = open_scenario(
        10,
        10,
        vec![
            unit(stats("h", 3, 1, 3, 1), &[(0, 1), (0, 0)]),
            unit(stats("r", 1, 1, 1, 1), &[(1, 0)]),
        ],
        vec![player("Blue", PlayerKind::Human, &["h"]), player("Red", PlayerKind::Ai, &["r"])],
    );
    scenario.grid.holes.push(Pos::new(0, 1));
    assert!(Game::new(scenario.clone()).is_err(), "a body may not start on a hole");

    scenario.grid.holes = vec![Pos::new(2, 1)];
    scenario.units[0].body = vec![Pos::new(1, 2), Pos::new(1, 1)];
    let mut game = Game::new(scenario).expect("valid");
    game.select(Pos::new(1, 1));

    assert_eq!(game.check(&Action::Move(Pos::new(1, 0))), Err(Rejection::Occupied));
    assert_eq!(game.check(&Action::Move(Pos::new(1, 2))), Err(Rejection::Occupied));
    assert_eq!(game.check(&Action::Move(Pos::new(2, 1))), Err(Rejection::OffGrid));
    assert_eq!(game.check(&Action::Move(Pos::new(0, 1))), Ok(()));

    let mut edge = walker(&[(0, 0)]);
    edge.select(Pos::new(0, 0));
    assert_eq!(edge.check(&Action::Move(Pos::new(-1, 0))), Err(Rejection::OffGrid));
    assert_eq!(edge.check(&Action::Move(Pos::new(0, -1))), Err(Rejection::OffGrid));
}

#[test]
fn no_moves_once_the_budget_is_spent() {
    let mut game = walker(&[(0, 0)]);
    game.select(Pos::new(0, 0));
    for x in 1..=3 {
        game.move_unit(Pos::new(x, 0));
    }
    game.set_phase(Phase::Move);
    assert_eq!(game.check(&Action::Move(Pos::new(4, 0))), Err(Rejection::NoMovesLeft));
}

#[test]
fn moves_need_a_selection_and_the_move_phase() {
    let mut game = walker(&[(0, 0)]);
    assert_eq!(game.check(&Action::Move(Pos::new(1, 0))), Err(Rejection::NoUnitSelected));

    game.select(Pos::new(0, 0));
    game.set_phase(Phase::Attack);
    assert_eq!(game.check(&Action::Move(Pos::new(1, 0))), Err(Rejection::WrongPhase));
}

#[test]
fn rejected_moves_leave_no_trace() {
    let mut game = walker(&[(0, 0)]);
    game.select(Pos::new(0, 0));
    let hash = game.snapshot_hash();
    let log_len = game.log().len();

    game.move_unit(Pos::new(2, 2));
    game.move_unit(Pos::new(-1, 0));

    assert_eq!(game.snapshot_hash(), hash);
    assert_eq!(game.log().len(), log_len);
}
