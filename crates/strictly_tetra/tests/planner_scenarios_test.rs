//! Scenario tests for speculative walks on a band board.

mod common;

use common::{band, down_cell, up_cell};
use strictly_tetra::{
    Board, BoardBuilder, CellAdjacency, CellOccupancy, Dice, DiceFaces, DiceId, Direction,
    MoveError, Neighbor, NeighborIds, Player, PlayerId, Pointing, Spin,
};

fn dice_with(faces: [u8; 5]) -> Dice {
    Dice::with_faces(
        DiceId::new(PlayerId(1), 0),
        DiceFaces::try_from(faces).expect("valid faces"),
    )
}

#[test]
fn test_band_is_symmetric() {
    let board = band();
    for id in board.cell_ids() {
        for direction in Direction::ALL {
            if let Neighbor::Linked(other) = board.neighbor(id, direction) {
                assert_eq!(
                    board.neighbor(other, direction.inverse()),
                    Neighbor::Linked(id),
                    "{id} -> {other} ({direction}) is one-sided"
                );
            }
        }
    }
}

#[test]
fn test_default_dice_tips_down_once() {
    let mut faces = DiceFaces::new();
    assert_eq!(faces.slots(), [1, 2, 3, 4, 0]);
    assert_eq!(faces.pointing(), Pointing::Up);

    faces.tip(Direction::Down).expect("empty down slot allows tipping down");
    assert_eq!(faces.pointing(), Pointing::Down);
    assert_eq!(
        faces.tip(Direction::Down),
        Err(MoveError::InvalidDirection(Direction::Down))
    );
}

#[test]
fn test_top_face_three_walk() {
    let mut board = band();
    let mut dice = dice_with([1, 3, 2, 4, 0]);
    dice.place_on(&mut board, up_cell(0)).unwrap();
    assert_eq!(dice.moves_left(), 3);

    for _ in 0..3 {
        dice.tentative_move(&board, Direction::Right).unwrap();
    }
    assert_eq!(dice.moves_left(), 0);
    assert_eq!(
        dice.tentative_move(&board, Direction::Right),
        Err(MoveError::MovesExhausted)
    );

    assert_eq!(dice.undo_last_move(), Ok(up_cell(2)));
    assert_eq!(dice.moves_left(), 1);
}

#[test]
fn test_ghost_walk_leaves_board_untouched() {
    let mut board = band();
    let mut dice = dice_with([1, 3, 2, 4, 0]);
    dice.place_on(&mut board, up_cell(3)).unwrap();
    let committed = *dice.faces();

    dice.tentative_move(&board, Direction::Down).unwrap();
    dice.tentative_move(&board, Direction::Left).unwrap();
    assert_eq!(dice.speculative_position(), Some(down_cell(2)));
    assert_eq!(dice.speculative_pointing(), Pointing::Down);

    assert_eq!(*dice.faces(), committed);
    assert_eq!(dice.cell(), Some(up_cell(3)));
    assert_eq!(board.occupant(up_cell(3)), Some(dice.id()));
    assert_eq!(board.occupant(down_cell(2)), None);
}

#[test]
fn test_mixed_walk_commits_onto_fitting_cell() {
    let mut board = band();
    let mut dice = dice_with([1, 3, 2, 4, 0]);
    dice.place_on(&mut board, up_cell(3)).unwrap();

    dice.tentative_move(&board, Direction::Down).unwrap();
    dice.tentative_move(&board, Direction::Right).unwrap();
    dice.tentative_move(&board, Direction::Right).unwrap();
    let speculative = *dice.planner().speculative();

    assert_eq!(dice.commit(&mut board), Ok(down_cell(5)));
    assert_eq!(*dice.faces(), speculative);
    assert_eq!(dice.pointing(), Pointing::Down);
    assert_eq!(board.occupant(down_cell(5)), Some(dice.id()));
    assert_eq!(board.occupant(up_cell(3)), None);
    assert_eq!(dice.moves_left(), dice.top_face());
}

#[test]
fn test_missing_vertical_neighbor_in_walk() {
    let mut board = band();
    let mut dice = dice_with([1, 3, 2, 4, 0]);
    dice.place_on(&mut board, up_cell(1)).unwrap();
    dice.tentative_move(&board, Direction::Down).unwrap();

    // Now on a down cell pointing down: the only vertical tip is up.
    assert_eq!(
        dice.tentative_move(&board, Direction::Down),
        Err(MoveError::NoSuchNeighbor {
            cell: down_cell(1),
            direction: Direction::Down
        })
    );
    assert_eq!(dice.tentative_move(&board, Direction::Up), Ok(up_cell(1)));
    assert_eq!(dice.moves_left(), 1);
}

/// Column of three cells linked vertically: up (1), down (2), up (3).
fn column() -> Board {
    let mut builder = BoardBuilder::new();
    builder
        .add_cell(
            1,
            Pointing::Up,
            NeighborIds {
                down: Some(2),
                ..NeighborIds::default()
            },
        )
        .expect("unique cell")
        .add_cell(
            2,
            Pointing::Down,
            NeighborIds {
                up: Some(1),
                down: Some(3),
                ..NeighborIds::default()
            },
        )
        .expect("unique cell")
        .add_cell(
            3,
            Pointing::Up,
            NeighborIds {
                up: Some(2),
                ..NeighborIds::default()
            },
        )
        .expect("unique cell")
        .link_declared()
        .expect("consistent column");
    builder.build()
}

#[test]
fn test_illegal_vertical_tip_toward_linked_neighbor() {
    let mut board = column();
    assert_eq!(board.neighbor(2, Direction::Down), Neighbor::Linked(3));

    // Pointing down: the upper null-zone slot is the empty one.
    let mut dice = dice_with([1, 3, 2, 0, 4]);
    dice.place_on(&mut board, 2).unwrap();
    assert!(!dice.planner().speculative().can_tip_down());

    let before = dice.clone();
    assert_eq!(
        dice.tentative_move(&board, Direction::Down),
        Err(MoveError::InvalidDirection(Direction::Down))
    );
    assert_eq!(dice, before);
    assert_eq!(board.occupant(2), Some(dice.id()));
    assert_eq!(board.occupant(3), None);

    assert_eq!(dice.tentative_move(&board, Direction::Up), Ok(1));
}

#[test]
fn test_illegal_vertical_tip_mid_walk() {
    let mut board = column();
    let mut dice = dice_with([1, 3, 2, 4, 0]);
    dice.place_on(&mut board, 1).unwrap();
    assert_eq!(dice.tentative_move(&board, Direction::Down), Ok(2));

    let before = dice.clone();
    assert_eq!(
        dice.tentative_move(&board, Direction::Down),
        Err(MoveError::InvalidDirection(Direction::Down))
    );
    assert_eq!(dice, before);
    assert_eq!(dice.moves_left(), 2);
    assert_eq!(dice.speculative_position(), Some(2));
}

#[test]
fn test_walk_back_home_commits() {
    let mut board = band();
    let mut dice = dice_with([3, 2, 1, 4, 0]);
    dice.place_on(&mut board, up_cell(4)).unwrap();
    dice.tentative_move(&board, Direction::Left).unwrap();
    dice.tentative_move(&board, Direction::Right).unwrap();

    assert_eq!(dice.commit(&mut board), Ok(up_cell(4)));
    assert_eq!(board.occupant(up_cell(4)), Some(dice.id()));
    assert_eq!(dice.faces().slots(), [3, 2, 1, 4, 0]);
}

#[test]
fn test_reset_after_partial_walk() {
    let mut board = band();
    let mut dice = dice_with([1, 3, 2, 4, 0]);
    dice.place_on(&mut board, up_cell(0)).unwrap();
    dice.tentative_move(&board, Direction::Right).unwrap();
    dice.tentative_move(&board, Direction::Down).unwrap();

    dice.reset_speculation();
    assert!(!dice.is_walking());
    assert_eq!(dice.moves_left(), 3);
    assert_eq!(dice.speculative_position(), Some(up_cell(0)));
    assert_eq!(dice.planner().speculative(), dice.faces());
}

#[test]
fn test_commit_blocked_by_opponent() {
    let mut board = band();
    let mut ours = Player::new(PlayerId(1), 1);
    let mut theirs = Player::new(PlayerId(2), 1);
    ours.deploy(0, &mut board, up_cell(0)).unwrap();
    theirs.deploy(0, &mut board, up_cell(2)).unwrap();

    let dice = ours.dice_mut(0).unwrap();
    // Default faces: top face 2.
    dice.tentative_move(&board, Direction::Right).unwrap();
    dice.tentative_move(&board, Direction::Right).unwrap();
    assert!(matches!(
        dice.commit(&mut board),
        Err(MoveError::CellOccupied { .. })
    ));
    assert!(dice.is_walking());

    assert_eq!(dice.undo_last_move(), Ok(up_cell(1)));
    dice.tentative_move(&board, Direction::Down).unwrap();
    assert_eq!(dice.commit(&mut board), Ok(down_cell(1)));
}

#[test]
fn test_rotation_changes_budget() {
    let mut board = band();
    let mut dice = dice_with([1, 3, 2, 4, 0]);
    dice.place_on(&mut board, up_cell(0)).unwrap();
    dice.rotate(Spin::Left);
    // Pointing up, so the spin is normalized to the right face.
    assert_eq!(dice.faces().slots(), [1, 3, 4, 2, 0]);
    assert_eq!(dice.moves_left(), 3);
    assert_eq!(dice.pointing(), Pointing::Up);
}
