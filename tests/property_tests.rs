//! Property tests for the board algorithms.

use proptest::prelude::*;

use rust_grid::core::config::Scoring;
use rust_grid::core::{Actor, Board, Coord, Direction, EngineError, GameRng, Move, Rejection, Side, TurnState};
use rust_grid::games::flip::{bracket_flips, flip_cells};
use rust_grid::games::gems::{GemRules, GemState, TokenId};
use rust_grid::matching::{find_matches, run_cascade};
use rust_grid::regions::{flood_fill, region};
use rust_grid::session::Session;

fn side_board(width: usize, height: usize) -> impl Strategy<Value = Board<Option<Side>>> {
    prop::collection::vec(0u8..3, width * height).prop_map(move |cells| {
        let rows: Vec<Vec<Option<Side>>> = cells
            .chunks(width)
            .map(|row| {
                row.iter()
                    .map(|&c| match c {
                        1 => Some(Side::Black),
                        2 => Some(Side::White),
                        _ => None,
                    })
                    .collect()
            })
            .collect();
        Board::from_rows(rows).unwrap()
    })
}

fn byte_board(width: usize, height: usize, kinds: u8) -> impl Strategy<Value = Board<u8>> {
    prop::collection::vec(0..kinds, width * height)
        .prop_map(move |cells| Board::from_rows(cells.chunks(width).map(<[u8]>::to_vec).collect()).unwrap())
}

proptest! {
    /// Flipping the captured discs a second time restores the opponent layout.
    #[test]
    fn prop_double_flip_restores(board in side_board(6, 6), x in 0i32..6, y in 0i32..6, black in any::<bool>()) {
        let side = if black { Side::Black } else { Side::White };
        let flips = bracket_flips(&board, Coord::new(x, y), side);

        let mut replay = board.clone();
        flip_cells(&mut replay, &flips).unwrap();
        for &at in &flips {
            prop_assert_eq!(replay.get(at), Some(Some(side)));
        }
        flip_cells(&mut replay, &flips).unwrap();
        prop_assert_eq!(replay, board);
    }

    /// A second flood fill with the same label changes nothing.
    #[test]
    fn prop_flood_fill_idempotent(board in byte_board(7, 5, 3), x in 0i32..7, y in 0i32..5, label in 0u8..4) {
        let seed = Coord::new(x, y);
        let component = region(&board, seed).unwrap();

        let mut once = board.clone();
        let count = flood_fill(&mut once, seed, label).unwrap();
        if board.get(seed) == Some(label) {
            prop_assert_eq!(count, 0);
        } else {
            prop_assert_eq!(count, component.len());
        }

        let mut twice = once.clone();
        prop_assert_eq!(flood_fill(&mut twice, seed, label).unwrap(), 0);
        prop_assert_eq!(twice, once);
    }

    /// Every reported group is a straight run of one token, at least three long.
    #[test]
    fn prop_groups_are_uniform_runs(board in byte_board(6, 6, 3)) {
        let board = board.map(Some);
        for group in find_matches(&board) {
            prop_assert!(group.len() >= 3);
            let token = board.get(group.cells[0]);
            for pair in group.cells.windows(2) {
                prop_assert!(pair[0].is_adjacent(pair[1]));
                prop_assert_eq!(board.get(pair[1]), token);
            }
        }
    }

    /// A cascade on an all-identical board settles within width * height passes.
    #[test]
    fn prop_cascade_terminates(width in 3usize..10, height in 3usize..10, token in 0u8..5, seed in any::<u64>()) {
        let mut board = Board::new(width, height, Some(token));
        let kinds: Vec<u8> = (0..5).collect();
        let mut rng = GameRng::new(seed);

        let report = run_cascade(&mut board, &kinds, &Scoring::default(), &mut rng).unwrap();

        prop_assert!(report.passes() >= 1);
        prop_assert!(report.passes() <= width * height);
        prop_assert!(find_matches(&board).is_empty());
        prop_assert_eq!(board.count(None), 0);
    }

    /// A swap that makes no match leaves the board bit-identical.
    #[test]
    fn prop_null_swap_is_noop(board in byte_board(5, 5, 6), x in 0i32..5, y in 0i32..5, down in any::<bool>()) {
        let board = board.map(|k| Some(TokenId(k)));
        let mut game = Session::from_parts(
            GemRules::default(),
            GemState { board: board.clone() },
            TurnState::new(Actor::Solo),
            0,
        );
        prop_assume!(!game.is_over());

        let from = Coord::new(x, y);
        let to = from.step(if down { Direction::Down } else { Direction::Right });
        match game.submit(Move::Swap { from, to }) {
            Err(EngineError::IllegalMove(Rejection::NullSwap { .. })) => {
                prop_assert_eq!(&game.state().board, &board);
                prop_assert_eq!(game.turn().steps, 0);
            }
            Err(EngineError::OutOfBounds { .. }) => {
                prop_assert_eq!(&game.state().board, &board);
            }
            _ => {}
        }
    }
}
