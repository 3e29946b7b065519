//! Turn controller tests: phases, atomic commits, actors, and replay.

use rust_grid::core::{
    Actor, Board, Coord, EngineError, EngineResult, GameRng, InkColor, Move, Rejection, TurnState,
};
use rust_grid::games::flip::FlipRules;
use rust_grid::games::gems::{GemRules, GemState};
use rust_grid::games::ink::InkRules;
use rust_grid::rules::{FirstLegal, GameResult, Outcome, Policy, RuleSet};
use rust_grid::session::{Phase, Session};

// =============================================================================
// A rule set that fails halfway through resolution
// =============================================================================

#[derive(Clone, Debug)]
struct Faulty;

impl RuleSet for Faulty {
    type State = Board<u8>;
    type Effects = Coord;
    type Resolution = ();

    fn name(&self) -> &'static str {
        "faulty"
    }

    fn setup(&self, _rng: &mut GameRng) -> EngineResult<(Board<u8>, TurnState)> {
        Ok((Board::new(3, 3, 0), TurnState::new(Actor::Solo)))
    }

    fn validate(&self, state: &Board<u8>, _turn: &TurnState, mv: &Move) -> EngineResult<Outcome<Coord>> {
        match *mv {
            Move::Place(at) => {
                state.check(at)?;
                Ok(Outcome::Accepted(at))
            }
            _ => Ok(Outcome::Rejected(Rejection::WrongMoveKind)),
        }
    }

    fn resolve(
        &self,
        state: &mut Board<u8>,
        turn: &mut TurnState,
        at: Coord,
        rng: &mut GameRng,
    ) -> EngineResult<()> {
        state.set(at, 9)?;
        turn.add_score(100);
        let _ = rng.gen_range_usize(0..10);
        if at == Coord::new(2, 2) {
            return Err(EngineError::invariant("corner is cursed"));
        }
        Ok(())
    }

    fn check_terminal(&self, state: &Board<u8>, _turn: &TurnState) -> Option<GameResult> {
        if state.count(9) == 3 {
            Some(GameResult::Solved)
        } else {
            None
        }
    }

    fn legal_moves(&self, state: &Board<u8>, _turn: &TurnState) -> Vec<Move> {
        state
            .iter()
            .filter(|&(_, c)| c == 0)
            .map(|(at, _)| Move::Place(at))
            .collect()
    }
}

/// Test that a failed resolution leaves the committed state untouched.
#[test]
fn test_failed_resolution_is_atomic() {
    let mut game = Session::new(Faulty, 1).unwrap();
    let rng_before = game.rng_state();

    let err = game.submit(Move::Place(Coord::new(2, 2))).unwrap_err();

    assert!(matches!(err, EngineError::InvariantViolation { .. }));
    assert_eq!(game.state().count(9), 0);
    assert_eq!(game.turn().score, 0);
    assert_eq!(game.turn().steps, 0);
    assert_eq!(game.rng_state(), rng_before);
    assert_eq!(game.phase(), Phase::AwaitingMove);
}

/// Test that successful moves commit state, counters and RNG together.
#[test]
fn test_successful_move_commits() {
    let mut game = Session::new(Faulty, 1).unwrap();
    let rng_before = game.rng_state();

    let report = game.submit(Move::Place(Coord::new(0, 0))).unwrap();

    assert_eq!(report.actor, Actor::Solo);
    assert_eq!(report.next, Actor::Solo);
    assert_eq!(game.state().get(Coord::new(0, 0)), Some(9));
    assert_eq!(game.turn().score, 100);
    assert_eq!(game.turn().turn_number, 2);
    assert_ne!(game.rng_state(), rng_before);
}

/// Test that the policy loop runs until the rule set reports the end.
#[test]
fn test_play_auto_until_over() {
    let mut game = Session::new(Faulty, 1).unwrap();

    for _ in 0..3 {
        game.play_auto(&FirstLegal).unwrap();
    }

    assert_eq!(game.result(), Some(GameResult::Solved));
    assert!(game.legal_moves().is_empty());
    let err = game.play_auto(&FirstLegal).unwrap_err();
    assert_eq!(err, EngineError::IllegalMove(Rejection::GameOver));
}

/// Test that out-of-bounds errors pass through without consuming a turn.
#[test]
fn test_out_of_bounds_passes_through() {
    let mut game = Session::new(Faulty, 1).unwrap();
    let err = game.submit(Move::Place(Coord::new(-1, 0))).unwrap_err();

    assert!(matches!(err, EngineError::OutOfBounds { x: -1, .. }));
    assert_eq!(game.turn().steps, 0);
    assert_eq!(game.phase(), Phase::AwaitingMove);
}

// =============================================================================
// Actors, reset and replay
// =============================================================================

/// Test that moves from the actor not holding the turn are rejected.
#[test]
fn test_wrong_actor() {
    let mut game = Session::new(FlipRules::default(), 3).unwrap();
    let Actor::Side(active) = game.turn().active else {
        panic!("capture game is two-sided");
    };
    let mv = game.legal_moves()[0];

    let err = game.submit_as(Actor::Side(active.opponent()), mv).unwrap_err();
    assert_eq!(err, EngineError::IllegalMove(Rejection::WrongActor));

    let report = game.submit_as(Actor::Side(active), mv).unwrap();
    assert_eq!(report.actor, Actor::Side(active));
    assert_eq!(report.next, Actor::Side(active.opponent()));
}

/// Test that reset rebuilds the same initial state from the seed.
#[test]
fn test_reset_replays_setup() {
    let mut game = Session::new(InkRules::default(), 77).unwrap();
    let initial = game.state().clone();
    let turn = game.turn().clone();

    let mv = game.legal_moves()[0];
    game.submit(mv).unwrap();
    assert_ne!(game.turn(), &turn);

    game.reset().unwrap();
    assert_eq!(game.state(), &initial);
    assert_eq!(game.turn(), &turn);
    assert_eq!(game.seed(), 77);
}

/// Test that different seeds give different ink boards.
#[test]
fn test_seeds_differ() {
    let a = Session::new(InkRules::default(), 1).unwrap();
    let b = Session::new(InkRules::default(), 2).unwrap();
    assert_ne!(a.state(), b.state());
}

/// Test that the session reports the actor and life counters it was given.
#[test]
fn test_from_parts_keeps_turn_state() {
    let board = Board::from_rows(vec![vec![InkColor(0), InkColor(1)]]).unwrap();
    let game = Session::from_parts(
        InkRules::default(),
        rust_grid::games::ink::InkState { board },
        TurnState::new(Actor::Solo).with_life(4),
        0,
    );

    assert_eq!(game.turn().life, Some(4));
    assert_eq!(game.phase(), Phase::AwaitingMove);
    assert_eq!(game.legal_moves().len(), 5);
}

/// Test that a resumed game draws the same refills as the uninterrupted one.
#[test]
fn test_resume_continues_rng_stream() {
    let mut game = Session::new(GemRules::default(), 9).unwrap();
    let mv = game.legal_moves()[0];
    game.submit(mv).unwrap();

    let mut resumed = Session::resume(
        GemRules::default(),
        game.state().clone(),
        game.turn().clone(),
        &game.rng_state(),
    );
    assert_eq!(resumed.rng_state(), game.rng_state());
    assert_eq!(resumed.seed(), 9);

    for _ in 0..3 {
        if game.is_over() {
            break;
        }
        let mv = game.legal_moves()[0];
        let expected = game.submit(mv).unwrap();
        let actual = resumed.submit(mv).unwrap();
        assert_eq!(actual.resolution, expected.resolution);
    }
    assert_eq!(resumed.state(), game.state());
    assert_eq!(resumed.turn(), game.turn());
}

/// Plays the first legal move after burning random draws.
struct Noisy;

impl Policy<GemRules> for Noisy {
    fn choose(&self, rules: &GemRules, state: &GemState, turn: &TurnState, rng: &mut GameRng) -> Option<Move> {
        for _ in 0..10 {
            rng.gen_range_usize(0..100);
        }
        rules.legal_moves(state, turn).into_iter().next()
    }
}

/// Test that a policy's random draws leave the game's refills unchanged.
#[test]
fn test_policy_draws_do_not_shift_refills() {
    let mut auto = Session::new(GemRules::default(), 21).unwrap();
    let mut manual = Session::new(GemRules::default(), 21).unwrap();

    let mv = manual.legal_moves()[0];
    let expected = manual.submit(mv).unwrap();
    let actual = auto.play_auto(&Noisy).unwrap();

    assert_eq!(actual.mv, mv);
    assert_eq!(actual.resolution, expected.resolution);
    assert_eq!(auto.state(), manual.state());
}
