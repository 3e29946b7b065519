//! The session state machine.
//!
//! ```text
//! AwaitingMove -> Validating -> Resolving -> CheckTerminal -> AwaitingMove
//!                     |             |                     \-> GameOver
//!                     +-------------+--> AwaitingMove (rejected or aborted)
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::error::{EngineError, EngineResult, Rejection};
use crate::core::moves::Move;
use crate::core::rng::{GameRng, GameRngState};
use crate::core::side::Actor;
use crate::core::state::TurnState;
use crate::rules::{GameResult, Outcome, Policy, RuleSet};

/// Where the session is in its round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingMove,
    Validating,
    Resolving,
    CheckTerminal,
    GameOver(GameResult),
}

/// What one accepted move did.
#[derive(Clone, Debug)]
pub struct StepReport<Res> {
    /// Actor who made the move.
    pub actor: Actor,
    pub mv: Move,
    /// Game-specific resolution details.
    pub resolution: Res,
    /// Actor holding the turn afterwards.
    pub next: Actor,
    /// Set if the move ended the game.
    pub result: Option<GameResult>,
}

/// One running game.
#[derive(Clone, Debug)]
pub struct Session<R: RuleSet> {
    rules: R,
    state: R::State,
    turn: TurnState,
    phase: Phase,
    rng: GameRng,
    seed: u64,
}

impl<R: RuleSet> Session<R> {
    /// Start a new game.
    pub fn new(rules: R, seed: u64) -> EngineResult<Self> {
        let mut rng = GameRng::new(seed);
        let (state, turn) = rules.setup(&mut rng)?;
        Ok(Self::assemble(rules, state, turn, rng, seed))
    }

    /// Start from a prepared state instead of `setup`.
    pub fn from_parts(rules: R, state: R::State, turn: TurnState, seed: u64) -> Self {
        Self::assemble(rules, state, turn, GameRng::new(seed), seed)
    }

    /// Resume a saved game: state, turn and the RNG position from
    /// `rng_state()`. Later refills continue the saved stream; `reset`
    /// restarts from the stream's seed.
    pub fn resume(rules: R, state: R::State, turn: TurnState, rng: &GameRngState) -> Self {
        Self::assemble(rules, state, turn, GameRng::from_state(rng), rng.seed)
    }

    fn assemble(rules: R, state: R::State, turn: TurnState, rng: GameRng, seed: u64) -> Self {
        let phase = match rules.check_terminal(&state, &turn) {
            Some(result) => Phase::GameOver(result),
            None => Phase::AwaitingMove,
        };
        debug!(game = rules.name(), seed, ?phase, "session started");
        Self {
            rules,
            state,
            turn,
            phase,
            rng,
            seed,
        }
    }

    /// Discard the game and set up a fresh one from the original seed.
    pub fn reset(&mut self) -> EngineResult<()> {
        let mut rng = GameRng::new(self.seed);
        let (state, turn) = self.rules.setup(&mut rng)?;
        self.phase = match self.rules.check_terminal(&state, &turn) {
            Some(result) => Phase::GameOver(result),
            None => Phase::AwaitingMove,
        };
        self.state = state;
        self.turn = turn;
        self.rng = rng;
        debug!(game = self.rules.name(), seed = self.seed, "session reset");
        Ok(())
    }

    // === Accessors ===

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn state(&self) -> &R::State {
        &self.state
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The result, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            Phase::GameOver(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result().is_some()
    }

    /// Legal moves for the active actor; empty once the game is over.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        self.rules.legal_moves(&self.state, &self.turn)
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // === Moves ===

    fn enter(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, "phase");
        self.phase = phase;
    }

    /// Submit a move for the active actor.
    ///
    /// Rejected moves return `Err(IllegalMove(_))` and change nothing. An
    /// error during resolution discards the scratch state, so the committed
    /// game is untouched.
    pub fn submit(&mut self, mv: Move) -> EngineResult<StepReport<R::Resolution>> {
        if self.is_over() {
            return Err(EngineError::IllegalMove(Rejection::GameOver));
        }

        self.enter(Phase::Validating);
        let effects = match self.rules.validate(&self.state, &self.turn, &mv) {
            Ok(Outcome::Accepted(effects)) => effects,
            Ok(Outcome::Rejected(reason)) => {
                debug!(%mv, %reason, "move rejected");
                self.enter(Phase::AwaitingMove);
                return Err(EngineError::IllegalMove(reason));
            }
            Err(err) => {
                debug!(%mv, %err, "move invalid");
                self.enter(Phase::AwaitingMove);
                return Err(err);
            }
        };

        self.enter(Phase::Resolving);
        let actor = self.turn.active;
        let mut state = self.state.clone();
        let mut turn = self.turn.clone();
        let mut rng = self.rng.clone();

        let resolution = match self.rules.resolve(&mut state, &mut turn, effects, &mut rng) {
            Ok(resolution) => resolution,
            Err(err) => {
                debug!(%mv, %err, "resolution aborted");
                self.enter(Phase::AwaitingMove);
                return Err(err);
            }
        };
        turn.advance();
        self.rules.end_turn(&state, &mut turn);

        self.state = state;
        self.turn = turn;
        self.rng = rng;

        self.enter(Phase::CheckTerminal);
        let result = self.rules.check_terminal(&self.state, &self.turn);
        match result {
            Some(result) => {
                info!(game = self.rules.name(), ?result, steps = self.turn.steps, score = self.turn.score, "game over");
                self.enter(Phase::GameOver(result));
            }
            None => self.enter(Phase::AwaitingMove),
        }

        Ok(StepReport {
            actor,
            mv,
            resolution,
            next: self.turn.active,
            result,
        })
    }

    /// Submit a move on behalf of `actor`, rejecting it if `actor` does not
    /// hold the turn.
    pub fn submit_as(&mut self, actor: Actor, mv: Move) -> EngineResult<StepReport<R::Resolution>> {
        if self.is_over() {
            return Err(EngineError::IllegalMove(Rejection::GameOver));
        }
        if actor != self.turn.active {
            debug!(%actor, active = %self.turn.active, "move from wrong actor");
            return Err(EngineError::IllegalMove(Rejection::WrongActor));
        }
        self.submit(mv)
    }

    /// Let `policy` pick and play a move for the active actor.
    ///
    /// The policy draws from a fork of the session stream, so its tie
    /// shuffles never shift the tokens the game itself draws.
    pub fn play_auto<P: Policy<R>>(&mut self, policy: &P) -> EngineResult<StepReport<R::Resolution>> {
        if self.is_over() {
            return Err(EngineError::IllegalMove(Rejection::GameOver));
        }
        let mut policy_rng = self.rng.fork();
        let mv = policy
            .choose(&self.rules, &self.state, &self.turn, &mut policy_rng)
            .ok_or_else(|| EngineError::invariant(format!("{} has no move to play", self.turn.active)))?;
        debug!(actor = %self.turn.active, %mv, "policy move");
        self.submit(mv)
    }

    /// Advance between-move timers (score decay in the match game).
    pub fn tick(&mut self) {
        if !self.is_over() {
            self.rules.tick(&self.state, &mut self.turn);
        }
    }
}
