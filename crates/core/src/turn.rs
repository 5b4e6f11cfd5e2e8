//! Phase state machine that serializes player and enemy work into turns.
//! This module exists to own the single authoritative phase and the turn counter.
//! It does not own what happens inside a phase; the session dispatches on the returned state.

use std::fmt;

use crate::error::TurnError;
use crate::types::TurnState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: TurnState,
    pub to: TurnState,
    pub turn_count: u64,
}

type Observer = Box<dyn FnMut(&PhaseTransition)>;

pub struct TurnScheduler {
    turn_count: u64,
    state: TurnState,
    is_run: bool,
    observers: Vec<Observer>,
}

impl fmt::Debug for TurnScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnScheduler")
            .field("turn_count", &self.turn_count)
            .field("state", &self.state)
            .field("is_run", &self.is_run)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self { turn_count: 1, state: TurnState::PlayerIdle, is_run: false, observers: Vec::new() }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn turn_count(&self) -> u64 {
        self.turn_count
    }

    pub fn is_run(&self) -> bool {
        self.is_run
    }

    pub fn set_run(&mut self, is_run: bool) {
        self.is_run = is_run;
    }

    /// Observers run synchronously after each notifying transition, in registration order.
    pub fn subscribe(&mut self, observer: impl FnMut(&PhaseTransition) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Moves to the next phase and returns it. `Dead` stays `Dead` without notifying.
    pub fn advance(&mut self) -> TurnState {
        let next = match self.state {
            TurnState::PlayerIdle | TurnState::PlayerRun => TurnState::PlayerAction,
            TurnState::PlayerAction => TurnState::EnemyAction,
            TurnState::EnemyAction => TurnState::EnemyPopup,
            TurnState::EnemyPopup => {
                self.turn_count += 1;
                if self.is_run { TurnState::PlayerRun } else { TurnState::PlayerIdle }
            }
            TurnState::OnStairs => TurnState::EnemyAction,
            TurnState::Dead => return TurnState::Dead,
        };
        self.transition(next);
        next
    }

    /// Stops fast travel before the run step commits.
    pub fn cancel(&mut self) -> Result<(), TurnError> {
        self.require(TurnState::PlayerRun, "cancel")?;
        self.is_run = false;
        self.transition(TurnState::PlayerIdle);
        Ok(())
    }

    pub fn enter_stairs(&mut self) -> Result<(), TurnError> {
        self.require(TurnState::PlayerAction, "enter_stairs")?;
        self.is_run = false;
        self.transition(TurnState::OnStairs);
        Ok(())
    }

    pub fn kill(&mut self) -> Result<(), TurnError> {
        if self.state == TurnState::Dead {
            return Err(TurnError::IllegalTransition { operation: "kill", state: self.state });
        }
        self.is_run = false;
        self.transition(TurnState::Dead);
        Ok(())
    }

    /// Level change only: back to `PlayerIdle`, silently, keeping the turn counter.
    pub fn reset(&mut self) {
        self.state = TurnState::PlayerIdle;
        self.is_run = false;
    }

    fn require(&self, expected: TurnState, operation: &'static str) -> Result<(), TurnError> {
        if self.state != expected {
            return Err(TurnError::IllegalTransition { operation, state: self.state });
        }
        Ok(())
    }

    fn transition(&mut self, to: TurnState) {
        let event = PhaseTransition { from: self.state, to, turn_count: self.turn_count };
        self.state = to;
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorder(scheduler: &mut TurnScheduler) -> Rc<RefCell<Vec<PhaseTransition>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        scheduler.subscribe(move |event| sink.borrow_mut().push(*event));
        seen
    }

    #[test]
    fn walk_cycle_increments_turn_once_on_the_popup_edge() {
        let mut scheduler = TurnScheduler::new();
        let seen = recorder(&mut scheduler);

        let states: Vec<TurnState> = (0..4).map(|_| scheduler.advance()).collect();
        assert_eq!(
            states,
            vec![
                TurnState::PlayerAction,
                TurnState::EnemyAction,
                TurnState::EnemyPopup,
                TurnState::PlayerIdle,
            ]
        );
        assert_eq!(scheduler.turn_count(), 2);
        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        assert_eq!(
            seen[3],
            PhaseTransition { from: TurnState::EnemyPopup, to: TurnState::PlayerIdle, turn_count: 2 }
        );
    }

    #[test]
    fn run_flag_routes_the_next_turn_to_player_run() {
        let mut scheduler = TurnScheduler::new();
        scheduler.set_run(true);
        for _ in 0..4 {
            scheduler.advance();
        }
        assert_eq!(scheduler.state(), TurnState::PlayerRun);
        assert_eq!(scheduler.advance(), TurnState::PlayerAction);
    }

    #[test]
    fn cancel_is_only_legal_while_running() {
        let mut scheduler = TurnScheduler::new();
        assert_eq!(
            scheduler.cancel(),
            Err(TurnError::IllegalTransition { operation: "cancel", state: TurnState::PlayerIdle })
        );

        scheduler.set_run(true);
        for _ in 0..4 {
            scheduler.advance();
        }
        let seen = recorder(&mut scheduler);
        scheduler.cancel().expect("cancel from PlayerRun");
        assert_eq!(scheduler.state(), TurnState::PlayerIdle);
        assert!(!scheduler.is_run());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn stairs_round_trip_returns_to_enemy_action() {
        let mut scheduler = TurnScheduler::new();
        assert!(scheduler.enter_stairs().is_err());
        scheduler.set_run(true);
        scheduler.advance();
        scheduler.enter_stairs().expect("stairs from PlayerAction");
        assert_eq!(scheduler.state(), TurnState::OnStairs);
        assert!(!scheduler.is_run());
        assert_eq!(scheduler.advance(), TurnState::EnemyAction);
    }

    #[test]
    fn reset_is_silent_and_keeps_the_counter() {
        let mut scheduler = TurnScheduler::new();
        for _ in 0..5 {
            scheduler.advance();
        }
        scheduler.enter_stairs().expect("stairs");
        let seen = recorder(&mut scheduler);
        scheduler.set_run(true);
        scheduler.reset();
        assert_eq!(scheduler.state(), TurnState::PlayerIdle);
        assert!(!scheduler.is_run());
        assert_eq!(scheduler.turn_count(), 2);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn dead_is_terminal_and_silent() {
        let mut scheduler = TurnScheduler::new();
        scheduler.advance();
        scheduler.advance();
        scheduler.kill().expect("kill from EnemyAction");
        let seen = recorder(&mut scheduler);
        assert_eq!(scheduler.advance(), TurnState::Dead);
        assert!(seen.borrow().is_empty());
        assert!(scheduler.kill().is_err());
    }

    #[test]
    fn observers_fire_in_registration_order() {
        let mut scheduler = TurnScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let sink = Rc::clone(&order);
            scheduler.subscribe(move |_| sink.borrow_mut().push(tag));
        }
        scheduler.advance();
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }
}
