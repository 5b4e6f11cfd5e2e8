//! Phase dispatch loop.
//! This module exists to consume automatic phases until the session needs something from outside.
//! It does not decide player inputs or answer stairs prompts.

use tracing::debug;

use super::*;
use crate::movement::{FastTravelStep, plan_fast_travel};
use crate::population::EnemyAct;
use crate::presentation::PresentationKind;

impl DungeonSession {
    pub fn advance(&mut self, max_phases: u32) -> Result<AdvanceResult, SessionError> {
        let mut phases = 0;
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(stop(phases, AdvanceStopReason::Finished(outcome)));
            }
            let state = self.scheduler.state();
            match state {
                TurnState::Dead => {
                    return Ok(stop(phases, AdvanceStopReason::Finished(RunOutcome::Defeat)));
                }
                TurnState::OnStairs => {
                    return Ok(stop(phases, AdvanceStopReason::StairsPrompt(self.stairs_prompt())));
                }
                TurnState::PlayerIdle | TurnState::PlayerRun if !self.presentation.is_settled() => {
                    return Ok(stop(phases, AdvanceStopReason::AwaitingPresentation));
                }
                TurnState::PlayerIdle => {
                    return Ok(stop(phases, AdvanceStopReason::AwaitingInput));
                }
                _ => {}
            }
            if phases >= max_phases {
                return Ok(stop(phases, AdvanceStopReason::BudgetExhausted));
            }

            match state {
                TurnState::PlayerRun => self.run_step()?,
                TurnState::PlayerAction => self.player_action()?,
                TurnState::EnemyAction => self.enemy_action()?,
                TurnState::EnemyPopup => self.enemy_popup(),
                TurnState::PlayerIdle | TurnState::OnStairs | TurnState::Dead => {}
            }
            phases += 1;
        }
    }

    /// One fast-travel decision: queue the next step or cancel the run.
    fn run_step(&mut self) -> Result<(), SessionError> {
        let step = if self.run_steps >= self.config.run.fast_travel_step_limit {
            FastTravelStep::Stop(RunStopRule::StepLimit)
        } else {
            plan_fast_travel(&self.grid, &self.occupancy(), self.player_position, self.facing)
        };

        match step {
            FastTravelStep::Stop(rule) => {
                self.scheduler.cancel()?;
                self.run_steps = 0;
                self.log.push(LogEvent::RunStopped { rule, pos: self.player_position });
                debug!(?rule, pos = ?self.player_position, "fast travel stopped");
            }
            FastTravelStep::Continue(heading) => {
                self.facing = heading;
                self.queued = Some(QueuedAction::Move { to: self.player_position.offset(heading) });
                self.run_steps += 1;
                self.scheduler.advance();
            }
        }
        Ok(())
    }

    fn player_action(&mut self) -> Result<(), SessionError> {
        let mut moved = false;
        match self.queued.take() {
            Some(QueuedAction::Move { to }) => {
                let from = self.player_position;
                self.player_position = to;
                moved = true;
                self.log.push(LogEvent::PlayerMoved { from, to });
                self.presentation.push(
                    Occupant::Player,
                    PresentationKind::Move,
                    from,
                    to,
                    self.config.presentation.move_millis,
                );
            }
            Some(QueuedAction::Attack { at, target }) => {
                self.player_attack(at, target);
            }
            None => {}
        }
        self.player.increment_turn();

        let chip = self.grid.chip(self.player_position);
        if moved && chip.is_stairs() {
            self.scheduler.enter_stairs()?;
            let direction =
                if chip == MapChip::UpStairs { StairsDirection::Up } else { StairsDirection::Down };
            self.log.push(LogEvent::StairsReached { direction, level: self.level });
        } else {
            self.scheduler.advance();
        }
        Ok(())
    }

    fn player_attack(&mut self, at: Pos, target: Option<EnemyId>) {
        let from = self.player_position;
        let report = target.and_then(|enemy| self.population.strike(enemy, &self.player));
        let damage = report.map_or(0, |report| report.damage);
        self.log.push(LogEvent::PlayerAttacked { target, damage });
        if let (Some(enemy), Some(report)) = (target, report)
            && report.killed
        {
            let (reward_exp, reward_gold) = report.rewards;
            self.player.add_exp(reward_exp);
            self.player.add_gold(reward_gold);
            self.log.push(LogEvent::EnemyKilled { enemy, reward_exp, reward_gold });
        }
        self.presentation.push(
            Occupant::Player,
            PresentationKind::Attack,
            from,
            at,
            self.config.presentation.attack_millis,
        );
    }

    /// All enemies decide against the post-move state, then all commit.
    fn enemy_action(&mut self) -> Result<(), SessionError> {
        self.population.think_all(&self.grid, self.player_position);
        let acts = self.population.act_all(&mut self.player);
        for act in acts {
            match act {
                EnemyAct::Moved { enemy, from, to } => {
                    self.presentation.push(
                        Occupant::Enemy(enemy),
                        PresentationKind::Move,
                        from,
                        to,
                        self.config.presentation.move_millis,
                    );
                }
                EnemyAct::Attacked { enemy, damage } => {
                    let from =
                        self.population.get(enemy).map_or(self.player_position, |e| e.position());
                    self.log.push(LogEvent::PlayerDamaged {
                        enemy,
                        damage,
                        hit_point: self.player.hit_point(),
                    });
                    self.presentation.push(
                        Occupant::Enemy(enemy),
                        PresentationKind::Attack,
                        from,
                        self.player_position,
                        self.config.presentation.attack_millis,
                    );
                }
            }
        }

        if self.player.is_alive() {
            self.scheduler.advance();
        } else {
            self.scheduler.kill()?;
            self.finish(RunOutcome::Defeat);
        }
        Ok(())
    }

    fn enemy_popup(&mut self) {
        if let Some(enemy) =
            self.population.refill_one_if_below_budget(&self.grid, self.player_position)
        {
            self.log_spawn(enemy);
        }
        self.scheduler.advance();
    }
}

fn stop(phases: u32, stop_reason: AdvanceStopReason) -> AdvanceResult {
    AdvanceResult { phases, stop_reason }
}
