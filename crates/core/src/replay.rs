use thiserror::Error;

use crate::config::SessionConfig;
use crate::content::RaceCatalog;
use crate::error::SessionError;
use crate::journal::{InputJournal, InputPayload};
use crate::session::DungeonSession;
use crate::types::{AdvanceStopReason, RunOutcome};

const PHASES_PER_BATCH: u32 = 1_000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReplayError {
    #[error("journal ran out of inputs at turn {turn} before the run finished")]
    MissingInput { turn: u64 },
    #[error("journal input #{seq} does not fit the session state at turn {turn}")]
    UnexpectedInput { seq: u64, turn: u64 },
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_turn: u64,
    pub final_level: u32,
    /// `None` when the journal stops before the run does.
    pub outcome: Option<RunOutcome>,
    pub snapshot_hash: u64,
}

/// Replays `journal` and requires the run to reach an outcome.
pub fn replay_to_end(
    config: &SessionConfig,
    catalog: &RaceCatalog,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    let result = replay_inputs(config, catalog, journal)?;
    if result.outcome.is_none() {
        return Err(ReplayError::MissingInput { turn: result.final_turn });
    }
    Ok(result)
}

/// Replays every input in `journal`, completing presentation instantly, and stops
/// at the first input boundary after the journal runs out.
pub fn replay_inputs(
    config: &SessionConfig,
    catalog: &RaceCatalog,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    let mut session = DungeonSession::new(journal.seed, config.clone(), catalog.clone())?;
    let mut inputs = journal.inputs.iter();

    loop {
        let batch = session.advance(PHASES_PER_BATCH)?;
        let turn = session.turn_count();
        match batch.stop_reason {
            AdvanceStopReason::BudgetExhausted => continue,
            AdvanceStopReason::AwaitingPresentation => {
                session.presentation_mut().complete_all();
                continue;
            }
            AdvanceStopReason::Finished(_) => {
                if let Some(record) = inputs.next() {
                    return Err(ReplayError::UnexpectedInput { seq: record.seq, turn });
                }
                return Ok(result_of(&session));
            }
            AdvanceStopReason::AwaitingInput | AdvanceStopReason::StairsPrompt(_) => {}
        }

        let Some(record) = inputs.next() else {
            return Ok(result_of(&session));
        };
        if record.turn != turn {
            return Err(ReplayError::UnexpectedInput { seq: record.seq, turn });
        }
        match (&batch.stop_reason, record.payload) {
            (AdvanceStopReason::AwaitingInput, InputPayload::Player(input)) => {
                session.submit_input(input)?;
            }
            (AdvanceStopReason::StairsPrompt(_), InputPayload::Stairs(choice)) => {
                session.resolve_stairs(choice)?;
            }
            _ => return Err(ReplayError::UnexpectedInput { seq: record.seq, turn }),
        }
    }
}

fn result_of(session: &DungeonSession) -> ReplayResult {
    ReplayResult {
        final_turn: session.turn_count(),
        final_level: session.level(),
        outcome: session.outcome(),
        snapshot_hash: session.snapshot_hash(),
    }
}
