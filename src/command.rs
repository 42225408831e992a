use std::time::Instant;

use log::debug;
use serde::Deserialize;

use crate::{
    die::FaceSource,
    roll::{RollTarget, roll_length_for_choice},
    session::{RollSession, SessionListener},
};

/// Options offered when a single die is picked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ContextAction {
    AddOne,
    SubtractOne,
    Roll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Gesture {
    DoubleTap { die: usize },
    LongPress { die: usize },
    Fling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Command {
    Increment { die: usize },
    Decrement { die: usize },
    SetDiceCount { count: usize },
    RollAll,
    RollSingle { die: usize },
    Stop,
    SetRollDuration { ms: u64 },
    RollLength { choice: usize },
    DieAction { die: usize, action: ContextAction },
    Gesture(Gesture),
    Refresh,
}

impl Command {
    pub fn apply<F: FaceSource, L: SessionListener>(
        self,
        session: &mut RollSession<F, L>,
        now: Instant,
    ) {
        match self {
            Command::Increment { die } => session.increment_die(die),
            Command::Decrement { die } => session.decrement_die(die),
            Command::SetDiceCount { count } => session.set_active_dice_count(count),
            Command::RollAll => session.start_roll(RollTarget::All, now),
            Command::RollSingle { die } => session.start_roll(RollTarget::Single(die), now),
            Command::Stop => session.stop_roll(),
            Command::SetRollDuration { ms } => session.set_roll_duration(ms),
            Command::RollLength { choice } => match roll_length_for_choice(choice) {
                Some(ms) => session.set_roll_duration(ms),
                None => debug!("Ignoring unknown roll length choice `{choice}`"),
            },
            Command::DieAction { die, action } => match action {
                ContextAction::AddOne => session.increment_die(die),
                ContextAction::SubtractOne => session.decrement_die(die),
                ContextAction::Roll => session.start_roll(RollTarget::Single(die), now),
            },
            Command::Gesture(gesture) => match gesture {
                Gesture::DoubleTap { die } => session.increment_die(die),
                // the context menu follows up with a DieAction
                Gesture::LongPress { die } => debug!("Context menu opened for die `{die}`"),
                Gesture::Fling => session.start_roll(RollTarget::All, now),
            },
            Command::Refresh => session.refresh(),
        }
    }
}
