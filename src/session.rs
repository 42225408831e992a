use std::time::Instant;

use anyhow::{Result, ensure};
use log::{debug, info};
use serde::Serialize;

use crate::{
    die::{Die, FaceSource},
    outcome::{self, Outcome},
    roll::{DEFAULT_ROLL_DURATION_MS, DEFAULT_TICK_INTERVAL_MS, RollTarget, RollTimer, TimerEvent},
    tray::{MAX_DICE, Tray},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub active_dice: usize,
    pub roll_duration_ms: u64,
    pub tick_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            active_dice: MAX_DICE,
            roll_duration_ms: DEFAULT_ROLL_DURATION_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_DICE).contains(&self.active_dice),
            "active dice must be between 1 and {MAX_DICE}, got `{}`",
            self.active_dice
        );
        ensure!(self.roll_duration_ms > 0, "roll duration must be positive");
        ensure!(self.tick_interval_ms > 0, "tick interval must be positive");
        Ok(())
    }
}

/// What the presentation layer needs to redraw the dice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiceView {
    pub active_dice: usize,
    pub dice: Vec<Die>,
    pub sum: u32,
    /// Stopping a roll sends no view, so a UI clears this itself after `Stop`.
    pub rolling: bool,
}

/// Receives notifications synchronously, in the step that produced them.
pub trait SessionListener {
    fn on_update(&mut self, view: &DiceView);
    fn on_outcome(&mut self, outcome: Outcome);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollState {
    Idle,
    Rolling(RollTarget),
}

/// Owns the dice and drives timed rolls over them.
///
/// At most one roll runs at a time. Starting a roll cancels the running one
/// without judging it; only a roll that runs its full duration is judged.
/// The session never reads a clock itself, every timed operation takes `now`.
pub struct RollSession<F, L> {
    tray: Tray,
    faces: F,
    listener: L,
    roll_duration_ms: u64,
    tick_interval_ms: u64,
    timer: Option<RollTimer>,
}

impl<F: FaceSource, L: SessionListener> RollSession<F, L> {
    pub fn new(config: SessionConfig, faces: F, listener: L) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tray: Tray::new(config.active_dice),
            faces,
            listener,
            roll_duration_ms: config.roll_duration_ms,
            tick_interval_ms: config.tick_interval_ms,
            timer: None,
        })
    }

    pub fn state(&self) -> RollState {
        match &self.timer {
            Some(timer) => RollState::Rolling(timer.target()),
            None => RollState::Idle,
        }
    }

    pub fn is_rolling(&self) -> bool {
        self.timer.is_some()
    }

    pub fn active_dice(&self) -> usize {
        self.tray.active()
    }

    pub fn sum(&self) -> u32 {
        self.tray.sum()
    }

    pub fn die(&self, index: usize) -> Option<&Die> {
        self.tray.die(index)
    }

    pub fn roll_duration_ms(&self) -> u64 {
        self.roll_duration_ms
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn view(&self) -> DiceView {
        DiceView {
            active_dice: self.tray.active(),
            dice: self.tray.show().to_vec(),
            sum: self.tray.sum(),
            rolling: self.is_rolling(),
        }
    }

    /// Pushes the current view, e.g. for the first draw.
    pub fn refresh(&mut self) {
        self.notify_update();
    }

    pub fn set_active_dice_count(&mut self, count: usize) {
        if !self.tray.set_active(count) {
            debug!("Ignoring unsupported dice count `{count}`");
            return;
        }
        info!("Showing {count} dice");
        self.notify_update();
    }

    pub fn increment_die(&mut self, index: usize) {
        self.adjust_die(index, Die::increment);
    }

    pub fn decrement_die(&mut self, index: usize) {
        self.adjust_die(index, Die::decrement);
    }

    fn adjust_die(&mut self, index: usize, adjust: fn(&mut Die)) {
        let Some(die) = self.tray.die_mut(index) else {
            debug!("Ignoring request for inactive die `{index}`");
            return;
        };
        adjust(die);
        self.notify_update();
    }

    /// Cancels any running roll, then starts a new one whose first tick fires at `now`.
    pub fn start_roll(&mut self, target: RollTarget, now: Instant) {
        if let RollTarget::Single(index) = target {
            if !self.tray.is_active(index) {
                debug!("Ignoring roll of inactive die `{index}`");
                return;
            }
        }
        if self.timer.take().is_some() {
            debug!("Preempting running roll");
        }
        info!("Rolling {target:?} for {}ms", self.roll_duration_ms);
        self.timer = Some(RollTimer::start(
            target,
            self.roll_duration_ms,
            self.tick_interval_ms,
            now,
        ));
        self.poll_timer(now);
    }

    /// Cancels the running roll without judging it. No update is sent; the
    /// next view reports `rolling: false`.
    pub fn stop_roll(&mut self) {
        if self.timer.take().is_some() {
            info!("Roll stopped");
        }
    }

    /// Takes effect from the next roll on.
    pub fn set_roll_duration(&mut self, duration_ms: u64) {
        if duration_ms == 0 {
            debug!("Ignoring zero roll duration");
            return;
        }
        self.roll_duration_ms = duration_ms;
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.as_ref().map(RollTimer::next_deadline)
    }

    /// Fires every tick that is due at `now`, and the completion if it is due too.
    pub fn poll_timer(&mut self, now: Instant) {
        while let Some(event) = self.timer.as_mut().and_then(|timer| timer.poll(now)) {
            match event {
                TimerEvent::Tick => self.tick(),
                TimerEvent::Finish => self.finish(),
            }
        }
    }

    fn tick(&mut self) {
        let Some(target) = self.timer.as_ref().map(RollTimer::target) else {
            return;
        };
        match target {
            RollTarget::All => self.tray.roll_all(&mut self.faces),
            RollTarget::Single(index) => {
                // the dice count may have shrunk below the target mid-roll
                if let Some(die) = self.tray.die_mut(index) {
                    die.roll(&mut self.faces);
                }
            }
        }
        self.notify_update();
    }

    fn finish(&mut self) {
        self.timer = None;
        self.notify_update();
        let sum = self.tray.sum();
        match outcome::evaluate(self.tray.active(), sum) {
            Some(result) => {
                info!("Roll settled on {sum}: {result:?}");
                self.listener.on_outcome(result);
            }
            None => info!("Roll settled on {sum}"),
        }
    }

    fn notify_update(&mut self) {
        let view = self.view();
        self.listener.on_update(&view);
    }
}
