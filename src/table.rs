use anyhow::Result;
use log::{info, warn};
use serde::Serialize;
use tokio::{
    sync::mpsc::{Receiver, UnboundedSender},
    time::{Instant, sleep_until},
};

use crate::{
    command::Command,
    die::FaceSource,
    outcome::Outcome,
    session::{DiceView, RollSession, SessionConfig, SessionListener},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Notification {
    Update(DiceView),
    Outcome(Outcome),
}

impl SessionListener for UnboundedSender<Notification> {
    fn on_update(&mut self, view: &DiceView) {
        if self.send(Notification::Update(view.clone())).is_err() {
            warn!("Nobody is listening for updates anymore");
        }
    }

    fn on_outcome(&mut self, outcome: Outcome) {
        if self.send(Notification::Outcome(outcome)).is_err() {
            warn!("Nobody is listening for outcome `{outcome:?}`");
        }
    }
}

/// Runs a session on a single task, interleaving incoming commands with roll ticks.
pub struct Table<F> {
    session: RollSession<F, UnboundedSender<Notification>>,
    to_table_rx: Receiver<String>,
}

impl<F: FaceSource> Table<F> {
    pub fn new(
        config: SessionConfig,
        faces: F,
        to_table_rx: Receiver<String>,
        notifications: UnboundedSender<Notification>,
    ) -> Result<Self> {
        Ok(Self {
            session: RollSession::new(config, faces, notifications)?,
            to_table_rx,
        })
    }

    /// Returns once the input is closed and no roll is left running.
    pub async fn run(&mut self) {
        self.session.refresh();
        let mut input_open = true;
        loop {
            let deadline = self.session.next_deadline();
            if !input_open && deadline.is_none() {
                break;
            }
            let wake_at = deadline.map_or_else(Instant::now, Instant::from_std);
            tokio::select! {
                biased;

                _ = sleep_until(wake_at), if deadline.is_some() => {
                    self.session.poll_timer(Instant::now().into_std());
                }
                msg = self.to_table_rx.recv(), if input_open => match msg {
                    Some(line) => self.handle(&line),
                    None => {
                        info!("Input closed");
                        input_open = false;
                    }
                },
            }
        }
    }

    fn handle(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        match serde_json::from_str::<Command>(line) {
            Ok(command) => {
                // an overdue roll settles before the command sees the dice
                let now = Instant::now().into_std();
                self.session.poll_timer(now);
                command.apply(&mut self.session, now);
            }
            Err(err) => warn!("Unknown command: `{line}`. The error: `{err}`"),
        }
    }
}
