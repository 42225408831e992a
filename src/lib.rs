//! Interactive dice roller: up to three dice that can be nudged, set or
//! rolled with a timed animation, with win/lose judging on the settled sum.

pub mod command;
pub mod die;
pub mod outcome;
pub mod roll;
pub mod session;
pub mod table;
pub mod tray;

pub use command::{Command, ContextAction, Gesture};
pub use die::{Die, FaceSource, RandomFaces};
pub use outcome::Outcome;
pub use roll::RollTarget;
pub use session::{DiceView, RollSession, RollState, SessionConfig, SessionListener};
pub use table::{Notification, Table};
pub use tray::MAX_DICE;
