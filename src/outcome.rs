use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win,
    Lose,
}

/// Judges a settled roll. Win is checked before lose.
pub fn evaluate(active_dice: usize, sum: u32) -> Option<Outcome> {
    if is_win(active_dice, sum) {
        Some(Outcome::Win)
    } else if is_lose(active_dice, sum) {
        Some(Outcome::Lose)
    } else {
        None
    }
}

fn is_win(active_dice: usize, sum: u32) -> bool {
    match active_dice {
        2 => sum == 7 || sum == 11,
        3 => sum % 7 == 0 || sum % 11 == 0,
        _ => false,
    }
}

fn is_lose(active_dice: usize, sum: u32) -> bool {
    match active_dice {
        2 => sum == 2 || sum == 12,
        3 => sum == 3 || sum == 18,
        _ => false,
    }
}
