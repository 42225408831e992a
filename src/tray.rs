use crate::die::{Die, FaceSource};

pub const MAX_DICE: usize = 3;

/// Every die slot plus how many of them are in play.
///
/// Inactive dice keep their value so they count again once the
/// active prefix grows back over them.
#[derive(Debug, Clone)]
pub struct Tray {
    dice: [Die; MAX_DICE],
    active: usize,
}

impl Tray {
    /// Slot `i` starts at `i + 1`.
    pub fn new(active: usize) -> Self {
        let mut tray = Self {
            dice: std::array::from_fn(|i| Die::new(i as u8 + 1)),
            active: MAX_DICE,
        };
        tray.set_active(active);
        tray
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Returns false when `count` is not in `1..=MAX_DICE`.
    pub fn set_active(&mut self, count: usize) -> bool {
        if !(1..=MAX_DICE).contains(&count) {
            return false;
        }
        self.active = count;
        true
    }

    pub fn is_active(&self, index: usize) -> bool {
        index < self.active
    }

    pub fn show(&self) -> &[Die] {
        &self.dice[..self.active]
    }

    /// Any slot, active or not.
    pub fn die(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    /// Only active dice can be reached.
    pub fn die_mut(&mut self, index: usize) -> Option<&mut Die> {
        if !self.is_active(index) {
            return None;
        }
        self.dice.get_mut(index)
    }

    pub fn sum(&self) -> u32 {
        self.show().iter().map(|d| u32::from(d.value())).sum()
    }

    pub fn roll_all<F: FaceSource + ?Sized>(&mut self, faces: &mut F) {
        for die in self.dice[..self.active].iter_mut() {
            die.roll(faces);
        }
    }
}
