use rand::{Rng, rngs::ThreadRng};
use serde::Serialize;

pub const SMALLEST_FACE: u8 = 1;
pub const LARGEST_FACE: u8 = 6;

const IMAGE_KEYS: [&str; LARGEST_FACE as usize] =
    ["dice_1", "dice_2", "dice_3", "dice_4", "dice_5", "dice_6"];

/// Source of uniformly distributed die faces.
pub trait FaceSource {
    /// Returns a face in `SMALLEST_FACE..=LARGEST_FACE`.
    fn next_face(&mut self) -> u8;
}

#[derive(Debug)]
pub struct RandomFaces<R> {
    rng: R,
}

impl<R: Rng> RandomFaces<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomFaces<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> FaceSource for RandomFaces<R> {
    fn next_face(&mut self) -> u8 {
        self.rng.random_range(SMALLEST_FACE..=LARGEST_FACE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Die {
    value: u8,
    image_key: &'static str,
}

impl Die {
    /// Creates a die showing `value`, or the smallest face if `value` is out of range.
    pub fn new(value: u8) -> Self {
        let mut die = Self {
            value: SMALLEST_FACE,
            image_key: IMAGE_KEYS[0],
        };
        die.set_value(value);
        die
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn image_key(&self) -> &'static str {
        self.image_key
    }

    /// Out of range values are ignored, never clamped.
    pub fn set_value(&mut self, value: u8) {
        if (SMALLEST_FACE..=LARGEST_FACE).contains(&value) {
            self.value = value;
            self.image_key = IMAGE_KEYS[usize::from(value - SMALLEST_FACE)];
        }
    }

    pub fn increment(&mut self) {
        self.set_value(self.value.saturating_add(1));
    }

    pub fn decrement(&mut self) {
        // 0 is out of range, so decrementing the smallest face is a no-op
        self.set_value(self.value.saturating_sub(1));
    }

    pub fn roll<F: FaceSource + ?Sized>(&mut self, faces: &mut F) {
        self.set_value(faces.next_face());
    }
}
