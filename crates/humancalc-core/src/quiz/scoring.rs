//! Points awarded for a correct, on-time answer.

use super::question::Difficulty;

pub fn points(difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Easy => 1,
        Difficulty::Normal => 2,
        Difficulty::Hard => 3,
    }
}
