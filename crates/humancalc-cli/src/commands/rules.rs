use humancalc_core::quiz::{range::range_for, scoring};
use humancalc_core::{Difficulty, Operator};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{:<8} {:>10} {:>10} {:>8} {:>7}",
        "level", "+ / -", "× / ÷", "seconds", "points"
    );
    for difficulty in Difficulty::ALL {
        let (add_low, add_high) = range_for(Operator::Add, difficulty);
        let (mul_low, mul_high) = range_for(Operator::Multiply, difficulty);
        println!(
            "{:<8} {:>10} {:>10} {:>8} {:>7}",
            difficulty.label(),
            format!("{add_low}..{add_high}"),
            format!("{mul_low}..{mul_high}"),
            difficulty.time_limit_secs(),
            scoring::points(difficulty),
        );
    }
    Ok(())
}
