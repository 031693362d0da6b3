//! The `hygiene answers` command.

use anyhow::Result;

use hygiene_core::answer::{points_for_answer, ANSWERS};

pub fn execute(tpp: f64) -> Result<()> {
    anyhow::ensure!(tpp >= 0.0, "tpp must not be negative");

    println!("Answers (points shown for tpp = {tpp}):");
    for (id, answer) in ANSWERS {
        let deduction = if answer.is_na() {
            "excluded".to_string()
        } else {
            format!("{} deduction", answer.deduction_units())
        };
        println!(
            "  {id}  {:<17} {:>6} points  ({deduction})",
            answer.label(),
            points_for_answer(answer, tpp),
        );
    }

    Ok(())
}
