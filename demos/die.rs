//! A loaded die as a compile-time enum: the `OutcomeEnum` derive turns the
//! annotated variants into a ready-to-sample table.
//!
//! Run with `cargo run --example die`.

use std::collections::HashMap;
use twopoint::OutcomeEnum;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, OutcomeEnum)]
enum Face {
    #[mass(1 / 10)]
    One,
    #[mass(1 / 10)]
    Two,
    #[mass(1 / 10)]
    Three,
    #[mass(1 / 10)]
    Four,
    #[mass(1 / 10)]
    Five,
    #[mass(1 / 2)]
    Six, // the load
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let table = Face::table()?;

    let mut rng = rand::rng();
    let mut hist: HashMap<Face, u64> = HashMap::new();
    for _ in 0..200_000 {
        *hist.entry(table.sample_owned(&mut rng)).or_default() += 1;
    }

    let mut rolls: Vec<(Face, u64)> = hist.into_iter().collect();
    rolls.sort_by(|(_, a), (_, b)| b.cmp(a));

    for (face, count) in rolls {
        println!("{count:>6} {face:?}");
    }

    Ok(())
}
