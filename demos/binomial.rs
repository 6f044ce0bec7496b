//! Sample a binomial(n, p) distribution through the alias table and through
//! plain inverse-transform sampling, then print the two histograms next to
//! the true mass function.
//!
//! Run with `cargo run --example binomial`.

use twopoint::{AliasTable, CdfSampler, DiscreteSampler, pmf};

const N: u32 = 100;
const P: f64 = 0.6;
const DRAWS: usize = 10_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mass = pmf::binomial(N, P)?;
    let alias = AliasTable::decompose(&mass)?;
    let cdf = CdfSampler::new(&mass)?;

    let mut rng = rand::rng();
    let alias_counts = alias.sample_counts(&mut rng, DRAWS);
    let cdf_counts = cdf.sample_counts(&mut rng, DRAWS);

    println!("binomial(n={N}, p={P}), {DRAWS} draws per sampler\n");
    println!("{:>4} {:>9} {:>9} {:>9}  histogram (alias)", "k", "pmf", "alias", "cdf");

    for (k, &p) in mass.iter().enumerate() {
        // keep the printout to the meat of the distribution
        if p < 1e-4 {
            continue;
        }
        let emp_alias = alias_counts[k] as f64 / DRAWS as f64;
        let emp_cdf = cdf_counts[k] as f64 / DRAWS as f64;
        let bar = "#".repeat((emp_alias * 400.0).round() as usize);
        println!("{k:>4} {p:>9.5} {emp_alias:>9.5} {emp_cdf:>9.5}  {bar}");
    }

    let mean_alias: f64 = alias_counts
        .iter()
        .enumerate()
        .map(|(k, &c)| k as f64 * c as f64)
        .sum::<f64>()
        / DRAWS as f64;
    println!("\nempirical mean {mean_alias:.3}, expected {:.3}", f64::from(N) * P);

    Ok(())
}
