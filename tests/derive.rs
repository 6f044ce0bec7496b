//! The derive macro expands to paths in the `twopoint` crate, so it can only
//! be exercised from outside the library — hence an integration test.

use twopoint::OutcomeEnum;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, OutcomeEnum)]
enum Weather {
    #[mass(0.6)]
    Sunny,
    #[mass(0.3)]
    Overcast,
    #[mass(1 / 10)]
    Rain,
}

#[test]
fn masses_in_declaration_order() {
    let masses = <Weather as OutcomeEnum>::MASSES;
    assert_eq!(masses.len(), 3);
    assert_eq!(masses[0], (Weather::Sunny, 0.6));
    assert_eq!(masses[1], (Weather::Overcast, 0.3));
    // integer literals promoted to floats: 1/10 is 0.1, not 0
    assert_eq!(masses[2], (Weather::Rain, 0.1));
}

#[test]
fn table_samples_the_variants() {
    let table = Weather::table().unwrap();
    assert_eq!(table.len(), 3);

    let mut rng = rand::rng();
    let mut seen = [false; 3];
    for _ in 0..10_000 {
        match table.sample_owned(&mut rng) {
            Weather::Sunny => seen[0] = true,
            Weather::Overcast => seen[1] = true,
            Weather::Rain => seen[2] = true,
        }
    }
    // 10k draws make missing a 10% outcome essentially impossible
    assert_eq!(seen, [true; 3]);
}
