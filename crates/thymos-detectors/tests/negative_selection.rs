//! Negative-selection invariant tests across both generation strategies.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thymos_core::morphology::Morphology;
use thymos_core::particle::Particle;
use thymos_core::schema::{Attribute, DataSchema};
use thymos_core::types::{MhcMode, Representation};
use thymos_detectors::{DetectorSet, RandomGenerator, TabularGenerator, TabularTarget};

fn bit_morphology(attrs: usize) -> Morphology {
    let schema = DataSchema::new(
        (0..attrs)
            .map(|i| Attribute::categorical(format!("b{}", i), 2))
            .collect(),
    );
    let mut rng = StdRng::seed_from_u64(0);
    Morphology::build(&schema, Representation::Bit, true, MhcMode::None, &mut rng).unwrap()
}

fn fuzzy_morphology(symbol_counts: &[usize]) -> Morphology {
    let schema = DataSchema::new(
        symbol_counts
            .iter()
            .enumerate()
            .map(|(i, &n)| Attribute::categorical(format!("a{}", i), n))
            .collect(),
    );
    let mut rng = StdRng::seed_from_u64(0);
    Morphology::build(&schema, Representation::Fuzzy, true, MhcMode::None, &mut rng).unwrap()
}

#[test]
fn random_detectors_avoid_the_self_window_scenario() {
    // 8-bit particles, match length 4, self set = {00001111}: no detector
    // may share 4 consecutive agreeing bits with the self string.
    let m = bit_morphology(8);
    let own = Particle::compile(&m, &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
    let selves = vec![own.clone()];

    let mut rng = StdRng::seed_from_u64(1234);
    let (detectors, report) = RandomGenerator::default()
        .generate(&m, &selves, 4, 1, &mut rng)
        .unwrap();
    assert_eq!(report.generated, 1, "one detector should be reachable");
    let outcome = own.matches(detectors[0].particle(), &m, 4).unwrap();
    assert!(
        !outcome.matched,
        "detector agrees with 00001111 over a 4-bit window (score {})",
        outcome.score
    );
}

#[test]
fn both_generators_satisfy_the_negative_selection_invariant() {
    let m = fuzzy_morphology(&[3, 3, 3, 3]);
    let selves = vec![
        Particle::compile(&m, &[0.0, 1.0, 2.0, 0.0]).unwrap(),
        Particle::compile(&m, &[1.0, 1.0, 0.0, 2.0]).unwrap(),
        Particle::compile(&m, &[2.0, 0.0, 1.0, 1.0]).unwrap(),
    ];
    let match_length = 2;

    let mut rng = StdRng::seed_from_u64(99);
    let (random_detectors, _) = RandomGenerator::default()
        .generate(&m, &selves, match_length, 10, &mut rng)
        .unwrap();
    let (tabular_detectors, _) = TabularGenerator::new(TabularTarget::Count(10))
        .generate(&m, &selves, match_length, &mut rng)
        .unwrap();

    for detector in random_detectors.iter().chain(tabular_detectors.iter()) {
        for own in &selves {
            let outcome = own
                .matches(detector.particle(), &m, match_length)
                .unwrap();
            assert!(!outcome.matched, "generated detector matches a self particle");
        }
    }
}

#[test]
fn tabular_empty_self_space_is_the_full_symbol_space() {
    // 3 positions, 2 symbols each, match length 2, empty self set: 2^3 = 8.
    let m = fuzzy_morphology(&[2, 2, 2]);
    let mut rng = StdRng::seed_from_u64(7);
    let (_, report) = TabularGenerator::new(TabularTarget::Count(0))
        .generate(&m, &[], 2, &mut rng)
        .unwrap();
    assert_eq!(report.space_size, Some(8));
}

#[test]
fn tabular_degenerate_window_agrees_with_direct_counting() {
    // match length == particle length: total must equal symbol
    // combinations minus the schemas matching some self particle.
    let m = fuzzy_morphology(&[2, 3]);
    let selves = vec![
        Particle::compile(&m, &[0.0, 2.0]).unwrap(),
        Particle::compile(&m, &[1.0, 0.0]).unwrap(),
    ];
    let mut rng = StdRng::seed_from_u64(8);
    let (detectors, report) = TabularGenerator::new(TabularTarget::Count(10))
        .generate(&m, &selves, 2, &mut rng)
        .unwrap();
    // 2*3 = 6 combinations, 2 censored by the crisp self particles.
    assert_eq!(report.space_size, Some(4));
    assert_eq!(detectors.len(), 4);
}

#[test]
fn detector_set_rejects_generated_detectors_of_wrong_length() {
    let m = fuzzy_morphology(&[2, 2, 2]);
    let mut rng = StdRng::seed_from_u64(5);
    let (detectors, _) = RandomGenerator::default()
        .generate(&m, &[], 2, 4, &mut rng)
        .unwrap();

    let mut set = DetectorSet::new(m.particle_length());
    set.extend(detectors).unwrap();
    assert_eq!(set.len(), 4);

    let mut wrong = DetectorSet::new(m.particle_length() + 1);
    let (more, _) = RandomGenerator::default()
        .generate(&m, &[], 2, 1, &mut rng)
        .unwrap();
    assert!(wrong.extend(more).is_err());
}
