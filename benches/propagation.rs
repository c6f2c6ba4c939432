use criterion::{criterion_group, criterion_main, Criterion};
use gaussbeam::{micrometer, nanometer, BeamSystem, LensType, MirrorType};

fn criterion_propagation(c: &mut Criterion) {
    let mut system = BeamSystem::from_lengths(nanometer!(1064.0), micrometer!(500.0)).unwrap();
    for _ in 0..250 {
        system.add_free_space(0.1).unwrap();
        system.add_lens(0.2, 1.0, 1.5, 0.005, LensType::Thick).unwrap();
        system.add_free_space(0.1).unwrap();
        system.add_mirror(1.0, MirrorType::Curved).unwrap();
    }
    c.bench_function("propagation", |b| b.iter(|| system.propagate().map(|o| o.waist())));
}

criterion_group!(benches, criterion_propagation);
criterion_main!(benches);
