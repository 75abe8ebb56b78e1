use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rtsc_theory::{
    compute_tc, parameter_space_map, DenominatorForm, OmegaLog, ThermalParameters,
};

fn strict_tc_bench(c: &mut Criterion) {
    let params = ThermalParameters {
        omega_log: OmegaLog::from_mev(120.0),
        mu_star: 0.12,
        f_omega: 1.35,
    };
    c.bench_function("compute_tc_mcmillan", |b| {
        b.iter(|| {
            let result = compute_tc(black_box(&params), black_box(2.5), DenominatorForm::McMillan)
                .expect("reference point");
            black_box(result.tc_k());
        });
    });
}

fn parameter_map_bench(c: &mut Criterion) {
    c.bench_function("parameter_space_map_50", |b| {
        b.iter(|| {
            let map = parameter_space_map((80.0, 200.0), (1.5, 3.5), 50, 0.1).expect("map");
            black_box(map);
        });
    });
}

criterion_group!(benches, strict_tc_bench, parameter_map_bench);
criterion_main!(benches);
