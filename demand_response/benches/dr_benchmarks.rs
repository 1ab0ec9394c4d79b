use criterion::{black_box, criterion_group, criterion_main, Criterion};
use demand_response::{generate_day, DemandResponder, GeneratorConfig, ShiftPolicy};

fn benchmark_generation(c: &mut Criterion) {
    let config = GeneratorConfig::default();

    c.bench_function("generate_day", |b| {
        b.iter(|| {
            let _day = black_box(generate_day(&config));
        });
    });
}

fn benchmark_demand_response(c: &mut Criterion) {
    let day = generate_day(&GeneratorConfig::default()).expect("default config is valid");
    let consumption = day.consumption();
    let prices = day.prices();

    c.bench_function("demand_response", |b| {
        let responder = DemandResponder::new(ShiftPolicy::default()).expect("default policy is valid");

        b.iter(|| {
            let _outcome = black_box(responder.apply(&consumption, &prices));
        });
    });
}

criterion_group!(benches, benchmark_generation, benchmark_demand_response);
criterion_main!(benches);
