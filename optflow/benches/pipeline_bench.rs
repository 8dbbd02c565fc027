//! Benchmarks for pipeline execution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use optflow::pipeline::PipelineOptions;
use optflow::target::Target;
use optflow::testing::wired_orchestrator;

fn pipeline_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    let (engine, _, _) = wired_orchestrator();
    engine.initialize(None).expect("initialize");
    let target = Target::path("/tmp/bench");

    c.bench_function("two_step_pipeline", |b| {
        b.iter(|| {
            let result = runtime
                .block_on(engine.run_pipeline(&target, &PipelineOptions::new()))
                .expect("pipeline");
            black_box(result)
        });
    });
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
