//! Parallel relaxation benchmarks.
//!
//! Runs the full engine (all `V - 1` rounds plus validation) on a mirrored
//! random graph for every combination of thread count, discipline, and
//! partition strategy.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use bellman_benches::{
    error::BenchSetupError, params::RelaxationBenchParams, workload::SyntheticGraph,
};
use bellman_core::{Discipline, EngineBuilder, EngineError, PartitionStrategy};

/// Seed used for every generated graph.
const SEED: u64 = 42;

/// Vertex counts to benchmark.
const VERTEX_COUNTS: &[usize] = &[200, 1_000];

/// Average undirected edges per vertex.
const DEGREE: usize = 8;

/// Worker pool sizes to benchmark.
const THREADS: &[usize] = &[1, 2, 4, 8];

const DISCIPLINES: &[Discipline] = &[
    Discipline::Unsynchronized,
    Discipline::VertexLocked,
    Discipline::GlobalLocked,
];

const PARTITIONS: &[PartitionStrategy] =
    &[PartitionStrategy::EdgeChunks, PartitionStrategy::SourceVertices];

#[derive(Debug, thiserror::Error)]
enum SetupError {
    #[error(transparent)]
    Graph(#[from] BenchSetupError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn relaxation_impl(c: &mut Criterion) -> Result<(), SetupError> {
    for &vertices in VERTEX_COUNTS {
        let edges = SyntheticGraph {
            vertices,
            degree: DEGREE,
            seed: SEED,
        }
        .build()?;
        let mut group = c.benchmark_group(format!("relaxation/v={vertices}"));
        group.sample_size(10);

        for &threads in THREADS {
            for &discipline in DISCIPLINES {
                for &partition in PARTITIONS {
                    let params = RelaxationBenchParams {
                        threads,
                        discipline,
                        partition,
                    };
                    let engine = EngineBuilder::new()
                        .with_threads(threads)
                        .with_discipline(discipline)
                        .with_partition(partition)
                        .build()?;
                    group.bench_with_input(
                        BenchmarkId::from_parameter(params),
                        &edges,
                        |b, graph| b.iter(|| engine.run(graph, 0)),
                    );
                }
            }
        }
        group.finish();
    }
    Ok(())
}

fn relaxation(c: &mut Criterion) {
    if let Err(err) = relaxation_impl(c) {
        panic!("relaxation benchmark setup failed: {err}");
    }
}

criterion_group!(benches, relaxation);
criterion_main!(benches);
