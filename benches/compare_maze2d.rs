use std::time::Duration;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use glob::glob;
use hrsw::Stopwatch;
use human_duration::human_duration;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use waypoint_search::algorithms::SearchMethod;
use waypoint_search::problems::maze_2d::Maze2DProblem;

/// Maximum time willing to wait for a single benchmark instance.
const MAX_INSTANCE_TIME: Duration = Duration::from_secs(1);

fn bench_methods(c: &mut Criterion, group_name: &str, instances: &[(String, Maze2DProblem)]) {
    let mut group = c.benchmark_group(group_name);

    for (instance_name, problem) in instances {
        for method in SearchMethod::ALL {
            let mut stopwatch = Stopwatch::new_started();
            let _ = method.run(problem);
            stopwatch.stop();
            let elapsed = stopwatch.elapsed();
            if elapsed > MAX_INSTANCE_TIME {
                log::warn!(
                    "Skipping {instance_name} as it takes too long with {method} ({})",
                    human_duration(&elapsed)
                );
                continue;
            }

            group.bench_with_input(
                BenchmarkId::new(method.to_string(), instance_name),
                problem,
                |b, p| b.iter(|| method.run(p)),
            );
        }
    }
    group.finish();
}

fn compare_files(c: &mut Criterion) {
    let instances: Vec<(String, Maze2DProblem)> = glob("data/mazes/*.txt")
        .unwrap()
        .filter_map(std::result::Result::ok)
        .map(|path| {
            let name = path.file_name().unwrap().to_str().unwrap().to_string();
            let problem = Maze2DProblem::try_from(path.as_path()).unwrap();
            let (rows, cols) = problem.dimensions();
            (format!("{name}[{rows}x{cols}]"), problem)
        })
        .collect();

    bench_methods(c, "Maze2D files", &instances);
}

fn compare_random(c: &mut Criterion) {
    let instances: Vec<(String, Maze2DProblem)> = (0..3)
        .map(|i| {
            let mut rng = ChaCha8Rng::seed_from_u64(i);
            (
                format!("random[30x30]:{i}"),
                Maze2DProblem::random(&mut rng, 30, 30, 0.2, 4),
            )
        })
        .collect();

    bench_methods(c, "Maze2D random", &instances);
}

criterion_group!(benches, compare_files, compare_random);
criterion_main!(benches);
