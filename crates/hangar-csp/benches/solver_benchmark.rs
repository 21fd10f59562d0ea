// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hangar_csp::config::{Heuristic, SolverConfig};
use hangar_csp::monitor::no_op::NoOperationMonitor;
use hangar_csp::solver::BacktrackingSolver;
use hangar_model::loading::InstanceLoader;
use std::fs;
use std::hint::black_box;
use std::path::{Path, PathBuf};

const SOLUTIONS_PER_RUN: usize = 10;

fn find_instances_dir() -> Option<PathBuf> {
    let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
    while let Some(p) = cur {
        let cand = p.join("instances");
        if cand.is_dir() {
            return Some(cand);
        }
        cur = p.parent();
    }
    None
}

/// All `*.txt` files of the instances directory, sorted.
fn get_instance_files() -> Vec<PathBuf> {
    let dir = find_instances_dir().expect("Could not find 'instances/' directory");

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .expect("Failed to read instances directory")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();

    files.sort();
    files
}

fn bench_instances(c: &mut Criterion) {
    let files = get_instance_files();
    if files.is_empty() {
        eprintln!("No instance files found in instances/. Skipping benchmark.");
        return;
    }

    let loader = InstanceLoader::new();
    let mut group = c.benchmark_group("solver_benchmark");

    for path in files {
        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        let model = loader
            .from_path(&path)
            .map(|instance| instance.build())
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", file_name, e))
            .unwrap_or_else(|e| panic!("Invalid instance {}: {}", file_name, e));

        group.throughput(Throughput::Elements(model.num_variables() as u64));

        for heuristic in [Heuristic::Chronological, Heuristic::MostConstrained] {
            for forward_checking in [true, false] {
                let label = format!("{}/fc={}", heuristic, forward_checking);
                let solver = BacktrackingSolver::new(
                    SolverConfig::new()
                        .with_solution_limit(Some(SOLUTIONS_PER_RUN))
                        .with_heuristic(heuristic)
                        .with_forward_checking(forward_checking),
                );

                group.bench_with_input(BenchmarkId::new(label, &file_name), &model, |b, model| {
                    b.iter(|| {
                        let outcome = solver.solve(black_box(model), NoOperationMonitor::new());
                        black_box(outcome.len())
                    })
                });
            }
        }
    }
    group.finish();
}

criterion_group!(benches, bench_instances);
criterion_main!(benches);
