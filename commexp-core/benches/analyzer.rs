use commexp_core::{analyzer::analyze_run, config::AnalysisConfig, RunInput};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ ";

fn message(rng: &mut StdRng, len: usize) -> String {
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Substitute roughly `rate` of the characters, occasionally expanding one into two
fn corrupt(rng: &mut StdRng, original: &str, rate: f64) -> String {
    let mut out = String::with_capacity(original.len() + 16);
    for c in original.chars() {
        if rng.gen_bool(rate) {
            out.push('#');
            if rng.gen_bool(0.2) {
                out.push('#');
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_run");
    let mut rng = StdRng::seed_from_u64(7);
    let config = AnalysisConfig::default();

    for &len in &[64usize, 1024, 16384] {
        let original = message(&mut rng, len);
        let changed = corrupt(&mut rng, &original, 0.05);
        let flagged = corrupt(&mut rng, &original, 0.02).replace('#', "_");
        let run = RunInput::from_messages(original.clone(), changed.clone(), original, flagged);

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &run, |b, run| {
            b.iter(|| analyze_run(run, &config).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
