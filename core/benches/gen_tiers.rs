use criterion::{Criterion, black_box, criterion_group, criterion_main};
use flechita_core::{GameSession, GameSettings, ThemeRegistry};

fn bench_generate(c: &mut Criterion) {
    let themes = ThemeRegistry::builtin();
    let mut group = c.benchmark_group("generate");

    for (grid_size, alphabet_size) in [(6, 3), (8, 5), (8, 8)] {
        let settings = GameSettings::new(grid_size, alphabet_size, "hearts");
        group.bench_function(format!("{grid_size}x{grid_size}_a{alphabet_size}"), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                GameSession::new(black_box(settings.clone()), &themes, seed)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
