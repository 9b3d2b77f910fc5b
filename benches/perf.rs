use criterion::{Criterion, criterion_group, criterion_main};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

use draft_hub::aggregate::aggregate_game_logs;
use draft_hub::board::{BoardQuery, SortKey, big_board};
use draft_hub::dataset::{Dataset, GameLog, Measurement, PlayerBio, ScoutRanking};
use draft_hub::percentile::SortedCohort;
use draft_hub::stat_hub::StatHub;

fn sample_dataset(players: u32, games: u32) -> Dataset {
    let mut rng = StdRng::seed_from_u64(42);
    let rank = |rng: &mut StdRng| {
        if rng.gen_bool(0.8) {
            Some(f64::from(rng.gen_range(1..=100)))
        } else {
            None
        }
    };

    let bio = (1..=players)
        .map(|id| PlayerBio {
            player_id: id,
            name: format!("Prospect {id}"),
            height: Some("80".to_string()),
            weight: Some("210".to_string()),
            current_team: Some("Test U".to_string()),
            league: Some("NCAA".to_string()),
            photo_url: None,
        })
        .collect();

    let rankings = (1..=players)
        .map(|id| ScoutRanking {
            player_id: id,
            espn: rank(&mut rng),
            vecenie: rank(&mut rng),
            oconnor: rank(&mut rng),
            boone: rank(&mut rng),
            parrish: rank(&mut rng),
        })
        .collect();

    let measurements = (1..=players)
        .map(|id| Measurement {
            player_id: id,
            wingspan: Some(rng.gen_range(76.0..92.0)),
            max_vertical: Some(rng.gen_range(28.0..44.0)),
            no_step_vertical: Some(rng.gen_range(22.0..36.0)),
            sprint: Some(rng.gen_range(3.0..3.6)),
        })
        .collect();

    let mut logs = Vec::with_capacity((players * games) as usize);
    for _ in 0..games {
        for id in 1..=players {
            logs.push(GameLog {
                player_id: id,
                pts: Some(f64::from(rng.gen_range(0..40))),
                reb: Some(f64::from(rng.gen_range(0..15))),
                ast: Some(f64::from(rng.gen_range(0..12))),
                fg_pct: Some(rng.gen_range(20.0..70.0)),
                tp_pct: rng.gen_bool(0.9).then(|| rng.gen_range(0.0..60.0)),
                ft_pct: Some(rng.gen_range(40.0..100.0)),
            });
        }
    }

    Dataset::new(bio, rankings, measurements, logs)
}

fn bench_aggregate(c: &mut Criterion) {
    let dataset = sample_dataset(120, 30);
    c.bench_function("aggregate_game_logs", |b| {
        b.iter(|| {
            let stats = aggregate_game_logs(black_box(&dataset.game_logs));
            black_box(stats.len());
        })
    });
}

fn bench_stat_hub(c: &mut Criterion) {
    let dataset = sample_dataset(120, 30);
    c.bench_function("stat_hub_build", |b| {
        b.iter(|| {
            let hub = StatHub::build(black_box(&dataset));
            black_box(hub.rows.len());
        })
    });
}

fn bench_big_board(c: &mut Criterion) {
    let dataset = sample_dataset(120, 30);
    let hub = StatHub::build(&dataset);
    let query = BoardQuery {
        search: "1".to_string(),
        sort: SortKey::AverageRank,
    };
    c.bench_function("big_board_query", |b| {
        b.iter(|| {
            let rows = big_board(&dataset, &hub.medals, black_box(&query));
            black_box(rows.len());
        })
    });
}

fn bench_percentile(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let values: Vec<f64> = (0..1_000).map(|_| rng.gen_range(0.0..100.0)).collect();
    let cohort = SortedCohort::new(values.clone());
    c.bench_function("percentile_lookup", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for v in &values {
                acc += u32::from(cohort.percentile(black_box(*v)).unwrap_or(0));
            }
            black_box(acc);
        })
    });
}

criterion_group!(
    benches,
    bench_aggregate,
    bench_stat_hub,
    bench_big_board,
    bench_percentile
);
criterion_main!(benches);
