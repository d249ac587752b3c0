use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tile_chess::engines::engine_search::run_search;
use tile_chess::game_state::game_manager::GameManager;
use tile_chess::search::board_scoring::CentralityMaterialScorer;
use tile_chess::search::search_state::{SearchAlgorithm, SearchConfig};

const MIDDLEGAME_FEN: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_depth_search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    let game = GameManager::from_fen(MIDDLEGAME_FEN).expect("benchmark FEN should parse");

    for algorithm in [SearchAlgorithm::Minimax, SearchAlgorithm::AlphaBeta] {
        for depth in [1u8, 2] {
            let config = SearchConfig { depth, algorithm };
            let mut bench_game = game.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("{algorithm:?}"), depth),
                &config,
                |b, config| {
                    b.iter(|| {
                        let result = run_search(
                            black_box(&mut bench_game),
                            &CentralityMaterialScorer,
                            *config,
                        )
                        .expect("search should succeed");
                        black_box(result.score)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
