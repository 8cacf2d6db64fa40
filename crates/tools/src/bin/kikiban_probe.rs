//! コアサービスの診断ツール
//!
//! テーブルを構築し、複数スレッドで置換表に負荷をかけてから、
//! テーブルの統計と1手詰めの判定例を表示する。

use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::RngCore;
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

use kikiban_core::bitboard::Slider;
use kikiban_core::mate::{MateInput, PlacedPiece, compute_effects, occupancy, occupancy_of};
use kikiban_core::tt::TranspositionTable;
use kikiban_core::types::{Bound, Color, Hand, Move, PieceType, Square, Value};
use kikiban_core::{Bitboard, CoreConfig, CoreServices, mate_1ply};

#[derive(Parser, Debug)]
#[command(name = "kikiban_probe")]
#[command(about = "利きテーブル・置換表・1手詰め判定の動作確認と負荷試験")]
struct Cli {
    /// 置換表サイズ（MB）。省略時は KIKIBAN_HASH_MB か既定値
    #[arg(long)]
    hash_mb: Option<usize>,

    /// 置換表に書き込むスレッド数
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// スレッドあたりの probe/save 回数
    #[arg(long, default_value_t = 1_000_000)]
    ops: usize,

    /// 乱数シード
    #[arg(long, default_value_t = 0x4B494B49)]
    seed: u64,

    /// 結果をJSONで出力する
    #[arg(long, default_value_t = false)]
    json: bool,
}

struct StressReport {
    hits: usize,
    elapsed_ms: f64,
}

fn stress(tt: &TranspositionTable, threads: usize, ops: usize, seed: u64) -> StressReport {
    let start = Instant::now();
    tt.new_search();

    let hits = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..threads as u64)
            .map(|id| {
                scope.spawn(move || {
                    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed ^ id);
                    let mut hits = 0usize;
                    for i in 0..ops {
                        let key = rng.next_u64();
                        tt.prefetch(key);
                        let probe = tt.probe(key);
                        if probe.found {
                            hits += 1;
                        }
                        let depth = (rng.next_u32() % 24) as i32 + 1;
                        let bound = match i % 3 {
                            0 => Bound::Exact,
                            1 => Bound::Lower,
                            _ => Bound::Upper,
                        };
                        probe.save(
                            key,
                            Value::new(depth * 8),
                            bound,
                            depth,
                            Move::NONE,
                            Value::ZERO,
                            tt.generation(),
                        );
                    }
                    hits
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap_or(0)).sum()
    });

    StressReport {
        hits,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    }
}

/// 頭金の形（後手玉5a、先手歩5c、先手の持ち駒に金）
fn sample_mate(services: &CoreServices) -> Option<Move> {
    let sq = |file: u8, rank: u8| Square::from_u8(file * 9 + rank);
    let pieces = [
        PlacedPiece::new(sq(4, 0)?, Color::White, PieceType::King),
        PlacedPiece::new(sq(4, 8)?, Color::Black, PieceType::King),
        PlacedPiece::new(sq(4, 2)?, Color::Black, PieceType::Pawn),
    ];
    let (effects, long_effects) = compute_effects(services.tables(), &pieces);
    let input = MateInput {
        us: Color::Black,
        our_king: sq(4, 8)?,
        their_king: sq(4, 0)?,
        occupied: occupancy(&pieces),
        their_pieces: occupancy_of(&pieces, Color::White),
        our_knights: Bitboard::EMPTY,
        pinned: Bitboard::EMPTY,
        hand: Hand::EMPTY.add(PieceType::Gold),
        effects: &effects,
        long_effects: &long_effects,
    };
    mate_1ply(services.mate_tables(), services.tables(), &input)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    if cli.threads == 0 {
        bail!("--threads must be >= 1");
    }

    let mut config = CoreConfig::from_env().context("failed to read core config")?;
    if let Some(mb) = cli.hash_mb {
        config.hash_mb = mb;
    }
    let services = CoreServices::new(config).context("failed to build core services")?;

    let report = stress(services.tt(), cli.threads, cli.ops, cli.seed);
    let hashfull = services.tt().hashfull();
    let mate = sample_mate(&services);
    let total_ops = cli.threads * cli.ops;
    log::info!(
        "stress done: {} ops, {} hits, {:.1} ms",
        total_ops,
        report.hits,
        report.elapsed_ms
    );

    let tables = services.tables();
    if cli.json {
        let summary = serde_json::json!({
            "hash_mb": services.config().hash_mb,
            "clusters": services.tt().cluster_count(),
            "hashfull": hashfull,
            "ops": total_ops,
            "hits": report.hits,
            "elapsed_ms": report.elapsed_ms,
            "bishop_entries": tables.sliding_table_len(Slider::Bishop),
            "rook_entries": tables.sliding_table_len(Slider::Rook),
            "mate_patterns": services.mate_tables().pattern_count(),
            "sample_mate": mate.map(|m| m.to_usi()),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "hash          : {} MB ({} clusters)",
            services.config().hash_mb,
            services.tt().cluster_count()
        );
        println!("hashfull      : {hashfull}");
        println!(
            "stress        : {} ops, {} hits, {:.1} ms",
            total_ops, report.hits, report.elapsed_ms
        );
        println!(
            "sliding table : bishop={} rook={} lance={}",
            tables.sliding_table_len(Slider::Bishop),
            tables.sliding_table_len(Slider::Rook),
            tables.sliding_table_len(Slider::Lance(Color::Black))
        );
        println!("mate patterns : {}", services.mate_tables().pattern_count());
        match mate {
            Some(mv) => println!("sample mate   : {}", mv.to_usi()),
            None => println!("sample mate   : none"),
        }
    }

    Ok(())
}
