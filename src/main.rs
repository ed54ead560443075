/// 可执行文件入口（用于演示和调试）
///
/// 用法：`route_engine [配置文件]`，默认读取 `route_engine.toml`，不存在时使用默认配置

use std::path::PathBuf;

use route_engine::game::play_game;
use route_engine::{Dice, SimulationConfig};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("route_engine.toml"));
    let config = SimulationConfig::load_or_default(&path)?;

    tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .init();

    info!(?config, "starting simulation");

    let mut dice = match config.seed {
        Some(seed) => Dice::seeded(seed),
        None => Dice::new(),
    };

    let mut totals = Vec::with_capacity(config.games as usize);
    for game in 1..=config.games {
        let state = play_game(&mut dice, config.policy)?;
        let score = state.score();
        info!(game, %score, "game result");
        println!("第 {} 局：{}", game, score);
        println!("  {}", state.board());
        totals.push(score.total);
    }

    let average = totals.iter().sum::<i32>() as f64 / totals.len().max(1) as f64;
    let best = totals.iter().copied().max().unwrap_or(0);
    println!("{} 局平均 {:.2}，最高 {}", totals.len(), average, best);
    Ok(())
}
