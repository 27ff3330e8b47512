mod terminal;

use std::path::PathBuf;

use clap::Parser;
use golden_flower_core::{GameConfig, GameSession};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use terminal::TerminalFrontend;

/// 四人炸金花：你和三个电脑玩家对局
#[derive(Parser, Debug)]
#[command(name = "golden-flower", version)]
struct Args {
    /// JSON 配置文件，未写的字段取默认值
    #[arg(long)]
    config: Option<PathBuf>,
    /// 随机种子，相同种子和相同输入得到相同的牌局
    #[arg(long)]
    seed: Option<u64>,
    /// 每人发牌数量 (3-13)，不填则开局时询问
    #[arg(long)]
    cards: Option<usize>,
    /// 每个座位的初始筹码
    #[arg(long)]
    chips: Option<u32>,
    /// 每局底注
    #[arg(long)]
    ante: Option<u32>,
    /// 每个事件输出一行 JSON
    #[arg(long)]
    json: bool,
}

fn load_config(args: &Args) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(chips) = args.chips {
        config.starting_chips = chips;
    }
    if let Some(ante) = args.ante {
        config.ante = ante;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 日志写到标准错误，避免和牌局输出混在一起
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    info!(?config, "configuration loaded");

    if !args.json {
        println!("欢迎体验4人炸金花！");
    }
    let mut frontend = TerminalFrontend::new(args.json, args.cards);
    let summary = GameSession::run(config, &mut frontend, &mut rng)?;
    info!(session = %summary.session_id, hands = summary.hands_played, reason = ?summary.end_reason, "bye");

    Ok(())
}
