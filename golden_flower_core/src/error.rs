use thiserror::Error;

/// 牌局核心可能出现的错误。
///
/// 筹码不足不在这里：跟注、加注或比牌时筹码不够会自动弃牌，
/// 付不起底注则直接结束整场游戏。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("牌数不足：需要 {requested} 张，整副牌只有 {available} 张")]
    Dealing { requested: usize, available: usize },

    #[error("每人发牌数量 {0} 不合法")]
    InvalidCardCount(usize),

    #[error("配置无效：{0}")]
    InvalidConfig(String),
}

pub type GameResult<T> = Result<T, GameError>;
