use crate::error::{GameError, GameResult};
use crate::state::NUM_SEATS;
use serde::{Deserialize, Serialize};

/// 每人最少发牌数量
pub const MIN_CARDS_PER_HAND: usize = 3;
/// 每人最多发牌数量 (4 * 13 = 52)
pub const MAX_CARDS_PER_HAND: usize = 13;

/// 牌局配置。
///
/// 缺省字段在反序列化时取 [`Default`] 的值，所以配置文件只需写要改的项。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// 每个座位的初始筹码
    pub starting_chips: u32,
    /// 每局底注，同时也是每局开始时的跟注金额
    pub ante: u32,
    /// 每局最多下注轮数，到达后强制比牌
    pub max_rounds: u8,
    /// 未看牌时加注的最小增量
    pub unseen_raise_increment: u32,
    /// 随机种子，`None` 表示由系统随机源生成
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_chips: 100,
            ante: 10,
            max_rounds: 5,
            unseen_raise_increment: 10,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> GameResult<()> {
        if self.ante == 0 {
            return Err(GameError::InvalidConfig("ante must be > 0".into()));
        }
        if self.starting_chips < self.ante {
            return Err(GameError::InvalidConfig("starting_chips must cover the ante".into()));
        }
        // 奖池加所有座位的筹码始终等于开局总额，必须放得进 u32
        if self.starting_chips.checked_mul(NUM_SEATS as u32).is_none() {
            return Err(GameError::InvalidConfig("starting_chips too large for four seats".into()));
        }
        if self.max_rounds == 0 {
            return Err(GameError::InvalidConfig("max_rounds must be > 0".into()));
        }
        if self.unseen_raise_increment == 0 {
            return Err(GameError::InvalidConfig("unseen_raise_increment must be > 0".into()));
        }
        Ok(())
    }
}

/// 检查每人发牌数量是否在 3..=13 之间
pub fn validate_card_count(num_cards: usize) -> GameResult<()> {
    if (MIN_CARDS_PER_HAND..=MAX_CARDS_PER_HAND).contains(&num_cards) {
        Ok(())
    } else {
        Err(GameError::InvalidCardCount(num_cards))
    }
}
