use crate::card::{Card, HandScore};
use crate::game::EndReason;
use crate::state::{NUM_SEATS, PlayerAction, SeatId, SessionId};
use serde::{Deserialize, Serialize};

// --- 引擎 -> 界面 的事件 ---
// 这些是牌局状态变化后交给 `Frontend::render` 的通知，只用于展示，
// 界面不能通过它们修改牌局。

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// 一场游戏开始
    SessionStarted {
        session_id: SessionId,
        num_cards: usize,
        seats: Vec<SeatSummary>,
    },

    /// 新的一局开始
    HandStarted {
        hand_number: u32,
        /// 本局的行动顺序
        action_order: [SeatId; NUM_SEATS],
    },

    /// 某个座位下了底注
    AntePosted {
        seat: SeatId,
        amount: u32,
        chips_left: u32,
        pot: u32,
    },

    /// 真人玩家看牌，只发给该玩家自己
    CardsRevealed {
        seat: SeatId,
        cards: Vec<Card>,
        best: Vec<Card>,
        score: Option<HandScore>,
    },

    /// 新一轮下注开始
    RoundStarted { round: u8, pot: u32, current_bet: u32 },

    /// 一个座位执行了动作
    ActionTaken {
        seat: SeatId,
        action: PlayerAction,
        /// 本次动作付出的筹码
        paid: u32,
        chips_left: u32,
        pot: u32,
    },

    /// 筹码不足以支付所需的注额，自动弃牌
    AutoFolded { seat: SeatId, needed: u32, available: u32 },

    /// 比牌结果，`loser` 为 `None` 表示平局，双方都留在局中
    CompareResolved {
        challenger: SeatId,
        target: SeatId,
        /// 被比牌一方付出的筹码
        target_paid: u32,
        loser: Option<SeatId>,
    },

    /// 一轮下注结束
    RoundFinished {
        round: u8,
        pot: u32,
        current_bet: u32,
        active: Vec<SeatId>,
    },

    /// 摊牌，公布所有仍在局中座位的最大三张
    Showdown { results: Vec<ShowdownResult> },

    /// 奖池分配
    PotAwarded {
        pot: u32,
        winners: Vec<SeatId>,
        share: u32,
        /// 无法均分的余数，交给 `remainder_to`
        remainder: u32,
        remainder_to: Option<SeatId>,
    },

    /// 一局结束
    HandFinished { hand_number: u32, chips: [u32; NUM_SEATS] },

    /// 界面给出的输入不合法，已被拒绝
    InvalidInput { message: String },

    /// 整场游戏结束
    SessionEnded {
        reason: EndReason,
        hands_played: u32,
        seats: Vec<SeatSummary>,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SeatSummary {
    pub seat: SeatId,
    pub name: String,
    pub chips: u32,
    pub wins: u32,
}

/// 在 Showdown 事件中，用于描述单个座位的牌
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShowdownResult {
    pub seat: SeatId,
    /// 用于比牌的最大三张
    pub cards: Vec<Card>,
    pub score: Option<HandScore>,
}
