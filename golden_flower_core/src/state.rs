use crate::card::Card;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type SessionId = Uuid;
pub type SeatId = usize;

/// 固定四人桌
pub const NUM_SEATS: usize = 4;
/// 真人玩家固定坐 0 号位，其余座位由电脑操作
pub const HUMAN_SEAT: SeatId = 0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub id: SeatId,
    pub name: String,
    pub chips: u32,  // 剩余筹码，跨局保留
    pub wins: u32,   // 本场赢下的局数
    // 以下字段每局开始时重置
    pub hand: Vec<Card>,
    pub folded: bool,
    pub has_seen: bool,  // 看牌后不可撤回，之后下注翻倍
    pub has_acted: bool, // 本轮是否已行动，只作记录；轮次推进由行动顺序决定
}

/// 当前可以选择的动作类型，交给真人玩家选择
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionKind {
    See,
    Call,
    Raise,
    Fold,
    Compare,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerAction {
    See,             // 看牌
    Call,            // 跟注
    Raise(u32),      // 加注，金额为加注后的单位注额 (看牌后实付翻倍)
    Fold,            // 弃牌
    Compare(SeatId), // 比牌，指定对手座位
}

/// 一局内的下注状态，开局创建，结算后丢弃
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundState {
    pub pot: u32,         // 总奖池金额
    pub current_bet: u32, // 当前单位注额，只增不减
    pub round: u8,        // 第几轮下注，从 1 开始
    pub action_order: [SeatId; NUM_SEATS],
}

/// 轮到某个座位行动时它能看到的公共信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableView {
    pub round: u8,
    pub pot: u32,
    pub current_bet: u32,
    /// 第一轮刚看完牌，只能在跟注、加注、弃牌之间选
    pub just_saw: bool,
    /// 本座位加注时最少要加到的注额
    pub min_raise: u32,
    /// 仍在局中的其他座位，按行动顺序排列
    pub opponents: Vec<SeatId>,
}

// --- Seat 的实现方法 ---

impl Seat {
    pub fn new(id: SeatId, name: impl Into<String>, chips: u32) -> Self {
        Seat {
            id,
            name: name.into(),
            chips,
            wins: 0,
            hand: Vec::new(),
            folded: false,
            has_seen: false,
            has_acted: false,
        }
    }

    pub fn is_human(&self) -> bool {
        self.id == HUMAN_SEAT
    }

    pub fn is_active(&self) -> bool {
        !self.folded
    }

    /// 看牌后下注翻倍
    pub fn stake_multiplier(&self) -> u32 {
        if self.has_seen { 2 } else { 1 }
    }

    /// 按单位注额 `bet` 计算本座位实际要付的筹码
    pub fn stake_for(&self, bet: u32) -> u32 {
        bet.saturating_mul(self.stake_multiplier())
    }

    pub fn reset_for_hand(&mut self) {
        self.hand.clear();
        self.folded = false;
        self.has_seen = false;
        self.has_acted = false;
    }
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::See => ActionKind::See,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Raise(_) => ActionKind::Raise,
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Compare(_) => ActionKind::Compare,
        }
    }
}

impl RoundState {
    pub fn new(ante: u32, action_order: [SeatId; NUM_SEATS]) -> Self {
        RoundState { pot: 0, current_bet: ante, round: 1, action_order }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            ActionKind::See => "看牌",
            ActionKind::Call => "跟注",
            ActionKind::Raise => "加注",
            ActionKind::Fold => "弃牌",
            ActionKind::Compare => "比牌",
        })
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerAction::Raise(bet) => write!(f, "加注到 {}", bet),
            PlayerAction::Compare(target) => write!(f, "与 {} 号位比牌", target),
            other => write!(f, "{}", other.kind()),
        }
    }
}
