//! # 炸金花核心逻辑库
//!
//! 这个 `core` crate 包含了四人炸金花的牌型评估、下注状态机、
//! 电脑玩家策略以及整场游戏的流程控制。
//! 它不做任何输入输出，所有交互都通过 [`Frontend`] 完成，
//! 随机性全部来自调用方传入的随机数生成器，方便复现和测试。

mod ai;
mod card;
mod config;
mod error;
mod event;
mod frontend;
mod game;
mod logic;
mod state;

pub use ai::{decide, hand_category, pot_odds};

pub use card::*;

pub use config::*;

pub use error::{GameError, GameResult};

pub use event::*;

pub use frontend::Frontend;

pub use game::{EndReason, GameSession, SessionSummary};

pub use logic::{HandState, MAX_INPUT_ATTEMPTS, apply_action, legal_actions, min_raise, play_betting_rounds, post_antes, settle};

pub use state::*;
