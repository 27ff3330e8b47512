use crate::card::deal;
use crate::config::{GameConfig, validate_card_count};
use crate::error::{GameError, GameResult};
use crate::event::{GameEvent, SeatSummary};
use crate::frontend::Frontend;
use crate::logic::{self, HandState, MAX_INPUT_ATTEMPTS};
use crate::state::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};
use uuid::Uuid;

/// 整场游戏结束的原因
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EndReason {
    /// 有座位输光了筹码
    SeatBusted,
    /// 付得起底注的座位不足两个
    TooFewFunded,
    /// 开局时有座位付不起底注
    AnteUnaffordable,
    /// 玩家选择不再继续
    PlayerQuit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub hands_played: u32,
    pub end_reason: EndReason,
    pub seats: Vec<SeatSummary>,
}

/// 一场游戏：四个座位的筹码和行动顺序跨局保留。
#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: SessionId,
    pub config: GameConfig,
    pub seats: [Seat; NUM_SEATS],
    pub num_cards: usize,
    /// 每局结束后左移一位
    pub action_order: [SeatId; NUM_SEATS],
    pub hands_played: u32,
}

fn seat_name(id: SeatId) -> String {
    if id == HUMAN_SEAT { "你".to_string() } else { format!("电脑{}", id) }
}

impl GameSession {
    pub fn new(config: GameConfig, num_cards: usize) -> GameResult<Self> {
        config.validate()?;
        validate_card_count(num_cards)?;
        let seats = std::array::from_fn(|id| Seat::new(id, seat_name(id), config.starting_chips));
        Ok(GameSession {
            id: Uuid::new_v4(),
            config,
            seats,
            num_cards,
            action_order: std::array::from_fn(|i| i),
            hands_played: 0,
        })
    }

    /// 询问发牌数量，然后一直玩到结束条件满足
    pub fn run<F, R>(config: GameConfig, frontend: &mut F, rng: &mut R) -> GameResult<SessionSummary>
    where
        F: Frontend + ?Sized,
        R: Rng + ?Sized,
    {
        config.validate()?;
        let num_cards = request_num_cards(frontend)?;
        GameSession::new(config, num_cards)?.play(frontend, rng)
    }

    /// 所有座位的筹码之和，整场游戏中恒定不变
    pub fn total_chips(&self) -> u32 {
        self.seats.iter().map(|s| s.chips).sum()
    }

    pub fn summaries(&self) -> Vec<SeatSummary> {
        self.seats
            .iter()
            .map(|s| SeatSummary { seat: s.id, name: s.name.clone(), chips: s.chips, wins: s.wins })
            .collect()
    }

    pub fn play<F, R>(&mut self, frontend: &mut F, rng: &mut R) -> GameResult<SessionSummary>
    where
        F: Frontend + ?Sized,
        R: Rng + ?Sized,
    {
        let _span = info_span!("session", id = %self.id).entered();
        info!(num_cards = self.num_cards, "session started");
        frontend.render(&GameEvent::SessionStarted {
            session_id: self.id,
            num_cards: self.num_cards,
            seats: self.summaries(),
        });

        let end_reason = loop {
            if let Some(reason) = self.play_hand(frontend, rng)? {
                break reason;
            }
            if !frontend.request_continue() {
                break EndReason::PlayerQuit;
            }
        };

        info!(?end_reason, hands = self.hands_played, "session ended");
        let summary = SessionSummary {
            session_id: self.id,
            hands_played: self.hands_played,
            end_reason,
            seats: self.summaries(),
        };
        frontend.render(&GameEvent::SessionEnded {
            reason: end_reason,
            hands_played: self.hands_played,
            seats: summary.seats.clone(),
        });
        Ok(summary)
    }

    /// 进行一局
    ///
    /// - 有座位付不起底注时不开局，返回 `AnteUnaffordable`。
    /// - 发牌失败时返回错误，此时没有任何筹码变动。
    /// - 否则下底注、下注、结算、轮换行动顺序，再检查整场是否该结束。
    pub fn play_hand<F, R>(&mut self, frontend: &mut F, rng: &mut R) -> GameResult<Option<EndReason>>
    where
        F: Frontend + ?Sized,
        R: Rng + ?Sized,
    {
        let hand_number = self.hands_played + 1;
        let _span = info_span!("hand", number = hand_number).entered();
        let ante = self.config.ante;

        if let Some(short) = self.seats.iter().find(|s| s.chips < ante) {
            warn!(seat = short.id, chips = short.chips, ante, "seat cannot pay the ante");
            return Ok(Some(EndReason::AnteUnaffordable));
        }

        let hands = deal(NUM_SEATS, self.num_cards, rng)?;
        for (seat, cards) in self.seats.iter_mut().zip(hands) {
            seat.reset_for_hand();
            seat.hand = cards;
        }

        info!(order = ?self.action_order, "hand started");
        frontend.render(&GameEvent::HandStarted { hand_number, action_order: self.action_order });

        let mut hand = HandState::new(&mut self.seats, ante, self.action_order);
        for event in logic::post_antes(&mut hand, ante) {
            frontend.render(&event);
        }
        logic::play_betting_rounds(&mut hand, &self.config, frontend, rng);
        for event in logic::settle(&mut hand) {
            frontend.render(&event);
        }

        self.hands_played = hand_number;
        let chips = std::array::from_fn(|i| self.seats[i].chips);
        info!(?chips, "hand finished");
        frontend.render(&GameEvent::HandFinished { hand_number, chips });

        self.action_order.rotate_left(1);
        Ok(self.end_reason())
    }

    fn end_reason(&self) -> Option<EndReason> {
        let funded = self.seats.iter().filter(|s| s.chips >= self.config.ante).count();
        if self.seats.iter().any(|s| s.chips == 0) {
            Some(EndReason::SeatBusted)
        } else if funded < 2 {
            Some(EndReason::TooFewFunded)
        } else {
            None
        }
    }
}

fn request_num_cards<F: Frontend + ?Sized>(frontend: &mut F) -> GameResult<usize> {
    let mut last = 0;
    for _ in 0..MAX_INPUT_ATTEMPTS {
        last = frontend.request_num_cards();
        match validate_card_count(last) {
            Ok(()) => return Ok(last),
            Err(err) => frontend.render(&GameEvent::InvalidInput { message: err.to_string() }),
        }
    }
    Err(GameError::InvalidCardCount(last))
}
