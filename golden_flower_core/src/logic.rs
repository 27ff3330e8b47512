use crate::ai;
use crate::card::best_hand;
use crate::config::GameConfig;
use crate::event::{GameEvent, ShowdownResult};
use crate::frontend::Frontend;
use crate::state::*;
use rand::Rng;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

/// 界面连续给出无效答案的上限，超过后按弃牌处理
pub const MAX_INPUT_ATTEMPTS: usize = 3;

/// 一局进行中的牌桌。
///
/// 开局时从整场游戏借出全部座位，结算后归还；这期间所有筹码、弃牌、
/// 看牌状态的修改都只经过本模块的函数。
#[derive(Debug)]
pub struct HandState<'a> {
    pub seats: &'a mut [Seat; NUM_SEATS],
    pub round: RoundState,
}

impl<'a> HandState<'a> {
    pub fn new(seats: &'a mut [Seat; NUM_SEATS], ante: u32, action_order: [SeatId; NUM_SEATS]) -> Self {
        HandState { seats, round: RoundState::new(ante, action_order) }
    }

    /// 仍在局中的座位，按行动顺序排列
    pub fn active_seats(&self) -> Vec<SeatId> {
        self.round
            .action_order
            .iter()
            .copied()
            .filter(|&id| self.seats[id].is_active())
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_active()).count()
    }

    /// 奖池加上所有座位的筹码，一局之中恒定不变
    pub fn chips_in_play(&self) -> u32 {
        self.round.pot + self.seats.iter().map(|s| s.chips).sum::<u32>()
    }

    /// 轮到 `seat_id` 行动时的桌面信息
    pub fn view_for(&self, seat_id: SeatId, just_saw: bool, config: &GameConfig) -> TableView {
        TableView {
            round: self.round.round,
            pot: self.round.pot,
            current_bet: self.round.current_bet,
            just_saw,
            min_raise: min_raise(&self.seats[seat_id], self.round.current_bet, config),
            opponents: self.active_seats().into_iter().filter(|&id| id != seat_id).collect(),
        }
    }
}

// --- 规则表 ---

/// 座位当前可选的动作
///
/// - 未看牌：看牌、跟注、加注、弃牌，第二轮起可以比牌
/// - 已看牌：跟注、加注、弃牌，第二轮起可以比牌
/// - 第一轮刚看完牌：只能跟注、加注、弃牌
pub fn legal_actions(seat: &Seat, round: u8, just_saw: bool) -> Vec<ActionKind> {
    if just_saw {
        return vec![ActionKind::Call, ActionKind::Raise, ActionKind::Fold];
    }
    let mut legal = Vec::with_capacity(5);
    if !seat.has_seen {
        legal.push(ActionKind::See);
    }
    legal.extend([ActionKind::Call, ActionKind::Raise, ActionKind::Fold]);
    if round >= 2 {
        legal.push(ActionKind::Compare);
    }
    legal
}

/// 最小加注额：未看牌在当前注额上加固定增量，看牌后至少翻倍
pub fn min_raise(seat: &Seat, current_bet: u32, config: &GameConfig) -> u32 {
    if seat.has_seen {
        current_bet.saturating_mul(2)
    } else {
        current_bet.saturating_add(config.unseen_raise_increment)
    }
}

// --- 核心动作函数 ---

/// 所有座位按行动顺序下底注。调用方需先确认每个座位都付得起。
pub fn post_antes(hand: &mut HandState, ante: u32) -> Vec<GameEvent> {
    let order = hand.round.action_order;
    let mut events = Vec::with_capacity(NUM_SEATS);
    for seat_id in order {
        let seat = &mut hand.seats[seat_id];
        let amount = ante.min(seat.chips);
        seat.chips -= amount;
        hand.round.pot += amount;
        events.push(GameEvent::AntePosted {
            seat: seat_id,
            amount,
            chips_left: seat.chips,
            pot: hand.round.pot,
        });
    }
    events
}

/// 执行单个座位的动作
///
/// 这是一局中修改状态的唯一入口：
/// - 扣除筹码，增加奖池，筹码不足时自动弃牌。
/// - 更改座位状态 (看牌、弃牌)。
/// - 更新当前注额。
/// - 比牌时比较双方最大三张，输的一方弃牌。
///
/// 已弃牌的座位调用时什么都不做。
pub fn apply_action(hand: &mut HandState, seat_id: SeatId, action: PlayerAction, config: &GameConfig) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if hand.seats[seat_id].folded {
        return events;
    }

    match action {
        PlayerAction::See => {
            if hand.seats[seat_id].has_seen {
                return events;
            }
            hand.seats[seat_id].has_seen = true;
            events.push(action_taken(hand, seat_id, action, 0));
            if hand.seats[seat_id].is_human() {
                events.push(reveal(&hand.seats[seat_id]));
            }
        }
        PlayerAction::Call => {
            let stake = hand.seats[seat_id].stake_for(hand.round.current_bet);
            if pay(hand, seat_id, stake, &mut events) {
                events.push(action_taken(hand, seat_id, action, stake));
            }
        }
        PlayerAction::Raise(bet) => {
            let bet = bet.max(min_raise(&hand.seats[seat_id], hand.round.current_bet, config));
            let stake = hand.seats[seat_id].stake_for(bet);
            if pay(hand, seat_id, stake, &mut events) {
                hand.round.current_bet = bet;
                events.push(action_taken(hand, seat_id, PlayerAction::Raise(bet), stake));
            }
        }
        PlayerAction::Fold => {
            hand.seats[seat_id].folded = true;
            events.push(action_taken(hand, seat_id, action, 0));
        }
        PlayerAction::Compare(target) => compare(hand, seat_id, target, &mut events),
    }

    debug!(seat = seat_id, action = %action, pot = hand.round.pot, current_bet = hand.round.current_bet, "action applied");
    events
}

/// 从座位扣款进奖池。筹码不足时自动弃牌并返回 `false`。
fn pay(hand: &mut HandState, seat_id: SeatId, amount: u32, events: &mut Vec<GameEvent>) -> bool {
    let seat = &mut hand.seats[seat_id];
    if seat.chips < amount {
        auto_fold(seat, amount, events);
        return false;
    }
    seat.chips -= amount;
    hand.round.pot += amount;
    true
}

fn auto_fold(seat: &mut Seat, needed: u32, events: &mut Vec<GameEvent>) {
    warn!(seat = seat.id, needed, available = seat.chips, "insufficient chips, folding");
    seat.folded = true;
    events.push(GameEvent::AutoFolded { seat: seat.id, needed, available: seat.chips });
}

/// 比牌：双方各付一注，牌小的一方弃牌，完全相同则都留下。
/// 任一方付不起时该方弃牌，比牌取消，另一方不付钱。
fn compare(hand: &mut HandState, challenger: SeatId, target: SeatId, events: &mut Vec<GameEvent>) {
    if target == challenger || target >= NUM_SEATS || hand.seats[target].folded {
        warn!(challenger, target, "compare target is not an active opponent");
        return;
    }

    let current_bet = hand.round.current_bet;
    let challenger_stake = hand.seats[challenger].stake_for(current_bet);
    let target_stake = hand.seats[target].stake_for(current_bet);

    if hand.seats[challenger].chips < challenger_stake {
        auto_fold(&mut hand.seats[challenger], challenger_stake, events);
        return;
    }
    if hand.seats[target].chips < target_stake {
        auto_fold(&mut hand.seats[target], target_stake, events);
        return;
    }

    pay(hand, challenger, challenger_stake, events);
    pay(hand, target, target_stake, events);
    events.push(action_taken(hand, challenger, PlayerAction::Compare(target), challenger_stake));

    let challenger_score = best_hand(&hand.seats[challenger].hand).map(|(_, score)| score);
    let target_score = best_hand(&hand.seats[target].hand).map(|(_, score)| score);
    let loser = match challenger_score.cmp(&target_score) {
        Ordering::Greater => Some(target),
        Ordering::Less => Some(challenger),
        Ordering::Equal => None,
    };
    if let Some(loser) = loser {
        hand.seats[loser].folded = true;
    }

    debug!(challenger, target, ?loser, "compare resolved");
    events.push(GameEvent::CompareResolved { challenger, target, target_paid: target_stake, loser });
}

fn action_taken(hand: &HandState, seat_id: SeatId, action: PlayerAction, paid: u32) -> GameEvent {
    GameEvent::ActionTaken {
        seat: seat_id,
        action,
        paid,
        chips_left: hand.seats[seat_id].chips,
        pot: hand.round.pot,
    }
}

fn reveal(seat: &Seat) -> GameEvent {
    let best = best_hand(&seat.hand);
    GameEvent::CardsRevealed {
        seat: seat.id,
        cards: seat.hand.clone(),
        best: best.as_ref().map_or_else(|| seat.hand.clone(), |(cards, _)| cards.to_vec()),
        score: best.map(|(_, score)| score),
    }
}

// --- 下注轮驱动 ---

/// 进行最多 `max_rounds` 轮下注，只剩一个座位时提前结束
pub fn play_betting_rounds<F, R>(hand: &mut HandState, config: &GameConfig, frontend: &mut F, rng: &mut R)
where
    F: Frontend + ?Sized,
    R: Rng + ?Sized,
{
    for round in 1..=config.max_rounds {
        if hand.active_count() <= 1 {
            break;
        }
        hand.round.round = round;
        hand.seats.iter_mut().for_each(|seat| seat.has_acted = false);
        frontend.render(&GameEvent::RoundStarted {
            round,
            pot: hand.round.pot,
            current_bet: hand.round.current_bet,
        });

        let order = hand.round.action_order;
        for seat_id in order {
            if hand.active_count() <= 1 {
                break;
            }
            if hand.seats[seat_id].folded {
                continue;
            }
            take_turn(hand, seat_id, config, frontend, rng);
        }

        frontend.render(&GameEvent::RoundFinished {
            round,
            pot: hand.round.pot,
            current_bet: hand.round.current_bet,
            active: hand.active_seats(),
        });
    }
}

/// 一个座位的完整回合。第一轮看牌后还要再做一次跟注、加注或弃牌的选择，
/// 之后的轮次看牌即结束本回合。
fn take_turn<F, R>(hand: &mut HandState, seat_id: SeatId, config: &GameConfig, frontend: &mut F, rng: &mut R)
where
    F: Frontend + ?Sized,
    R: Rng + ?Sized,
{
    let action = choose_action(hand, seat_id, false, config, frontend, rng);
    forward(frontend, apply_action(hand, seat_id, action, config));

    if action == PlayerAction::See && hand.round.round == 1 && hand.seats[seat_id].is_active() {
        let follow_up = choose_action(hand, seat_id, true, config, frontend, rng);
        forward(frontend, apply_action(hand, seat_id, follow_up, config));
    }

    hand.seats[seat_id].has_acted = true;
}

/// 向真人界面或电脑策略要一个合法动作
fn choose_action<F, R>(
    hand: &HandState,
    seat_id: SeatId,
    just_saw: bool,
    config: &GameConfig,
    frontend: &mut F,
    rng: &mut R,
) -> PlayerAction
where
    F: Frontend + ?Sized,
    R: Rng + ?Sized,
{
    let seat = &hand.seats[seat_id];
    let legal = legal_actions(seat, hand.round.round, just_saw);
    let view = hand.view_for(seat_id, just_saw, config);

    if !seat.is_human() {
        let action = ai::decide(seat, &view, rng);
        if legal.contains(&action.kind()) {
            return action;
        }
        warn!(seat = seat_id, action = %action, "policy chose an illegal action, folding");
        return PlayerAction::Fold;
    }

    for _ in 0..MAX_INPUT_ATTEMPTS {
        let kind = frontend.request_action(seat, &view, &legal);
        if !legal.contains(&kind) {
            reject(frontend, format!("现在不能{}", kind));
            continue;
        }
        match kind {
            ActionKind::See => return PlayerAction::See,
            ActionKind::Call => return PlayerAction::Call,
            ActionKind::Fold => return PlayerAction::Fold,
            ActionKind::Raise => {
                let bet = frontend.request_raise_amount(view.min_raise);
                if bet < view.min_raise {
                    reject(frontend, format!("加注至少要到 {}", view.min_raise));
                    continue;
                }
                return PlayerAction::Raise(bet);
            }
            ActionKind::Compare => {
                let target = frontend.request_compare_target(&view.opponents);
                if !view.opponents.contains(&target) {
                    reject(frontend, format!("{} 号位不能作为比牌对象", target));
                    continue;
                }
                return PlayerAction::Compare(target);
            }
        }
    }

    warn!(seat = seat_id, "too many invalid answers, folding");
    PlayerAction::Fold
}

fn reject<F: Frontend + ?Sized>(frontend: &mut F, message: String) {
    warn!(%message, "rejected frontend input");
    frontend.render(&GameEvent::InvalidInput { message });
}

fn forward<F: Frontend + ?Sized>(frontend: &mut F, events: Vec<GameEvent>) {
    for event in &events {
        frontend.render(event);
    }
}

// --- 结算 ---

/// 结算奖池
///
/// - 只剩一个座位时独得奖池。
/// - 否则所有在局座位摊牌，最大三张相同的座位平分奖池，
///   除不尽的余数给行动顺序中最靠前的赢家。
pub fn settle(hand: &mut HandState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let active = hand.active_seats();

    let winners = if active.len() <= 1 {
        active
    } else {
        let results: Vec<ShowdownResult> = active
            .iter()
            .map(|&id| {
                let seat = &hand.seats[id];
                let best = best_hand(&seat.hand);
                ShowdownResult {
                    seat: id,
                    cards: best.as_ref().map_or_else(|| seat.hand.clone(), |(cards, _)| cards.to_vec()),
                    score: best.map(|(_, score)| score),
                }
            })
            .collect();

        let top = results.iter().map(|r| r.score.clone()).max().flatten();
        let winners: Vec<SeatId> = results.iter().filter(|r| r.score == top).map(|r| r.seat).collect();
        events.push(GameEvent::Showdown { results });
        winners
    };

    if let Some(event) = distribute_pot(hand, &winners) {
        events.push(event);
    }
    events
}

/// 将奖池分配给赢家
fn distribute_pot(hand: &mut HandState, winners: &[SeatId]) -> Option<GameEvent> {
    if winners.is_empty() {
        warn!(pot = hand.round.pot, "no seat left to take the pot");
        return None;
    }

    let pot = hand.round.pot;
    let share = pot / winners.len() as u32;
    let remainder = pot % winners.len() as u32;

    for (i, &winner) in winners.iter().enumerate() {
        let seat = &mut hand.seats[winner];
        seat.chips += share + if i == 0 { remainder } else { 0 };
        seat.wins += 1;
    }
    hand.round.pot = 0;

    info!(pot, ?winners, share, remainder, "pot distributed");
    Some(GameEvent::PotAwarded {
        pot,
        winners: winners.to_vec(),
        share,
        remainder,
        remainder_to: (remainder > 0).then(|| winners[0]),
    })
}

// --- 单元测试 ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Rank, Suit};
    use crate::frontend::testing::ScriptedFrontend;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use Rank::*;
    use Suit::*;

    type Hand3 = [(Rank, Suit); 3];

    const LEOPARD: Hand3 = [(Nine, Spade), (Nine, Heart), (Nine, Club)];
    const FLUSH: Hand3 = [(Two, Club), (Seven, Club), (Jack, Club)];
    const PAIR: Hand3 = [(Five, Club), (Five, Heart), (Jack, Spade)];
    const JUNK: Hand3 = [(Two, Diamond), (Seven, Heart), (Jack, Diamond)];
    const JUNK_TWIN: Hand3 = [(Two, Heart), (Seven, Spade), (Jack, Heart)];
    const WEAK: Hand3 = [(Ten, Spade), (Six, Club), (Two, Club)];

    // 辅助函数：创建用于测试的座位
    fn setup_seats(hands: [Hand3; NUM_SEATS], chips: u32) -> [Seat; NUM_SEATS] {
        std::array::from_fn(|id| {
            let mut seat = Seat::new(id, format!("Seat_{}", id), chips);
            seat.hand = hands[id].iter().map(|&(r, s)| Card::new(r, s)).collect();
            seat
        })
    }

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_antes_fill_pot() {
        let mut seats = setup_seats([JUNK, PAIR, FLUSH, LEOPARD], 100);
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        let events = post_antes(&mut hand, 10);

        assert_eq!(events.len(), 4);
        assert_eq!(hand.round.pot, 40);
        assert_eq!(hand.round.current_bet, 10);
        assert!(hand.seats.iter().all(|s| s.chips == 90));
        assert_eq!(hand.chips_in_play(), 400);
    }

    #[test]
    fn test_legal_action_table() {
        use ActionKind::*;
        let mut seat = Seat::new(1, "电脑1", 100);
        assert_eq!(legal_actions(&seat, 1, false), vec![See, Call, Raise, Fold]);
        assert_eq!(legal_actions(&seat, 2, false), vec![See, Call, Raise, Fold, Compare]);
        seat.has_seen = true;
        assert_eq!(legal_actions(&seat, 1, false), vec![Call, Raise, Fold]);
        assert_eq!(legal_actions(&seat, 3, false), vec![Call, Raise, Fold, Compare]);
        assert_eq!(legal_actions(&seat, 1, true), vec![Call, Raise, Fold]);
    }

    #[test]
    fn test_see_is_idempotent() {
        let mut seats = setup_seats([JUNK, PAIR, FLUSH, LEOPARD], 100);
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);

        let first = apply_action(&mut hand, 0, PlayerAction::See, &config());
        assert!(hand.seats[0].has_seen);
        assert!(matches!(first[1], GameEvent::CardsRevealed { seat: 0, .. }));

        let before = hand.seats.clone();
        let second = apply_action(&mut hand, 0, PlayerAction::See, &config());
        assert!(second.is_empty());
        assert_eq!(*hand.seats, before);
        assert_eq!(hand.round.pot, 0);
    }

    #[test]
    fn test_ai_see_reveals_nothing() {
        let mut seats = setup_seats([JUNK, PAIR, FLUSH, LEOPARD], 100);
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        let events = apply_action(&mut hand, 2, PlayerAction::See, &config());
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::ActionTaken { seat: 2, paid: 0, .. }));
    }

    #[test]
    fn test_call_and_raise_stakes() {
        let mut seats = setup_seats([JUNK, PAIR, FLUSH, LEOPARD], 200);
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        let cfg = config();

        apply_action(&mut hand, 0, PlayerAction::Call, &cfg);
        assert_eq!((hand.seats[0].chips, hand.round.pot), (190, 10));

        hand.seats[1].has_seen = true;
        apply_action(&mut hand, 1, PlayerAction::Call, &cfg);
        assert_eq!(hand.seats[1].chips, 180);

        // 未看牌加注：至少 10 + 10
        apply_action(&mut hand, 2, PlayerAction::Raise(25), &cfg);
        assert_eq!((hand.seats[2].chips, hand.round.current_bet), (175, 25));

        // 看牌后加注至少翻倍，给少了按最小额处理，实付再翻倍
        apply_action(&mut hand, 1, PlayerAction::Raise(30), &cfg);
        assert_eq!(hand.round.current_bet, 50);
        assert_eq!(hand.seats[1].chips, 80);
        assert_eq!(hand.chips_in_play(), 800);
    }

    #[test]
    fn test_largest_stacks_do_not_overflow_pot() {
        let cfg = GameConfig { starting_chips: u32::MAX / NUM_SEATS as u32, ..config() };
        assert!(cfg.validate().is_ok());
        let total = cfg.starting_chips * NUM_SEATS as u32;

        let mut seats = setup_seats([JUNK, PAIR, FLUSH, LEOPARD], cfg.starting_chips);
        let mut hand = HandState::new(&mut seats, cfg.ante, [0, 1, 2, 3]);
        post_antes(&mut hand, cfg.ante);
        apply_action(&mut hand, 0, PlayerAction::Raise(1_000_000_000), &cfg);
        for seat_id in 1..NUM_SEATS {
            apply_action(&mut hand, seat_id, PlayerAction::Call, &cfg);
        }
        assert_eq!(hand.round.pot, 4_000_000_040);
        assert_eq!(hand.chips_in_play(), total);

        settle(&mut hand);
        assert_eq!(hand.round.pot, 0);
        assert_eq!(hand.seats.iter().map(|s| s.chips).sum::<u32>(), total);
        assert_eq!(hand.seats[3].wins, 1);
    }

    #[test]
    fn test_call_without_chips_folds() {
        let mut seats = setup_seats([JUNK, PAIR, FLUSH, LEOPARD], 100);
        seats[3].chips = 15;
        seats[3].has_seen = true;
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        let total = hand.chips_in_play();

        let events = apply_action(&mut hand, 3, PlayerAction::Call, &config());
        assert!(hand.seats[3].folded);
        assert_eq!(hand.seats[3].chips, 15);
        assert_eq!(events, vec![GameEvent::AutoFolded { seat: 3, needed: 20, available: 15 }]);
        assert_eq!(hand.chips_in_play(), total);

        // 弃牌后的座位不能再行动
        assert!(apply_action(&mut hand, 3, PlayerAction::Call, &config()).is_empty());
    }

    #[test]
    fn test_raise_without_chips_folds() {
        let mut seats = setup_seats([JUNK, PAIR, FLUSH, LEOPARD], 100);
        seats[1].chips = 30;
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        apply_action(&mut hand, 1, PlayerAction::Raise(40), &config());
        assert!(hand.seats[1].folded);
        assert_eq!(hand.round.current_bet, 10);
        assert_eq!(hand.round.pot, 0);
    }

    #[test]
    fn test_compare_folds_weaker_seat() {
        let mut seats = setup_seats([JUNK, PAIR, FLUSH, LEOPARD], 100);
        seats[2].has_seen = true;
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);

        let events = apply_action(&mut hand, 1, PlayerAction::Compare(2), &config());
        assert!(hand.seats[1].folded);
        assert!(hand.seats[2].is_active());
        assert_eq!(hand.seats[1].chips, 90);
        assert_eq!(hand.seats[2].chips, 80);
        assert_eq!(hand.round.pot, 30);
        assert_eq!(
            events.last(),
            Some(&GameEvent::CompareResolved { challenger: 1, target: 2, target_paid: 20, loser: Some(1) })
        );
    }

    #[test]
    fn test_compare_tie_keeps_both() {
        let mut seats = setup_seats([JUNK, JUNK_TWIN, FLUSH, LEOPARD], 100);
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        apply_action(&mut hand, 0, PlayerAction::Compare(1), &config());
        assert!(hand.seats[0].is_active() && hand.seats[1].is_active());
        assert_eq!(hand.round.pot, 20);
    }

    #[test]
    fn test_compare_aborts_when_target_short() {
        let mut seats = setup_seats([JUNK, PAIR, FLUSH, LEOPARD], 100);
        seats[3].chips = 5;
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        let events = apply_action(&mut hand, 0, PlayerAction::Compare(3), &config());

        assert!(hand.seats[3].folded);
        assert!(hand.seats[0].is_active());
        assert_eq!(hand.seats[0].chips, 100);
        assert_eq!(hand.round.pot, 0);
        assert_eq!(events, vec![GameEvent::AutoFolded { seat: 3, needed: 10, available: 5 }]);
    }

    #[test]
    fn test_compare_against_folded_seat_is_ignored() {
        let mut seats = setup_seats([JUNK, PAIR, FLUSH, LEOPARD], 100);
        seats[2].folded = true;
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        assert!(apply_action(&mut hand, 0, PlayerAction::Compare(2), &config()).is_empty());
        assert!(apply_action(&mut hand, 0, PlayerAction::Compare(0), &config()).is_empty());
        assert_eq!(hand.round.pot, 0);
    }

    #[test]
    fn test_showdown_split_between_equal_hands() {
        let mut seats = setup_seats([JUNK, JUNK_TWIN, LEOPARD, WEAK], 100);
        seats[2].folded = true;
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        hand.round.pot = 90;

        let events = settle(&mut hand);
        assert_eq!(hand.seats[0].chips, 145);
        assert_eq!(hand.seats[1].chips, 145);
        assert_eq!(hand.seats[3].chips, 100);
        assert_eq!(hand.round.pot, 0);
        assert!(matches!(&events[0], GameEvent::Showdown { results } if results.len() == 3));
        assert_eq!((hand.seats[0].wins, hand.seats[1].wins, hand.seats[3].wins), (1, 1, 0));
    }

    #[test]
    fn test_split_remainder_goes_to_first_winner_in_order() {
        let mut seats = setup_seats([JUNK, JUNK_TWIN, LEOPARD, WEAK], 100);
        seats[2].folded = true;
        seats[3].folded = true;
        let mut hand = HandState::new(&mut seats, 10, [1, 2, 3, 0]);
        hand.round.pot = 91;

        let events = settle(&mut hand);
        assert_eq!(hand.seats[1].chips, 146);
        assert_eq!(hand.seats[0].chips, 145);
        assert_eq!(
            events.last(),
            Some(&GameEvent::PotAwarded { pot: 91, winners: vec![1, 0], share: 45, remainder: 1, remainder_to: Some(1) })
        );
    }

    #[test]
    fn test_last_seat_takes_pot() {
        let mut seats = setup_seats([JUNK, PAIR, FLUSH, LEOPARD], 100);
        for id in [0, 2, 3] {
            seats[id].folded = true;
        }
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        hand.round.pot = 70;

        let events = settle(&mut hand);
        assert_eq!(hand.seats[1].chips, 170);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameEvent::PotAwarded { share: 70, .. }));
    }

    #[test]
    fn test_human_forced_choice_after_seeing_in_round_one() {
        use ActionKind::*;
        let mut seats = setup_seats([PAIR, JUNK, JUNK_TWIN, JUNK], 100);
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        let mut frontend = ScriptedFrontend::new(3).with_actions(&[See, Call]);
        let mut rng = StdRng::seed_from_u64(1);

        take_turn(&mut hand, 0, &config(), &mut frontend, &mut rng);
        assert_eq!(frontend.legal_seen, vec![vec![See, Call, Raise, Fold], vec![Call, Raise, Fold]]);
        assert!(hand.seats[0].has_seen && hand.seats[0].has_acted);
        assert_eq!(hand.seats[0].chips, 80);
    }

    #[test]
    fn test_human_see_in_later_round_ends_turn() {
        use ActionKind::*;
        let mut seats = setup_seats([PAIR, JUNK, JUNK_TWIN, JUNK], 100);
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        hand.round.round = 2;
        let mut frontend = ScriptedFrontend::new(3).with_actions(&[See, Call]);
        let mut rng = StdRng::seed_from_u64(1);

        take_turn(&mut hand, 0, &config(), &mut frontend, &mut rng);
        assert_eq!(frontend.legal_seen.len(), 1);
        assert_eq!(hand.seats[0].chips, 100);
        assert_eq!(frontend.actions, vec![Call]);
    }

    #[test]
    fn test_invalid_human_answers_are_rejected() {
        use ActionKind::*;
        let mut seats = setup_seats([PAIR, JUNK, JUNK_TWIN, JUNK], 100);
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        let mut frontend = ScriptedFrontend::new(3).with_actions(&[Compare, Raise, Raise]);
        frontend.raises.extend([15, 35]);
        let mut rng = StdRng::seed_from_u64(1);

        take_turn(&mut hand, 0, &config(), &mut frontend, &mut rng);
        let rejected = frontend.events.iter().filter(|e| matches!(e, GameEvent::InvalidInput { .. })).count();
        assert_eq!(rejected, 2);
        assert_eq!(hand.round.current_bet, 35);
        assert_eq!(hand.seats[0].chips, 65);

        // 连续无效答案过多时弃牌
        let mut frontend = ScriptedFrontend::new(3).with_actions(&[Compare, Compare, Compare, Call]);
        take_turn(&mut hand, 0, &config(), &mut frontend, &mut rng);
        assert!(hand.seats[0].folded);
    }

    #[test]
    fn test_human_compare_target() {
        use ActionKind::*;
        let mut seats = setup_seats([LEOPARD, JUNK, JUNK_TWIN, PAIR], 100);
        seats[1].folded = true;
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        hand.round.round = 2;
        let mut frontend = ScriptedFrontend::new(3).with_actions(&[Compare, Compare]);
        frontend.targets.extend([1, 3]);
        let mut rng = StdRng::seed_from_u64(1);

        take_turn(&mut hand, 0, &config(), &mut frontend, &mut rng);
        assert!(hand.seats[3].folded);
        assert!(hand.seats[0].is_active());
        assert_eq!(hand.round.pot, 20);
    }

    #[test]
    fn test_betting_rounds_conserve_chips() {
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut seats = setup_seats([PAIR, JUNK, FLUSH, LEOPARD], 100);
            let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
            post_antes(&mut hand, 10);
            let total = hand.chips_in_play();
            let mut frontend = ScriptedFrontend::new(3).with_actions(&[ActionKind::Call; 5]);

            play_betting_rounds(&mut hand, &config(), &mut frontend, &mut rng);
            assert_eq!(hand.chips_in_play(), total);
            assert!(hand.active_count() >= 1);
            assert!(hand.round.round <= 5);
            assert!(hand.round.current_bet >= 10);

            settle(&mut hand);
            assert_eq!(hand.round.pot, 0);
            assert_eq!(hand.seats.iter().map(|s| s.chips).sum::<u32>(), total);
        }
    }

    #[test]
    fn test_lone_seat_ends_betting_immediately() {
        let mut seats = setup_seats([PAIR, JUNK, FLUSH, LEOPARD], 100);
        for id in 1..NUM_SEATS {
            seats[id].folded = true;
        }
        let mut hand = HandState::new(&mut seats, 10, [0, 1, 2, 3]);
        let mut frontend = ScriptedFrontend::new(3);
        play_betting_rounds(&mut hand, &config(), &mut frontend, &mut StdRng::seed_from_u64(0));
        assert!(frontend.events.is_empty());
        assert!(frontend.legal_seen.is_empty());
    }
}
