use crate::card::{HandCategory, best_hand};
use crate::state::{PlayerAction, Seat, TableView};
use rand::Rng;
use rand::seq::IndexedRandom;

/// 未看牌加注时，在最小加注额之上随机多加的上限
const BLIND_RAISE_PADDING: u32 = 10;

/// 跟注成本占跟注后奖池的比例，越大越不划算
pub fn pot_odds(current_bet: u32, pot: u32) -> f64 {
    let total = pot as f64 + current_bet as f64;
    if total == 0.0 { 1.0 } else { current_bet as f64 / total }
}

/// 手牌中最大三张的牌型
pub fn hand_category(seat: &Seat) -> HandCategory {
    best_hand(&seat.hand).map_or(HandCategory::HighCard, |(_, score)| score.category)
}

/// 电脑座位的决策。
///
/// 只读取座位和桌面信息，不修改任何状态；所有随机性来自传入的 `rng`。
/// 返回的动作一定属于该座位当前的合法动作集合。
pub fn decide<R: Rng + ?Sized>(seat: &Seat, view: &TableView, rng: &mut R) -> PlayerAction {
    // 连跟注都付不起，直接弃牌
    if seat.chips < seat.stake_for(view.current_bet) {
        return PlayerAction::Fold;
    }

    let category = hand_category(seat);
    let odds = pot_odds(view.current_bet, view.pot);

    // 第一轮看牌后的强制选择
    if view.just_saw {
        return if category >= HandCategory::Flush {
            raise(seat, view, rng)
        } else if category >= HandCategory::Pair && odds < 0.3 {
            PlayerAction::Call
        } else {
            PlayerAction::Fold
        };
    }

    if view.round >= 2 {
        let compare = match category {
            HandCategory::ThreeOfAKind | HandCategory::StraightFlush => true,
            HandCategory::Flush => rng.random_bool(0.7),
            HandCategory::Straight => rng.random_bool(0.3),
            _ => false,
        };
        if compare {
            if let Some(&target) = view.opponents.choose(rng) {
                return PlayerAction::Compare(target);
            }
        }
    }

    if seat.has_seen {
        if category >= HandCategory::Flush {
            raise(seat, view, rng)
        } else if category >= HandCategory::Pair && odds < 0.25 {
            PlayerAction::Call
        } else {
            PlayerAction::Fold
        }
    } else if category >= HandCategory::StraightFlush {
        raise(seat, view, rng)
    } else if category >= HandCategory::Straight && odds < 0.3 {
        if rng.random_bool(0.5) { raise(seat, view, rng) } else { PlayerAction::Call }
    } else if view.round <= 3 && rng.random_bool(0.4) {
        PlayerAction::See
    } else if odds < 0.2 {
        PlayerAction::Call
    } else {
        PlayerAction::Fold
    }
}

/// 决定加注额，付不起最小加注时改为跟注
fn raise<R: Rng + ?Sized>(seat: &Seat, view: &TableView, rng: &mut R) -> PlayerAction {
    let affordable = seat.chips / seat.stake_multiplier();
    if affordable < view.min_raise {
        return PlayerAction::Call;
    }
    let padding = if seat.has_seen { 0 } else { rng.random_range(0..=BLIND_RAISE_PADDING) };
    PlayerAction::Raise(view.min_raise.saturating_add(padding).min(affordable))
}
