use crate::error::{GameError, GameResult};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// --- 核心数据结构定义 ---

/// 一副牌的张数
pub const DECK_SIZE: usize = 52;

/// 花色 (Suit)
///
/// 炸金花比牌不看花色，这里的顺序只用于建牌和显示。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Suit {
    Spade,   // 黑桃 ♠
    Heart,   // 红心 ♥
    Club,    // 梅花 ♣
    Diamond, // 方块 ♦
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Club, Suit::Diamond];
}

/// 点数 (Rank)
/// 序号 0..=12 依次对应 2..A，Ord 的派生让 Ace 默认是最大的。
/// A 只在 A-2-3 这一种顺子里当作小牌。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace,
    ];

    /// 点数序号，2 为 0，A 为 12
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// 单张扑克牌 (Card)
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }
}

/// 牌型 (HandCategory)
/// 变体按从小到大排列，直接利用派生的 `Ord` 比较：
/// 豹子 > 同花顺 > 同花 > 顺子 > 对子 > 单张。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,      // 单张
    Pair = 1,          // 对子
    Straight = 2,      // 顺子
    Flush = 3,         // 同花 (金花)
    StraightFlush = 4, // 同花顺 (顺金)
    ThreeOfAKind = 5,  // 豹子
}

impl HandCategory {
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// 三张牌的牌力 (HandScore)
///
/// 字段顺序就是比较顺序：先比牌型，再按 `tiebreak` 逐个比点数。
/// 对子的 `tiebreak` 为 `[对子点数, 单张点数]`，其余牌型为三张点数从大到小。
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
pub struct HandScore {
    pub category: HandCategory,
    pub tiebreak: Vec<Rank>,
}

// --- 实现辅助功能 ---

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Suit::Spade => "♠",
            Suit::Heart => "♥",
            Suit::Club => "♣",
            Suit::Diamond => "♦",
        })
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            HandCategory::HighCard => "单张",
            HandCategory::Pair => "对子",
            HandCategory::Straight => "顺子",
            HandCategory::Flush => "金花",
            HandCategory::StraightFlush => "顺金",
            HandCategory::ThreeOfAKind => "豹子",
        })
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ranks: Vec<String> = self.tiebreak.iter().map(Rank::to_string).collect();
        write!(f, "{}({})", self.category, ranks.join(","))
    }
}

// --- 发牌 ---

/// 创建一副完整的 52 张扑克牌
fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for &suit in &Suit::ALL {
        for &rank in &Rank::ALL {
            deck.push(Card { rank, suit });
        }
    }
    deck
}

/// 洗一副新牌，按顺序切成 `num_players` 份，每份 `num_cards` 张。
///
/// 总张数超过 52 时返回 [`GameError::Dealing`]，此时没有任何筹码变动。
pub fn deal<R: Rng + ?Sized>(num_players: usize, num_cards: usize, rng: &mut R) -> GameResult<Vec<Vec<Card>>> {
    if num_cards == 0 {
        return Err(GameError::InvalidCardCount(num_cards));
    }
    let requested = num_players.saturating_mul(num_cards);
    if requested > DECK_SIZE {
        return Err(GameError::Dealing { requested, available: DECK_SIZE });
    }

    let mut deck = create_deck();
    deck.shuffle(rng);

    Ok(deck
        .chunks(num_cards)
        .take(num_players)
        .map(<[Card]>::to_vec)
        .collect())
}

// --- 牌型评估逻辑 ---

/// 评估三张牌的牌型
pub fn evaluate(hand: &[Card; 3]) -> HandScore {
    let mut ranks = [hand[0].rank, hand[1].rank, hand[2].rank];
    // 从大到小排序，相同点数一定相邻
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    let [high, mid, low] = ranks;

    let distinct = if high == low {
        1
    } else if high == mid || mid == low {
        2
    } else {
        3
    };

    let is_flush = hand.iter().all(|c| c.suit == hand[0].suit);
    // A-2-3 是唯一允许 A 当小牌的顺子，K-A-2 之类的绕圈不算
    let is_straight = distinct == 3
        && (high.ordinal() - low.ordinal() == 2 || ranks == [Rank::Ace, Rank::Three, Rank::Two]);

    let (category, tiebreak) = if distinct == 1 {
        (HandCategory::ThreeOfAKind, ranks.to_vec())
    } else if is_flush && is_straight {
        (HandCategory::StraightFlush, ranks.to_vec())
    } else if is_flush {
        (HandCategory::Flush, ranks.to_vec())
    } else if is_straight {
        (HandCategory::Straight, ranks.to_vec())
    } else if distinct == 2 {
        let (pair, single) = if high == mid { (high, low) } else { (mid, high) };
        (HandCategory::Pair, vec![pair, single])
    } else {
        (HandCategory::HighCard, ranks.to_vec())
    };

    HandScore { category, tiebreak }
}

/// 比较两手三张牌。点数完全相同即为平局，不比花色。
pub fn compare_hands(a: &[Card; 3], b: &[Card; 3]) -> Ordering {
    evaluate(a).cmp(&evaluate(b))
}

/// 按下标字典序枚举所有三张牌组合
fn three_card_combinations(cards: &[Card]) -> impl Iterator<Item = [Card; 3]> + '_ {
    let n = cards.len();
    (0..n).flat_map(move |i| {
        (i + 1..n).flat_map(move |j| (j + 1..n).map(move |k| [cards[i], cards[j], cards[k]]))
    })
}

/// 找出手牌中牌力最大的三张及其牌力，不足三张时返回 `None`。
///
/// 必须枚举全部 C(n,3) 种组合，贪心地挑大牌会拆散顺子或同花。
/// 牌力完全相同的组合保留最先枚举到的那一个。
pub fn best_hand(hand: &[Card]) -> Option<([Card; 3], HandScore)> {
    let mut best: Option<([Card; 3], HandScore)> = None;
    for combo in three_card_combinations(hand) {
        let score = evaluate(&combo);
        if best.as_ref().map_or(true, |(_, top)| score > *top) {
            best = Some((combo, score));
        }
    }
    best
}

/// 从手牌中选出最大的三张。不足三张时原样返回。
pub fn select_best_three(hand: &[Card]) -> Vec<Card> {
    match best_hand(hand) {
        Some((cards, _)) => cards.to_vec(),
        None => hand.to_vec(),
    }
}

// --- 单元测试 ---
