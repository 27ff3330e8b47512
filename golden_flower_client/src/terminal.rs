use dialoguer::{Confirm, Input, Select};
use golden_flower_core::*;
use tracing::warn;

/// 终端界面：用 dialoguer 询问真人玩家，把事件打印到标准输出。
///
/// 提示和输入校验由 dialoguer 负责，无效输入会原地重新询问。
/// 标准输入关闭后不再询问，按弃牌、不继续处理。
pub struct TerminalFrontend {
    json: bool,
    preset_cards: Option<usize>,
    names: Vec<String>,
    closed: bool,
}

impl TerminalFrontend {
    pub fn new(json: bool, preset_cards: Option<usize>) -> Self {
        TerminalFrontend { json, preset_cards, names: Vec::new(), closed: false }
    }

    fn name(&self, seat: SeatId) -> String {
        self.names.get(seat).cloned().unwrap_or_else(|| format!("{}号位", seat))
    }

    fn input_failed(&mut self, err: dialoguer::Error) {
        warn!(%err, "terminal input unavailable");
        self.closed = true;
    }

    fn cards(cards: &[Card]) -> String {
        cards.iter().map(Card::to_string).collect::<Vec<_>>().join(" ")
    }

    fn describe(&self, event: &GameEvent) -> String {
        match event {
            GameEvent::SessionStarted { num_cards, seats, .. } => {
                let chips: Vec<String> = seats.iter().map(|s| format!("{} {}", s.name, s.chips)).collect();
                format!("每人发 {} 张牌，初始筹码：{}", num_cards, chips.join("，"))
            }
            GameEvent::HandStarted { hand_number, action_order } => {
                let order: Vec<String> = action_order.iter().map(|&s| self.name(s)).collect();
                format!("\n====== 第 {} 局 ======\n行动顺序：{}", hand_number, order.join(" → "))
            }
            GameEvent::AntePosted { seat, amount, chips_left, .. } => {
                format!("{} 下底注: {}, 剩余筹码: {}", self.name(*seat), amount, chips_left)
            }
            GameEvent::CardsRevealed { cards, best, score, .. } => {
                let score = score.as_ref().map_or_else(String::new, |s| format!(" [{}]", s));
                format!("你的牌: {}\n最佳3张牌: {}{}", Self::cards(cards), Self::cards(best), score)
            }
            GameEvent::RoundStarted { round, pot, current_bet } => {
                format!("\n=== 第 {} 轮 ===\n当前底池: {}, 当前跟注金额: {}", round, pot, current_bet)
            }
            GameEvent::ActionTaken { seat, action, paid, chips_left, .. } => match action {
                PlayerAction::See | PlayerAction::Fold => format!("{} {}", self.name(*seat), action),
                PlayerAction::Compare(target) => format!(
                    "{} 与 {} 比牌，付出 {}, 剩余筹码: {}",
                    self.name(*seat), self.name(*target), paid, chips_left
                ),
                _ => format!("{} {}，付出 {}, 剩余筹码: {}", self.name(*seat), action, paid, chips_left),
            },
            GameEvent::AutoFolded { seat, needed, available } => {
                format!("{} 筹码不足 (需要 {}, 只有 {})，自动弃牌", self.name(*seat), needed, available)
            }
            GameEvent::CompareResolved { challenger, target, loser, .. } => match loser {
                Some(loser) => format!("比牌结果：{} 输了，出局", self.name(*loser)),
                None => format!("{} 与 {} 牌力相同，都留在局中", self.name(*challenger), self.name(*target)),
            },
            GameEvent::RoundFinished { round, pot, active, .. } => {
                let active: Vec<String> = active.iter().map(|&s| self.name(s)).collect();
                format!("第 {} 轮结束，底池: {}，仍在局中: {}", round, pot, active.join("，"))
            }
            GameEvent::Showdown { results } => {
                let mut lines = vec!["\n=== 比牌 ===".to_string()];
                for r in results {
                    let score = r.score.as_ref().map_or_else(String::new, |s| s.to_string());
                    lines.push(format!("{} 的牌: {}, 牌型: {}", self.name(r.seat), Self::cards(&r.cards), score));
                }
                lines.join("\n")
            }
            GameEvent::PotAwarded { pot, winners, share, remainder, remainder_to } => {
                let names: Vec<String> = winners.iter().map(|&s| self.name(s)).collect();
                let mut line = if winners.len() == 1 {
                    format!("{} 获胜，赢得底池: {}", names[0], pot)
                } else {
                    format!("{} 平分底池 {}，每人 {}", names.join("、"), pot, share)
                };
                if let Some(seat) = remainder_to {
                    line.push_str(&format!("，余下 {} 归 {}", remainder, self.name(*seat)));
                }
                line
            }
            GameEvent::HandFinished { chips, .. } => {
                let chips: Vec<String> = chips.iter().enumerate().map(|(s, c)| format!("{} {}", self.name(s), c)).collect();
                format!("本局结束，筹码：{}", chips.join("，"))
            }
            GameEvent::InvalidInput { message } => format!("无效输入：{}", message),
            GameEvent::SessionEnded { reason, hands_played, seats } => {
                let reason = match reason {
                    EndReason::SeatBusted => "有玩家输光了筹码",
                    EndReason::TooFewFunded => "付得起底注的玩家不足两人",
                    EndReason::AnteUnaffordable => "有玩家付不起底注",
                    EndReason::PlayerQuit => "你选择了结束",
                };
                let mut lines = vec![format!("\n游戏结束 ({})，共进行 {} 局", reason, hands_played)];
                for s in seats {
                    lines.push(format!("{}: {} 筹码，赢 {} 局", s.name, s.chips, s.wins));
                }
                lines.join("\n")
            }
        }
    }
}

impl Frontend for TerminalFrontend {
    fn request_num_cards(&mut self) -> usize {
        if let Some(num_cards) = self.preset_cards.take() {
            return num_cards;
        }
        if self.closed {
            return MIN_CARDS_PER_HAND;
        }
        let answer = Input::<usize>::new()
            .with_prompt(format!("请输入每人发牌数量（至少{}张，最多{}张）", MIN_CARDS_PER_HAND, MAX_CARDS_PER_HAND))
            .validate_with(|n: &usize| -> Result<(), &str> {
                match validate_card_count(*n) {
                    Ok(()) => Ok(()),
                    Err(_) => Err("请输入3到13之间的数字"),
                }
            })
            .interact_text();
        match answer {
            Ok(n) => n,
            Err(err) => {
                self.input_failed(err);
                MIN_CARDS_PER_HAND
            }
        }
    }

    fn request_action(&mut self, seat: &Seat, view: &TableView, legal: &[ActionKind]) -> ActionKind {
        if self.closed {
            return ActionKind::Fold;
        }
        if !self.json {
            println!("你的筹码: {}，底池: {}，当前注额: {}", seat.chips, view.pot, view.current_bet);
            if seat.has_seen {
                println!("你的牌: {}", Self::cards(&seat.hand));
            }
        }

        let call_cost = seat.stake_for(view.current_bet);
        let items: Vec<String> = legal
            .iter()
            .map(|kind| match kind {
                ActionKind::Call => format!("{} ({})", kind, call_cost),
                ActionKind::Raise => format!("{} (至少到 {})", kind, view.min_raise),
                ActionKind::Compare => format!("{} ({})", kind, call_cost),
                _ => kind.to_string(),
            })
            .collect();
        let prompt = if view.just_saw { "看牌后请选择" } else { "选择行动" };

        match Select::new().with_prompt(prompt).items(items.as_slice()).default(0).interact() {
            Ok(idx) => legal[idx],
            Err(err) => {
                self.input_failed(err);
                ActionKind::Fold
            }
        }
    }

    fn request_raise_amount(&mut self, minimum: u32) -> u32 {
        if self.closed {
            return minimum;
        }
        let answer = Input::<u32>::new()
            .with_prompt(format!("输入加注金额 (至少 {})", minimum))
            .validate_with(move |amount: &u32| -> Result<(), &str> {
                if *amount >= minimum { Ok(()) } else { Err("加注金额过低") }
            })
            .interact_text();
        match answer {
            Ok(amount) => amount,
            Err(err) => {
                self.input_failed(err);
                minimum
            }
        }
    }

    fn request_compare_target(&mut self, candidates: &[SeatId]) -> SeatId {
        let fallback = candidates.first().copied().unwrap_or(HUMAN_SEAT);
        if self.closed || candidates.len() <= 1 {
            return fallback;
        }
        let items: Vec<String> = candidates.iter().map(|&s| self.name(s)).collect();
        match Select::new().with_prompt("选择比牌对象").items(items.as_slice()).default(0).interact() {
            Ok(idx) => candidates[idx],
            Err(err) => {
                self.input_failed(err);
                fallback
            }
        }
    }

    fn request_continue(&mut self) -> bool {
        if self.closed {
            return false;
        }
        match Confirm::new().with_prompt("继续下一局？").default(true).interact() {
            Ok(answer) => answer,
            Err(err) => {
                self.input_failed(err);
                false
            }
        }
    }

    fn render(&mut self, event: &GameEvent) {
        if let GameEvent::SessionStarted { seats, .. } = event {
            self.names = seats.iter().map(|s| s.name.clone()).collect();
        }

        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(err) => warn!(%err, "failed to serialize event"),
            }
        } else {
            println!("{}", self.describe(event));
        }
    }
}
