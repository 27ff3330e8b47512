use crate::event::GameEvent;
use crate::state::{ActionKind, Seat, SeatId, TableView};

/// 牌局与外界 (终端、脚本) 之间的全部交互。
///
/// 实现方负责解析输入，遇到无效输入时自行提示并重新询问。
/// 引擎仍会检查每个返回值，不合法的答案会以 [`GameEvent::InvalidInput`] 退回。
pub trait Frontend {
    /// 每人发牌数量，应在 3..=13 之间
    fn request_num_cards(&mut self) -> usize;

    /// 真人玩家在 `legal` 中选择一个动作
    fn request_action(&mut self, seat: &Seat, view: &TableView, legal: &[ActionKind]) -> ActionKind;

    /// 加注后的单位注额，不小于 `minimum`
    fn request_raise_amount(&mut self, minimum: u32) -> u32;

    /// 比牌对象，必须是 `candidates` 之一
    fn request_compare_target(&mut self, candidates: &[SeatId]) -> SeatId;

    /// 是否继续下一局
    fn request_continue(&mut self) -> bool;

    /// 展示一个事件，不能影响牌局状态
    fn render(&mut self, event: &GameEvent);
}
