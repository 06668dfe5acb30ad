//! 卡片整形：编号前缀 + 正反面对调

use crate::models::card::Card;
use crate::models::formatted_card::FormattedCard;

/// 把一张卡片整形为界面用的正反面
///
/// 有编号时在背面前加 `[编号]\n`（对调之前加）；`carry_id` 为 true 时输出带上 `id`
pub fn format_card(card: &Card, reverse: bool, carry_id: bool) -> FormattedCard {
    let front = card.front.clone();
    let back = match &card.label {
        Some(label) => format!("[{}]\n{}", label, card.back),
        None => card.back.clone(),
    };

    let (f, b) = if reverse { (back, front) } else { (front, back) };

    FormattedCard {
        f,
        b,
        id: if carry_id { card.label.clone() } else { None },
    }
}

pub fn format_cards(cards: &[&Card], reverse: bool, carry_id: bool) -> Vec<FormattedCard> {
    cards
        .iter()
        .map(|card| format_card(card, reverse, carry_id))
        .collect()
}
