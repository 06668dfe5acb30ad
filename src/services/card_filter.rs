//! 编号范围 + 归档筛选
//!
//! 只做筛选，保持原有顺序，不修改卡片

use crate::models::card::Card;
use std::collections::HashSet;

/// 卡片是否落在编号范围内
///
/// 只有数字编号参与比较（两端都包含）；字符串编号或没有编号的卡片一律通过
pub fn in_range(card: &Card, start: f64, end: f64) -> bool {
    match card.range_key.as_ref().and_then(|id| id.as_f64()) {
        Some(id) => start <= id && id <= end,
        None => true,
    }
}

/// 按编号范围筛选
pub fn filter_by_range(cards: &[Card], start: f64, end: f64) -> Vec<&Card> {
    cards.iter().filter(|c| in_range(c, start, end)).collect()
}

/// 按编号范围筛选，并排除已归档的卡片
pub fn filter_cards<'a>(
    cards: &'a [Card],
    start: f64,
    end: f64,
    archived: &HashSet<String>,
) -> Vec<&'a Card> {
    cards
        .iter()
        .filter(|c| !archived.contains(c.archive_key()))
        .filter(|c| in_range(c, start, end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::parse_cards;

    fn sample_cards() -> Vec<Card> {
        parse_cards(
            br#"[
                {"n": 1, "f": "A", "b": "X"},
                {"n": 2, "f": "B", "b": "Y"},
                {"n": "3-1", "f": "C", "b": "Z"},
                {"number": 5, "numberText": "5", "frontText": "D", "backText": "W"},
                {"f": "E", "b": "V"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_range_is_inclusive() {
        let cards = sample_cards();
        let fronts: Vec<&str> = filter_by_range(&cards, 1.0, 2.0)
            .iter()
            .map(|c| c.front.as_str())
            .collect();
        assert_eq!(fronts, vec!["A", "B", "C", "E"]);
    }

    #[test]
    fn test_text_ids_always_pass() {
        let cards = sample_cards();
        let filtered = filter_by_range(&cards, 100.0, 200.0);
        let fronts: Vec<&str> = filtered.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, vec!["C", "E"]);
    }

    #[test]
    fn test_numeric_ids_respect_bounds() {
        let cards = sample_cards();
        for (start, end) in [(0.0, 0.0), (1.0, 1.0), (2.0, 5.0), (5.0, 1.0), (-10.0, 10.0)] {
            for card in filter_by_range(&cards, start, end) {
                if let Some(id) = card.range_key.as_ref().and_then(|id| id.as_f64()) {
                    assert!(start <= id && id <= end, "{} 不在 [{}, {}]", id, start, end);
                }
            }
        }
    }

    #[test]
    fn test_archived_cards_excluded() {
        let cards = sample_cards();
        let archived: HashSet<String> = ["1", "3-1", "5"].iter().map(|s| s.to_string()).collect();
        let filtered = filter_cards(&cards, 0.0, 10.0, &archived);
        let fronts: Vec<&str> = filtered.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, vec!["B", "E"]);
        for card in filtered {
            assert!(!archived.contains(card.archive_key()));
        }
    }

    #[test]
    fn test_integral_float_id_matches_archive_entry() {
        let cards = parse_cards(br#"[{"n": 1.0, "f": "A", "b": "X"}, {"n": 2, "f": "B", "b": "Y"}]"#).unwrap();
        let archived: HashSet<String> = ["1".to_string()].into_iter().collect();
        let filtered = filter_cards(&cards, 0.0, 10.0, &archived);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].front, "B");
    }

    #[test]
    fn test_empty_archive_key_can_be_archived() {
        let cards = sample_cards();
        let archived: HashSet<String> = [String::new()].into_iter().collect();
        let filtered = filter_cards(&cards, 0.0, 10.0, &archived);
        assert!(filtered.iter().all(|c| c.label.is_some()));
        assert_eq!(filtered.len(), 4);
    }
}
