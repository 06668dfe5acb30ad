use serde::{Deserialize, Serialize};
use std::fmt;

/// 卡片编号：数字或不透明字符串（历史类题库会出现 "1-1" 这样的编号）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardId {
    Number(serde_json::Number),
    Text(String),
}

impl CardId {
    /// 数字编号的数值，字符串编号返回 None
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CardId::Number(n) => n.as_f64(),
            CardId::Text(_) => None,
        }
    }

    /// 0 和空字符串视为"没有编号"
    pub fn is_truthy(&self) -> bool {
        match self {
            CardId::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            CardId::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardId::Number(n) => write!(f, "{}", number_to_string(n)),
            CardId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// 按 JavaScript 的规则把数字转成字符串：整数值的浮点数不带小数部分（`1.0` → `"1"`）
pub fn number_to_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(v) if v == 0.0 => "0".to_string(),
        Some(v) if v.fract() == 0.0 && v.abs() < 1e21 => format!("{:.0}", v),
        Some(v) => v.to_string(),
        None => n.to_string(),
    }
}

// 文本字段可能是字符串、数字或布尔值，统一转成字符串；null 视为缺失
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(number_to_string(&n)),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }))
}

/// JSON 中的原始卡片记录
///
/// 同时兼容精简键（`n`/`f`/`b`）和旧键（`number`/`numberText`/`frontText`/`backText`）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<CardId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<CardId>,
    #[serde(
        default,
        rename = "numberText",
        skip_serializing_if = "Option::is_none"
    )]
    pub number_text: Option<CardId>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub f: Option<String>,
    #[serde(
        default,
        rename = "frontText",
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub front_text: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub b: Option<String>,
    #[serde(
        default,
        rename = "backText",
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub back_text: Option<String>,
}

/// 归一化后的卡片
///
/// 解析完成后立刻从 [`CardRecord`] 转换而来，之后的流程不再关心别名
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// 范围筛选用的编号：优先 `n`，否则 `number`
    pub range_key: Option<CardId>,
    /// 显示用的编号：`n`、`numberText`、`number` 中第一个非空值
    pub label: Option<String>,
    pub front: String,
    pub back: String,
}

impl Card {
    /// 归档列表中用于比对的编号字符串
    pub fn archive_key(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}

impl From<CardRecord> for Card {
    fn from(record: CardRecord) -> Self {
        let range_key = record.n.clone().or_else(|| record.number.clone());

        let label = [&record.n, &record.number_text, &record.number]
            .into_iter()
            .flatten()
            .find(|id| id.is_truthy())
            .map(|id| id.to_string());

        Self {
            range_key,
            label,
            front: first_non_empty(record.f, record.front_text),
            back: first_non_empty(record.b, record.back_text),
        }
    }
}

fn first_non_empty(preferred: Option<String>, legacy: Option<String>) -> String {
    preferred
        .filter(|s| !s.is_empty())
        .or(legacy)
        .unwrap_or_default()
}

/// 解析题库 JSON 并归一化
pub fn parse_cards(json: &[u8]) -> Result<Vec<Card>, serde_json::Error> {
    let records: Vec<CardRecord> = serde_json::from_slice(json)?;
    Ok(records.into_iter().map(Card::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(json: &str) -> Card {
        let record: CardRecord = serde_json::from_str(json).unwrap();
        Card::from(record)
    }

    #[test]
    fn test_compact_keys_preferred() {
        let c = card(r#"{"n": 3, "number": 9, "f": "apple", "frontText": "old", "b": "りんご", "backText": "古い"}"#);
        assert_eq!(c.range_key, Some(CardId::Number(3.into())));
        assert_eq!(c.label.as_deref(), Some("3"));
        assert_eq!(c.front, "apple");
        assert_eq!(c.back, "りんご");
    }

    #[test]
    fn test_legacy_keys_fallback() {
        let c = card(r#"{"number": 12, "numberText": "12-a", "frontText": "dog", "backText": "犬"}"#);
        // 范围筛选用 number，显示用 numberText
        assert_eq!(c.range_key, Some(CardId::Number(12.into())));
        assert_eq!(c.label.as_deref(), Some("12-a"));
        assert_eq!(c.front, "dog");
        assert_eq!(c.back, "犬");
        assert_eq!(c.archive_key(), "12-a");
    }

    #[test]
    fn test_text_id() {
        let c = card(r#"{"n": "1-1", "f": "鎌倉幕府", "b": "1185"}"#);
        assert_eq!(c.range_key, Some(CardId::Text("1-1".to_string())));
        assert_eq!(c.range_key.as_ref().and_then(CardId::as_f64), None);
        assert_eq!(c.label.as_deref(), Some("1-1"));
    }

    #[test]
    fn test_zero_id_has_no_label() {
        let c = card(r#"{"n": 0, "f": "zero", "b": "零"}"#);
        assert_eq!(c.range_key, Some(CardId::Number(0.into())));
        assert_eq!(c.label, None);
        assert_eq!(c.archive_key(), "");
    }

    #[test]
    fn test_empty_compact_text_falls_back() {
        let c = card(r#"{"f": "", "frontText": "legacy front"}"#);
        assert_eq!(c.front, "legacy front");
        assert_eq!(c.back, "");
        assert_eq!(c.range_key, None);
        assert_eq!(c.label, None);
    }

    #[test]
    fn test_null_alias_treated_as_absent() {
        let c = card(r#"{"n": null, "number": 4, "f": "a", "b": "b"}"#);
        assert_eq!(c.range_key, Some(CardId::Number(4.into())));
        assert_eq!(c.label.as_deref(), Some("4"));
    }

    #[test]
    fn test_float_id_display() {
        let c = card(r#"{"n": 2.5, "f": "a", "b": "b"}"#);
        assert_eq!(c.label.as_deref(), Some("2.5"));
    }

    #[test]
    fn test_integral_float_id_renders_like_integer() {
        let c = card(r#"{"n": 1.0, "f": "a", "b": "b"}"#);
        assert_eq!(c.label.as_deref(), Some("1"));
        assert_eq!(c.archive_key(), "1");
        assert_eq!(c.range_key.as_ref().and_then(CardId::as_f64), Some(1.0));

        let c = card(r#"{"number": -0.0, "numberText": "", "f": "a", "b": "b"}"#);
        assert_eq!(c.label, None);
    }

    #[test]
    fn test_number_to_string() {
        let n = |v: f64| serde_json::Number::from_f64(v).unwrap();
        assert_eq!(number_to_string(&n(3.0)), "3");
        assert_eq!(number_to_string(&n(2.5)), "2.5");
        assert_eq!(number_to_string(&n(-7.0)), "-7");
        assert_eq!(number_to_string(&n(-0.0)), "0");
        assert_eq!(number_to_string(&12u64.into()), "12");
    }

    #[test]
    fn test_scalar_text_fields_are_stringified() {
        let cards = parse_cards(
            r#"[
                {"n": "1-1", "f": "Kamakura", "b": 1185},
                {"n": 2, "f": "ok", "b": "ok"},
                {"number": 3, "frontText": true, "backText": 0.5},
                {"n": 4, "f": null, "frontText": "legacy", "b": 7.0}
            ]"#
            .as_bytes(),
        )
        .unwrap();

        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].back, "1185");
        assert_eq!(cards[1].back, "ok");
        assert_eq!(cards[2].front, "true");
        assert_eq!(cards[2].back, "0.5");
        assert_eq!(cards[3].front, "legacy");
        assert_eq!(cards[3].back, "7");
    }

    #[test]
    fn test_parse_cards_rejects_non_array() {
        assert!(parse_cards(br#"{"n": 1}"#).is_err());
        assert_eq!(parse_cards(b"[]").unwrap().len(), 0);
    }
}
