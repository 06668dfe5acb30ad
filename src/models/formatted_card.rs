use serde::{Deserialize, Serialize};

/// 加载失败时返回给界面的提示文字
pub const LOAD_FAILED_MESSAGE: &str = "データの読み込みに失敗しました";

/// 交给学习界面的卡片（正面 / 背面）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedCard {
    pub f: String,
    pub b: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl FormattedCard {
    /// 加载失败时的占位卡片
    pub fn load_error() -> Self {
        Self {
            f: "Error".to_string(),
            b: LOAD_FAILED_MESSAGE.to_string(),
            id: None,
        }
    }
}
