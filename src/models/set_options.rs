/// 出题参数
#[derive(Debug, Clone, PartialEq)]
pub struct SetOptions {
    /// 科目名，对应一个 JSON 文件
    pub subject: String,
    /// 编号下界（含）
    pub start: f64,
    /// 编号上界（含）
    pub end: f64,
    /// 最多抽取的张数
    pub num: usize,
    /// 是否正反面对调
    pub reverse: bool,
}

impl SetOptions {
    pub fn new(subject: impl Into<String>, start: f64, end: f64, num: usize) -> Self {
        Self {
            subject: subject.into(),
            start,
            end,
            num,
            reverse: false,
        }
    }

    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }
}
