//! 随机抽样（不放回）

use rand::seq::SliceRandom;
use rand::Rng;

/// 从 `items` 中均匀随机抽取 `min(num, len)` 个元素，顺序随机
///
/// 只对前 `num` 个位置做 Fisher–Yates 洗牌
pub fn sample<T: Clone, R: Rng + ?Sized>(mut items: Vec<T>, num: usize, rng: &mut R) -> Vec<T> {
    let amount = num.min(items.len());
    if amount == 0 {
        return Vec::new();
    }
    let (chosen, _) = items.partial_shuffle(rng, amount);
    chosen.to_vec()
}
