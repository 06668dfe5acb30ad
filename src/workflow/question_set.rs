//! 出题流程
//!
//! 两个入口：
//! - [`get_questions`]：每次都取回题库 → 范围筛选 → 抽样 → 整形
//! - [`fetch_book_data`] + [`generate_set`]：带缓存的取回，与同步的出题（额外排除已归档卡片）分开调用

use crate::clients::DatasetClient;
use crate::models::card::Card;
use crate::models::formatted_card::FormattedCard;
use crate::models::set_options::SetOptions;
use crate::services::archive_store::ArchiveStore;
use crate::services::card_filter::{filter_by_range, filter_cards};
use crate::services::dataset_cache::DatasetCache;
use crate::services::formatter::format_cards;
use crate::services::sampler::sample;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, error};

/// 取回题库并生成一组卡片（不缓存、不排除归档）
///
/// 加载失败时返回只含一张错误卡片的列表，不会返回错误
pub async fn get_questions(client: &DatasetClient, options: &SetOptions) -> Vec<FormattedCard> {
    let mut rng = StdRng::from_rng(&mut rand::rng());
    get_questions_with_rng(client, options, &mut rng).await
}

pub async fn get_questions_with_rng<R: Rng + ?Sized>(
    client: &DatasetClient,
    options: &SetOptions,
    rng: &mut R,
) -> Vec<FormattedCard> {
    let cards = match client.fetch(&options.subject).await {
        Ok(cards) => cards,
        Err(e) => {
            error!("❌ 题库加载失败 ({}): {}", options.subject, e);
            return vec![FormattedCard::load_error()];
        }
    };

    let filtered = filter_by_range(&cards, options.start, options.end);
    debug!(
        "{}: 范围 [{}, {}] 内共 {} 张",
        options.subject,
        options.start,
        options.end,
        filtered.len()
    );

    let picked = sample(filtered, options.num, rng);
    format_cards(&picked, options.reverse, false)
}

/// 通过缓存加载题库，失败时记录日志并返回 None
pub async fn fetch_book_data(cache: &DatasetCache, subject: &str) -> Option<Arc<Vec<Card>>> {
    match cache.load(subject).await {
        Ok(cards) => Some(cards),
        Err(e) => {
            error!("❌ 题库加载失败 ({}): {}", subject, e);
            None
        }
    }
}

/// 用已加载的题库生成一组卡片（排除已归档的卡片，输出带 `id`）
///
/// `data` 为 None（加载失败）时返回只含一张错误卡片的列表
pub fn generate_set(
    data: Option<&[Card]>,
    options: &SetOptions,
    archive: &ArchiveStore,
) -> Vec<FormattedCard> {
    generate_set_with_rng(data, options, archive, &mut rand::rng())
}

pub fn generate_set_with_rng<R: Rng + ?Sized>(
    data: Option<&[Card]>,
    options: &SetOptions,
    archive: &ArchiveStore,
    rng: &mut R,
) -> Vec<FormattedCard> {
    let Some(cards) = data else {
        return vec![FormattedCard::load_error()];
    };

    let archived = archive.archived(&options.subject);
    let filtered = filter_cards(cards, options.start, options.end, &archived);
    debug!(
        "{}: 范围 [{}, {}] 内未归档 {} 张（已归档 {} 个编号）",
        options.subject,
        options.start,
        options.end,
        filtered.len(),
        archived.len()
    );

    let picked = sample(filtered, options.num, rng);
    format_cards(&picked, options.reverse, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::parse_cards;
    use std::collections::HashSet;

    fn example_cards() -> Vec<Card> {
        parse_cards(
            br#"[
                {"n": 1, "f": "A", "b": "X"},
                {"n": 2, "f": "B", "b": "Y"},
                {"n": "3-1", "f": "C", "b": "Z"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_generate_set_mixed_ids() {
        let cards = example_cards();
        let options = SetOptions::new("history", 1.0, 1.0, 5);
        let mut rng = StdRng::seed_from_u64(3);

        let out = generate_set_with_rng(Some(cards.as_slice()), &options, &ArchiveStore::in_memory(), &mut rng);

        let pairs: HashSet<(String, String)> = out.iter().map(|c| (c.f.clone(), c.b.clone())).collect();
        let expected: HashSet<(String, String)> = [
            ("A".to_string(), "[1]\nX".to_string()),
            ("C".to_string(), "[3-1]\nZ".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(out.len(), 2);
        assert_eq!(pairs, expected);
        assert!(out.iter().all(|c| c.id.is_some()));
    }

    #[test]
    fn test_generate_set_excludes_archived() {
        let cards = example_cards();
        let archive = ArchiveStore::in_memory();
        archive.archive("history", "3-1").unwrap();
        archive.archive("history", "2").unwrap();

        let options = SetOptions::new("history", 0.0, 10.0, 10);
        let out = generate_set(Some(cards.as_slice()), &options, &archive);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id.as_deref(), Some("1"));

        // 归档列表每次调用都重新读取
        archive.unarchive("history", "2").unwrap();
        let out = generate_set(Some(cards.as_slice()), &options, &archive);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_generate_set_zero_num() {
        let cards = example_cards();
        let options = SetOptions::new("history", 0.0, 10.0, 0);
        assert!(generate_set(Some(cards.as_slice()), &options, &ArchiveStore::in_memory()).is_empty());
    }

    #[test]
    fn test_generate_set_empty_dataset() {
        let options = SetOptions::new("history", 0.0, 10.0, 5);
        assert!(generate_set(Some(&[][..]), &options, &ArchiveStore::in_memory()).is_empty());
    }

    #[test]
    fn test_generate_set_without_data() {
        let options = SetOptions::new("history", 0.0, 10.0, 5);
        let out = generate_set(None, &options, &ArchiveStore::in_memory());
        assert_eq!(out, vec![FormattedCard::load_error()]);
    }

    #[test]
    fn test_generate_set_reverse() {
        let cards = example_cards();
        let options = SetOptions::new("history", 1.0, 1.0, 5).reversed(true);
        let out = generate_set(Some(&cards[..1]), &options, &ArchiveStore::in_memory());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].f, "[1]\nX");
        assert_eq!(out[0].b, "A");
    }
}
