use anyhow::{Context, Result};
use flashcard_set::utils::logging;
use flashcard_set::{
    fetch_book_data, generate_set, ArchiveStore, Config, DatasetCache, DatasetClient, FileStorage,
    SetOptions,
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(&config.subjects);

    let client = DatasetClient::for_book_data(&config).context("无法创建题库客户端")?;
    let cache = DatasetCache::new(client);
    let storage = FileStorage::open(&config.storage_file)
        .with_context(|| format!("无法打开本地存储: {}", config.storage_file))?;
    let archive = ArchiveStore::new(Arc::new(storage));

    // 并发预加载所有科目
    let datasets = join_all(
        config
            .subjects
            .iter()
            .map(|subject| fetch_book_data(&cache, subject)),
    )
    .await;

    let mut output = serde_json::Map::new();
    for (subject, data) in config.subjects.iter().zip(datasets) {
        let options = SetOptions::new(subject.clone(), config.start, config.end, config.num)
            .reversed(config.reverse);
        let cards = generate_set(data.as_deref().map(Vec::as_slice), &options, &archive);

        logging::log_set_generated(subject, cards.len(), config.num);
        for card in &cards {
            debug!("  {}", logging::truncate_text(&card.f, 40));
        }

        output.insert(subject.clone(), serde_json::to_value(&cards)?);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
