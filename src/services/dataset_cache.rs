//! 题库缓存服务
//!
//! 按科目缓存已加载的题库，整个进程内只取一次；同一科目的并发请求共享同一次取回

use crate::clients::DatasetClient;
use crate::error::AppResult;
use crate::models::card::Card;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, info};

type Slot = Arc<OnceCell<Arc<Vec<Card>>>>;

/// 题库缓存
///
/// 返回的 `Arc<Vec<Card>>` 被同一科目的所有调用方共享，且不可变
pub struct DatasetCache {
    client: DatasetClient,
    slots: Mutex<HashMap<String, Slot>>,
}

impl DatasetCache {
    pub fn new(client: DatasetClient) -> Self {
        Self {
            client,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// 加载某个科目的题库
    ///
    /// 已缓存则直接返回；否则取回一次并缓存。加载失败不会被缓存，下次调用会重新取回
    pub async fn load(&self, subject: &str) -> AppResult<Arc<Vec<Card>>> {
        // 非法科目不占用缓存位置
        self.client.resource_path(subject)?;
        let slot = self.slot(subject);

        if let Some(cards) = slot.get() {
            debug!("命中缓存: {}", subject);
            return Ok(Arc::clone(cards));
        }

        let result = slot
            .get_or_try_init(|| async {
                info!("📥 正在加载题库: {}", subject);
                let cards = self.client.fetch(subject).await?;
                info!("✓ 题库 {} 加载完成，共 {} 张卡片", subject, cards.len());
                Ok::<_, crate::error::AppError>(Arc::new(cards))
            })
            .await;

        match result {
            Ok(cards) => Ok(Arc::clone(cards)),
            Err(e) => {
                self.discard_empty_slot(subject, &slot);
                Err(e)
            }
        }
    }

    /// 已缓存的题库（不触发加载）
    pub fn get_cached(&self, subject: &str) -> Option<Arc<Vec<Card>>> {
        self.lock_slots()
            .get(subject)
            .and_then(|slot| slot.get().cloned())
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.get_cached(subject).is_some()
    }

    /// 丢弃某个科目的缓存，返回之前是否已缓存
    ///
    /// 正在进行的加载不受影响，但其结果不会再被后续调用看到
    pub fn invalidate(&self, subject: &str) -> bool {
        let removed = self.lock_slots().remove(subject);
        let was_cached = removed.is_some_and(|slot| slot.initialized());
        if was_cached {
            info!("🗑 已清除题库缓存: {}", subject);
        }
        was_cached
    }

    pub fn clear(&self) {
        self.lock_slots().clear();
    }

    /// 已缓存的科目数
    pub fn len(&self) -> usize {
        self.lock_slots()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, subject: &str) -> Slot {
        let mut slots = self.lock_slots();
        Arc::clone(slots.entry(subject.to_string()).or_default())
    }

    /// 加载失败后移除仍未初始化的缓存位置
    fn discard_empty_slot(&self, subject: &str, slot: &Slot) {
        let mut slots = self.lock_slots();
        let is_same_empty = slots
            .get(subject)
            .is_some_and(|existing| Arc::ptr_eq(existing, slot) && !existing.initialized());
        if is_same_empty {
            slots.remove(subject);
        }
    }

    fn lock_slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
