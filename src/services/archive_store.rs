//! 归档列表存储
//!
//! 每个科目一个键 `ARCHIVE_<科目>`，值为逗号分隔的编号列表

use crate::error::{AppError, AppResult, StorageError};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// 简单的字符串键值存储
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove_item(&self, key: &str) -> AppResult<()>;
}

/// 内存存储，进程退出即丢失
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// 文件存储：整个存储是一个 JSON 对象，每次写入都会落盘
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// 打开存储文件，文件不存在时视为空存储
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let items = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| StorageError::ReadFailed {
                path: path.display().to_string(),
                source,
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|source| StorageError::Corrupted {
                    path: path.display().to_string(),
                    source,
                })?
            }
        } else {
            debug!("存储文件不存在，使用空存储: {}", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> AppResult<()> {
        let write_failed = |source| {
            AppError::Storage(StorageError::WriteFailed {
                path: self.path.display().to_string(),
                source,
            })
        };
        let content = serde_json::to_string_pretty(items)
            .map_err(|e| write_failed(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        std::fs::write(&self.path, content).map_err(write_failed)
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        self.persist(&items)
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        if items.remove(key).is_some() {
            self.persist(&items)?;
        }
        Ok(())
    }
}

/// 归档列表
#[derive(Clone)]
pub struct ArchiveStore {
    storage: Arc<dyn KeyValueStore>,
}

impl ArchiveStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// 只存在内存里的归档列表
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// 科目对应的存储键
    pub fn key(subject: &str) -> String {
        format!("ARCHIVE_{}", subject)
    }

    /// 读取某个科目的归档编号（每次调用都重新读取）
    pub fn archived(&self, subject: &str) -> HashSet<String> {
        self.archived_list(subject).into_iter().collect()
    }

    /// 标记为已归档，返回是否新增
    pub fn archive(&self, subject: &str, id: &str) -> AppResult<bool> {
        if id.is_empty() {
            warn!("忽略空编号的归档请求: {}", subject);
            return Ok(false);
        }
        let mut ids = self.archived_list(subject);
        if ids.iter().any(|existing| existing == id) {
            return Ok(false);
        }
        ids.push(id.to_string());
        self.storage.set_item(&Self::key(subject), &ids.join(","))?;
        debug!("已归档 {} / {}", subject, id);
        Ok(true)
    }

    /// 取消归档，返回是否存在
    pub fn unarchive(&self, subject: &str, id: &str) -> AppResult<bool> {
        let mut ids = self.archived_list(subject);
        let before = ids.len();
        ids.retain(|existing| existing != id);
        if ids.len() == before {
            return Ok(false);
        }
        if ids.is_empty() {
            self.storage.remove_item(&Self::key(subject))?;
        } else {
            self.storage.set_item(&Self::key(subject), &ids.join(","))?;
        }
        Ok(true)
    }

    pub fn clear(&self, subject: &str) -> AppResult<()> {
        self.storage.remove_item(&Self::key(subject))
    }

    fn archived_list(&self, subject: &str) -> Vec<String> {
        self.storage
            .get_item(&Self::key(subject))
            .map(|value| parse_archive_value(&value))
            .unwrap_or_default()
    }
}

fn parse_archive_value(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
