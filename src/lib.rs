//! # Flashcard Set
//!
//! 读取 JSON 单词卡题库，按编号范围筛选、排除已归档卡片、随机抽样，并整形为学习界面用的正反面
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 原始记录 `CardRecord`、归一化后的 `Card`、输出 `FormattedCard`
//!
//! ### ② 客户端（Clients）
//! - `DatasetClient` - 按科目取回题库（HTTP 或本地目录）
//!
//! ### ③ 业务能力层（Services）
//! - `DatasetCache` - 按科目缓存题库，同一科目只取回一次
//! - `ArchiveStore` - 读写 `ARCHIVE_<科目>` 归档列表
//! - `card_filter` / `sampler` / `formatter` - 筛选、抽样、整形
//!
//! ### ④ 流程层（Workflow）
//! - `get_questions` - 不缓存的一次性出题
//! - `fetch_book_data` + `generate_set` - 带缓存的取回和同步出题

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::DatasetClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Card, CardId, CardRecord, FormattedCard, SetOptions};
pub use services::{ArchiveStore, DatasetCache, FileStorage, KeyValueStore, MemoryStorage};
pub use workflow::{fetch_book_data, generate_set, get_questions};
