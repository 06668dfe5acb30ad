use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题库 JSON 的 HTTP 根地址，为空时从本地目录读取
    pub data_base_url: Option<String>,
    /// 题库 JSON 的本地根目录
    pub data_dir: String,
    /// 带缓存流程使用的子目录
    pub dataset_subdir: String,
    /// 本地键值存储文件（归档列表保存在这里）
    pub storage_file: String,
    /// 请求超时秒数，不设置则一直等待
    pub request_timeout_secs: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 出题参数 ---
    pub subjects: Vec<String>,
    pub start: f64,
    pub end: f64,
    pub num: usize,
    pub reverse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_base_url: None,
            data_dir: ".".to_string(),
            dataset_subdir: "jsons".to_string(),
            storage_file: "local_storage.json".to_string(),
            request_timeout_secs: None,
            verbose_logging: false,
            subjects: vec!["english".to_string()],
            start: 1.0,
            end: 100.0,
            num: 10,
            reverse: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            data_base_url: std::env::var("DATA_BASE_URL").ok().filter(|v| !v.is_empty()).or(default.data_base_url),
            data_dir: std::env::var("DATA_DIR").unwrap_or(default.data_dir),
            dataset_subdir: std::env::var("DATASET_SUBDIR").unwrap_or(default.dataset_subdir),
            storage_file: std::env::var("STORAGE_FILE").unwrap_or(default.storage_file),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            subjects: std::env::var("SUBJECTS").ok().map(|v| split_subjects(&v)).filter(|v| !v.is_empty()).unwrap_or(default.subjects),
            start: std::env::var("START").ok().and_then(|v| v.parse().ok()).unwrap_or(default.start),
            end: std::env::var("END").ok().and_then(|v| v.parse().ok()).unwrap_or(default.end),
            num: std::env::var("NUM").ok().and_then(|v| v.parse().ok()).unwrap_or(default.num),
            reverse: std::env::var("REVERSE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.reverse),
        }
    }

    /// 从 TOML 文件加载配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

fn split_subjects(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
