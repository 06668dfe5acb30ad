/// 题库数据客户端
///
/// 负责按科目名取回 JSON 题库，支持 HTTP 和本地目录两种来源
use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError};
use crate::models::card::{parse_cards, Card};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// 题库来源
#[derive(Debug, Clone)]
enum DatasetBackend {
    /// 通过 HTTP 获取，`base_url` 之后拼接资源路径
    Http {
        client: reqwest::Client,
        base_url: String,
    },
    /// 从本地目录读取
    Dir { root: PathBuf },
}

/// 题库数据客户端
#[derive(Debug, Clone)]
pub struct DatasetClient {
    backend: DatasetBackend,
    subdir: Option<String>,
}

impl DatasetClient {
    /// 根据配置创建客户端（`<subject>.json` 布局）
    pub fn new(config: &Config) -> AppResult<Self> {
        match &config.data_base_url {
            Some(base_url) => {
                let timeout = config.request_timeout_secs.map(Duration::from_secs);
                Self::http_with_timeout(base_url.clone(), timeout)
            }
            None => Ok(Self::dir(&config.data_dir)),
        }
    }

    /// 根据配置创建带缓存流程使用的客户端（`<subdir>/<subject>.json` 布局）
    pub fn for_book_data(config: &Config) -> AppResult<Self> {
        Ok(Self::new(config)?.with_subdir(config.dataset_subdir.clone()))
    }

    pub fn http(base_url: impl Into<String>) -> Self {
        Self {
            backend: DatasetBackend::Http {
                client: reqwest::Client::new(),
                base_url: base_url.into(),
            },
            subdir: None,
        }
    }

    pub fn http_with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            AppError::Config(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                reason: e.to_string(),
            })
        })?;

        Ok(Self {
            backend: DatasetBackend::Http {
                client,
                base_url: base_url.into(),
            },
            subdir: None,
        })
    }

    pub fn dir(root: impl Into<PathBuf>) -> Self {
        Self {
            backend: DatasetBackend::Dir { root: root.into() },
            subdir: None,
        }
    }

    /// 资源放在子目录下（例如 `jsons/`）
    pub fn with_subdir(mut self, subdir: impl Into<String>) -> Self {
        let subdir = subdir.into();
        let trimmed = subdir.trim_matches('/');
        self.subdir = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// 科目对应的相对资源路径
    pub fn resource_path(&self, subject: &str) -> AppResult<String> {
        if !is_valid_subject(subject) {
            return Err(AppError::invalid_subject(subject));
        }
        Ok(match &self.subdir {
            Some(subdir) => format!("{}/{}.json", subdir, subject),
            None => format!("{}.json", subject),
        })
    }

    /// 取回并归一化某个科目的题库
    ///
    /// # 参数
    /// - `subject`: 科目名
    ///
    /// # 返回
    /// 返回归一化后的卡片列表；请求失败、状态码异常、JSON 非法都会返回加载错误
    pub async fn fetch(&self, subject: &str) -> AppResult<Vec<Card>> {
        let path = self.resource_path(subject)?;

        match &self.backend {
            DatasetBackend::Http { client, base_url } => {
                let url = format!("{}/{}", base_url.trim_end_matches('/'), path);
                debug!("请求题库: {}", url);

                let response = client
                    .get(&url)
                    .send()
                    .await
                    .map_err(|e| AppError::request_failed(&url, e))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(AppError::bad_status(&url, status.as_u16()));
                }

                let body = response
                    .bytes()
                    .await
                    .map_err(|e| AppError::request_failed(&url, e))?;

                let cards = parse_cards(&body).map_err(|e| AppError::parse_failed(&url, e))?;
                debug!("题库 {} 共 {} 张卡片", subject, cards.len());
                Ok(cards)
            }
            DatasetBackend::Dir { root } => {
                let file_path = root.join(&path);
                let shown = file_path.display().to_string();
                debug!("读取题库文件: {}", shown);

                let body = tokio::fs::read(&file_path)
                    .await
                    .map_err(|e| AppError::file_read_failed(&shown, e))?;

                let cards =
                    parse_cards(&body).map_err(|e| AppError::parse_failed(&shown, e))?;
                debug!("题库 {} 共 {} 张卡片", subject, cards.len());
                Ok(cards)
            }
        }
    }
}

/// 科目名只能是单个路径片段
fn is_valid_subject(subject: &str) -> bool {
    !subject.is_empty()
        && subject != "."
        && subject != ".."
        && !subject.contains(['/', '\\'])
}
