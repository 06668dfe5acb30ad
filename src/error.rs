use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题库数据加载错误
    #[error("数据加载错误: {0}")]
    Load(#[from] LoadError),
    /// 本地存储错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 题库数据加载错误
///
/// 所有变体对调用方来说都是同一个"加载失败"，区分只用于日志诊断
#[derive(Debug, Error)]
pub enum LoadError {
    /// 科目名无法构成合法的资源路径
    #[error("非法的科目名: {subject:?}")]
    InvalidSubject { subject: String },

    /// 网络请求失败
    #[error("请求失败 ({url}): {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 服务器返回非成功状态码
    #[error("服务器返回错误状态 ({url}): HTTP {status}")]
    BadStatus { url: String, status: u16 },

    /// 读取本地文件失败
    #[error("读取文件失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析失败
    #[error("JSON解析失败 ({resource}): {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 本地存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 读取存储文件失败
    #[error("读取存储文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 写入存储文件失败
    #[error("写入存储文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 存储文件内容不是合法的 JSON 对象
    #[error("存储文件格式错误 ({path}): {source}")]
    Corrupted {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置项取值非法
    #[error("配置项 {field} 非法: {reason}")]
    InvalidValue { field: String, reason: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建非法科目错误
    pub fn invalid_subject(subject: impl Into<String>) -> Self {
        AppError::Load(LoadError::InvalidSubject {
            subject: subject.into(),
        })
    }

    /// 创建请求失败错误
    pub fn request_failed(url: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Load(LoadError::Request {
            url: url.into(),
            source,
        })
    }

    /// 创建非成功状态码错误
    pub fn bad_status(url: impl Into<String>, status: u16) -> Self {
        AppError::Load(LoadError::BadStatus {
            url: url.into(),
            status,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Load(LoadError::Io {
            path: path.into(),
            source,
        })
    }

    /// 创建 JSON 解析错误
    pub fn parse_failed(resource: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Load(LoadError::Parse {
            resource: resource.into(),
            source,
        })
    }

    /// 是否属于"加载失败"一类
    pub fn is_load_failure(&self) -> bool {
        matches!(self, AppError::Load(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
