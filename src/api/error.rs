// 客户端错误类型定义
//
// 定义了访问内容管理 API 时可能出现的各种错误类型

use thiserror::Error;

/// 客户端操作的统一错误类型
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("网络错误: {0}")]
    Network(String),

    #[error("请求超时")]
    Timeout,

    #[error("HTTP 错误: 状态码 {0}")]
    Http(u16),

    #[error("接口返回失败: {0}")]
    Api(String),

    #[error("响应解析失败: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("无效的 URL: {0}")]
    InvalidUrl(String),

    #[error("无效的输入: {0}")]
    InvalidInput(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

// 实现从 reqwest::Error 到 ClientError 的转换
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_status() {
            match err.status() {
                Some(status) => ClientError::Http(status.as_u16()),
                None => ClientError::Network(err.to_string()),
            }
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

/// Result类型别名
pub type ClientResult<T> = Result<T, ClientError>;
