//! 文章拉取错误类型。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("服务器地址非法: {0}")]
    InvalidUrl(String),

    #[error("不支持的协议: {0}")]
    UnsupportedScheme(String),

    #[error("网络读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("请求超时: {0}")]
    Timeout(String),

    #[error("连接已被服务器关闭")]
    ConnectionClosed,

    #[error("文章不存在: {0}")]
    ArticleNotFound(String),

    #[error("服务器返回异常状态 {code}: {message}")]
    Status { code: u16, message: String },

    #[error("响应格式错误: {0}")]
    Protocol(String),
}
