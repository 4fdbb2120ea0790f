use std::time::Duration;

use url::Url;

use super::fetch_error::FetchError;

/// NNTP 默认端口
pub const DEFAULT_NNTP_PORT: u16 = 119;

/// 默认超时（毫秒），作用于建立连接和每一次命令往返
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// NNTP 会话配置。
#[derive(Debug, Clone)]
pub struct NntpConfig {
    /// 服务器地址，形如 `nntp://news.example.com:119`
    pub server: Url,
    /// 超时（毫秒）
    pub timeout_ms: u64,
}

impl NntpConfig {
    /// 由服务器地址创建配置；未写协议时按 `nntp://` 处理。
    pub fn new(server: &str) -> Result<Self, FetchError> {
        Ok(Self {
            server: format_server_url(server)?,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        })
    }

    /// 设置超时（毫秒）
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn port(&self) -> u16 {
        self.server.port().unwrap_or(DEFAULT_NNTP_PORT)
    }

    /// `host:port`，供建立 TCP 连接使用
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host_str().unwrap_or_default(), self.port())
    }
}

fn format_server_url(server: &str) -> Result<Url, FetchError> {
    let server = server.trim();
    if server.is_empty() {
        return Err(FetchError::InvalidUrl("地址为空".to_string()));
    }

    let with_scheme = if server.contains("://") {
        server.to_string()
    } else {
        format!("nntp://{server}")
    };

    let url = Url::parse(&with_scheme).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    // TLS 与认证不在本库范围内，只接受明文 NNTP
    if url.scheme() != "nntp" && url.scheme() != "news" {
        return Err(FetchError::UnsupportedScheme(url.scheme().to_string()));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(FetchError::InvalidUrl(format!("缺少主机名: {server}")));
    }

    Ok(url)
}
