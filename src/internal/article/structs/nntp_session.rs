//! NNTP 拉取会话
//!
//! 一个会话对应一条明文 TCP 连接，所有命令经由内部互斥锁串行执行，因此可以放进 `Arc`
//! 被同一清单派生出的全部虚拟文件共享。
//!
//! 只实现读取文章所需的最小命令集：
//!
//! - 连接后读取欢迎行（`200` / `201`）
//! - `BODY <message-id>`：`222` 后跟点结尾的多行数据；`430` 表示文章不存在
//! - `QUIT`
//!
//! 认证、TLS、重试不在本模块范围内。

mod connection;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, trace};

use crate::article::{ArticleFetcher, FetchError, NntpConfig};

use connection::NntpConnection;

/// 基于单条 NNTP 连接的文章拉取会话。
pub struct NntpSession {
    config: NntpConfig,
    connection: Mutex<NntpConnection>,
}

impl std::fmt::Debug for NntpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NntpSession")
            .field("server", &self.config.server.as_str())
            .finish()
    }
}

fn format_message_id(message_id: &str) -> String {
    let id = message_id.trim();
    if id.starts_with('<') && id.ends_with('>') {
        id.to_string()
    } else {
        format!("<{id}>")
    }
}

impl NntpSession {
    /// 建立连接并读取欢迎行。
    pub async fn connect(config: NntpConfig) -> Result<Self, FetchError> {
        let address = config.address();

        let stream = timeout(config.timeout(), TcpStream::connect(&address))
            .await
            .map_err(|_| FetchError::Timeout(format!("连接 {address}")))??;

        let mut connection = NntpConnection::new(stream);

        let greeting = timeout(config.timeout(), connection.read_status())
            .await
            .map_err(|_| FetchError::Timeout("等待欢迎行".to_string()))??;

        if greeting.code != 200 && greeting.code != 201 {
            return Err(greeting.into_error());
        }

        debug!(server = %config.server, code = greeting.code, "NNTP 会话已建立");

        Ok(Self {
            config,
            connection: Mutex::new(connection),
        })
    }

    pub fn config(&self) -> &NntpConfig {
        &self.config
    }

    /// 拉取一篇文章的正文（`BODY`），返回去掉点填充后的原始字节。
    pub async fn body(&self, message_id: &str) -> Result<Bytes, FetchError> {
        let id = format_message_id(message_id);
        let mut connection = self.connection.lock().await;

        if connection.is_broken() {
            return Err(FetchError::ConnectionClosed);
        }

        let result = timeout(self.config.timeout(), async {
            connection.send_command(&format!("BODY {id}")).await?;
            let status = connection.read_status().await?;
            match status.code {
                222 => connection.read_multiline().await.map(Some),
                430 => Ok(None),
                _ => Err(status.into_error()),
            }
        })
        .await;

        match result {
            Ok(Ok(Some(body))) => {
                trace!(message_id = %id, len = body.len(), "文章已拉取");
                Ok(body)
            }
            Ok(Ok(None)) => Err(FetchError::ArticleNotFound(id)),
            // 服务器正常回了错误状态，连接仍可继续使用
            Ok(Err(e @ FetchError::Status { .. })) => Err(e),
            Ok(Err(e)) => {
                connection.mark_broken();
                Err(e)
            }
            Err(_) => {
                connection.mark_broken();
                Err(FetchError::Timeout(format!("BODY {id}")))
            }
        }
    }

    /// 发送 `QUIT` 并关闭会话。
    pub async fn quit(self) -> Result<(), FetchError> {
        let mut connection = self.connection.into_inner();
        if connection.is_broken() {
            return Ok(());
        }

        timeout(self.config.timeout(), async {
            connection.send_command("QUIT").await?;
            connection.read_status().await.map(|_| ())
        })
        .await
        .map_err(|_| FetchError::Timeout("QUIT".to_string()))??;

        debug!(server = %self.config.server, "NNTP 会话已关闭");
        Ok(())
    }
}

#[async_trait]
impl ArticleFetcher for NntpSession {
    async fn fetch_article(&self, fetch_id: &str) -> Result<Bytes, FetchError> {
        self.body(fetch_id).await
    }
}
