//! 文章拉取 trait：虚拟文件读取时唯一的远程调用入口。

use async_trait::async_trait;
use bytes::Bytes;

use crate::article::FetchError;

/// 文章拉取服务：给定拉取标识，返回一篇文章的原始编码字节。
///
/// 同一个拉取服务会被一个清单派生出的所有虚拟文件（及其切片）共享，实现方需自行处理并发访问。
/// 重试与超时策略也由实现方决定，虚拟文件把每次失败都视为本次读取的终止错误。
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch_article(&self, fetch_id: &str) -> Result<Bytes, FetchError>;
}
