//! 文章拉取领域模块：按 message-id 拉取一篇文章的原始编码字节。
//!
//! 虚拟文件只依赖 [`traits::ArticleFetcher`]；[`structs::NntpSession`] 是基于 NNTP 的默认实现。

pub mod structs;
pub mod traits;
