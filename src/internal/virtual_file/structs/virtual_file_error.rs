//! 虚拟文件相关错误类型。

use thiserror::Error;

use crate::article::FetchError;
use crate::codec::DecodeError;
use crate::manifest::ManifestError;

#[derive(Debug, Error)]
pub enum VirtualFileError {
    /// 构造时缺少必需的依赖或参数，不可恢复。
    #[error("配置错误: {0}")]
    Config(String),

    #[error("拉取文章失败: {0}")]
    Fetch(#[from] FetchError),

    #[error("段解码失败: {0}")]
    Decode(#[from] DecodeError),

    #[error("清单错误: {0}")]
    Manifest(#[from] ManifestError),

    #[error("无法分配 {size} 字节的读取缓冲区")]
    Allocation { size: u64 },

    /// 解码得到的字节与窗口长度对不上，本次读取作废。
    #[error("读取长度不符，期望 {expected} 字节，实际 {actual} 字节")]
    SizeMismatch { expected: u64, actual: u64 },
}
