//! 段解码错误类型。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("缺少 =ybegin 头")]
    MissingHeader,

    #[error("缺少 =yend 尾")]
    MissingTrailer,

    #[error("缺少字段: {0}")]
    MissingField(&'static str),

    #[error("字段 {field} 取值非法: {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("CRC 校验失败，期望 {expected:08x}，实际 {actual:08x}")]
    CrcMismatch { expected: u32, actual: u32 },

    #[error("解码长度不符，期望 {expected}，实际 {actual}")]
    SizeMismatch { expected: u64, actual: u64 },
}
