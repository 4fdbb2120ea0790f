//! 段解码 trait：虚拟文件在读取时对每篇拉取到的文章调用。

use crate::codec::{DecodeError, DecodedSegment};

/// 段解码器：把一篇文章的原始字节解码为载荷（以及可选的元信息）。
///
/// 解码必须是确定性的：同样的输入总是得到同样的输出，重复读取同一窗口才会拿到相同字节。
pub trait SegmentDecoder: Send + Sync {
    fn decode(&self, raw: &[u8]) -> Result<DecodedSegment, DecodeError>;
}
