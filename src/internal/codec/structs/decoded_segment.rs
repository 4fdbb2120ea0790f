use bytes::Bytes;

/// 段元信息：只有文件的第一段才用得上，用于在清单未声明时确定逻辑文件大小与统一段大小。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentMetadata {
    /// 整个逻辑文件解码后的大小（字节）
    pub total_size: u64,
    /// 本段解码后的大小；对第一段而言即除最后一段外各段共用的段大小
    pub segment_size: u64,
    /// 段序号（多段发布时才有）
    pub part: Option<u32>,
}

/// 一篇文章解码后的结果。
#[derive(Debug, Clone)]
pub struct DecodedSegment {
    /// 解码后的载荷
    pub payload: Bytes,
    /// 元信息，解码器无法提供时为 `None`
    pub metadata: Option<SegmentMetadata>,
}
