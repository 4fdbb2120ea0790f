//! 拉取 → 解码 → 裁剪 的惰性块序列。

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::article::ArticleFetcher;
use crate::codec::SegmentDecoder;
use crate::manifest::Segment;
use crate::virtual_file::{FileWindow, RequiredSegment, VirtualFileError};

/// 构造块序列时的参数（形参超过 3 个时用 struct 承载）。
pub(crate) struct SegmentChunksParams {
    pub(crate) segments: Arc<[Segment]>,
    pub(crate) fetcher: Arc<dyn ArticleFetcher>,
    pub(crate) decoder: Arc<dyn SegmentDecoder>,
    pub(crate) window: FileWindow,
    pub(crate) required: Vec<RequiredSegment>,
}

/// 单次读取的块序列：显式的拉取式迭代器，状态只有「剩余要读的段」。
///
/// - 每次 [`next_chunk`](Self::next_chunk) 只拉取并解码一段，按偏移升序产出，同一时刻最多一次拉取在途
/// - 首块按窗口起点裁剪，末块按窗口终点裁剪，窗口落在单段内时两端都裁
/// - 只能消费一次；出错后序列立即结束，不会再发起拉取
/// - 不缓存解码结果，重新读取同一窗口会重新拉取
pub struct SegmentChunks {
    segments: Arc<[Segment]>,
    fetcher: Arc<dyn ArticleFetcher>,
    decoder: Arc<dyn SegmentDecoder>,
    window: FileWindow,
    pending: std::vec::IntoIter<RequiredSegment>,
}

/// 把一段的载荷裁剪到窗口内。载荷比预期短时按实际长度钳制，长度差异留给调用方检查。
fn trim_to_window(payload: Bytes, offset: u64, window: &FileWindow) -> Bytes {
    let len = payload.len() as u64;
    let lo = window.start().saturating_sub(offset).min(len);
    let hi = window.end().saturating_sub(offset).min(len).max(lo);

    if lo == 0 && hi == len {
        payload
    } else {
        payload.slice(lo as usize..hi as usize)
    }
}

impl SegmentChunks {
    pub(crate) fn new(params: SegmentChunksParams) -> Self {
        Self {
            segments: params.segments,
            fetcher: params.fetcher,
            decoder: params.decoder,
            window: params.window,
            pending: params.required.into_iter(),
        }
    }

    /// 还未读取的段数
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// 拉取下一块；序列结束返回 `None`。
    pub async fn next_chunk(&mut self) -> Option<Result<Bytes, VirtualFileError>> {
        let required = self.pending.next()?;

        match self.read_segment(required).await {
            Ok(chunk) => Some(Ok(chunk)),
            Err(e) => {
                debug!(index = required.index, offset = required.offset, error = %e, "读取段失败，块序列终止");
                self.pending = Vec::new().into_iter();
                Some(Err(e))
            }
        }
    }

    async fn read_segment(&self, required: RequiredSegment) -> Result<Bytes, VirtualFileError> {
        let segment = self.segments.get(required.index).ok_or_else(|| {
            VirtualFileError::Config(format!("段下标越界: {}", required.index))
        })?;

        trace!(
            fetch_id = %segment.fetch_id,
            index = required.index,
            offset = required.offset,
            "拉取段"
        );

        let raw = self.fetcher.fetch_article(&segment.fetch_id).await?;
        let decoded = self.decoder.decode(&raw)?;

        Ok(trim_to_window(decoded.payload, required.offset, &self.window))
    }
}
