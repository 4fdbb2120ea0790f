//! 可取消的拉取式流
//!
//! 每次 [`ReadableStream::pull`] 才向底层块序列要下一块，因此没人拉取时不会有任何拉取在途。
//! 取消、出错或读完之后流即关闭，底层块序列被释放，之后的拉取一律返回 `None`。
//!
//! 同时实现了 [`futures_util::Stream`]，可以直接配合 `StreamExt` 使用。

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::stream::{self, BoxStream, Stream, StreamExt};
use tracing::debug;

use crate::virtual_file::{SegmentChunks, VirtualFileError};

type ChunkResult = Result<Bytes, VirtualFileError>;

pub struct ReadableStream {
    inner: Option<BoxStream<'static, ChunkResult>>,
}

impl std::fmt::Debug for ReadableStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadableStream")
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl ReadableStream {
    pub(crate) fn new(chunks: SegmentChunks) -> Self {
        let inner = stream::unfold(chunks, |mut chunks| async move {
            chunks.next_chunk().await.map(|item| (item, chunks))
        })
        .boxed();

        Self { inner: Some(inner) }
    }

    /// 拉取下一块。出错时返回该错误并关闭流。
    pub async fn pull(&mut self) -> Option<ChunkResult> {
        let inner = self.inner.as_mut()?;
        let item = inner.next().await;

        if !matches!(item, Some(Ok(_))) {
            self.inner = None;
        }
        item
    }

    /// 取消流：释放底层块序列，之后不会再发起任何拉取。
    pub fn cancel(&mut self) {
        if self.inner.take().is_some() {
            debug!("流已取消");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }
}

impl Stream for ReadableStream {
    type Item = ChunkResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let Some(inner) = self.inner.as_mut() else {
            return Poll::Ready(None);
        };

        match inner.poll_next_unpin(cx) {
            Poll::Ready(item) => {
                if !matches!(item, Some(Ok(_))) {
                    self.inner = None;
                }
                Poll::Ready(item)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
