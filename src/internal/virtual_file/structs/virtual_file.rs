use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::article::ArticleFetcher;
use crate::codec::SegmentDecoder;
use crate::manifest::Segment;
use crate::mime::lookup_mime_type;
use crate::internal::virtual_file::structs::segment_chunks::SegmentChunksParams;
use crate::virtual_file::{
    FileWindow, ReadableStream, RequiredSegment, SegmentChunks, SliceOutcome, VirtualFileError,
    select_segments,
};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 除最后一段外各段都是 `segment_size`，最后一段为 `(0, segment_size]`，
/// 所以 `size` 必须落在 `((count - 1) * segment_size, count * segment_size]` 内。
fn fits_segments(size: u64, segment_size: u64, count: usize) -> bool {
    let count = count as u64;
    let upper = count.checked_mul(segment_size).unwrap_or(u64::MAX);
    let lower = count.saturating_sub(1).checked_mul(segment_size).unwrap_or(u64::MAX);
    size > lower && size <= upper
}

/// 创建虚拟文件时的参数。
pub struct NewVirtualFileParams {
    /// 文章拉取服务，必填；缺失时构造失败
    pub fetcher: Option<Arc<dyn ArticleFetcher>>,
    pub decoder: Arc<dyn SegmentDecoder>,
    pub segments: Vec<Segment>,
    /// 除最后一段外各段共用的逻辑大小
    pub segment_size: u64,
    /// 逻辑文件（解码后）的总大小
    pub size: u64,
    pub name: String,
    pub last_modified: DateTime<Utc>,
    /// 不填则按文件名推断
    pub mime_type: Option<String>,
}

/// 虚拟文件：由多篇远程文章拼成的一个只读逻辑文件上的一个窗口。
///
/// - 切片不拉取任何数据，只生成共享同一段目录的新视图
/// - 读取（[`array_buffer`](Self::array_buffer) / [`text`](Self::text) / [`stream`](Self::stream)）时才按需拉取与窗口相交的段
/// - 创建后不可变，派生视图与原视图各自独立存活
#[derive(Clone)]
pub struct VirtualFile {
    fetcher: Arc<dyn ArticleFetcher>,
    decoder: Arc<dyn SegmentDecoder>,
    segments: Arc<[Segment]>, // 所有派生视图共享
    segment_size: u64,
    window: FileWindow,
    name: String,
    relative_path: String,
    last_modified: DateTime<Utc>,
    mime_type: String,
}

impl std::fmt::Debug for VirtualFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("window", &self.window)
            .field("segment_size", &self.segment_size)
            .field("segments", &self.segments.len())
            .field("last_modified", &self.last_modified)
            .finish()
    }
}

impl VirtualFile {
    /// 创建覆盖整个逻辑文件的虚拟文件。
    pub fn new(params: NewVirtualFileParams) -> Result<Arc<Self>, VirtualFileError> {
        let NewVirtualFileParams {
            fetcher,
            decoder,
            segments,
            segment_size,
            size,
            name,
            last_modified,
            mime_type,
        } = params;

        let fetcher = fetcher
            .ok_or_else(|| VirtualFileError::Config("必须提供文章拉取服务".to_string()))?;

        if size > 0 && segments.is_empty() {
            return Err(VirtualFileError::Config(format!("{name}: 非空文件没有任何段")));
        }
        if size > 0 && segment_size == 0 {
            return Err(VirtualFileError::Config(format!("{name}: 段大小不能为 0")));
        }
        if size > 0 && !fits_segments(size, segment_size, segments.len()) {
            return Err(VirtualFileError::Config(format!(
                "{name}: 大小 {size} 与 {} 个 {segment_size} 字节的段不符",
                segments.len()
            )));
        }

        let mime_type = mime_type.unwrap_or_else(|| lookup_mime_type(&name).to_string());

        Ok(Arc::new(Self {
            fetcher,
            decoder,
            segments: segments.into(),
            segment_size,
            window: FileWindow::full(size),
            relative_path: name.clone(),
            name,
            last_modified,
            mime_type,
        }))
    }

    /// 派生视图：复制全部字段，只替换窗口与类型。
    fn derive(&self, window: FileWindow, mime_type: String) -> Arc<Self> {
        Arc::new(Self {
            fetcher: Arc::clone(&self.fetcher),
            decoder: Arc::clone(&self.decoder),
            segments: Arc::clone(&self.segments),
            segment_size: self.segment_size,
            window,
            name: self.name.clone(),
            relative_path: self.relative_path.clone(),
            last_modified: self.last_modified,
            mime_type,
        })
    }

    /// 按 W3C `Blob.slice` 语义切片，结束位置不包含在内。
    ///
    /// 注意：HTTP Range 的结束位置是包含的，换算见 [`FileWindow::to_inclusive_range`]。
    ///
    /// 请求与当前视图等价时返回同一个 `Arc`，不会分配新视图。
    pub fn slice(
        self: &Arc<Self>,
        start: Option<i64>,
        end: Option<i64>,
        content_type: Option<&str>,
    ) -> Arc<Self> {
        match self.window.slice(start, end) {
            SliceOutcome::Unchanged => Arc::clone(self),
            SliceOutcome::Window(window) => {
                let mime_type = content_type.map_or_else(|| self.mime_type.clone(), str::to_string);
                self.derive(window, mime_type)
            }
        }
    }

    /// 对外可见的长度
    pub fn size(&self) -> u64 {
        self.window.size()
    }

    pub fn window(&self) -> FileWindow {
        self.window
    }

    /// 原始文件的逻辑大小，切片后不变
    pub fn true_size(&self) -> u64 {
        self.window.true_size()
    }

    pub fn segment_size(&self) -> u64 {
        self.segment_size
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 路径形式的别名，目前与文件名相同
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// 修改时间的毫秒时间戳
    pub fn last_modified_millis(&self) -> i64 {
        self.last_modified.timestamp_millis()
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// 当前窗口需要拉取的段
    pub fn required_segments(&self) -> Vec<RequiredSegment> {
        select_segments(&self.segments, self.segment_size, &self.window)
    }

    /// 新建一次读取的块序列。每次调用都会从头重新拉取。
    pub fn chunks(&self) -> SegmentChunks {
        SegmentChunks::new(SegmentChunksParams {
            segments: Arc::clone(&self.segments),
            fetcher: Arc::clone(&self.fetcher),
            decoder: Arc::clone(&self.decoder),
            window: self.window,
            required: self.required_segments(),
        })
    }

    /// 读取整个窗口到一块恰好 `size` 字节的缓冲区。任何一段失败都会中止并返回该错误。
    pub async fn array_buffer(&self) -> Result<Vec<u8>, VirtualFileError> {
        let expected = self.size();
        let len = usize::try_from(expected)
            .map_err(|_| VirtualFileError::Config(format!("文件过大: {expected}")))?;

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|_| VirtualFileError::Allocation { size: expected })?;
        let mut chunks = self.chunks();

        while let Some(chunk) = chunks.next_chunk().await {
            let chunk = chunk?;
            let next = buffer.len() + chunk.len();
            if next > len {
                return Err(VirtualFileError::SizeMismatch {
                    expected,
                    actual: next as u64,
                });
            }
            buffer.extend_from_slice(&chunk);
        }

        if buffer.len() != len {
            return Err(VirtualFileError::SizeMismatch {
                expected,
                actual: buffer.len() as u64,
            });
        }

        Ok(buffer)
    }

    /// 以 UTF-8 读取整个窗口；非法序列替换为 U+FFFD，开头的 BOM 会被去掉。
    pub async fn text(&self) -> Result<String, VirtualFileError> {
        let buffer = self.array_buffer().await?;
        let body = buffer.strip_prefix(UTF8_BOM).unwrap_or(&buffer);
        Ok(String::from_utf8_lossy(body).into_owned())
    }

    /// 以可取消的拉取式流读取窗口。
    pub fn stream(&self) -> ReadableStream {
        ReadableStream::new(self.chunks())
    }
}
