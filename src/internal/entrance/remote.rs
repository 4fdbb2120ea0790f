use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::{
    article::ArticleFetcher,
    codec::{SegmentDecoder, SegmentMetadata, YencDecoder},
    manifest::{ManifestEntry, ManifestError, parse_nzb},
    virtual_file::{NewVirtualFileParams, VirtualFile, VirtualFileError},
};

/// 打开清单时的参数。
pub struct OpenManifestParams<'a> {
    /// 所有文件共用的拉取服务
    pub fetcher: Option<Arc<dyn ArticleFetcher>>,
    pub decoder: Arc<dyn SegmentDecoder>,
    /// NZB 清单文本
    pub manifest: &'a str,
    /// 是否拉取每个文件的第一段来确定真实大小与段大小
    ///
    /// 关闭时直接使用清单声明的大小，只适合声明大小即解码后大小的场景
    pub probe_sizes: bool,
}

type EntryResult = Result<Arc<VirtualFile>, VirtualFileError>;

/// 文件的几何信息：逻辑总大小与统一段大小
#[derive(Debug, Clone, Copy)]
struct Geometry {
    size: u64,
    segment_size: u64,
}

impl From<SegmentMetadata> for Geometry {
    fn from(metadata: SegmentMetadata) -> Self {
        let segment_size = if metadata.segment_size == 0 {
            metadata.total_size
        } else {
            metadata.segment_size
        };

        Self {
            size: metadata.total_size,
            segment_size,
        }
    }
}

fn declared_geometry(entry: &ManifestEntry) -> Result<Geometry, VirtualFileError> {
    let size = entry.declared_size.ok_or_else(|| {
        VirtualFileError::Config(format!("{}: 清单未声明全部段大小", entry.name))
    })?;
    let segment_size = entry
        .segments
        .first()
        .and_then(|segment| segment.declared_size)
        .ok_or_else(|| VirtualFileError::Config(format!("{}: 清单未声明段大小", entry.name)))?;

    Ok(Geometry { size, segment_size })
}

/// 拉取并解码第一段，用它的元信息确定几何信息；解码器不提供元信息时退回清单声明值。
async fn probe_geometry(
    entry: &ManifestEntry,
    fetcher: &dyn ArticleFetcher,
    decoder: &dyn SegmentDecoder,
) -> Result<Geometry, VirtualFileError> {
    let Some(first) = entry.segments.first() else {
        return Err(ManifestError::NoSegments {
            subject: entry.subject.clone(),
        }
        .into());
    };

    debug!(name = %entry.name, fetch_id = %first.fetch_id, "探测首段");

    let raw = fetcher.fetch_article(&first.fetch_id).await?;
    let decoded = decoder.decode(&raw)?;

    match decoded.metadata {
        Some(metadata) => Ok(metadata.into()),
        None => declared_geometry(entry),
    }
}

async fn open_entry(
    entry: ManifestEntry,
    fetcher: Arc<dyn ArticleFetcher>,
    decoder: Arc<dyn SegmentDecoder>,
    probe_sizes: bool,
) -> EntryResult {
    if entry.segments.is_empty() {
        return Err(ManifestError::NoSegments {
            subject: entry.subject,
        }
        .into());
    }

    // 几何信息与段数是否相符由 VirtualFile::new 校验
    let geometry = if probe_sizes {
        probe_geometry(&entry, fetcher.as_ref(), decoder.as_ref()).await?
    } else {
        declared_geometry(&entry)?
    };

    VirtualFile::new(NewVirtualFileParams {
        fetcher: Some(fetcher),
        decoder,
        segments: entry.segments,
        segment_size: geometry.segment_size,
        size: geometry.size,
        name: entry.name,
        last_modified: entry.timestamp,
        mime_type: None,
    })
}

/// 解析清单并为其中每个文件创建一个 [`VirtualFile`]
///
/// 各文件并发探测，共用同一个拉取服务
///
/// - 外层错误：缺少拉取服务，或清单本身无法解析
/// - 内层错误：单个文件没有段、探测失败或大小与段数不符，不影响其他文件
pub async fn open_manifest(
    params: OpenManifestParams<'_>,
) -> Result<Vec<EntryResult>, VirtualFileError> {
    let OpenManifestParams {
        fetcher,
        decoder,
        manifest,
        probe_sizes,
    } = params;

    let fetcher = fetcher
        .ok_or_else(|| VirtualFileError::Config("必须提供文章拉取服务".to_string()))?;
    let entries = parse_nzb(manifest)?;

    debug!(files = entries.len(), probe_sizes, "清单解析完成");

    let tasks = entries.into_iter().map(|entry| {
        let name = entry.name.clone();
        let task = open_entry(entry, Arc::clone(&fetcher), Arc::clone(&decoder), probe_sizes);
        async move {
            let result = task.await;
            if let Err(e) = &result {
                warn!(name = %name, error = %e, "打开文件失败");
            }
            result
        }
    });

    Ok(join_all(tasks).await)
}

/// 使用 yEnc 解码器打开 NZB 清单，并探测每个文件的真实大小
pub async fn open_nzb(
    fetcher: Arc<dyn ArticleFetcher>,
    nzb: &str,
) -> Result<Vec<EntryResult>, VirtualFileError> {
    open_manifest(OpenManifestParams {
        fetcher: Some(fetcher),
        decoder: Arc::new(YencDecoder::new()),
        manifest: nzb,
        probe_sizes: true,
    })
    .await
}
