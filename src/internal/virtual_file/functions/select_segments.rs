use crate::manifest::Segment;
use crate::virtual_file::FileWindow;

/// 读取窗口时需要拉取的一段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredSegment {
    /// 在段目录中的下标
    pub index: usize,
    /// 该段在逻辑文件中的起始偏移
    pub offset: u64,
}

/// 选出与窗口 `[start, end)` 相交的最少段，按偏移升序返回。
///
/// 除最后一段外各段逻辑大小都是 `segment_size`，所以第一段直接算出来，
/// 之后遇到 `offset >= end` 立即停止，开销只与需要的段数有关，与文件总段数无关。
/// 恰好结束在 `start` 处的段与窗口不相交，不会被选中。
pub fn select_segments(
    segments: &[Segment],
    segment_size: u64,
    window: &FileWindow,
) -> Vec<RequiredSegment> {
    if window.is_empty() || segment_size == 0 {
        return Vec::new();
    }

    let first = usize::try_from(window.start() / segment_size).unwrap_or(usize::MAX);
    if first >= segments.len() {
        return Vec::new();
    }

    (first..segments.len())
        .map(|index| RequiredSegment {
            index,
            offset: index as u64 * segment_size,
        })
        .take_while(|required| required.offset < window.end())
        .collect()
}
