use chrono::{DateTime, Utc};

use super::segment::Segment;

/// 清单中的一个文件条目（领域模型），由原始 XML 结构转换而来。
#[derive(Debug, Clone)]
pub struct ManifestEntry {
    /// 友好化的文件名（从 subject 的引号中提取，提取不到时为整个 subject）
    pub name: String,
    /// 原始 subject
    pub subject: String,
    /// 发布者
    pub poster: String,
    /// 所属新闻组
    pub groups: Vec<String>,
    /// 清单声明的大小：各段声明大小之和（编码后字节数），任一段缺失时为 `None`
    pub declared_size: Option<u64>,
    /// 按序号升序、去重后的段列表；可能为空，打开该文件时才报错
    pub segments: Vec<Segment>,
    /// 发布时间
    pub timestamp: DateTime<Utc>,
}
