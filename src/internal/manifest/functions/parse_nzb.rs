use quick_xml::de::from_str;

use crate::manifest::{ManifestEntry, ManifestError, RawNzb, ToManifestEntries};

/// 解析 NZB 文本，返回按文件划分的清单条目（段已按序号排序）。
pub fn parse_nzb(text: &str) -> Result<Vec<ManifestEntry>, ManifestError> {
    let raw: RawNzb = from_str(text)?;
    raw.to_manifest_entries()
}
