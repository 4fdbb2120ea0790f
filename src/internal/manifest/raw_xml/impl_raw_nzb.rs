use chrono::{DateTime, Utc};

use crate::manifest::{ManifestEntry, ManifestError, RawFile, RawNzb, RawSegment, Segment};

pub trait ToManifestEntries {
    fn to_manifest_entries(self) -> Result<Vec<ManifestEntry>, ManifestError>;
}

fn extract_name(subject: &str) -> String {
    // 优先取 subject 中第一对引号之间的内容，否则退回整个 subject
    let quoted = subject.split_once('"').and_then(|(_, rest)| {
        rest.split_once('"')
            .map(|(name, _)| name.trim())
            .filter(|name| !name.is_empty())
    });

    quoted.unwrap_or_else(|| subject.trim()).to_string()
}

fn parse_timestamp(date: Option<&str>) -> DateTime<Utc> {
    date.and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn clean_message_id(raw: &str) -> String {
    // 部分工具会把尖括号一起写进去
    raw.trim()
        .trim_start_matches('<')
        .trim_end_matches('>')
        .to_string()
}

fn to_segments(raw: Vec<RawSegment>) -> Vec<Segment> {
    let mut segments: Vec<Segment> = raw
        .into_iter()
        .map(|s| Segment::new(s.number, clean_message_id(&s.message_id), s.bytes))
        .filter(|s| !s.fetch_id.is_empty())
        .collect();

    // 清单里的段不保证有序，也可能重复
    segments.sort_by_key(|s| s.number);
    segments.dedup_by_key(|s| s.number);
    segments
}

fn to_entry(file: RawFile) -> ManifestEntry {
    let RawFile {
        poster,
        date,
        subject,
        groups,
        segments,
    } = file;

    let segments = to_segments(segments.segments);
    let declared_size = segments
        .iter()
        .map(|s| s.declared_size)
        .sum::<Option<u64>>();

    ManifestEntry {
        name: extract_name(&subject),
        timestamp: parse_timestamp(date.as_deref()),
        subject,
        poster,
        groups: groups.groups.into_iter().map(|g| g.trim().to_string()).collect(),
        declared_size,
        segments,
    }
}

impl ToManifestEntries for RawNzb {
    fn to_manifest_entries(self) -> Result<Vec<ManifestEntry>, ManifestError> {
        if self.files.is_empty() {
            return Err(ManifestError::NoFiles);
        }

        Ok(self.files.into_iter().map(to_entry).collect())
    }
}
