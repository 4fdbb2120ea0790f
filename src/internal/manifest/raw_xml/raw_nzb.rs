use serde::{Deserialize, Serialize};

/// 对应 NZB 顶层的 `<nzb>` 节点，`<head>` 中的元信息不读取
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawNzb {
    /// `<file>` 节点列表，每个 file 表示一个逻辑文件
    #[serde(rename = "file", default)]
    pub files: Vec<RawFile>,
}

/// 对应单个 `<file>` 节点
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawFile {
    /// `poster` 属性：发布者
    #[serde(rename = "@poster", default)]
    pub poster: String,
    /// `date` 属性：Unix 时间戳（秒），个别工具会写成空串
    #[serde(rename = "@date", default)]
    pub date: Option<String>,
    /// `subject` 属性：通常形如 `[1/3] - "name.bin" yEnc (1/20)`
    #[serde(rename = "@subject", default)]
    pub subject: String,
    /// `<groups>`
    #[serde(default)]
    pub groups: RawGroups,
    /// `<segments>`
    #[serde(default)]
    pub segments: RawSegments,
}

/// `<groups>` 节点
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RawGroups {
    #[serde(rename = "group", default)]
    pub groups: Vec<String>,
}

/// `<segments>` 节点
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RawSegments {
    #[serde(rename = "segment", default)]
    pub segments: Vec<RawSegment>,
}

/// `<segment bytes="..." number="...">message-id</segment>`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RawSegment {
    /// `bytes` 属性：文章编码后的字节数
    #[serde(rename = "@bytes", default)]
    pub bytes: Option<u64>,
    /// `number` 属性：段序号
    #[serde(rename = "@number")]
    pub number: u32,
    /// 节点文本：message-id（不含尖括号）
    #[serde(rename = "$text")]
    pub message_id: String,
}
