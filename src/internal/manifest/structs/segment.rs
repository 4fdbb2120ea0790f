/// 单个段描述：一篇可独立拉取的文章，在逻辑文件中占据一段连续字节。
///
/// 读取清单后不可变；各段按 `number` 升序排列，顺序即其在文件中的位置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 段序号（清单中的 `number`，从 1 开始）
    pub number: u32,
    /// 拉取标识（文章的 message-id，不含尖括号）
    pub fetch_id: String,
    /// 清单声明的大小（编码后字节数），未知时为 `None`
    pub declared_size: Option<u64>,
}

impl Segment {
    pub fn new(number: u32, fetch_id: impl Into<String>, declared_size: Option<u64>) -> Self {
        Self {
            number,
            fetch_id: fetch_id.into(),
            declared_size,
        }
    }
}
