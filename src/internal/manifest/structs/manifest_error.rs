//! 清单解析错误类型。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("清单 XML 解析失败: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("清单中没有任何文件")]
    NoFiles,

    #[error("文件没有任何段: {subject}")]
    NoSegments { subject: String },
}
