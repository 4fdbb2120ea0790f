//! 清单（NZB）领域模块：把清单文本解析成按文件划分的段目录。

pub mod functions;
pub mod raw_xml;
pub mod structs;
