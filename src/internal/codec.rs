//! 段解码领域模块：把一篇文章的原始编码字节还原为载荷字节。

pub mod structs;
pub mod traits;
