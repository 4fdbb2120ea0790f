//! 虚拟文件领域模块
//!
//! 把分散在多篇远程文章中的内容表示为一个逻辑文件：支持长度查询、切片、整块读取、文本读取与增量流式读取，
//! 并且只在真正读取时才按需拉取与窗口相交的那几段。

pub mod functions;
pub mod structs;
