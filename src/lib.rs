/// 内部导出的模块
mod internal;

#[cfg(test)]
mod tests;

/// 导出核心入口函数
pub use internal::entrance::remote::*;

/// 按 message-id 拉取文章，默认实现为 NNTP 会话
pub mod article {
    use crate::internal;
    pub use internal::article::structs::*;
    pub use internal::article::traits::*;
}

/// 段解码，默认实现为 yEnc
pub mod codec {
    use crate::internal;
    pub use internal::codec::structs::*;
    pub use internal::codec::traits::*;
}

/// NZB 清单解析，原始 XML 结构也对外开放，以防有人自己要用
pub mod manifest {
    use crate::internal;
    pub use internal::manifest::functions::*;
    pub use internal::manifest::raw_xml::*;
    pub use internal::manifest::structs::*;
}

pub mod mime {
    pub use crate::internal::mime::lookup::*;
}

pub mod virtual_file {
    use crate::internal;
    pub use internal::virtual_file::functions::*;
    pub use internal::virtual_file::structs::*;
}
