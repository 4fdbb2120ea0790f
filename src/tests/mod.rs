//! 测试模块入口：模拟拉取服务与编码辅助在 `lib`，按领域划分的测试在 `internal`。

#[cfg(test)]
pub use lib::*;
