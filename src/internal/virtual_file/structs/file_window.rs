//! 逻辑文件上的字节窗口及其切片运算。
//!
//! 窗口一律使用半开区间 `[start, end)`，与 W3C `Blob.slice` 一致；HTTP Range 等协议的结束位置是闭区间，
//! 需要时用 [`FileWindow::to_inclusive_range`] 在边界处转换，切片运算内部从不混用两种约定。

/// 逻辑文件上的半开窗口 `[start, end)`，偏移总是相对未切片的原始文件。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileWindow {
    start: u64,
    end: u64,
    /// 原始文件的逻辑大小，所有派生窗口共享
    true_size: u64,
}

/// 切片结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceOutcome {
    /// 请求等价于当前窗口，调用方应直接复用原视图
    Unchanged,
    /// 新窗口（可能为空）
    Window(FileWindow),
}

fn normalize(bound: i64, size: i64) -> i64 {
    if bound < 0 { (size + bound).max(0) } else { bound }
}

impl FileWindow {
    /// 覆盖整个原始文件的窗口
    pub fn full(true_size: u64) -> Self {
        Self {
            start: 0,
            end: true_size,
            true_size,
        }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn true_size(&self) -> u64 {
        self.true_size
    }

    /// 对外可见的长度，恒等于 `end - start`
    pub fn size(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn empty_at(&self, offset: u64) -> Self {
        Self {
            start: offset,
            end: offset,
            true_size: self.true_size,
        }
    }

    /// 按 W3C 切片语义在当前窗口上再切一刀。
    ///
    /// - `start` 为 `None` 或当前窗口为空时不做任何事
    /// - `end` 为 `None` 表示到当前窗口末尾
    /// - 负数表示相对当前窗口末尾
    /// - 越界请求被钳制而不是报错，结果永远落在当前窗口之内
    pub fn slice(&self, start: Option<i64>, end: Option<i64>) -> SliceOutcome {
        let size = self.size();
        let Some(start) = start else {
            return SliceOutcome::Unchanged;
        };
        if size == 0 {
            return SliceOutcome::Unchanged;
        }

        let size_i = i64::try_from(size).unwrap_or(i64::MAX);
        let end = normalize(end.unwrap_or(size_i), size_i);
        let start = normalize(start, size_i);

        if end == 0 {
            return SliceOutcome::Window(self.empty_at(self.start));
        }

        // 两者此时都非负
        let safe_end = end.min(size_i) as u64;
        let safe_start = (start as u64).min(safe_end);
        let new_size = safe_end - safe_start;

        if new_size == 0 {
            return SliceOutcome::Window(self.empty_at(self.start + safe_start));
        }
        if new_size == size {
            return SliceOutcome::Unchanged;
        }

        SliceOutcome::Window(Self {
            start: self.start + safe_start,
            end: self.start + safe_end,
            true_size: self.true_size,
        })
    }

    /// 转为闭区间 `(first, last)`，如 `bytes=first-last`；空窗口没有对应的闭区间。
    pub fn to_inclusive_range(&self) -> Option<(u64, u64)> {
        if self.is_empty() {
            None
        } else {
            Some((self.start, self.end - 1))
        }
    }
}
