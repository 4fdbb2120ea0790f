//! NNTP 连接：状态行与多行响应的读写。

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use crate::article::FetchError;

/// 单行状态响应，如 `222 0 <id> body follows`
#[derive(Debug, Clone)]
pub(super) struct StatusLine {
    pub(super) code: u16,
    pub(super) message: String,
}

impl StatusLine {
    fn parse(line: &[u8]) -> Result<Self, FetchError> {
        let text = String::from_utf8_lossy(line);
        let text = text.trim_end();
        let (code, message) = text.split_once(' ').unwrap_or((text, ""));

        let code = code
            .parse::<u16>()
            .ok()
            .filter(|c| (100..600).contains(c))
            .ok_or_else(|| FetchError::Protocol(format!("无法解析状态行: {text}")))?;

        Ok(Self {
            code,
            message: message.to_string(),
        })
    }

    pub(super) fn into_error(self) -> FetchError {
        FetchError::Status {
            code: self.code,
            message: self.message,
        }
    }
}

pub(super) struct NntpConnection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    /// 一旦读写中途失败，响应边界就无法再对齐，之后的命令全部拒绝
    broken: bool,
}

impl NntpConnection {
    pub(super) fn new(stream: TcpStream) -> Self {
        let (reader, writer) = stream.into_split();
        Self {
            reader: BufReader::new(reader),
            writer,
            broken: false,
        }
    }

    pub(super) fn is_broken(&self) -> bool {
        self.broken
    }

    pub(super) fn mark_broken(&mut self) {
        self.broken = true;
    }

    pub(super) async fn send_command(&mut self, command: &str) -> Result<(), FetchError> {
        self.writer.write_all(command.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<(), FetchError> {
        buf.clear();
        let n = self.reader.read_until(b'\n', buf).await?;
        if n == 0 {
            return Err(FetchError::ConnectionClosed);
        }
        Ok(())
    }

    pub(super) async fn read_status(&mut self) -> Result<StatusLine, FetchError> {
        let mut line = Vec::new();
        self.read_line(&mut line).await?;
        StatusLine::parse(&line)
    }

    /// 读取以单独一行 `.` 结尾的多行数据块，并去掉行首的点填充（`..` → `.`）。
    ///
    /// 返回的数据保留原始行结束符，解码器自行处理 CR/LF。
    pub(super) async fn read_multiline(&mut self) -> Result<Bytes, FetchError> {
        let mut body = BytesMut::new();
        let mut line = Vec::new();

        loop {
            self.read_line(&mut line).await?;

            let content = line
                .strip_suffix(b"\n")
                .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
                .unwrap_or(&line);
            if content == b"." {
                break;
            }

            if line.starts_with(b"..") {
                body.extend_from_slice(&line[1..]);
            } else {
                body.extend_from_slice(&line);
            }
        }

        Ok(body.freeze())
    }
}
