//! yEnc 段解码器
//!
//! 一篇 yEnc 文章的结构：
//!
//! ```text
//! =ybegin part=1 total=10 line=128 size=1000000 name=file.bin
//! =ypart begin=1 end=100000
//! ...编码数据...
//! =yend size=100000 part=1 pcrc32=abcdef12
//! ```
//!
//! - 每个数据字节 `b` 还原为 `b - 42`；`=` 为转义前缀，其后字节还原为 `b - 106`
//! - 行尾的 CR/LF 不属于数据
//! - 有 `=ypart` 时段大小为 `end - begin + 1`，否则整篇即整个文件
//! - `=yend` 上的 `size` 与 `pcrc32`（单段时也可能只有 `crc32`）用于校验

mod header;

use bytes::Bytes;

use crate::codec::{DecodeError, DecodedSegment, SegmentDecoder, SegmentMetadata};

use header::HeaderLine;

/// yEnc 解码器，无状态，可在所有虚拟文件之间共享。
#[derive(Debug, Clone, Copy, Default)]
pub struct YencDecoder;

impl YencDecoder {
    pub fn new() -> Self {
        Self
    }
}

fn trim_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn decode_line(line: &[u8], out: &mut Vec<u8>) {
    let mut escaped = false;
    for &b in line {
        if escaped {
            out.push(b.wrapping_sub(106));
            escaped = false;
        } else if b == b'=' {
            escaped = true;
        } else {
            out.push(b.wrapping_sub(42));
        }
    }
}

fn part_size(ypart: &HeaderLine, total_size: u64) -> Result<u64, DecodeError> {
    let begin = ypart
        .get_u64("begin")?
        .ok_or(DecodeError::MissingField("begin"))?;
    let end = ypart.get_u64("end")?.ok_or(DecodeError::MissingField("end"))?;

    // begin 从 1 开始且闭区间，不能超出整个文件
    if begin == 0 || end < begin || end > total_size {
        return Err(DecodeError::InvalidField {
            field: "end",
            value: format!("{begin}-{end}"),
        });
    }
    Ok(end - begin + 1)
}

fn verify_crc(
    ypart: Option<&HeaderLine>,
    yend: &HeaderLine,
    payload: &[u8],
) -> Result<(), DecodeError> {
    let expected = match yend.get_crc("pcrc32")? {
        Some(crc) => Some(crc),
        None if ypart.is_none() => yend.get_crc("crc32")?,
        None => None,
    };

    if let Some(expected) = expected {
        let actual = crc32fast::hash(payload);
        if actual != expected {
            return Err(DecodeError::CrcMismatch { expected, actual });
        }
    }
    Ok(())
}

impl SegmentDecoder for YencDecoder {
    fn decode(&self, raw: &[u8]) -> Result<DecodedSegment, DecodeError> {
        let mut lines = raw.split(|&b| b == b'\n').map(trim_cr);

        let ybegin = lines
            .by_ref()
            .find_map(|line| HeaderLine::parse(line, b"=ybegin "))
            .ok_or(DecodeError::MissingHeader)?;

        let total_size = ybegin
            .get_u64("size")?
            .ok_or(DecodeError::MissingField("size"))?;
        let part = ybegin
            .get_u64("part")?
            .map(|p| {
                u32::try_from(p).map_err(|_| DecodeError::InvalidField {
                    field: "part",
                    value: p.to_string(),
                })
            })
            .transpose()?;

        let mut ypart = None;
        let mut yend = None;
        let mut payload = Vec::with_capacity(raw.len());

        for (index, line) in lines.enumerate() {
            if index == 0 {
                if let Some(header) = HeaderLine::parse(line, b"=ypart ") {
                    ypart = Some(header);
                    continue;
                }
            }
            if let Some(trailer) = HeaderLine::parse(line, b"=yend") {
                yend = Some(trailer);
                break;
            }
            decode_line(line, &mut payload);
        }

        let yend = yend.ok_or(DecodeError::MissingTrailer)?;
        let actual = payload.len() as u64;

        let segment_size = match ypart.as_ref() {
            Some(header) => part_size(header, total_size)?,
            None => total_size,
        };
        if segment_size != actual {
            return Err(DecodeError::SizeMismatch {
                expected: segment_size,
                actual,
            });
        }
        if let Some(size) = yend.get_u64("size")? {
            if size != actual {
                return Err(DecodeError::SizeMismatch {
                    expected: size,
                    actual,
                });
            }
        }

        verify_crc(ypart.as_ref(), &yend, &payload)?;

        Ok(DecodedSegment {
            payload: Bytes::from(payload),
            metadata: Some(SegmentMetadata {
                total_size,
                segment_size,
                part,
            }),
        })
    }
}
