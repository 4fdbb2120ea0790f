//! `=ybegin` / `=ypart` / `=yend` 控制行的字段解析。

use crate::codec::DecodeError;

/// 控制行中的 `key=value` 字段。`name` 永远是最后一个字段，且可能包含空格。
#[derive(Debug)]
pub(super) struct HeaderLine {
    fields: Vec<(String, String)>,
}

impl HeaderLine {
    /// 行以 `keyword` 开头时解析出字段，否则返回 `None`。
    pub(super) fn parse(line: &[u8], keyword: &[u8]) -> Option<Self> {
        let rest = line.strip_prefix(keyword)?;
        let text = String::from_utf8_lossy(rest);

        let (head, name) = match text.find("name=") {
            Some(idx) => (&text[..idx], Some(text[idx + 5..].trim_end())),
            None => (&text[..], None),
        };

        let mut fields: Vec<(String, String)> = head
            .split_whitespace()
            .filter_map(|token| token.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        if let Some(name) = name {
            fields.push(("name".to_string(), name.to_string()));
        }

        Some(Self { fields })
    }

    pub(super) fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub(super) fn get_u64(&self, key: &'static str) -> Result<Option<u64>, DecodeError> {
        self.get(key)
            .map(|v| {
                v.parse::<u64>().map_err(|_| DecodeError::InvalidField {
                    field: key,
                    value: v.to_string(),
                })
            })
            .transpose()
    }

    /// CRC 以十六进制书写，个别编码器会省略前导 0。
    pub(super) fn get_crc(&self, key: &'static str) -> Result<Option<u32>, DecodeError> {
        self.get(key)
            .map(|v| {
                u32::from_str_radix(v.trim_start_matches("0x"), 16).map_err(|_| {
                    DecodeError::InvalidField {
                        field: key,
                        value: v.to_string(),
                    }
                })
            })
            .transpose()
    }
}
