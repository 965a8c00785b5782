//! payload/plaintext.rs
//! Plaintext framing of the hidden message and its optional link.
//!
//! Wire form (before compression), big-endian lengths:
//! `u32 message_len | message | u32 link_len | link`
//!
//! Two length-prefixed fields instead of a text separator: a message that
//! contains "\nLINK:" round-trips untouched. `link_len == 0` means no link.

use std::fmt;
use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::constants::LINK_SEPARATOR;
use crate::types::StegoError;

/// Decoded content of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HiddenMessage {
    pub message: String,
    pub link: Option<String>,
}

impl HiddenMessage {
    /// An empty link is stored as no link.
    pub fn new(message: &str, link: Option<&str>) -> Self {
        Self {
            message: message.to_owned(),
            link: link.filter(|l| !l.is_empty()).map(str::to_owned),
        }
    }

    /// Legacy single-string rendering: `message` or `message\nLINK:link`.
    pub fn to_joined(&self) -> String {
        match &self.link {
            Some(link) => format!("{}{}{}", self.message, LINK_SEPARATOR, link),
            None => self.message.clone(),
        }
    }

    /// Split a legacy joined string. Only the last separator counts as the
    /// link boundary, so a separator inside the message stays in the message.
    /// Lossy for messages whose own text ends in a separator-like suffix; the
    /// framed form has no such ambiguity.
    pub fn split_joined(text: &str) -> Self {
        match text.rsplit_once(LINK_SEPARATOR) {
            Some((message, link)) => Self::new(message, Some(link)),
            None => Self::new(text, None),
        }
    }

    /// Serialize into the length-prefixed plaintext form.
    pub fn frame(&self) -> Result<Vec<u8>, StegoError> {
        let link = self.link.as_deref().unwrap_or("");
        let msg_len = field_len(self.message.len(), "message")?;
        let link_len = field_len(link.len(), "link")?;

        let mut out = Vec::with_capacity(8 + self.message.len() + link.len());
        out.extend_from_slice(&msg_len.to_be_bytes());
        out.extend_from_slice(self.message.as_bytes());
        out.extend_from_slice(&link_len.to_be_bytes());
        out.extend_from_slice(link.as_bytes());
        Ok(out)
    }

    /// Parse the length-prefixed plaintext form. Any malformation is `CorruptPayload`.
    pub fn unframe(bytes: &[u8]) -> Result<Self, StegoError> {
        let mut cur = Cursor::new(bytes);
        let message = read_field(&mut cur, "message")?;
        let link = read_field(&mut cur, "link")?;

        let consumed = cur.position() as usize;
        if consumed != bytes.len() {
            return Err(StegoError::CorruptPayload(format!(
                "{} trailing bytes after plaintext fields", bytes.len() - consumed
            )));
        }

        Ok(Self {
            message,
            link: if link.is_empty() { None } else { Some(link) },
        })
    }
}

impl fmt::Display for HiddenMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_joined())
    }
}

fn field_len(len: usize, name: &str) -> Result<u32, StegoError> {
    u32::try_from(len).map_err(|_| {
        StegoError::InvalidInput(format!("{} of {} bytes does not fit a u32 length prefix", name, len))
    })
}

fn read_field(cur: &mut Cursor<&[u8]>, name: &str) -> Result<String, StegoError> {
    let len = cur
        .read_u32::<BigEndian>()
        .map_err(|_| StegoError::CorruptPayload(format!("missing {} length prefix", name)))? as usize;

    let remaining = cur.get_ref().len() - cur.position() as usize;
    if len > remaining {
        return Err(StegoError::CorruptPayload(format!(
            "{} length {} exceeds remaining {} bytes", name, len, remaining
        )));
    }

    let mut buf = vec![0u8; len];
    cur.read_exact(&mut buf)
        .map_err(|e| StegoError::CorruptPayload(format!("{} truncated: {}", name, e)))?;
    String::from_utf8(buf)
        .map_err(|_| StegoError::CorruptPayload(format!("{} is not valid UTF-8", name)))
}
