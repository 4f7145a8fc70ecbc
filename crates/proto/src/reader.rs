// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Incremental op stream reader.
//!
//! Parses the wire grammar off a buffered byte stream, one op at a time.
//! Control lines are CRLF-terminated; `MSG` additionally carries a binary
//! payload of the advertised length followed by CRLF.

use std::io::{BufRead, Read};

use crate::error::{Error, Result};
use crate::op::{MsgOp, Op};

/// Maximum accepted control line length (1MB) so a malformed or hostile
/// stream cannot grow the line buffer unboundedly. INFO payloads are the
/// largest legitimate control lines and stay far below this.
const MAX_CONTROL_LINE: usize = 1024 * 1024;

/// Reads parsed ops off a buffered byte stream.
pub struct OpReader<R> {
    inner: R,
    line: Vec<u8>,
}

impl<R: BufRead> OpReader<R> {
    /// Creates a reader over the given buffered stream.
    pub fn new(inner: R) -> Self {
        OpReader {
            inner,
            line: Vec::new(),
        }
    }

    /// Reads the next op from the stream.
    ///
    /// Returns `Ok(None)` on clean end of stream. Errors are not
    /// recoverable; the stream position is undefined after one.
    pub fn next_op(&mut self) -> Result<Option<Op>> {
        self.line.clear();
        let n = self
            .inner
            .by_ref()
            .take(MAX_CONTROL_LINE as u64 + 1)
            .read_until(b'\n', &mut self.line)?;
        if n == 0 {
            return Ok(None);
        }
        if self.line.last() != Some(&b'\n') {
            if self.line.len() > MAX_CONTROL_LINE {
                return Err(Error::ControlLineTooLong {
                    len: self.line.len(),
                    max: MAX_CONTROL_LINE,
                });
            }
            return Err(Error::UnexpectedEof("control line"));
        }

        let line = trim_crlf(&self.line);
        let line = std::str::from_utf8(line)
            .map_err(|_| Error::MalformedOp("control line is not valid UTF-8".into()))?;

        let (tag, rest) = match line.split_once(' ') {
            Some((tag, rest)) => (tag, rest),
            None => (line, ""),
        };

        // `line` still borrows the line buffer here; the payload read only
        // needs the stream, so it borrows that field alone.
        let op = if tag.eq_ignore_ascii_case("MSG") {
            Op::Msg(Self::read_msg(&mut self.inner, rest)?)
        } else if tag.eq_ignore_ascii_case("INFO") {
            Op::Info(rest.trim().to_string())
        } else if tag.eq_ignore_ascii_case("PING") {
            Op::Ping
        } else if tag.eq_ignore_ascii_case("PONG") {
            Op::Pong
        } else if tag == "+OK" {
            Op::Ok
        } else if tag == "-ERR" {
            Op::Err(unquote(rest.trim()).to_string())
        } else {
            return Err(Error::MalformedOp(format!("unknown op '{}'", tag)));
        };

        Ok(Some(op))
    }

    /// A lazy sequence of parsed ops, driven by the underlying stream.
    ///
    /// Each call starts a fresh pull-based sequence from the current stream
    /// position; the sequence ends when the stream ends or errors.
    pub fn ops(&mut self) -> Ops<'_, R> {
        Ops { reader: self }
    }

    /// Parses a `MSG` argument list and reads the trailing payload off
    /// `inner`.
    fn read_msg(inner: &mut R, args: &str) -> Result<MsgOp> {
        let parts: Vec<&str> = args.split_ascii_whitespace().collect();
        let (subject, sid, reply_to, len_str) = match parts.as_slice() {
            [subject, sid, len] => (*subject, *sid, None, *len),
            [subject, sid, reply, len] => (*subject, *sid, Some((*reply).to_string()), *len),
            _ => {
                return Err(Error::MalformedMsg(format!(
                    "expected 3 or 4 arguments, got {}",
                    parts.len()
                )))
            }
        };

        let len: usize = len_str
            .parse()
            .map_err(|_| Error::MalformedMsg(format!("invalid payload length '{}'", len_str)))?;

        let mut payload = vec![0u8; len];
        inner
            .read_exact(&mut payload)
            .map_err(|_| Error::UnexpectedEof("MSG payload"))?;

        let mut crlf = [0u8; 2];
        inner
            .read_exact(&mut crlf)
            .map_err(|_| Error::UnexpectedEof("MSG payload terminator"))?;
        if &crlf != b"\r\n" {
            return Err(Error::MalformedMsg(
                "payload not terminated by CRLF".into(),
            ));
        }

        Ok(MsgOp::new(subject, sid, reply_to, payload))
    }
}

/// Lazy iterator over parsed ops. See [`OpReader::ops`].
pub struct Ops<'a, R> {
    reader: &'a mut OpReader<R>,
}

impl<R: BufRead> Iterator for Ops<'_, R> {
    type Item = Result<Op>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_op().transpose()
    }
}

fn trim_crlf(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(s)
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
