//! Redaction of identifiers and contact details in log output.
//!
//! Assessment and patient ids are UUIDs, and free-text fields (review notes,
//! patient ids typed by hand) may carry emails or phone numbers. Everything
//! the subscriber formats goes through [`SanitizingMakeWriter`], which
//! rewrites each line with [`sanitize`] before it reaches the sink.
//!
//! Input per call is capped (`CARDIOWISE_SANITIZE_MAX_BYTES`, 16 KiB by
//! default); anything beyond the cap is dropped and marked `[TRUNCATED]`.

use std::io::{self, Write};
use std::sync::OnceLock;

use regex::{Regex, RegexSet};
use tracing_subscriber::fmt::MakeWriter;

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;
const MAX_BYTES_ENV: &str = "CARDIOWISE_SANITIZE_MAX_BYTES";

/// (pattern, replacement), applied in order.
const RULES: [(&str, &str); 5] = [
    (
        r"(?i)\bbearer\s+[a-z0-9._~+/-]{8,}=*",
        "Bearer [REDACTED-TOKEN]",
    ),
    (
        r"\beyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\b",
        "[REDACTED-JWT]",
    ),
    (
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
        "[REDACTED-UUID]",
    ),
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    (
        r"(?:\+\d{1,3}[-.\s]?)?\(?\b[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s][0-9]{4}\b",
        "[REDACTED-PHONE]",
    ),
];

struct Patterns {
    any: RegexSet,
    each: Vec<(Regex, &'static str)>,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        any: RegexSet::new(RULES.iter().map(|(p, _)| *p)).expect("Valid regex set"),
        each: RULES
            .iter()
            .map(|(p, r)| (Regex::new(p).expect("Valid regex"), *r))
            .collect(),
    })
}

fn max_bytes() -> usize {
    static MAX: OnceLock<usize> = OnceLock::new();
    *MAX.get_or_init(|| {
        std::env::var(MAX_BYTES_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
    })
}

/// Longest prefix of `input` within `max` bytes that ends on a char boundary.
fn clip(input: &str, max: usize) -> (&str, bool) {
    if input.len() <= max {
        return (input, false);
    }
    let mut end = max;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Replace identifiers and contact details in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_bytes())
}

fn sanitize_with_limit(input: &str, max: usize) -> String {
    let (head, truncated) = clip(input, max);
    let p = patterns();

    let mut out = head.to_string();
    for idx in p.any.matches(head).iter() {
        let (regex, replacement) = &p.each[idx];
        out = regex.replace_all(&out, *replacement).into_owned();
    }

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// `MakeWriter` that sanitizes each formatted line before passing it on.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: Write> SanitizingWriter<W> {
    fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn drain_lines(&mut self) -> io::Result<()> {
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line)?;
        }
        Ok(())
    }
}

impl<W: Write> Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        // A single line longer than twice the cap is flushed as-is (clipped).
        if self.pending.len() > max_bytes().saturating_mul(2) {
            let all = std::mem::take(&mut self.pending);
            self.emit(&all)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.drain_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drain_lines()?;
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
        }
        self.inner.flush()
    }
}

impl<W: Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
