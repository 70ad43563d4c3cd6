//! Email-specific types: parsed reply, header list, body selection.

use chrono::{DateTime, Utc};
use mail_parser::{HeaderValue, MessageParser, PartType};

use crate::error::ParseError;

/// Ordered header list with case-insensitive lookup.
///
/// Keeps duplicates and original order, the way they appear on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value for `name`, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The body picked from a reply, plain text preferred over HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailBody {
    Plain(String),
    Html(String),
}

impl EmailBody {
    pub fn content(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Html(s) => s,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plain(_) => "plain",
            Self::Html(_) => "html",
        }
    }
}

/// A reply email parsed from raw RFC 5322 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEmail {
    pub headers: Headers,
    pub body: Option<EmailBody>,
    /// `Date` header, normalized to UTC.
    pub date: Option<DateTime<Utc>>,
}

impl ParsedEmail {
    /// Parse raw message bytes.
    ///
    /// Input whose header block has no `Name: value` line is rejected as
    /// malformed, whatever the parser would make of it.
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        let malformed = ParseError::Malformed { len: raw.len() };
        if !has_header_line(raw) {
            return Err(malformed);
        }
        let parsed = MessageParser::default().parse(raw).ok_or(malformed)?;

        let raw_message = parsed.raw_message();
        let headers = parsed
            .headers()
            .iter()
            .map(|h| {
                let start = (h.offset_start as usize).min(raw_message.len());
                let end = (h.offset_end as usize).clamp(start, raw_message.len());
                let value = render_header_value(h.value())
                    .unwrap_or_else(|| unfold(&raw_message[start..end]));
                (h.name().to_string(), value)
            })
            .collect();

        let date = parsed
            .date()
            .and_then(|d| DateTime::from_timestamp(d.to_timestamp(), 0));

        Ok(Self {
            headers: Headers::new(headers),
            body: select_body(&parsed),
            date,
        })
    }

    /// The `Subject` header, empty when absent.
    pub fn subject(&self) -> &str {
        self.headers.get("subject").unwrap_or_default()
    }

    /// The `From` header, if any.
    pub fn from(&self) -> Option<&str> {
        self.headers.get("from")
    }
}

/// True when a line before the first blank line looks like `Name: value`:
/// a non-empty name of printable ASCII without spaces, then a colon.
fn has_header_line(raw: &[u8]) -> bool {
    raw.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .take_while(|line| !line.is_empty())
        .any(|line| match line.iter().position(|&b| b == b':') {
            Some(colon) => {
                colon > 0 && line[..colon].iter().all(|&b| b.is_ascii_graphic())
            }
            None => false,
        })
}

/// Plain part first, then HTML. Parts the parser converted between the two
/// are skipped so each variant holds its original content.
fn select_body(parsed: &mail_parser::Message) -> Option<EmailBody> {
    parsed
        .text_bodies()
        .find_map(|part| match &part.body {
            PartType::Text(text) => Some(EmailBody::Plain(text.to_string())),
            _ => None,
        })
        .or_else(|| {
            parsed.html_bodies().find_map(|part| match &part.body {
                PartType::Html(html) => Some(EmailBody::Html(html.to_string())),
                _ => None,
            })
        })
}

/// Decoded text for the header kinds that carry it; `None` falls back to raw.
fn render_header_value(value: &HeaderValue) -> Option<String> {
    match value {
        HeaderValue::Text(text) => Some(text.to_string()),
        HeaderValue::TextList(list) => Some(list.join(", ")),
        HeaderValue::Address(addr) => Some(render_addresses(addr)),
        HeaderValue::Empty => Some(String::new()),
        _ => None,
    }
}

/// `Name <addr>` / `addr` entries joined by commas.
fn render_addresses(addr: &mail_parser::Address) -> String {
    let render = |a: &mail_parser::Addr| match (&a.name, &a.address) {
        (Some(name), Some(address)) => format!("{name} <{address}>"),
        (None, Some(address)) => address.to_string(),
        (Some(name), None) => name.to_string(),
        (None, None) => String::new(),
    };
    let rendered: Vec<String> = match addr {
        mail_parser::Address::List(addrs) => addrs.iter().map(render).collect(),
        mail_parser::Address::Group(groups) => groups
            .iter()
            .flat_map(|g| g.addresses.iter().map(render))
            .collect(),
    };
    rendered
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Undo header folding on a raw value.
fn unfold(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
