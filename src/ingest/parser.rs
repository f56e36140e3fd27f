//! Message header parsing
//!
//! Pulls the sender and the `To:` recipients out of an RFC 822 style header
//! block. Everything after the first blank line is body and is ignored.

use crate::graph::Address;
use regex::Regex;
use std::sync::LazyLock;

static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w][\w.\-]*@[\w.\-]+").expect("address pattern is valid")
});

/// Sender and recipients of one message, lower-cased
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageHeader {
    pub sender: Option<Address>,
    pub recipients: Vec<Address>,
}

impl MessageHeader {
    /// One `(sender, recipient)` pair per recipient; empty without a sender
    pub fn edges(&self) -> impl Iterator<Item = (Address, Address)> + '_ {
        self.sender
            .iter()
            .flat_map(move |s| self.recipients.iter().map(move |r| (s.clone(), r.clone())))
    }

    /// Every address mentioned, sender first
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.sender.iter().chain(self.recipients.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.sender.is_none() && self.recipients.is_empty()
    }
}

/// Extract all addresses from a header value, lower-cased.
///
/// No top-level domain is required (`root@localhost` counts). Trailing dots
/// are punctuation, not part of the domain.
pub fn extract_addresses(text: &str) -> Vec<Address> {
    ADDRESS
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches('.'))
        .filter(|s| !s.ends_with('@'))
        .map(|s| Address::new(s.to_lowercase()))
        .collect()
}

/// Unfold the header block into `(name, value)` pairs.
///
/// Lines starting with whitespace continue the previous header.
fn headers(text: &str) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::new();
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            break;
        }
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some((_, value)) = out.last_mut() {
                value.push(' ');
                value.push_str(line.trim());
            }
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            out.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    out
}

/// Parse the header block of a raw message.
///
/// The sender is the first address of the `From:` header. Recipients come
/// from `To:` headers only; `Cc`, `Bcc` and `X-To` are not edges.
pub fn parse_message(text: &str) -> MessageHeader {
    let mut header = MessageHeader::default();
    for (name, value) in headers(text) {
        if name.eq_ignore_ascii_case("from") {
            if header.sender.is_none() {
                header.sender = extract_addresses(&value).into_iter().next();
            }
        } else if name.eq_ignore_ascii_case("to") {
            header.recipients.extend(extract_addresses(&value));
        }
    }
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(s: &str) -> Address {
        Address::from(s)
    }

    #[test]
    fn test_parse_basic_message() {
        let raw = "Message-ID: <1@x>\r\nFrom: Phillip Allen <Phillip.Allen@Enron.com>\r\n\
                   To: tim.belden@enron.com, john.lavorato@enron.com\r\n\
                   X-To: Tim Belden <ignored@enron.com>\r\n\r\n\
                   To: body.mention@enron.com\r\n";
        let header = parse_message(raw);

        assert_eq!(header.sender, Some(a("phillip.allen@enron.com")));
        assert_eq!(
            header.recipients,
            vec![a("tim.belden@enron.com"), a("john.lavorato@enron.com")]
        );
        assert_eq!(header.edges().count(), 2);
    }

    #[test]
    fn test_folded_recipient_lines() {
        let raw = "From: a@example.com\nTo: b@example.com,\n\tc@example.com,\n  d@example.com\nSubject: hi\n\nbody";
        let header = parse_message(raw);
        assert_eq!(
            header.recipients,
            vec![a("b@example.com"), a("c@example.com"), a("d@example.com")]
        );
    }

    #[test]
    fn test_message_without_recipients() {
        let header = parse_message("From: lonely@example.com\nSubject: memo\n\n");
        assert_eq!(header.sender, Some(a("lonely@example.com")));
        assert!(header.recipients.is_empty());
        assert_eq!(header.edges().count(), 0);
        assert_eq!(header.addresses().count(), 1);
    }

    #[test]
    fn test_garbage_is_empty() {
        assert!(parse_message("no headers here\n\n").is_empty());
        assert!(parse_message("").is_empty());
    }

    #[test]
    fn test_extract_addresses() {
        assert_eq!(
            extract_addresses("<Jeff.Skilling@ENRON.com>; .dot@x.org, k_lay@enron.com."),
            vec![a("jeff.skilling@enron.com"), a("dot@x.org"), a("k_lay@enron.com")]
        );
    }

    #[test]
    fn test_addresses_without_dotted_domain() {
        assert_eq!(
            extract_addresses("root@localhost, Ops-Team@mailhub"),
            vec![a("root@localhost"), a("ops-team@mailhub")]
        );
        let header = parse_message("From: cron@server01\nTo: admin@server01\n\n");
        assert_eq!(header.edges().count(), 1);
    }
}
