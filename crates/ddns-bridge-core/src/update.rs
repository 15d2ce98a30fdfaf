//! Inbound update requests
//!
//! An update request is the raw text a client posts to the bridge: an IPv4
//! or IPv6 literal. The bridge never parses the address itself; it only
//! classifies the family so it can pick the right record identifier. The
//! classification rule is deliberately crude: any `:` means IPv6.

use crate::config::BridgeConfig;

/// Address family of a reported address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    /// IPv4 (A record)
    V4,
    /// IPv6 (AAAA record)
    V6,
}

impl AddressFamily {
    /// Classify a trimmed request body
    ///
    /// A body without a colon is IPv4, anything else IPv6, regardless of
    /// whether the text is a valid address at all.
    pub fn classify(text: &str) -> Self {
        if text.contains(':') {
            Self::V6
        } else {
            Self::V4
        }
    }

    /// The configured record identifier for this family, if enabled
    pub fn record_id<'a>(&self, config: &'a BridgeConfig) -> Option<&'a str> {
        let record = match self {
            Self::V4 => &config.record_a,
            Self::V6 => &config.record_aaaa,
        };
        if record.is_empty() {
            None
        } else {
            Some(record)
        }
    }

    /// Response body sent when this family has no record configured
    pub fn unsupported_message(&self) -> &'static str {
        match self {
            Self::V4 => "IPv4 address support is not enabled",
            Self::V6 => "IPv6 address support is not enabled",
        }
    }
}

/// One inbound update, derived per HTTP call
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    /// Trimmed body text, forwarded verbatim as the record content
    pub content: String,
    /// Family inferred from the content
    pub family: AddressFamily,
}

impl UpdateRequest {
    /// Build an update from a raw request body
    pub fn from_body(raw: &str) -> Self {
        let content = raw.trim().to_string();
        let family = AddressFamily::classify(&content);
        Self { content, family }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_records(record_a: &str, record_aaaa: &str) -> BridgeConfig {
        BridgeConfig {
            http_addr: ":28275".into(),
            http_path: "/update".into(),
            token: "t".into(),
            zone: "z".into(),
            record_a: record_a.into(),
            record_aaaa: record_aaaa.into(),
        }
    }

    #[test]
    fn no_colon_is_ipv4() {
        assert_eq!(AddressFamily::classify("1.2.3.4"), AddressFamily::V4);
        assert_eq!(AddressFamily::classify(""), AddressFamily::V4);
        assert_eq!(AddressFamily::classify("not-an-address"), AddressFamily::V4);
    }

    #[test]
    fn any_colon_is_ipv6() {
        assert_eq!(AddressFamily::classify("::1"), AddressFamily::V6);
        assert_eq!(
            AddressFamily::classify("2001:db8::beef"),
            AddressFamily::V6
        );
        assert_eq!(AddressFamily::classify("a:b"), AddressFamily::V6);
    }

    #[test]
    fn body_is_trimmed_before_classification() {
        let update = UpdateRequest::from_body("  1.2.3.4\r\n");
        assert_eq!(update.content, "1.2.3.4");
        assert_eq!(update.family, AddressFamily::V4);

        let update = UpdateRequest::from_body("\t::1 \n");
        assert_eq!(update.content, "::1");
        assert_eq!(update.family, AddressFamily::V6);
    }

    #[test]
    fn record_id_follows_family() {
        let config = config_with_records("ra", "raaaa");
        assert_eq!(AddressFamily::V4.record_id(&config), Some("ra"));
        assert_eq!(AddressFamily::V6.record_id(&config), Some("raaaa"));
    }

    #[test]
    fn empty_record_disables_family() {
        let config = config_with_records("", "raaaa");
        assert_eq!(AddressFamily::V4.record_id(&config), None);
        assert_eq!(AddressFamily::V6.record_id(&config), Some("raaaa"));
    }

    #[test]
    fn unsupported_messages_name_the_family() {
        assert_eq!(
            AddressFamily::V4.unsupported_message(),
            "IPv4 address support is not enabled"
        );
        assert_eq!(
            AddressFamily::V6.unsupported_message(),
            "IPv6 address support is not enabled"
        );
    }
}
