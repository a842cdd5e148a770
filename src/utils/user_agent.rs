//! User-Agent classification
//!
//! Wraps woothee to classify an inbound request into the client
//! characteristics stored on every click event: browser family,
//! operating system and device class.

use woothee::parser::Parser;

use crate::analytics::DeviceClass;

/// woothee 对未识别字段返回的占位符
const WOOTHEE_UNKNOWN: &str = "UNKNOWN";

/// Client characteristics derived from a User-Agent header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub browser: String,
    pub os: String,
    pub device: DeviceClass,
}

impl ClientInfo {
    /// Classify a raw User-Agent header value. A missing or unparseable
    /// header yields `Unknown` browser/OS and a Desktop device class.
    pub fn from_user_agent(ua: Option<&str>) -> Self {
        let Some(ua) = ua else {
            return Self::unknown();
        };

        let parser = Parser::new();
        let Some(result) = parser.parse(ua) else {
            return Self::unknown();
        };

        let browser = if result.name == WOOTHEE_UNKNOWN || result.name.is_empty() {
            "Unknown".to_string()
        } else {
            result.name.to_string()
        };
        let os = if result.os == WOOTHEE_UNKNOWN || result.os.is_empty() {
            "Unknown".to_string()
        } else {
            result.os.to_string()
        };
        let device = match result.category {
            "smartphone" | "mobilephone" => DeviceClass::Mobile,
            _ => DeviceClass::Desktop,
        };

        Self {
            browser,
            os,
            device,
        }
    }

    fn unknown() -> Self {
        Self {
            browser: "Unknown".to_string(),
            os: "Unknown".to_string(),
            device: DeviceClass::Desktop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1";

    #[test]
    fn test_chrome_desktop() {
        let info = ClientInfo::from_user_agent(Some(CHROME_DESKTOP));
        assert_eq!(info.browser, "Chrome");
        assert_eq!(info.device, DeviceClass::Desktop);
    }

    #[test]
    fn test_iphone_is_mobile() {
        let info = ClientInfo::from_user_agent(Some(SAFARI_IPHONE));
        assert_eq!(info.device, DeviceClass::Mobile);
    }

    #[test]
    fn test_missing_header() {
        let info = ClientInfo::from_user_agent(None);
        assert_eq!(info.browser, "Unknown");
        assert_eq!(info.os, "Unknown");
        assert_eq!(info.device, DeviceClass::Desktop);
    }

    #[test]
    fn test_garbage_header() {
        let info = ClientInfo::from_user_agent(Some("definitely not a browser"));
        assert_eq!(info.browser, "Unknown");
        assert_eq!(info.device, DeviceClass::Desktop);
    }
}
