//! IP 地址处理工具
//!
//! 提供统一的客户端 IP 提取功能。直连场景使用对端地址；当对端是
//! 私有地址或 localhost（反向代理部署）时采用 X-Forwarded-For。

use std::net::IpAddr;

use actix_web::HttpRequest;

/// 检查 IP 是否为私有地址或 localhost
pub fn is_private_or_local(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        IpAddr::V6(v6) => {
            // IPv6 私有地址：
            // - fc00::/7 (ULA, RFC 4193)
            // - fe80::/10 (Link-local)
            // - ::1 (Loopback)
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00) == 0xfc00
                || (v6.segments()[0] & 0xffc0) == 0xfe80
        }
    }
}

/// 解析 X-Forwarded-For 的第一个地址
fn first_forwarded_entry(value: &str) -> Option<String> {
    let first = value.split(',').next()?.trim();
    if first.is_empty() {
        return None;
    }
    Some(first.to_string())
}

/// 从请求中提取客户端 IP
///
/// 对端为公网地址时直接使用对端 IP，防止伪造转发头；对端为私有或
/// 回环地址时（典型的反向代理部署）优先取 X-Forwarded-For，其次
/// X-Real-IP，最后回落到对端地址。
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    let peer_ip = req.peer_addr().map(|addr| addr.ip());

    let forwarded = || {
        req.headers()
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok())
            .and_then(first_forwarded_entry)
            .or_else(|| {
                req.headers()
                    .get("X-Real-IP")
                    .and_then(|v| v.to_str().ok())
                    .map(|s| s.trim().to_string())
            })
    };

    match peer_ip {
        Some(ip) if is_private_or_local(&ip) => forwarded().or_else(|| Some(ip.to_string())),
        Some(ip) => Some(ip.to_string()),
        None => forwarded(),
    }
}
