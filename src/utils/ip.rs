//! 客户端 IP 解析
//!
//! 按固定优先级检查代理头，全部失败后回退到连接的 peer 地址：
//! 1. CF-Connecting-IP / True-Client-IP / X-Real-IP / X-Client-IP / Fastly-Client-IP
//! 2. X-Forwarded-For（取第一个条目）
//! 3. peer 地址（去掉端口）
//! 4. 原样返回 peer 地址字符串
//!
//! 解析过程不会失败，最差情况返回未经校验的 peer 地址。

use std::net::IpAddr;

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;
use tracing::trace;

/// 从头部值中提取候选 IP 的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// 整个头部值就是一个 IP
    Whole,
    /// 逗号分隔的列表，取第一个条目
    FirstListEntry,
}

impl Extraction {
    fn candidate<'a>(&self, value: &'a str) -> Option<&'a str> {
        match self {
            Extraction::Whole => Some(value),
            Extraction::FirstListEntry => value.split(',').next(),
        }
    }
}

/// 客户端 IP 头，按优先级排列
pub const CLIENT_IP_HEADERS: [(&str, Extraction); 6] = [
    ("cf-connecting-ip", Extraction::Whole),
    ("true-client-ip", Extraction::Whole),
    ("x-real-ip", Extraction::Whole),
    ("x-client-ip", Extraction::Whole),
    ("fastly-client-ip", Extraction::Whole),
    ("x-forwarded-for", Extraction::FirstListEntry),
];

/// 校验 IP 字符串，返回规范化后的形式
///
/// IPv4-mapped IPv6 地址（`::ffff:1.2.3.4`）规范化为 IPv4。
pub fn validate_ip(candidate: &str) -> Option<String> {
    candidate
        .trim()
        .parse::<IpAddr>()
        .ok()
        .map(|ip| ip.to_canonical().to_string())
}

/// 拆分 `host:port` / `[v6]:port`，不含端口时返回 None
pub fn split_host_port(addr: &str) -> Option<&str> {
    if let Some(rest) = addr.strip_prefix('[') {
        let (host, tail) = rest.split_once(']')?;
        return tail.strip_prefix(':').map(|_| host);
    }

    let (host, _port) = addr.rsplit_once(':')?;
    // 多个冒号说明是裸 IPv6，没有端口
    if host.contains(':') {
        return None;
    }
    Some(host)
}

/// 从请求头中按优先级查找第一个合法的客户端 IP
pub fn resolve_from_headers(headers: &HeaderMap) -> Option<String> {
    CLIENT_IP_HEADERS.iter().find_map(|(name, extraction)| {
        let value = headers.get(*name)?.to_str().ok()?;
        if value.is_empty() {
            return None;
        }
        let ip = validate_ip(extraction.candidate(value)?)?;
        trace!("Client IP resolved from {}: {}", name, ip);
        Some(ip)
    })
}

/// 从 peer 地址解析 IP，失败时返回原始字符串
pub fn resolve_from_peer(peer_addr: &str) -> String {
    let host = split_host_port(peer_addr).unwrap_or(peer_addr);
    validate_ip(host).unwrap_or_else(|| {
        trace!("Peer address {:?} is not a valid IP, returning as-is", peer_addr);
        peer_addr.to_string()
    })
}

/// 综合请求头和 peer 地址解析客户端 IP
pub fn resolve_client_ip(headers: &HeaderMap, peer_addr: Option<&str>) -> String {
    resolve_from_headers(headers).unwrap_or_else(|| resolve_from_peer(peer_addr.unwrap_or("")))
}

/// 从 HttpRequest 解析客户端 IP
pub fn extract_client_ip(req: &HttpRequest) -> String {
    let peer = req.peer_addr().map(|addr| addr.to_string());
    resolve_client_ip(req.headers(), peer.as_deref())
}
