//! Client IP resolution through real HttpRequest values

use actix_web::test::TestRequest;

use ipwhere::utils::ip::{CLIENT_IP_HEADERS, Extraction};
use ipwhere::utils::{extract_client_ip, validate_ip};

#[test]
fn test_header_table_order() {
    let names: Vec<&str> = CLIENT_IP_HEADERS.iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        vec![
            "cf-connecting-ip",
            "true-client-ip",
            "x-real-ip",
            "x-client-ip",
            "fastly-client-ip",
            "x-forwarded-for",
        ]
    );
    // 只有 X-Forwarded-For 是列表
    assert!(
        CLIENT_IP_HEADERS
            .iter()
            .all(|(name, e)| (*e == Extraction::FirstListEntry) == (*name == "x-forwarded-for"))
    );
}

#[test]
fn test_mixed_case_header_names() {
    let req = TestRequest::default()
        .insert_header(("Fastly-Client-IP", "198.51.100.9"))
        .peer_addr("10.1.1.1:80".parse().unwrap())
        .to_http_request();
    assert_eq!(extract_client_ip(&req), "198.51.100.9");
}

#[test]
fn test_every_header_beats_peer() {
    for (name, _) in CLIENT_IP_HEADERS {
        let req = TestRequest::default()
            .insert_header((name, "198.51.100.20"))
            .peer_addr("10.1.1.1:80".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "198.51.100.20", "header {}", name);
    }
}

#[test]
fn test_ipv6_header_canonicalized() {
    let req = TestRequest::default()
        .insert_header(("X-Real-IP", " 2001:DB8:0:0::1 "))
        .to_http_request();
    assert_eq!(extract_client_ip(&req), "2001:db8::1");
}

#[test]
fn test_peer_fallback() {
    let req = TestRequest::default()
        .insert_header(("X-Client-IP", "garbage"))
        .peer_addr("203.0.113.5:51234".parse().unwrap())
        .to_http_request();
    assert_eq!(extract_client_ip(&req), "203.0.113.5");
}

#[test]
fn test_validate_ip_rejects_zones_and_ports() {
    assert_eq!(validate_ip("fe80::1%eth0"), None);
    assert_eq!(validate_ip("[2001:db8::1]"), None);
    assert_eq!(validate_ip("1.2.3"), None);
}
