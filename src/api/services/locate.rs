//! Locate endpoints: "what is my IP, and where am I"
//!
//! - `/` (and any unmatched path): plain-text IP, JSON when `Accept` contains
//!   `application/json` or the query has `format=json`
//! - `/json`: always JSON
//!
//! Lookup failures degrade to empty fields. The status is always 200.

use std::sync::Arc;

use actix_web::http::header::ACCEPT;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, error};

use crate::services::{GeoIpProvider, IpResponse};
use crate::utils::ip::extract_client_ip;

const JSON_MEDIA_TYPE: &str = "application/json";

pub struct LocateService;

impl LocateService {
    /// `/`：按内容协商返回纯文本或 JSON
    pub async fn handle_root(
        req: HttpRequest,
        geoip: Option<web::Data<Arc<GeoIpProvider>>>,
    ) -> HttpResponse {
        let ip = extract_client_ip(&req);

        if Self::wants_json(&req) {
            Self::json_response(&ip, geoip).await
        } else {
            Self::text_response(&ip)
        }
    }

    /// `/json`：始终返回 JSON
    pub async fn handle_json(
        req: HttpRequest,
        geoip: Option<web::Data<Arc<GeoIpProvider>>>,
    ) -> HttpResponse {
        let ip = extract_client_ip(&req);
        Self::json_response(&ip, geoip).await
    }

    /// 是否请求了 JSON 格式
    pub fn wants_json(req: &HttpRequest) -> bool {
        let accepts_json = req
            .headers()
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|accept| accept.contains(JSON_MEDIA_TYPE));

        accepts_json || Self::format_param_is_json(req.query_string())
    }

    fn format_param_is_json(query: &str) -> bool {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "format")
            .is_some_and(|(_, value)| value == "json")
    }

    async fn json_response(ip: &str, geoip: Option<web::Data<Arc<GeoIpProvider>>>) -> HttpResponse {
        let response = match geoip {
            Some(provider) => provider.respond(ip).await,
            None => {
                debug!("GeoIP provider unavailable, returning bare IP");
                IpResponse::bare(ip)
            }
        };

        match serde_json::to_vec(&response) {
            Ok(mut body) => {
                body.push(b'\n');
                HttpResponse::Ok()
                    .content_type(JSON_MEDIA_TYPE)
                    .body(body)
            }
            Err(e) => {
                error!("Failed to serialize response for {}: {}", ip, e);
                HttpResponse::InternalServerError().finish()
            }
        }
    }

    fn text_response(ip: &str) -> HttpResponse {
        HttpResponse::Ok()
            .content_type("text/plain")
            .body(format!("{}\n", ip))
    }
}

/// Locate routes
///
/// `/json` is exact; every other path and method falls through to the root
/// handler. The empty-prefix scope swallows all paths, so register it last.
pub fn locate_routes() -> actix_web::Scope {
    web::scope("")
        .route("/json", web::get().to(LocateService::handle_json))
        .route("/json", web::head().to(LocateService::handle_json))
        .default_service(web::to(LocateService::handle_root))
}
