use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::session::{CrawlRequest, Crawler};

/// Request-log format: method and path, status, latency, peer and user agent.
pub const ACCESS_LOG_FORMAT: &str = r#"%r %s %Dms %a "%{User-Agent}i""#;

pub struct AppState {
    pub crawler: Crawler,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlBody {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub single_page: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/api/health", web::get().to(health_check))
        .route("/api/crawl", web::post().to(crawl_handler))
        .route("/api/crawl/report", web::post().to(crawl_report_handler));
}

pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "site-crawler"
    })))
}

/// Crawls the requested URL and answers with the list of page records.
pub async fn crawl_handler(
    state: web::Data<AppState>,
    body: web::Json<CrawlBody>,
) -> Result<HttpResponse> {
    let request = match validate(body.into_inner()) {
        Ok(request) => request,
        Err(response) => return Ok(response),
    };

    log::info!("Received crawl request for {}", request.base_url);
    let pages = state.crawler.run(request).await.pages;
    Ok(HttpResponse::Ok().json(pages))
}

/// Same as [`crawl_handler`] but answers with the whole crawl report.
pub async fn crawl_report_handler(
    state: web::Data<AppState>,
    body: web::Json<CrawlBody>,
) -> Result<HttpResponse> {
    let request = match validate(body.into_inner()) {
        Ok(request) => request,
        Err(response) => return Ok(response),
    };

    log::info!("Received crawl report request for {}", request.base_url);
    let report = state.crawler.run(request).await;
    Ok(HttpResponse::Ok().json(report))
}

fn validate(body: CrawlBody) -> std::result::Result<CrawlRequest, HttpResponse> {
    let url = body.url.unwrap_or_default();
    if url.trim().is_empty() {
        return Err(bad_request("The url field is required.".to_string()));
    }
    if let Err(e) = url::Url::parse(&url) {
        return Err(bad_request(format!("The url field must be a valid URL: {}", e)));
    }
    Ok(CrawlRequest::new(url, body.single_page))
}

// Body that fails to parse, or has a field of the wrong type.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = bad_request(format!("Invalid request body: {}", err));
    InternalError::from_response(err, response).into()
}

fn bad_request(error: String) -> HttpResponse {
    log::warn!("Rejected crawl request: {}", error);
    HttpResponse::BadRequest().json(ErrorResponse { error })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_defaults_to_recursive() {
        let body: CrawlBody = serde_json::from_str(r#"{"url": "http://example.com"}"#).unwrap();
        assert_eq!(body.url.as_deref(), Some("http://example.com"));
        assert!(!body.single_page);

        let body: CrawlBody =
            serde_json::from_str(r#"{"url": "http://example.com", "singlePage": true}"#).unwrap();
        assert!(body.single_page);
    }

    #[test]
    fn test_validate_rejects_missing_and_relative_urls() {
        let missing = CrawlBody {
            url: None,
            single_page: false,
        };
        assert!(validate(missing).is_err());

        let blank = CrawlBody {
            url: Some("  ".to_string()),
            single_page: false,
        };
        assert!(validate(blank).is_err());

        let relative = CrawlBody {
            url: Some("/just/a/path".to_string()),
            single_page: false,
        };
        assert!(validate(relative).is_err());
    }

    #[test]
    fn test_validate_keeps_url_verbatim() {
        let body = CrawlBody {
            url: Some("http://example.com".to_string()),
            single_page: true,
        };
        let request = validate(body).unwrap();
        // no trailing slash added; the string is also the internal-link prefix
        assert_eq!(request.base_url, "http://example.com");
        assert!(request.single_page);
    }
}
