//! Prometheus HTTP metrics exposed at `/metrics`.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

const NAMESPACE: &str = "medcheck";
const ENDPOINT: &str = "/metrics";

/// Build the request metrics middleware.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the collectors cannot be registered.
pub(super) fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(NAMESPACE)
        .endpoint(ENDPOINT)
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    use super::*;

    #[actix_web::test]
    async fn metrics_endpoint_reports_request_counts() {
        let metrics = build_metrics().expect("metrics build");
        let app = test::init_service(
            App::new()
                .wrap(metrics)
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri(ENDPOINT).to_request()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = test::read_body(response).await;
        let text = std::str::from_utf8(&body).expect("utf8 metrics");
        assert!(text.contains("medcheck_http_requests_total"));
    }
}
