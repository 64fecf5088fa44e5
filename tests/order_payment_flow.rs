use axum::{http::StatusCode, routing::post, Router};
use fault_mesh::metrics::{HttpMetrics, PaymentMetrics};
use fault_mesh::services::{order, payment, OrderService, PaymentOutcome, PaymentSimulator};
use fault_mesh::transport::{HttpPaymentClient, PAYMENT_TIMEOUT};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use url::Url;

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_payment(outcome: PaymentOutcome) -> (SocketAddr, Arc<PaymentMetrics>) {
    let metrics = Arc::new(PaymentMetrics::new().unwrap());
    let simulator = PaymentSimulator::new(Arc::new(move || outcome));
    let addr = spawn(payment::router(simulator, metrics.clone())).await;
    (addr, metrics)
}

async fn spawn_order(payment_addr: SocketAddr) -> (SocketAddr, Arc<HttpMetrics>) {
    let url = Url::parse(&format!("http://{payment_addr}/pay")).unwrap();
    let client = HttpPaymentClient::new(url, PAYMENT_TIMEOUT).unwrap();
    let metrics = Arc::new(HttpMetrics::new().unwrap());
    let app = order::router(OrderService::new(Arc::new(client)), metrics.clone());
    (spawn(app).await, metrics)
}

async fn send_post(addr: SocketAddr, path: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}{path}"))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn order_succeeds_through_real_payment_service() {
    let (payment_addr, payment_metrics) = spawn_payment(PaymentOutcome::Ok).await;
    let (order_addr, order_metrics) = spawn_order(payment_addr).await;

    let res = send_post(order_addr, "/order").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "status": "order created" }));

    // each service records the request it saw, in its own registry
    assert_eq!(order_metrics.request_count("POST", "/order", 200), 1);
    assert_eq!(payment_metrics.request_count(200), 1);
    assert_eq!(payment_metrics.latency_samples(), 1);
}

#[tokio::test]
async fn payment_processing_error_becomes_bad_gateway() {
    let (payment_addr, payment_metrics) = spawn_payment(PaymentOutcome::Error).await;
    let (order_addr, order_metrics) = spawn_order(payment_addr).await;

    let res = send_post(order_addr, "/order").await;
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(payment_metrics.request_count(500), 1);
    assert_eq!(order_metrics.request_count("POST", "/order", 502), 1);
}

#[tokio::test]
async fn simulated_order_error_never_reaches_payment() {
    let (payment_addr, payment_metrics) = spawn_payment(PaymentOutcome::Ok).await;
    let (order_addr, order_metrics) = spawn_order(payment_addr).await;

    let res = send_post(order_addr, "/order?simulate=error").await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payment_metrics.latency_samples(), 0);
    assert_eq!(order_metrics.request_count("POST", "/order", 500), 1);
}

#[tokio::test]
async fn hung_payment_service_times_out_as_unavailable() {
    let hung = Router::new().route(
        "/pay",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            StatusCode::OK
        }),
    );
    let payment_addr = spawn(hung).await;
    let (order_addr, order_metrics) = spawn_order(payment_addr).await;

    let start = Instant::now();
    let res = send_post(order_addr, "/order").await;
    let elapsed = start.elapsed();

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(elapsed >= PAYMENT_TIMEOUT, "returned after {elapsed:?}");
    assert!(elapsed < PAYMENT_TIMEOUT + Duration::from_secs(1), "returned after {elapsed:?}");
    assert_eq!(order_metrics.request_count("POST", "/order", 503), 1);
}

#[tokio::test]
async fn missing_payment_service_is_unavailable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let payment_addr = listener.local_addr().unwrap();
    drop(listener);
    let (order_addr, _metrics) = spawn_order(payment_addr).await;

    let res = send_post(order_addr, "/order").await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(res.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn metrics_endpoint_reports_exact_counts() {
    let (payment_addr, payment_metrics) = spawn_payment(PaymentOutcome::Ok).await;
    let (order_addr, _order_metrics) = spawn_order(payment_addr).await;

    for _ in 0..3 {
        assert_eq!(send_post(order_addr, "/order").await.status(), StatusCode::OK);
    }
    for _ in 0..2 {
        let status = send_post(order_addr, "/order?simulate=error").await.status();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    let res = reqwest::get(format!("http://{order_addr}/metrics")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[reqwest::header::CONTENT_TYPE].to_str().unwrap(),
        prometheus::TEXT_FORMAT
    );
    let text = res.text().await.unwrap();
    assert!(text.contains(r#"http_requests_total{method="POST",path="/order",status="200"} 3"#));
    assert!(text.contains(r#"http_requests_total{method="POST",path="/order",status="500"} 2"#));
    assert!(text.contains(r#"http_request_latency_seconds_count{method="POST",path="/order"} 5"#));

    assert_eq!(payment_metrics.request_count(200), 3);
    let res = reqwest::get(format!("http://{payment_addr}/metrics")).await.unwrap();
    let text = res.text().await.unwrap();
    assert!(text.contains(r#"payment_requests_total{status="200"} 3"#));
    assert!(text.contains("payment_request_latency_seconds_count 3"));
    // the scrape is an instrumented request too
    assert_eq!(payment_metrics.request_count(200), 4);
}
