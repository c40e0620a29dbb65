use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use fx_client::{Outcome, Requester};
use fx_common::net::{QUOTE_PATH, TIMEOUT_HEADER};
use fx_common::QuoteError;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn output_path(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fx_client_it_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let file = dir.join(format!("{}.txt", test));
    let _ = fs::remove_file(&file);
    file
}

fn quote_body(bid: f64) -> serde_json::Value {
    json!({
        "id": 3,
        "code": "USD",
        "bid": bid,
        "createdAt": "2024-05-02T17:00:00.123456Z"
    })
}

async fn server(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUOTE_PATH))
        .and(header(TIMEOUT_HEADER, "300"))
        .respond_with(template)
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn requester(server: &MockServer) -> Requester {
    Requester::new(
        &format!("{}{}", server.uri(), QUOTE_PATH),
        Duration::from_millis(300),
    )
    .unwrap()
}

#[tokio::test]
async fn writes_bid_with_four_decimals() {
    let server = server(ResponseTemplate::new(200).set_body_json(quote_body(5.0869))).await;
    let output = output_path("success");

    let outcome = requester(&server).run(&output).await.unwrap();

    match outcome {
        Outcome::Written(quote) => {
            assert_eq!(quote.id, 3);
            assert_eq!(quote.bid, 5.0869);
        }
        Outcome::TimedOut => panic!("unexpected timeout"),
    }
    assert_eq!(fs::read_to_string(&output).unwrap(), "Dólar: 5.0869");
}

#[tokio::test]
async fn slow_server_times_out_without_writing() {
    let server = server(
        ResponseTemplate::new(200)
            .set_body_json(quote_body(5.0869))
            .set_delay(Duration::from_millis(350)),
    )
    .await;
    let output = output_path("timeout");

    let outcome = requester(&server).run(&output).await.unwrap();

    assert_eq!(outcome, Outcome::TimedOut);
    assert!(!output.exists());
}

#[tokio::test]
async fn timeout_keeps_previous_output() {
    let server = server(
        ResponseTemplate::new(200)
            .set_body_json(quote_body(5.0869))
            .set_delay(Duration::from_millis(350)),
    )
    .await;
    let output = output_path("previous");
    fs::write(&output, "Dólar: 4.9000").unwrap();

    let outcome = requester(&server).run(&output).await.unwrap();

    assert_eq!(outcome, Outcome::TimedOut);
    assert_eq!(fs::read_to_string(&output).unwrap(), "Dólar: 4.9000");
}

#[tokio::test]
async fn server_error_is_fatal_and_not_decoded() {
    let server =
        server(ResponseTemplate::new(500).set_body_string("upstream exceeded 200ms")).await;
    let output = output_path("server_error");

    let err = requester(&server).run(&output).await.unwrap_err();

    match err {
        QuoteError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exceeded 200ms");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!output.exists());
}

#[tokio::test]
async fn request_timeout_status_is_fatal() {
    let server =
        server(ResponseTemplate::new(408).set_body_string("Request cancelled by the client")).await;
    let output = output_path("cancelled");

    let err = requester(&server).run(&output).await.unwrap_err();

    assert!(matches!(err, QuoteError::Status { status: 408, .. }));
    assert!(!output.exists());
}

#[tokio::test]
async fn malformed_payload_is_a_decode_error() {
    let server = server(ResponseTemplate::new(200).set_body_json(json!({"Bid": "5.08"}))).await;
    let output = output_path("malformed");

    let err = requester(&server).run(&output).await.unwrap_err();

    assert!(matches!(err, QuoteError::Decode(_)));
    assert!(!output.exists());
}

#[tokio::test]
async fn truncated_error_body_is_a_transport_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\nshort")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });
    let output = output_path("truncated");

    let requester = Requester::new(
        &format!("http://{}{}", addr, QUOTE_PATH),
        Duration::from_millis(300),
    )
    .unwrap();
    let err = requester.run(&output).await.unwrap_err();

    assert!(matches!(err, QuoteError::Transport(_)), "got {err:?}");
    assert!(!output.exists());
}
