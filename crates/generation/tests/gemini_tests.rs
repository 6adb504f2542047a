//! Gemini client against a local one-shot HTTP responder

use pretty_assertions::assert_eq;
use rageval_core::Error;
use rageval_generation::{generate_answer, GeminiClient, GenerationClient, GenerationResponse};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const API_KEY: &str = "secret-key";

/// Serve exactly one HTTP request with a canned JSON response and hand back
/// the raw request (headers and body)
async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.expect("read");
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        line.to_ascii_lowercase()
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                    })
                    .unwrap_or(0);
                if raw.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&raw).to_string()
    });

    (format!("http://{addr}/v1beta"), handle)
}

fn client(base_url: String) -> GeminiClient {
    GeminiClient::new(
        API_KEY.to_string(),
        "gemini-1.5-flash".to_string(),
        Some(base_url),
        5,
    )
    .expect("client")
}

#[tokio::test]
async fn test_generate_posts_prompt_and_decodes_candidates() {
    let body = serde_json::json!({
        "candidates": [
            {"content": {"parts": [{"text": "Visit the "}, {"text": "Space Needle."}], "role": "model"},
             "finishReason": "STOP"},
            {"finishReason": "SAFETY"}
        ]
    })
    .to_string();
    let (base_url, server) = serve_once("HTTP/1.1 200 OK", body).await;

    let response = client(base_url)
        .generate("Question: Seattle?", 50)
        .await
        .expect("response");
    assert_eq!(response, GenerationResponse::from_texts(["Visit the Space Needle."]));

    let request = server.await.expect("server task");
    let request_line = request.lines().next().expect("request line");
    assert!(request_line
        .starts_with("POST /v1beta/models/gemini-1.5-flash:generateContent?key=secret-key "));

    let json_start = request.find("\r\n\r\n").expect("body") + 4;
    let payload: Value = serde_json::from_str(&request[json_start..]).expect("json body");
    assert_eq!(payload["contents"][0]["parts"][0]["text"], "Question: Seattle?");
    assert_eq!(payload["generationConfig"]["maxOutputTokens"], 50);
}

#[tokio::test]
async fn test_answer_is_first_candidate_trimmed() {
    let body = serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": "  Freedom Trail.\n"}]}}]
    })
    .to_string();
    let (base_url, server) = serve_once("HTTP/1.1 200 OK", body).await;

    let answer = generate_answer(
        "Recommend a historical tour in Boston.",
        "Discover the rich history of Boston with a Freedom Trail walking tour",
        &client(base_url),
        50,
    )
    .await
    .expect("answer");
    server.await.expect("server task");

    assert_eq!(answer, "Freedom Trail.");
}

#[tokio::test]
async fn test_error_status_is_generation_error() {
    let (base_url, server) = serve_once(
        "HTTP/1.1 503 Service Unavailable",
        r#"{"error": {"code": 503, "message": "overloaded"}}"#.to_string(),
    )
    .await;

    let result = client(base_url).generate("prompt", 50).await;
    server.await.expect("server task");

    let err = result.err().expect("503 must fail");
    assert!(matches!(err, Error::Generation(_)));
    let message = err.to_string();
    assert!(message.contains("503"));
    assert!(message.contains("overloaded"));
    assert!(!message.contains(API_KEY));
}

#[tokio::test]
async fn test_undecodable_body_is_generation_error() {
    let (base_url, server) = serve_once("HTTP/1.1 200 OK", "not json".to_string()).await;

    let result = client(base_url).generate("prompt", 50).await;
    server.await.expect("server task");

    let err = result.err().expect("bad body must fail");
    assert!(matches!(err, Error::Generation(_)));
    assert!(err.to_string().contains("decode"));
}

#[tokio::test]
async fn test_connection_failure_does_not_leak_key() {
    // Reserve a port, then close it so the request is refused
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let result = client(format!("http://{addr}/v1beta"))
        .generate("prompt", 50)
        .await;

    let err = result.err().expect("refused connection must fail");
    assert!(matches!(err, Error::Generation(_)));
    let message = err.to_string();
    assert!(message.contains("connection"));
    assert!(!message.contains(API_KEY));
}
