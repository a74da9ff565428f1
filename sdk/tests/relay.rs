use alloy_primitives::{Bytes, B256};
use storage_proof_sdk::{Error, HttpRelay, ProofSubmission, Relay};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

/// Reads one HTTP request off `socket` and returns its body.
async fn read_request(socket: &mut TcpStream) -> (String, Vec<u8>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed mid-request");
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            let len = head
                .to_ascii_lowercase()
                .lines()
                .find_map(|line| line.strip_prefix("content-length:").map(str::to_string))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + len {
                return (head, buf[end + 4..end + 4 + len].to_vec());
            }
        }
    }
}

/// Serves a single canned response and hands back the request it answered.
async fn relay_replying(
    status: &'static str,
    body: String,
) -> (String, tokio::task::JoinHandle<(String, Vec<u8>)>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{addr}"), handle)
}

fn submission() -> ProofSubmission {
    ProofSubmission {
        request_id: B256::repeat_byte(0x42),
        vk_hash: B256::repeat_byte(0x01),
        proof: Bytes::from(vec![0xab; 64]),
        output: Bytes::from(vec![0xcd; 92]),
        src_chain_id: 1,
        dst_chain_id: 11155111,
    }
}

#[tokio::test]
async fn accepted_submission_returns_receipt() {
    let body = format!(r#"{{"request_id":"{}","status":"queued"}}"#, B256::repeat_byte(0x42));
    let (url, server) = relay_replying("200 OK", body).await;

    let receipt = HttpRelay::new(format!("{url}/")).submit(&submission()).await.unwrap();
    assert_eq!(receipt.request_id, B256::repeat_byte(0x42));
    assert_eq!(receipt.status, "queued");

    let (head, sent) = server.await.unwrap();
    assert!(head.starts_with("POST /v1/proofs "));
    let sent: ProofSubmission = serde_json::from_slice(&sent).unwrap();
    assert_eq!(sent, submission());
}

#[tokio::test]
async fn rejected_submission_is_an_error() {
    let (url, server) =
        relay_replying("503 Service Unavailable", r#"{"error":"queue full"}"#.to_string()).await;

    let err = HttpRelay::new(url).submit(&submission()).await.unwrap_err();
    match err {
        Error::RelayRejected(reason) => {
            assert!(reason.contains("503"));
            assert!(reason.contains("queue full"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    server.await.unwrap();
}
