#![cfg(not(target_arch = "wasm32"))]

use std::{
    io::{BufRead, BufReader, Read, Write},
    net::TcpListener,
    sync::mpsc,
};

use game::{
    api::{ApiError, BattleApi, UreqTransport},
    battle::{BattleId, BattleStatus},
};
use serde_json::json;

struct Received {
    request_line: String,
    content_type: Option<String>,
    body: String,
}

/// Serves `responses` in order, one connection each, and reports what it
/// received.
fn serve(responses: Vec<(u16, serde_json::Value)>) -> (String, mpsc::Receiver<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    let (sender, receiver) = mpsc::channel();

    std::thread::spawn(move || {
        for (status, body) in responses {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut content_length = 0;
            let mut content_type = None;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                let header = header.trim_end();
                if header.is_empty() {
                    break;
                }

                let (name, value) = header.split_once(':').unwrap();
                match name.to_ascii_lowercase().as_str() {
                    "content-length" => content_length = value.trim().parse().unwrap(),
                    "content-type" => content_type = Some(value.trim().to_string()),
                    _ => {}
                }
            }

            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).unwrap();

            sender
                .send(Received {
                    request_line: request_line.trim_end().to_string(),
                    content_type,
                    body: String::from_utf8(request_body).unwrap(),
                })
                .unwrap();

            let body = body.to_string();
            let response = format!(
                "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );

            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
    });

    (address, receiver)
}

fn summary(turn: u32) -> serde_json::Value {
    json!({
        "state": "ongoing",
        "turn": turn,
        "team_a": [],
        "team_b": [],
        "active_character": null,
        "log": []
    })
}

#[test]
fn speaks_the_battle_contract_over_http() {
    let (address, received) = serve(vec![
        (200, json!({ "battle_id": "abc-123" })),
        (200, summary(0)),
        (200, json!({ "result": "first blood", "summary": summary(1) })),
    ]);

    let api = BattleApi::new(address, UreqTransport::new());

    let battle_id = api
        .create_battle(&["Arthur".to_string()], &["Mordred".to_string()], 5)
        .wait()
        .unwrap();
    assert_eq!(battle_id.as_str(), "abc-123");

    let create = received.recv().unwrap();
    assert_eq!(create.request_line, "POST /battles HTTP/1.1");
    assert_eq!(create.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&create.body).unwrap(),
        json!({ "team_a": ["Arthur"], "team_b": ["Mordred"], "level": 5 })
    );

    let battle = api.get_battle(&battle_id).wait().unwrap();
    assert_eq!(battle.state, BattleStatus::Ongoing);
    assert_eq!(
        received.recv().unwrap().request_line,
        "GET /battles/abc-123 HTTP/1.1"
    );

    let outcome = api.next_turn(&battle_id).wait().unwrap();
    assert_eq!(outcome.summary().map(|summary| summary.turn), Some(1));

    let turn = received.recv().unwrap();
    assert_eq!(turn.request_line, "POST /battles/abc-123/turn HTTP/1.1");
    assert!(turn.body.is_empty());
}

#[test]
fn error_status_carries_backend_detail() {
    let (address, _received) = serve(vec![(404, json!({ "detail": "Battle not found" }))]);

    let api = BattleApi::new(address, UreqTransport::new());
    let err = api.get_battle(&BattleId::new("nope")).wait().unwrap_err();

    assert!(matches!(
        err,
        ApiError::Status { code: 404, ref detail } if detail == "Battle not found"
    ));
}

#[test]
fn unreachable_backend_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on
    let address = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let api = BattleApi::new(address, UreqTransport::new());
    let err = api.list_battles().wait().unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}
