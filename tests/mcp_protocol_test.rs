//! MCP protocol integration tests
//!
//! Feeds line-delimited JSON-RPC sessions through `McpServer::serve` and
//! checks the responses written back.

use std::sync::Arc;

use clear_reasoning::config::Config;
use clear_reasoning::server::{AppState, McpServer};
use serde_json::{json, Value};

async fn run_session(requests: &[Value]) -> Vec<Value> {
    let input: String = requests
        .iter()
        .map(|r| format!("{}\n", r))
        .collect();
    let mut output = Vec::new();

    let server = McpServer::new(Arc::new(AppState::new(Config::default())));
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn tool_call(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
}

fn envelope(response: &Value) -> Value {
    serde_json::from_str(response["result"]["content"][0]["text"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn test_handshake_then_list_tools() {
    let responses = run_session(&[
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test", "version": "0"}
        }}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
    ])
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "clear-reasoning");

    let names: Vec<&str> = responses[1]["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "trace", "model", "pattern", "paradigm", "debug", "council", "decide", "reflect",
            "hypothesis", "debate", "map"
        ]
    );
}

#[tokio::test]
async fn test_debate_session_over_the_wire() {
    let thesis = json!({
        "argumentId": "t1",
        "claim": "We should rewrite the parser",
        "premises": ["The grammar changed", "The old parser is untested"],
        "conclusion": "Rewrite",
        "argumentType": "thesis",
        "confidence": 0.6,
        "nextArgumentNeeded": true,
        "sessionId": "wire"
    });
    let objection = json!({
        "argumentId": "o1",
        "claim": "Rewrites lose edge cases",
        "premises": ["Legacy behaviour is undocumented"],
        "conclusion": "Refactor instead",
        "argumentType": "objection",
        "confidence": 0.7,
        "respondsTo": "t1",
        "contradicts": ["t1"],
        "nextArgumentNeeded": true,
        "sessionId": "wire"
    });

    let responses = run_session(&[tool_call(1, "debate", thesis), tool_call(2, "debate", objection)]).await;

    let first = envelope(&responses[0]);
    assert_eq!(first["success"], true);
    assert_eq!(first["data"]["suggestedNextTypes"], json!(["antithesis", "objection"]));

    let second = envelope(&responses[1]);
    assert_eq!(second["data"]["argumentCount"], 2);
    assert_eq!(second["data"]["unresolvedReferences"], json!([]));
}

#[tokio::test]
async fn test_rejection_is_reported_in_band() {
    let responses = run_session(&[tool_call(
        7,
        "hypothesis",
        json!({"stage": "guessing", "inquiryId": "i1", "iteration": -1, "nextStageNeeded": true}),
    )])
    .await;

    let result = &responses[0]["result"];
    assert_eq!(result["isError"], true);
    assert!(responses[0].get("error").is_none());

    let envelope = envelope(&responses[0]);
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["tool"], "hypothesis");
    assert_eq!(envelope["error"]["code"], "VALIDATION_ERROR");
    assert!(envelope.get("data").is_none());
}

#[tokio::test]
async fn test_protocol_errors() {
    let responses = run_session(&[
        tool_call(1, "astrology", json!({})),
        json!({"jsonrpc": "2.0", "id": 2, "method": "prompts/list"}),
    ])
    .await;

    assert_eq!(responses[0]["error"]["code"], -32602);
    assert_eq!(responses[1]["error"]["code"], -32601);
}
