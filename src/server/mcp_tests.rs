//! Unit tests for MCP protocol implementation.
//!
//! Tests JSON-RPC 2.0 request/response handling, tool definitions,
//! and the line-delimited serve loop.

use super::*;
use crate::config::Config;
use crate::server::AppState;
use serde_json::json;
use std::sync::Arc;

fn server() -> McpServer {
    McpServer::new(Arc::new(AppState::new(Config::default())))
}

fn request(id: Option<Value>, method: &str, params: Option<Value>) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id,
        method: method.to_string(),
        params,
    }
}

fn envelope(response: &JsonRpcResponse) -> Value {
    let text = response.result.as_ref().unwrap()["content"][0]["text"]
        .as_str()
        .unwrap()
        .to_string();
    serde_json::from_str(&text).unwrap()
}

// ============================================================================
// JsonRpcResponse tests
// ============================================================================

#[test]
fn test_jsonrpc_response_success_with_id() {
    let response = JsonRpcResponse::success(Some(json!(1)), json!({"result": "ok"}));

    assert_eq!(response.jsonrpc, "2.0");
    assert_eq!(response.id, json!(1));
    assert!(response.error.is_none());
    assert_eq!(response.result.unwrap()["result"], "ok");
}

#[test]
fn test_jsonrpc_response_success_without_id() {
    let response = JsonRpcResponse::success(None, json!({}));

    assert_eq!(response.id, Value::Null);
}

#[test]
fn test_jsonrpc_response_error_with_id() {
    let response = JsonRpcResponse::error(Some(json!(42)), -32600, "Invalid request");

    assert!(response.result.is_none());
    let error = response.error.unwrap();
    assert_eq!(error.code, -32600);
    assert_eq!(error.message, "Invalid request");
}

#[test]
fn test_jsonrpc_response_serialization() {
    let response = JsonRpcResponse::success(Some(json!(1)), json!({"test": true}));
    let serialized = serde_json::to_string(&response).unwrap();

    assert!(serialized.contains("\"jsonrpc\":\"2.0\""));
    assert!(serialized.contains("\"id\":1"));
    // Error should be omitted when None
    assert!(!serialized.contains("\"error\""));
}

#[test]
fn test_jsonrpc_request_without_params() {
    let request: JsonRpcRequest =
        serde_json::from_str(r#"{"jsonrpc":"2.0","id":"a","method":"ping"}"#).unwrap();

    assert_eq!(request.id, Some(json!("a")));
    assert!(request.params.is_none());
}

#[test]
fn test_tool_call_params_without_arguments() {
    let params: ToolCallParams = serde_json::from_value(json!({"name": "trace"})).unwrap();

    assert_eq!(params.name, "trace");
    assert!(params.arguments.is_none());
}

// ============================================================================
// Tool definition tests
// ============================================================================

#[test]
fn test_tool_definitions_cover_every_tool() {
    let tools = tool_definitions();
    let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
    let expected: Vec<&str> = ToolName::ALL.iter().map(|t| t.as_str()).collect();

    assert_eq!(names, expected);
}

#[test]
fn test_tool_schemas_are_objects_with_required_fields() {
    for tool in tool_definitions() {
        assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
        assert!(tool.input_schema["properties"].is_object(), "{}", tool.name);
        assert!(tool.input_schema["required"].is_array(), "{}", tool.name);
        assert!(!tool.description.is_empty(), "{}", tool.name);
    }
}

#[test]
fn test_enum_values_in_schema_match_wire_spellings() {
    let tools = tool_definitions();
    let debate = tools.iter().find(|t| t.name == "debate").unwrap();

    let types = debate.input_schema["properties"]["argumentType"]["enum"]
        .as_array()
        .unwrap();
    assert_eq!(types.len(), crate::tools::ArgumentType::ALL.len());
    assert!(types.contains(&json!("rebuttal")));
}

#[test]
fn test_tool_serialization_uses_input_schema_key() {
    let serialized = serde_json::to_value(&tool_definitions()[0]).unwrap();

    assert!(serialized.get("inputSchema").is_some());
    assert!(serialized.get("input_schema").is_none());
}

// ============================================================================
// Request handling tests
// ============================================================================

#[tokio::test]
async fn test_initialize_reports_server_identity() {
    let response = server()
        .handle_request(request(Some(json!(1)), "initialize", Some(json!({}))))
        .await
        .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
    assert_eq!(result["serverInfo"]["name"], "clear-reasoning");
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let server = server();

    assert!(server
        .handle_request(request(None, "initialized", None))
        .await
        .is_none());
    assert!(server
        .handle_request(request(None, "notifications/cancelled", None))
        .await
        .is_none());
    assert!(server
        .handle_request(request(None, "something/else", None))
        .await
        .is_none());
}

#[tokio::test]
async fn test_unknown_method() {
    let response = server()
        .handle_request(request(Some(json!(7)), "resources/list", None))
        .await
        .unwrap();

    assert_eq!(response.error.unwrap().code, -32601);
}

#[tokio::test]
async fn test_tools_list() {
    let response = server()
        .handle_request(request(Some(json!(2)), "tools/list", None))
        .await
        .unwrap();

    let tools = response.result.unwrap()["tools"].as_array().unwrap().len();
    assert_eq!(tools, 11);
}

#[tokio::test]
async fn test_tools_call_success_has_no_error_flag() {
    let response = server()
        .handle_request(request(
            Some(json!(3)),
            "tools/call",
            Some(json!({
                "name": "model",
                "arguments": {"modelName": "first_principles", "problem": "Slow builds"}
            })),
        ))
        .await
        .unwrap();

    let result = response.result.as_ref().unwrap();
    assert!(result.get("isError").is_none());
    assert_eq!(result["content"][0]["type"], "text");

    let envelope = envelope(&response);
    assert_eq!(envelope["success"], true);
    assert_eq!(envelope["tool"], "model");
    assert_eq!(envelope["data"]["modelName"], "first_principles");
}

#[tokio::test]
async fn test_tools_call_rejection_sets_error_flag() {
    let response = server()
        .handle_request(request(
            Some(json!(4)),
            "tools/call",
            Some(json!({"name": "model", "arguments": {"modelName": "astrology"}})),
        ))
        .await
        .unwrap();

    assert_eq!(response.result.as_ref().unwrap()["isError"], true);

    let envelope = envelope(&response);
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_tools_call_unknown_tool_is_invalid_params() {
    let response = server()
        .handle_request(request(
            Some(json!(5)),
            "tools/call",
            Some(json!({"name": "horoscope", "arguments": {}})),
        ))
        .await
        .unwrap();

    assert_eq!(response.error.unwrap().code, -32602);
}

#[tokio::test]
async fn test_tools_call_missing_params() {
    let response = server()
        .handle_request(request(Some(json!(6)), "tools/call", None))
        .await
        .unwrap();

    assert_eq!(response.error.unwrap().code, -32602);
}

#[tokio::test]
async fn test_ping() {
    let response = server()
        .handle_request(request(Some(json!(8)), "ping", None))
        .await
        .unwrap();

    assert_eq!(response.result.unwrap(), json!({}));
}

// ============================================================================
// Serve loop tests
// ============================================================================

#[tokio::test]
async fn test_serve_writes_one_line_per_request() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"initialized"}"#,
        "\n",
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
        "\n",
    );
    let mut output = Vec::new();

    server().serve(input.as_bytes(), &mut output).await.unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[1]["id"], 2);
}

#[tokio::test]
async fn test_serve_reports_parse_errors_and_continues() {
    let input = "not json\n{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"ping\"}\n";
    let mut output = Vec::new();

    server().serve(input.as_bytes(), &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(lines[0]["error"]["code"], -32700);
    assert_eq!(lines[0]["id"], Value::Null);
    assert_eq!(lines[1]["id"], 9);
}
