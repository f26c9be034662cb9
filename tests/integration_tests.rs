//! Integration tests for the Solafon MCP Server
//!
//! These tests drive the server through JSON-RPC messages. Bot API calls go
//! to a local wiremock server standing in for the Solafon API.

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use solafon_mcp_server::api::client::ApiClient;
use solafon_mcp_server::catalog::{Catalog, Document};
use solafon_mcp_server::config::Config;
use solafon_mcp_server::mcp::server::McpServer;

/// Helper to create a JSON-RPC request line
fn make_request(id: i64, method: &str, params: Option<Value>) -> String {
    let mut request = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
    });
    if let Some(p) = params {
        request["params"] = p;
    }
    request.to_string()
}

fn offline_server() -> McpServer {
    McpServer::new(&Config::new("http://127.0.0.1:1/api/v1", None).unwrap())
}

async fn mock_api() -> MockServer {
    MockServer::start().await
}

fn server_for(mock: &MockServer, token: Option<&str>) -> McpServer {
    let config = Config::new(format!("{}/api/v1", mock.uri()), token.map(String::from)).unwrap();
    McpServer::new(&config)
}

/// Call a tool and return (text, is_error)
async fn call_tool(server: &mut McpServer, name: &str, arguments: Value) -> (String, bool) {
    let line = make_request(
        1,
        "tools/call",
        Some(json!({ "name": name, "arguments": arguments })),
    );
    let response = server.handle_message(&line).await.unwrap().unwrap();
    let result = response.result.expect("tools/call always returns a result");
    let text = result["content"][0]["text"].as_str().unwrap().to_string();
    let is_error = result["isError"].as_bool().unwrap_or(false);
    (text, is_error)
}

mod mcp_protocol_tests {
    use super::*;

    #[tokio::test]
    async fn test_session_over_streams() {
        let input = [
            make_request(
                1,
                "initialize",
                Some(json!({
                    "protocolVersion": "2024-11-05",
                    "clientInfo": {"name": "test-client", "version": "1.0.0"},
                    "capabilities": {}
                })),
            ),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string(),
            String::new(),
            make_request(2, "tools/list", None),
            make_request(3, "ping", None),
        ]
        .join("\n");

        let mut server = offline_server();
        let mut output = Vec::new();
        server
            .run(tokio::io::BufReader::new(input.as_bytes()), &mut output)
            .await
            .unwrap();
        assert!(server.is_initialized());

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        // The notification and the blank line produce nothing
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(responses[0]["result"]["serverInfo"]["name"], "solafon");
        assert!(responses[0]["result"]["capabilities"]["tools"].is_object());

        assert_eq!(responses[1]["id"], 2);
        let tools = responses[1]["result"]["tools"].as_array().unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        for expected in [
            "solafon_read_docs",
            "solafon_search_docs",
            "solafon_list_docs",
            "solafon_api_request",
            "solafon_scaffold_bot",
            "solafon_list_templates",
        ] {
            assert!(names.contains(&expected), "missing tool {}", expected);
        }
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));

        assert_eq!(responses[2]["id"], 3);
        assert!(responses[2]["result"].is_object());
    }

    #[tokio::test]
    async fn test_resources_and_prompts() {
        let mut server = offline_server();

        let response = server
            .handle_message(&make_request(1, "resources/list", None))
            .await
            .unwrap()
            .unwrap();
        let resources = response.result.unwrap()["resources"].as_array().unwrap().clone();
        assert!(resources.iter().any(|r| r["uri"] == "solafon://docs/quick-start"));

        let response = server
            .handle_message(&make_request(
                2,
                "resources/read",
                Some(json!({"uri": "solafon://docs/full"})),
            ))
            .await
            .unwrap()
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["contents"][0]["mimeType"], "text/markdown");
        assert!(result["contents"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Step 1: Create Your App"));

        let response = server
            .handle_message(&make_request(
                3,
                "prompts/get",
                Some(json!({"name": "debug-solafon-bot", "arguments": {"issue": "silent bot"}})),
            ))
            .await
            .unwrap()
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["messages"][0]["role"], "user");
        assert!(result["messages"][0]["content"]["text"]
            .as_str()
            .unwrap()
            .contains("Issue: silent bot"));
    }

    #[tokio::test]
    async fn test_missing_tool_params() {
        let mut server = offline_server();
        let response = server
            .handle_message(&make_request(1, "tools/call", None))
            .await
            .unwrap()
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
    }
}

mod catalog_tool_tests {
    use super::*;

    #[tokio::test]
    async fn test_read_quick_start() {
        let (text, is_error) =
            call_tool(&mut offline_server(), "solafon_read_docs", json!({"topic": "quick-start"})).await;
        assert!(!is_error);
        assert!(text.contains("Step 1: Create Your App"));
        assert!(text.contains("http://127.0.0.1:1/api/v1/apps"));
    }

    #[tokio::test]
    async fn test_read_unknown_topic_lists_all_keys() {
        let mut server = offline_server();
        let (text, _) = call_tool(&mut server, "solafon_read_docs", json!({"topic": "nope"})).await;
        assert!(text.starts_with("Topic \"nope\" not found. Available topics: "));

        let catalog = Catalog::builtin(&Config::default());
        for key in catalog.document_keys() {
            assert!(text.contains(&key), "{} missing", key);
        }
    }

    #[tokio::test]
    async fn test_search_mana_points() {
        let (text, is_error) =
            call_tool(&mut offline_server(), "solafon_search_docs", json!({"query": "mana points"})).await;
        assert!(!is_error);
        assert!(text.starts_with("Found "));
        assert!(text.contains("## Mana Points System (topic: \"mana-points\")"));
    }

    #[tokio::test]
    async fn test_search_no_results() {
        let (text, is_error) = call_tool(
            &mut offline_server(),
            "solafon_search_docs",
            json!({"query": "zzz-not-in-any-doc"}),
        )
        .await;
        assert!(!is_error);
        assert!(text.starts_with("No results found for \"zzz-not-in-any-doc\""));
        assert!(text.contains("quick-start"));
    }

    #[tokio::test]
    async fn test_search_single_document_with_overlapping_windows() {
        let config = Config::new("http://127.0.0.1:1", None).unwrap();
        let catalog = Catalog::from_parts(
            vec![
                Document {
                    key: "alpha".into(),
                    title: "Alpha".into(),
                    content: "intro\nneedle one\nneedle two\nmiddle\nend".into(),
                },
                Document {
                    key: "beta".into(),
                    title: "Beta".into(),
                    content: "nothing here".into(),
                },
            ],
            vec![],
        );
        let mut server = McpServer::with_parts(
            Arc::new(ApiClient::new(&config)),
            Arc::new(catalog),
            &config,
        );

        let (text, _) = call_tool(&mut server, "solafon_search_docs", json!({"query": "NEEDLE"})).await;
        assert_eq!(
            text,
            "Found 1 matching doc(s) for \"NEEDLE\":\n\n\
             ## Alpha (topic: \"alpha\")\n\
             intro\nneedle one\nneedle two\nmiddle\n---\nneedle one\nneedle two\nmiddle\nend"
        );
    }

    #[tokio::test]
    async fn test_list_docs() {
        let (text, _) = call_tool(&mut offline_server(), "solafon_list_docs", json!({})).await;
        assert!(text.contains("- **mana-points**: Mana Points System"));
    }

    #[tokio::test]
    async fn test_scaffold_known_template() {
        let (text, is_error) =
            call_tool(&mut offline_server(), "solafon_scaffold_bot", json!({"template": "python-polling"})).await;
        assert!(!is_error);
        assert!(text.starts_with("# Python Polling Bot\n\nSimple Python polling bot with requests\n\n```python\n"));
        assert!(text.ends_with("```"));
    }

    #[tokio::test]
    async fn test_scaffold_unknown_template_lists_keys() {
        let (text, _) =
            call_tool(&mut offline_server(), "solafon_scaffold_bot", json!({"template": "nonexistent-key"})).await;
        assert!(text.starts_with("Template \"nonexistent-key\" not found. Available: "));
        for key in ["node-polling", "node-webhook", "python-polling", "python-webhook", "go-webhook", "node-ai-bot"] {
            assert!(text.contains(key), "{} missing", key);
        }
    }

    #[tokio::test]
    async fn test_list_templates() {
        let (text, _) = call_tool(&mut offline_server(), "solafon_list_templates", json!({})).await;
        assert!(text.contains("- **go-webhook** (go): Go Webhook Bot"));
    }
}

mod proxy_tests {
    use super::*;

    fn authorization(request: &wiremock::Request) -> Option<String> {
        request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    }

    fn content_type(request: &wiremock::Request) -> Option<String> {
        request
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    }

    #[tokio::test]
    async fn test_get_me_without_any_token() {
        let api = mock_api().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/bot/getMe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {"id": 1}})))
            .expect(1)
            .mount(&api)
            .await;

        let mut server = server_for(&api, None);
        let (text, is_error) = call_tool(
            &mut server,
            "solafon_api_request",
            json!({"method": "GET", "path": "/bot/getMe"}),
        )
        .await;
        assert!(!is_error);
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap()["result"]["id"], 1);

        let requests = api.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(authorization(&requests[0]), None);
        assert_eq!(content_type(&requests[0]).as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_default_token_is_used() {
        let api = mock_api().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&api)
            .await;

        let mut server = server_for(&api, Some("default-token"));
        call_tool(&mut server, "solafon_get_bot_info", json!({})).await;

        let requests = api.received_requests().await.unwrap();
        assert_eq!(authorization(&requests[0]).as_deref(), Some("Bearer default-token"));
    }

    #[tokio::test]
    async fn test_explicit_token_overrides_default() {
        let api = mock_api().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&api)
            .await;

        let mut server = server_for(&api, Some("default-token"));
        call_tool(
            &mut server,
            "solafon_api_request",
            json!({"method": "GET", "path": "/apps", "token": "call-token"}),
        )
        .await;

        let requests = api.received_requests().await.unwrap();
        assert_eq!(requests[0].url.path(), "/api/v1/apps");
        assert_eq!(authorization(&requests[0]).as_deref(), Some("Bearer call-token"));
    }

    #[tokio::test]
    async fn test_body_dropped_for_get_and_delete() {
        let api = mock_api().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&api)
            .await;

        let mut server = server_for(&api, None);
        for verb in ["GET", "DELETE"] {
            call_tool(
                &mut server,
                "solafon_api_request",
                json!({"method": verb, "path": "/apps/1", "body": {"title": "ignored"}}),
            )
            .await;
        }

        let requests = api.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.body.is_empty()));
        assert!(requests
            .iter()
            .all(|r| content_type(r).as_deref() == Some("application/json")));
    }

    #[tokio::test]
    async fn test_body_sent_for_post_put_patch() {
        let api = mock_api().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&api)
            .await;

        let mut server = server_for(&api, None);
        let body = json!({"title": "My Bot", "category_id": 1});
        for verb in ["POST", "PUT", "PATCH"] {
            call_tool(
                &mut server,
                "solafon_api_request",
                json!({"method": verb, "path": "/apps", "body": body}),
            )
            .await;
        }

        let requests = api.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
        for request in &requests {
            let sent: Value = serde_json::from_slice(&request.body).unwrap();
            assert_eq!(sent, body);
        }
    }

    #[tokio::test]
    async fn test_remote_error_envelope_passes_through() {
        let api = mock_api().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/bot/sendMessage"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "ok": false,
                "error_code": 401,
                "description": "Unauthorized"
            })))
            .mount(&api)
            .await;

        let mut server = server_for(&api, None);
        let (text, is_error) = call_tool(
            &mut server,
            "solafon_send_message",
            json!({"chat_id": 42, "text": "hello", "message_type": "text"}),
        )
        .await;

        assert!(!is_error);
        let forwarded: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            forwarded,
            json!({"ok": false, "error_code": 401, "description": "Unauthorized"})
        );
        // Key order is preserved
        assert!(text.find("\"ok\"").unwrap() < text.find("\"error_code\"").unwrap());

        let requests = api.received_requests().await.unwrap();
        let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(sent, json!({"chat_id": 42, "text": "hello", "message_type": "text"}));
    }

    #[tokio::test]
    async fn test_set_commands_body() {
        let api = mock_api().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/bot/setMyCommands"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&api)
            .await;

        let mut server = server_for(&api, Some("t"));
        let commands = json!([{"command": "help", "description": "Show help", "response": "Hi!"}]);
        let (_, is_error) =
            call_tool(&mut server, "solafon_set_commands", json!({ "commands": commands })).await;
        assert!(!is_error);

        let requests = api.received_requests().await.unwrap();
        let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(sent, json!({ "commands": commands }));
    }

    #[tokio::test]
    async fn test_non_json_response_is_an_error() {
        let api = mock_api().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&api)
            .await;

        let mut server = server_for(&api, None);
        let (text, is_error) = call_tool(&mut server, "solafon_get_updates", json!({})).await;
        assert!(is_error);
        assert!(text.contains("not valid JSON"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_an_error() {
        let (text, is_error) = call_tool(&mut offline_server(), "solafon_get_webhook_info", json!({})).await;
        assert!(is_error);
        assert!(text.starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_identical_calls_are_not_cached() {
        let api = mock_api().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(2)
            .mount(&api)
            .await;

        let mut server = server_for(&api, None);
        call_tool(&mut server, "solafon_get_commands", json!({})).await;
        call_tool(&mut server, "solafon_get_commands", json!({})).await;
    }

    #[tokio::test]
    async fn test_health_check() {
        let api = mock_api().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&api)
            .await;

        let mut server = server_for(&api, Some("t"));
        let (text, _) = call_tool(&mut server, "solafon_health_check", json!({})).await;
        assert!(text.starts_with("API Status: Online\n"));

        let requests = api.received_requests().await.unwrap();
        assert_eq!(authorization(&requests[0]), None);
    }

    #[tokio::test]
    async fn test_health_check_offline() {
        let (text, is_error) = call_tool(&mut offline_server(), "solafon_health_check", json!({})).await;
        assert!(!is_error);
        assert!(text.starts_with("API Status: Offline\nError: "));
    }
}
