use super::test_mocks::*;
use super::*;

use std::time::Duration;

use rmcp::model::CallToolResult;
use serde_json::Value;

fn text_of(result: &CallToolResult) -> &str {
    result
        .content
        .first()
        .and_then(|c| c.raw.as_text())
        .map(|t| t.text.as_str())
        .unwrap()
}

fn messages_of(result: &CallToolResult) -> Vec<Value> {
    let value: Value = serde_json::from_str(text_of(result)).unwrap();
    value.as_array().cloned().unwrap()
}

fn get_params(channel: &str, limit: Option<u32>) -> Parameters<GetMessagesParams> {
    Parameters(GetMessagesParams {
        channel: channel.to_string(),
        limit,
    })
}

fn search_params(channel: &str, query: &str, limit: Option<u32>) -> Parameters<SearchMessagesParams> {
    Parameters(SearchMessagesParams {
        channel: channel.to_string(),
        query: query.to_string(),
        limit,
    })
}

// ---- limits ----

#[test]
fn fetch_limit_defaults_and_caps() {
    assert_eq!(fetch_limit(None), DEFAULT_FETCH_LIMIT);
    assert_eq!(fetch_limit(Some(10)), 10);
    assert_eq!(fetch_limit(Some(100)), 100);
    assert_eq!(fetch_limit(Some(500)), MAX_FETCH_LIMIT);
}

#[test]
fn search_limit_defaults_without_cap() {
    assert_eq!(search_limit(None), DEFAULT_SEARCH_LIMIT);
    assert_eq!(search_limit(Some(3)), 3);
    assert_eq!(search_limit(Some(250)), 250);
}

// ---- get_telegram_messages ----

#[tokio::test]
async fn get_messages_omitted_limit_fetches_fifty() {
    let reader = stocks_reader();
    let server = build_server(Arc::new(MockConnector::new(reader.clone())));

    let result = server
        .get_telegram_messages(get_params("stocks", None))
        .await
        .unwrap();

    assert_ne!(result.is_error, Some(true));
    assert_eq!(messages_of(&result).len(), 50);
    assert_eq!(reader.fetch_limits().await, vec![50]);
}

#[tokio::test]
async fn get_messages_oversized_limit_is_capped() {
    let reader = stocks_reader();
    let server = build_server(Arc::new(MockConnector::new(reader.clone())));

    let result = server
        .get_telegram_messages(get_params("stocks", Some(500)))
        .await
        .unwrap();

    assert_eq!(messages_of(&result).len(), 100);
    assert_eq!(reader.fetch_limits().await, vec![100]);
}

#[tokio::test]
async fn get_messages_renders_records_newest_first() {
    let server = build_server(Arc::new(MockConnector::new(stocks_reader())));

    let result = server
        .get_telegram_messages(get_params("@stocks", Some(3)))
        .await
        .unwrap();
    let messages = messages_of(&result);

    assert_eq!(messages[0]["id"], 1000);
    assert_eq!(messages[0]["text"], "post 1000 about dividends");
    assert_eq!(messages[0]["sender"], "77");
    assert_eq!(messages[2]["text"], stock_helper_provider::NON_TEXT_PLACEHOLDER);
    assert!(text_of(&result).starts_with("[\n  {\n    \"id\": 1000,"));
}

#[tokio::test]
async fn unknown_channel_is_flagged() {
    let server = build_server(Arc::new(MockConnector::new(stocks_reader())));

    let result = server
        .get_telegram_messages(get_params("nosuch", None))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(text_of(&result), "Error: [telegram] Channel 'nosuch' not found");
}

// ---- search_telegram_messages ----

#[tokio::test]
async fn search_fetches_batch_and_truncates_to_default() {
    let reader = stocks_reader();
    let server = build_server(Arc::new(MockConnector::new(reader.clone())));

    let result = server
        .search_telegram_messages(search_params("stocks", "DIVIDENDS", None))
        .await
        .unwrap();

    assert_ne!(result.is_error, Some(true));
    assert_eq!(messages_of(&result).len(), DEFAULT_SEARCH_LIMIT);
    assert_eq!(reader.search_limits().await, vec![SEARCH_FETCH_BATCH]);
}

#[tokio::test]
async fn search_respects_smaller_limit() {
    let reader = stocks_reader();
    let server = build_server(Arc::new(MockConnector::new(reader.clone())));

    let result = server
        .search_telegram_messages(search_params("stocks", "post 99", Some(5)))
        .await
        .unwrap();
    let messages = messages_of(&result);

    assert!(messages.len() <= 5);
    assert!(
        messages
            .iter()
            .all(|m| m["text"].as_str().unwrap().contains("post 99"))
    );
    assert_eq!(reader.search_limits().await, vec![SEARCH_FETCH_BATCH]);
}

#[tokio::test]
async fn search_without_matches_is_empty_list() {
    let server = build_server(Arc::new(MockConnector::new(stocks_reader())));

    let result = server
        .search_telegram_messages(search_params("stocks", "crypto", None))
        .await
        .unwrap();

    assert_ne!(result.is_error, Some(true));
    assert_eq!(text_of(&result), "[]");
}

// ---- session lifecycle ----

#[tokio::test]
async fn construction_does_not_connect() {
    let connector = Arc::new(MockConnector::new(stocks_reader()));
    let _server = build_server(connector.clone());
    assert_eq!(connector.attempts(), 0);
}

#[tokio::test]
async fn session_is_reused_across_calls() {
    let connector = Arc::new(MockConnector::new(stocks_reader()));
    let server = build_server(connector.clone());

    for _ in 0..3 {
        server
            .get_telegram_messages(get_params("stocks", Some(1)))
            .await
            .unwrap();
    }
    server
        .search_telegram_messages(search_params("stocks", "post", Some(1)))
        .await
        .unwrap();

    assert_eq!(connector.attempts(), 1);
}

#[tokio::test]
async fn concurrent_first_calls_share_one_connection() {
    let connector = Arc::new(MockConnector::new(stocks_reader()).slow(Duration::from_millis(50)));
    let server = build_server(connector.clone());

    let calls = (0..8).map(|_| {
        let server = server.clone();
        tokio::spawn(async move {
            server
                .get_telegram_messages(get_params("stocks", Some(2)))
                .await
                .unwrap()
        })
    });
    for handle in calls.collect::<Vec<_>>() {
        let result = handle.await.unwrap();
        assert_ne!(result.is_error, Some(true));
    }

    assert_eq!(connector.attempts(), 1);
}

#[tokio::test]
async fn failed_session_is_flagged_and_retried() {
    let connector = Arc::new(MockConnector::new(stocks_reader()).failing_first(1));
    let server = build_server(connector.clone());

    let first = server
        .get_telegram_messages(get_params("stocks", Some(1)))
        .await
        .unwrap();
    assert_eq!(first.is_error, Some(true));
    assert_eq!(
        text_of(&first),
        "Error: [telegram] Session error: session string rejected"
    );

    let second = server
        .get_telegram_messages(get_params("stocks", Some(1)))
        .await
        .unwrap();
    assert_ne!(second.is_error, Some(true));
    assert_eq!(connector.attempts(), 2);
}

// ---- server info ----

#[test]
fn get_info_advertises_tools_only() {
    let server = build_server(Arc::new(MockConnector::new(stocks_reader())));
    let info = server.get_info();

    assert_eq!(info.server_info.name, SERVER_NAME);
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.resources.is_none());
    assert!(info.instructions.unwrap().contains("get_telegram_messages"));
}

#[test]
fn tool_catalog_has_both_tools() {
    let server = build_server(Arc::new(MockConnector::new(stocks_reader())));
    let names: Vec<String> = envelope::sorted_tools(server.tool_router.list_all())
        .into_iter()
        .map(|t| t.name.to_string())
        .collect();
    assert_eq!(names, vec!["get_telegram_messages", "search_telegram_messages"]);
}
