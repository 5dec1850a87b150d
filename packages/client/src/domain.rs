//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use podium_server::infrastructure::dto::websocket::ClientMessage;
use serde_json::Value;

use crate::error::ClientError;

/// Input line that sends a `ping` instead of a state
pub const PING_COMMAND: &str = "/ping";

/// Convert a line typed by the user into a relay message.
///
/// `/ping` becomes a ping. Any other line is pushed as the room state: as JSON
/// when it parses, otherwise as a JSON string.
pub fn parse_input(line: &str) -> ClientMessage {
    if line == PING_COMMAND {
        return ClientMessage::Ping;
    }

    let state = serde_json::from_str::<Value>(line)
        .unwrap_or_else(|_| Value::String(line.to_string()));
    ClientMessage::State { state }
}

/// Build the join message sent right after connecting.
pub fn join_message(room: &str, peer_id: &str, as_host: bool) -> ClientMessage {
    ClientMessage::Join {
        code: room.to_string(),
        id: peer_id.to_string(),
        as_host: Some(as_host),
    }
}

/// Check that the relay URL uses a WebSocket scheme.
pub fn validate_url(url: &str) -> Result<(), ClientError> {
    if url.starts_with("ws://") || url.starts_with("wss://") {
        Ok(())
    } else {
        Err(ClientError::InvalidUrl(url.to_string()))
    }
}

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if retrying cannot help (e.g., InvalidUrl), `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidUrl(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_input_json_object() {
        // テスト項目: JSON として解析できる入力はそのまま状態になる
        // given (前提条件):
        let line = r#"{"slide": 3}"#;

        // when (操作):
        let message = parse_input(line);

        // then (期待する結果):
        assert_eq!(
            message,
            ClientMessage::State {
                state: json!({"slide": 3})
            }
        );
    }

    #[test]
    fn test_parse_input_number() {
        // テスト項目: 数値だけの入力は JSON の数値として送られる
        // given (前提条件):
        let line = "42";

        // when (操作):
        let message = parse_input(line);

        // then (期待する結果):
        assert_eq!(message, ClientMessage::State { state: json!(42) });
    }

    #[test]
    fn test_parse_input_plain_text() {
        // テスト項目: JSON でない入力は文字列の状態として送られる
        // given (前提条件):
        let line = "next slide please";

        // when (操作):
        let message = parse_input(line);

        // then (期待する結果):
        assert_eq!(
            message,
            ClientMessage::State {
                state: json!("next slide please")
            }
        );
    }

    #[test]
    fn test_parse_input_ping_command() {
        // テスト項目: /ping は ping メッセージになる
        // given (前提条件):
        let line = "/ping";

        // when (操作):
        let message = parse_input(line);

        // then (期待する結果):
        assert_eq!(message, ClientMessage::Ping);
    }

    #[test]
    fn test_join_message_serializes_host_claim() {
        // テスト項目: join メッセージが asHost 付きの JSON になる
        // given (前提条件):
        let message = join_message("X1", "A", true);

        // when (操作):
        let json = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            json!({"type": "join", "code": "X1", "id": "A", "asHost": true})
        );
    }

    #[test]
    fn test_validate_url() {
        // テスト項目: ws:// と wss:// だけが受け付けられる
        // given (前提条件):
        let valid = ["ws://127.0.0.1:3000/ws", "wss://podium.example/ws"];
        let invalid = "http://127.0.0.1:3000/ws";

        // when (操作):
        let results: Vec<bool> = valid.iter().map(|url| validate_url(url).is_ok()).collect();
        let invalid_result = validate_url(invalid);

        // then (期待する結果):
        assert_eq!(results, vec![true, true]);
        assert!(matches!(invalid_result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_should_exit_immediately_with_invalid_url() {
        // テスト項目: InvalidUrl エラーの場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = ClientError::InvalidUrl("http://localhost".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_with_invalid_url() {
        // テスト項目: InvalidUrl エラーの場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::InvalidUrl("http://localhost".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 4, 5);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ClientError::ConnectionError("network error".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, 5);

        // then (期待する結果):
        assert!(!result);
    }
}
