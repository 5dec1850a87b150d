//! Integration tests for the WebSocket relay, driven by real WebSocket clients.

mod common;

use common::{TestServer, assert_silent, join, recv_json, send_json, send_text, sync};
use serde_json::{Value, json};

#[tokio::test]
async fn test_presenter_and_viewer_scenario() {
    // テスト項目: ホストの状態が視聴者にだけ届き、ホスト切断で視聴者がホストになる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = server.connect().await;
    let mut b = server.connect().await;

    // when (操作): A がホストとして参加
    let joined_a = join(&mut a, "X1", "A", true).await;

    // then (期待する結果):
    assert_eq!(
        joined_a,
        json!({"type": "joined", "code": "X1", "hostId": "A", "state": null})
    );

    // when (操作): B が視聴者として参加
    let joined_b = join(&mut b, "X1", "B", false).await;

    // then (期待する結果):
    assert_eq!(
        joined_b,
        json!({"type": "joined", "code": "X1", "hostId": "A", "state": null})
    );
    assert_eq!(
        recv_json(&mut a).await,
        json!({"type": "presence", "id": "B", "joined": true})
    );

    // when (操作): A が状態を送信
    send_json(&mut a, json!({"type": "state", "state": {"slide": 2}})).await;

    // then (期待する結果): B にだけ届き、A にはエコーされない
    assert_eq!(
        recv_json(&mut b).await,
        json!({"type": "state", "state": {"slide": 2}})
    );
    assert_silent(&mut a).await;

    // when (操作): ホストではない B が状態を送信
    send_json(&mut b, json!({"type": "state", "state": {"slide": 9}})).await;
    sync(&mut b).await;

    // then (期待する結果): ブロードキャストされず、状態も変わらない
    assert_silent(&mut a).await;
    let detail: Value = reqwest::get(server.http_url("/api/rooms/X1"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(detail["state"], json!({"slide": 2}));

    // when (操作): A が切断
    a.close(None).await.unwrap();

    // then (期待する結果): B がホストになり、A の退出が通知される
    assert_eq!(
        recv_json(&mut b).await,
        json!({"type": "host", "hostId": "B"})
    );
    assert_eq!(
        recv_json(&mut b).await,
        json!({"type": "presence", "id": "A", "joined": false})
    );
}

#[tokio::test]
async fn test_late_joiner_receives_current_state() {
    // テスト項目: 途中から参加したピアは joined で最新の状態を受け取る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut host = server.connect().await;
    join(&mut host, "deck", "host", true).await;
    send_json(&mut host, json!({"type": "state", "state": [1, "two", null]})).await;
    sync(&mut host).await;

    // when (操作):
    let mut late = server.connect().await;
    let joined = join(&mut late, "deck", "late", false).await;

    // then (期待する結果):
    assert_eq!(joined["hostId"], "host");
    assert_eq!(joined["state"], json!([1, "two", null]));
}

#[tokio::test]
async fn test_ping_yields_single_pong() {
    // テスト項目: ping には送信者にだけ 1 つの pong が返る（join 前でも可）
    // given (前提条件):
    let server = TestServer::start().await;
    let mut other = server.connect().await;
    join(&mut other, "X1", "other", true).await;
    let mut client = server.connect().await;
    join(&mut client, "X1", "me", false).await;
    recv_json(&mut other).await; // presence
    let mut lonely = server.connect().await;

    // when (操作):
    send_json(&mut client, json!({"type": "ping"})).await;
    send_json(&mut lonely, json!({"type": "ping"})).await;

    // then (期待する結果):
    let pong = recv_json(&mut client).await;
    assert_eq!(pong["type"], "pong");
    assert!(pong["t"].as_i64().unwrap() > 0);
    assert_eq!(recv_json(&mut lonely).await["type"], "pong");
    assert_silent(&mut client).await;
    assert_silent(&mut other).await;
}

#[tokio::test]
async fn test_malformed_messages_are_ignored() {
    // テスト項目: 不正なメッセージや join 前の state は無視され、接続は維持される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut client = server.connect().await;

    // when (操作):
    send_text(&mut client, "not json").await;
    send_text(&mut client, r#"{"type":"bogus"}"#).await;
    send_text(&mut client, r#"{"code":"X1"}"#).await;
    send_json(&mut client, json!({"type": "state", "state": 1})).await;
    send_json(&mut client, json!({"type": "ping"})).await;

    // then (期待する結果): 最初に届くのは pong
    assert_eq!(recv_json(&mut client).await["type"], "pong");
    let rooms: Value = reqwest::get(server.http_url("/api/rooms"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rooms, json!([]));
}

#[tokio::test]
async fn test_rooms_are_isolated() {
    // テスト項目: 別のルームの状態は届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut host_x = server.connect().await;
    let mut viewer_y = server.connect().await;
    join(&mut host_x, "X", "A", true).await;
    join(&mut viewer_y, "Y", "B", false).await;

    // when (操作):
    send_json(&mut host_x, json!({"type": "state", "state": "x-only"})).await;
    sync(&mut host_x).await;

    // then (期待する結果):
    assert_silent(&mut viewer_y).await;
}

#[tokio::test]
async fn test_second_join_on_same_connection_leaves_previous_room() {
    // テスト項目: 同じ接続で別のルームに join すると、前のルームから退出する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut watcher = server.connect().await;
    join(&mut watcher, "X1", "W", true).await;
    let mut mover = server.connect().await;
    join(&mut mover, "X1", "M", false).await;
    recv_json(&mut watcher).await; // presence joined

    // when (操作):
    let joined = join(&mut mover, "X2", "M", false).await;

    // then (期待する結果):
    assert_eq!(joined["code"], "X2");
    assert_eq!(joined["hostId"], "M");
    assert_eq!(
        recv_json(&mut watcher).await,
        json!({"type": "presence", "id": "M", "joined": false})
    );
    let detail: Value = reqwest::get(server.http_url("/api/rooms/X1"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(detail["peers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_last_peer_leaving_keeps_room() {
    // テスト項目: 最後のピアが抜けてもルームはすぐには削除されず、状態も残る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut host = server.connect().await;
    join(&mut host, "X1", "A", true).await;
    send_json(&mut host, json!({"type": "state", "state": {"slide": 7}})).await;
    sync(&mut host).await;

    // when (操作):
    host.close(None).await.unwrap();
    // 切断はサーバー側で非同期に処理されるため、ピアが消えるまで待つ
    let mut emptied = None;
    for _ in 0..40 {
        let detail: Value = reqwest::get(server.http_url("/api/rooms/X1"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        if detail["peers"].as_array().unwrap().is_empty() {
            emptied = Some(detail);
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    // then (期待する結果):
    let detail = emptied.expect("peer was never removed");
    assert_eq!(detail["hostId"], Value::Null);
    assert_eq!(detail["state"], json!({"slide": 7}));
    let mut returning = server.connect().await;
    let joined = join(&mut returning, "X1", "B", false).await;
    assert_eq!(joined["hostId"], "B");
    assert_eq!(joined["state"], json!({"slide": 7}));
}
