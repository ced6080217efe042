use i3_ipc::{
    Connection, Error, EventKind,
    codec::{self, EVENT_BIT, MessageType},
};
use tokio::net::UnixStream;

const TREE: &str = r#"{
    "id": 1, "type": "root",
    "nodes": [{"id": 2, "type": "workspace", "nodes": [
        {"id": 3, "type": "con", "window": 100},
        {"id": 4, "type": "con", "window": 200, "focused": true}
    ]}]
}"#;

const EMPTY_WS_TREE: &str =
    r#"{"id": 1, "nodes": [{"id": 2, "type": "workspace", "focused": true, "nodes": []}]}"#;

fn window_event(change: &str, window: Option<u32>) -> Vec<u8> {
    let window = window.map_or("null".to_string(), |w| w.to_string());
    format!(r#"{{"change":"{change}","container":{{"id":7,"window":{window}}}}}"#).into_bytes()
}

/// Fake i3 that answers one GET_TREE request with `tree`.
async fn serve_tree(mut peer: UnixStream, tree: &'static str) {
    let req = codec::read_message(&mut peer).await.unwrap().unwrap();
    assert_eq!(req.msg_type, MessageType::GetTree.code());
    // An event that is not the reply must be skipped by the client.
    codec::write_message(&mut peer, EVENT_BIT | 1, b"{}")
        .await
        .unwrap();
    codec::write_message(&mut peer, MessageType::GetTree.code(), tree.as_bytes())
        .await
        .unwrap();
}

#[tokio::test(flavor = "current_thread")]
async fn focused_window_from_tree() {
    let (client, server) = UnixStream::pair().unwrap();
    let fake = tokio::spawn(serve_tree(server, TREE));
    let mut conn = Connection::from_stream(client);
    assert_eq!(conn.get_focused_window().await.unwrap(), 200);
    fake.await.unwrap();
}

#[tokio::test(flavor = "current_thread")]
async fn empty_workspace_has_no_focused_window() {
    let (client, server) = UnixStream::pair().unwrap();
    let fake = tokio::spawn(serve_tree(server, EMPTY_WS_TREE));
    let mut conn = Connection::from_stream(client);
    assert!(matches!(
        conn.get_focused_window().await,
        Err(Error::NoFocusedWindow)
    ));
    fake.await.unwrap();
}

#[tokio::test(flavor = "current_thread")]
async fn subscribe_then_focus_events_in_order() {
    let (client, mut server) = UnixStream::pair().unwrap();
    let fake = tokio::spawn(async move {
        let req = codec::read_message(&mut server).await.unwrap().unwrap();
        assert_eq!(req.msg_type, MessageType::Subscribe.code());
        let names: Vec<String> = serde_json::from_slice(&req.payload).unwrap();
        assert_eq!(names, vec!["window".to_string()]);
        codec::write_message(&mut server, 2, br#"{"success":true}"#)
            .await
            .unwrap();
        let win = EVENT_BIT | EventKind::Window.code();
        for (change, window) in [
            ("new", Some(5)),
            ("focus", Some(10)),
            ("title", Some(10)),
            ("focus", None),
            ("focus", Some(20)),
        ] {
            codec::write_message(&mut server, win, &window_event(change, window))
                .await
                .unwrap();
        }
        // Dropping the peer closes the socket.
    });
    let conn = Connection::from_stream(client);
    let mut events = conn.subscribe(&[EventKind::Window]).await.unwrap();
    assert_eq!(events.next_focus().await.unwrap(), 10);
    assert_eq!(events.next_focus().await.unwrap(), 20);
    fake.await.unwrap();
    assert!(matches!(events.next_focus().await, Err(Error::Closed)));
}

#[tokio::test(flavor = "current_thread")]
async fn rejected_subscription() {
    let (client, mut server) = UnixStream::pair().unwrap();
    let fake = tokio::spawn(async move {
        codec::read_message(&mut server).await.unwrap().unwrap();
        codec::write_message(&mut server, 2, br#"{"success":false}"#)
            .await
            .unwrap();
    });
    let conn = Connection::from_stream(client);
    let err = conn.subscribe(&[EventKind::Window]).await.unwrap_err();
    assert!(matches!(err, Error::SubscribeRejected(ref s) if s == "window"));
    fake.await.unwrap();
}

#[tokio::test(flavor = "current_thread")]
async fn peer_closing_before_reply() {
    let (client, server) = UnixStream::pair().unwrap();
    drop(server);
    let mut conn = Connection::from_stream(client);
    // Writing to a closed peer may fail with EPIPE before the read sees EOF.
    let err = conn.get_tree().await.unwrap_err();
    assert!(matches!(err, Error::Closed | Error::Io(_)));
}
