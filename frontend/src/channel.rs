use futures::channel::oneshot;
use futures::{select, FutureExt, SinkExt, StreamExt};
use gloo_net::websocket::{futures::WebSocket, Message};
use serde::{Deserialize, Serialize};
use shared::models::VoteSnapshot;
use yew::Callback;

/// Fixed topic the backend publishes on.
pub const CHANNEL_NAME: &str = "vote-channel";
pub const EVENT_NAME: &str = "vote_update";

pub enum ChannelEvent {
    Subscribed,
    Update(VoteSnapshot),
    Error(String),
    Closed,
}

#[derive(Deserialize)]
struct Frame {
    event: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct Subscribe<'a> {
    event: &'a str,
    data: SubscribeData<'a>,
}

#[derive(Serialize)]
struct SubscribeData<'a> {
    channel: &'a str,
}

/// Handle kept by the page; dropping the sender side tells the socket task
/// to close the connection.
pub struct ChannelHandle {
    close: Option<oneshot::Sender<()>>,
}

impl ChannelHandle {
    pub fn close(&mut self) {
        if let Some(close) = self.close.take() {
            let _ = close.send(());
        }
    }
}

/// Opens a Pusher-protocol WebSocket and forwards channel activity to
/// `on_event`.
pub fn connect(
    key: &str,
    cluster: &str,
    on_event: Callback<ChannelEvent>,
) -> Result<ChannelHandle, String> {
    let url = format!(
        "wss://ws-{cluster}.pusher.com/app/{key}?protocol=7&client=yew&version=0.1.0"
    );
    let socket = WebSocket::open(&url).map_err(|e| e.to_string())?;
    let (close_tx, close_rx) = oneshot::channel();

    wasm_bindgen_futures::spawn_local(run(socket, close_rx, on_event));

    Ok(ChannelHandle {
        close: Some(close_tx),
    })
}

async fn run(socket: WebSocket, close_rx: oneshot::Receiver<()>, on_event: Callback<ChannelEvent>) {
    let (mut write, mut read) = socket.split();
    let mut close_rx = close_rx.fuse();

    loop {
        let message = select! {
            message = read.next().fuse() => message,
            _ = close_rx => break,
        };

        let text = match message {
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(Message::Bytes(_))) => continue,
            Some(Err(e)) => {
                on_event.emit(ChannelEvent::Error(e.to_string()));
                return;
            }
            None => {
                on_event.emit(ChannelEvent::Closed);
                return;
            }
        };

        let frame: Frame = match serde_json::from_str(&text) {
            Ok(frame) => frame,
            Err(_) => continue,
        };

        match frame.event.as_str() {
            // Handshake done; ask for the vote channel.
            "pusher:connection_established" => {
                let subscribe = Subscribe {
                    event: "pusher:subscribe",
                    data: SubscribeData {
                        channel: CHANNEL_NAME,
                    },
                };
                let payload = match serde_json::to_string(&subscribe) {
                    Ok(payload) => payload,
                    Err(_) => continue,
                };
                if write.send(Message::Text(payload)).await.is_err() {
                    on_event.emit(ChannelEvent::Error("failed to subscribe".into()));
                    return;
                }
            }
            "pusher_internal:subscription_succeeded" | "pusher:subscription_succeeded" => {
                on_event.emit(ChannelEvent::Subscribed);
            }
            "pusher:error" => {
                let message = frame
                    .data
                    .as_ref()
                    .and_then(|data| data.get("message"))
                    .and_then(|message| message.as_str())
                    .unwrap_or("channel error")
                    .to_string();
                on_event.emit(ChannelEvent::Error(message));
            }
            EVENT_NAME => {
                if let Some(snapshot) = decode_update(frame.data) {
                    on_event.emit(ChannelEvent::Update(snapshot));
                }
            }
            _ => {}
        }
    }

    // Deliberate teardown from the page; close the socket cleanly.
    if let Ok(socket) = write.reunite(read) {
        let _ = socket.close(Some(1000), Some("page closed"));
    }
}

/// Pusher wraps event payloads in a JSON string; accept the bare object too.
fn decode_update(data: Option<serde_json::Value>) -> Option<VoteSnapshot> {
    match data? {
        serde_json::Value::String(inner) => serde_json::from_str(&inner).ok(),
        value => serde_json::from_value(value).ok(),
    }
}
