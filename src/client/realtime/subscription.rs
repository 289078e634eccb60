//! Topic subscription task and its owning handles

use crate::client::config::Config;
use crate::shared::event::{BoardUpdateMessage, CardUpdateMessage};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

/// Connection state reported by the subscription task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Retrying,
    Error(String),
    Disconnected,
}

/// Why the frame loop ended
enum LoopExit {
    /// Shutdown requested or receiver gone; stop for good
    Shutdown,
    /// Transport dropped or went half-open; reconnect
    Dropped,
}

/// Owner of a running subscription task
///
/// `shutdown()` stops the task deterministically, including a pending
/// reconnect sleep. Dropping the handle aborts the task outright.
#[derive(Debug)]
pub struct SubscriptionHandle {
    shutdown: watch::Sender<bool>,
    state: watch::Receiver<ConnectionState>,
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    /// Latest reported connection state
    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    /// Watch connection state transitions
    pub fn state_changes(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    /// Signal the task to stop and wait for it to finish
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        let _ = (&mut self.task).await;
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Live subscription to one board's card events
#[derive(Debug)]
pub struct BoardSubscription {
    board_id: i64,
    handle: SubscriptionHandle,
    receiver: mpsc::UnboundedReceiver<CardUpdateMessage>,
}

impl BoardSubscription {
    /// Connect to the board topic and start delivering events
    pub fn spawn(config: &Config, board_id: i64) -> Self {
        let url = config.board_topic_url(board_id);
        let topic = format!("board/{}", board_id);
        let (handle, receiver) = spawn_listener(config, url, topic);
        Self {
            board_id,
            handle,
            receiver,
        }
    }

    pub fn board_id(&self) -> i64 {
        self.board_id
    }

    /// Next queued event, if any (non-blocking)
    pub fn try_next(&mut self) -> Option<CardUpdateMessage> {
        self.receiver.try_recv().ok()
    }

    /// Wait for the next event; `None` once the task has stopped
    pub async fn next(&mut self) -> Option<CardUpdateMessage> {
        self.receiver.recv().await
    }

    pub fn state(&self) -> ConnectionState {
        self.handle.state()
    }

    pub async fn shutdown(self) {
        self.handle.shutdown().await;
    }
}

/// Board-agnostic subscription to the global announcements topic
#[derive(Debug)]
pub struct GlobalSubscription {
    handle: SubscriptionHandle,
    receiver: mpsc::UnboundedReceiver<BoardUpdateMessage>,
}

impl GlobalSubscription {
    /// Connect to the global topic and start delivering announcements
    pub fn spawn(config: &Config) -> Self {
        let url = config.boards_topic_url();
        let (handle, receiver) = spawn_listener(config, url, "boards".to_string());
        Self { handle, receiver }
    }

    /// Next queued announcement, if any (non-blocking)
    pub fn try_next(&mut self) -> Option<BoardUpdateMessage> {
        self.receiver.try_recv().ok()
    }

    /// Wait for the next announcement; `None` once the task has stopped
    pub async fn next(&mut self) -> Option<BoardUpdateMessage> {
        self.receiver.recv().await
    }

    pub fn state(&self) -> ConnectionState {
        self.handle.state()
    }

    pub async fn shutdown(self) {
        self.handle.shutdown().await;
    }
}

fn spawn_listener<T>(
    config: &Config,
    url: String,
    topic: String,
) -> (SubscriptionHandle, mpsc::UnboundedReceiver<T>)
where
    T: DeserializeOwned + Send + 'static,
{
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);

    let reconnect_delay = config.reconnect_delay();
    let heartbeat_interval = config.heartbeat_interval();

    let task = tokio::spawn(run_listener(
        url,
        topic,
        reconnect_delay,
        heartbeat_interval,
        event_tx,
        shutdown_rx,
        state_tx,
    ));

    (
        SubscriptionHandle {
            shutdown: shutdown_tx,
            state: state_rx,
            task,
        },
        event_rx,
    )
}

async fn run_listener<T>(
    url: String,
    topic: String,
    reconnect_delay: Duration,
    heartbeat_interval: Duration,
    events: mpsc::UnboundedSender<T>,
    mut shutdown: watch::Receiver<bool>,
    state: watch::Sender<ConnectionState>,
) where
    T: DeserializeOwned + Send + 'static,
{
    match Url::parse(&url) {
        Ok(parsed) if parsed.scheme() == "ws" || parsed.scheme() == "wss" => {}
        Ok(parsed) => {
            tracing::error!("[REALTIME] refusing non-websocket scheme {}: {}", parsed.scheme(), url);
            let _ = state.send(ConnectionState::Disconnected);
            return;
        }
        Err(e) => {
            tracing::error!("[REALTIME] invalid topic URL {}: {}", url, e);
            let _ = state.send(ConnectionState::Disconnected);
            return;
        }
    }

    loop {
        let _ = state.send(ConnectionState::Connecting);

        let connected = tokio::select! {
            result = connect_async(url.as_str()) => result,
            _ = shutdown.changed() => break,
        };

        match connected {
            Ok((mut ws, _response)) => {
                tracing::info!("[REALTIME] subscribed to {}", topic);
                let _ = state.send(ConnectionState::Connected);

                let exit = read_frames(
                    &mut ws,
                    &topic,
                    heartbeat_interval,
                    &events,
                    &mut shutdown,
                )
                .await;

                if matches!(exit, LoopExit::Shutdown) {
                    let _ = ws.close(None).await;
                    break;
                }
                tracing::warn!("[REALTIME] connection to {} lost, will reconnect", topic);
            }
            Err(e) => {
                tracing::warn!("[REALTIME] failed to subscribe to {} (will retry): {}", topic, e);
                let _ = state.send(ConnectionState::Error(e.to_string()));
            }
        }

        let _ = state.send(ConnectionState::Retrying);
        tokio::select! {
            _ = tokio::time::sleep(reconnect_delay) => {}
            _ = shutdown.changed() => break,
        }
    }

    let _ = state.send(ConnectionState::Disconnected);
    tracing::debug!("[REALTIME] listener for {} stopped", topic);
}

/// Pump one live connection until it drops or shutdown is requested
async fn read_frames<S, T>(
    ws: &mut S,
    topic: &str,
    heartbeat_interval: Duration,
    events: &mpsc::UnboundedSender<T>,
    shutdown: &mut watch::Receiver<bool>,
) -> LoopExit
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>>
        + Sink<Message>
        + Unpin,
    T: DeserializeOwned,
{
    // Anything inbound counts as liveness, including pongs; a silent
    // connection past the idle window is half-open.
    let idle_window = heartbeat_interval * 2 + Duration::from_secs(1);
    let mut heartbeat = tokio::time::interval(heartbeat_interval);
    let mut last_inbound = Instant::now();

    loop {
        tokio::select! {
            _ = shutdown.changed() => return LoopExit::Shutdown,

            _ = heartbeat.tick() => {
                if last_inbound.elapsed() > idle_window {
                    tracing::warn!("[REALTIME] {} idle for {:?}, treating as half-open", topic, last_inbound.elapsed());
                    return LoopExit::Dropped;
                }
                if ws.send(Message::Ping(Vec::new())).await.is_err() {
                    return LoopExit::Dropped;
                }
            }

            frame = ws.next() => {
                last_inbound = Instant::now();
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<T>(&text) {
                            Ok(message) => {
                                if events.send(message).is_err() {
                                    // receiver gone, the view is done with us
                                    return LoopExit::Shutdown;
                                }
                            }
                            Err(e) => {
                                tracing::warn!("[REALTIME] dropping unparseable frame on {}: {}", topic, e);
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if ws.send(Message::Pong(data)).await.is_err() {
                            return LoopExit::Dropped;
                        }
                    }
                    Some(Ok(Message::Close(_))) => return LoopExit::Dropped,
                    Some(Ok(_)) => {} // pong/binary frames are liveness only
                    Some(Err(e)) => {
                        tracing::warn!("[REALTIME] read error on {}: {}", topic, e);
                        return LoopExit::Dropped;
                    }
                    None => return LoopExit::Dropped,
                }
            }
        }
    }
}
