use crate::error::{ChannelError, ChannelResult};
use crate::types::{ChannelEvent, Command, PresentationCode, ServerConfig, SessionId};
use futures::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message as WsMessage};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use url::Url;

const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Duplex channel to a presenter.
///
/// `open` starts a new attempt and returns its session id; everything the
/// channel observes afterwards is reported as a [`ChannelEvent`] carrying that
/// id. `send_command` is fire-and-forget and `close` is idempotent.
pub trait ChannelTransport {
    fn open(&mut self, config: &ServerConfig, code: &PresentationCode) -> ChannelResult<SessionId>;
    fn send_command(&mut self, command: Command) -> ChannelResult<()>;
    fn close(&mut self);
}

struct ActiveSocket {
    session: SessionId,
    command_tx: mpsc::UnboundedSender<Command>,
    cancel: CancellationToken,
}

/// WebSocket transport. Socket I/O runs on a tokio task; inbound frames are
/// handed back through `event_tx`.
pub struct SocketTransport {
    runtime: Handle,
    event_tx: mpsc::UnboundedSender<ChannelEvent>,
    next_session: u64,
    handshake_timeout: Duration,
    active: Option<ActiveSocket>,
}

impl SocketTransport {
    pub fn new(runtime: Handle, event_tx: mpsc::UnboundedSender<ChannelEvent>) -> Self {
        Self {
            runtime,
            event_tx,
            next_session: 0,
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
            active: None,
        }
    }

    pub fn with_handshake_timeout(mut self, handshake_timeout: Duration) -> Self {
        self.handshake_timeout = handshake_timeout;
        self
    }
}

impl ChannelTransport for SocketTransport {
    fn open(&mut self, config: &ServerConfig, code: &PresentationCode) -> ChannelResult<SessionId> {
        self.close();

        let url = config.socket_url(code)?;
        self.next_session += 1;
        let session = SessionId(self.next_session);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        info!(%session, "Opening presentation channel for code {}", code);
        let task = SocketTask {
            session,
            url,
            handshake_timeout: self.handshake_timeout,
            commands: command_rx,
            cancel: cancel.clone(),
            events: self.event_tx.clone(),
        };
        self.runtime.spawn(task.run());

        self.active = Some(ActiveSocket {
            session,
            command_tx,
            cancel,
        });
        Ok(session)
    }

    fn send_command(&mut self, command: Command) -> ChannelResult<()> {
        let active = self.active.as_ref().ok_or(ChannelError::Closed)?;
        active
            .command_tx
            .send(command)
            .map_err(|_| ChannelError::Closed)
    }

    fn close(&mut self) {
        if let Some(active) = self.active.take() {
            info!(session = %active.session, "Closing presentation channel");
            active.cancel.cancel();
        }
    }
}

impl Drop for SocketTransport {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
        }
    }
}

struct SocketTask {
    session: SessionId,
    url: Url,
    handshake_timeout: Duration,
    commands: mpsc::UnboundedReceiver<Command>,
    cancel: CancellationToken,
    events: mpsc::UnboundedSender<ChannelEvent>,
}

impl SocketTask {
    async fn run(mut self) {
        let session = self.session;
        let events = self.events.clone();
        if let Err(e) = self.connect_and_relay().await {
            error!(%session, "Presentation channel failed: {}", e);
            let _ = events.send(ChannelEvent::exception(session, e.user_message()));
        }
    }

    async fn connect_and_relay(&mut self) -> ChannelResult<()> {
        debug!(session = %self.session, "Connecting to {}", self.url);

        let handshake = tokio::select! {
            _ = self.cancel.cancelled() => return Ok(()),
            result = timeout(self.handshake_timeout, connect_async(self.url.as_str())) => result,
        };
        let (ws_stream, _) = handshake
            .map_err(|_| ChannelError::Connect("handshake timed out".to_string()))?
            .map_err(|e| ChannelError::Connect(e.to_string()))?;
        info!(session = %self.session, "WebSocket connected");

        let (mut write, mut read) = ws_stream.split();

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    let _ = write.send(WsMessage::Close(None)).await;
                    return Ok(());
                }
                command = self.commands.recv() => match command {
                    Some(command) => {
                        debug!(session = %self.session, "Sending {:?}", command);
                        write.send(WsMessage::Text(command.encode().into())).await?;
                    }
                    None => {
                        let _ = write.close().await;
                        return Ok(());
                    }
                },
                frame = read.next() => match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        debug!(session = %self.session, "Received: {}", text.as_str());
                        let event = ChannelEvent::from_text(self.session, text.as_str());
                        if self.events.send(event).is_err() {
                            return Ok(());
                        }
                    }
                    Some(Ok(WsMessage::Close(_))) | None => {
                        warn!(session = %self.session, "WebSocket closed by server");
                        return Err(ChannelError::Closed);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChannelEventKind, InfoFrame};
    use tokio::net::TcpListener;

    fn local_config(domain: String) -> ServerConfig {
        ServerConfig {
            domain,
            web_protocol: "http".to_string(),
            socket_protocol: "ws".to_string(),
        }
    }

    #[tokio::test]
    async fn relays_frames_in_both_directions() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            ws.send(WsMessage::Text(
                r##"{"channel":"info","kind":"DATA","data":"# Deck"}"##
                    .to_string()
                    .into(),
            ))
            .await
            .unwrap();
            loop {
                match ws.next().await {
                    Some(Ok(WsMessage::Text(text))) => break text.as_str().to_string(),
                    Some(Ok(_)) => continue,
                    other => panic!("unexpected frame: {other:?}"),
                }
            }
        });

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut transport = SocketTransport::new(Handle::current(), tx);
        let session = transport
            .open(&local_config(addr.to_string()), &PresentationCode::from("AB12"))
            .unwrap();

        let event = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("frame in time")
            .expect("channel open");
        assert_eq!(
            event,
            ChannelEvent::info(session, InfoFrame::Data("# Deck".to_string()))
        );

        transport.send_command(Command::ShowSlide(2)).unwrap();
        let received = timeout(Duration::from_secs(5), server)
            .await
            .expect("server in time")
            .expect("server task");
        assert_eq!(received, r#"{"kind":"SLIDE-SHOW","data":2}"#);

        transport.close();
    }

    #[tokio::test]
    async fn unreachable_server_reports_exception_for_its_session() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut transport = SocketTransport::new(Handle::current(), tx)
            .with_handshake_timeout(Duration::from_secs(2));
        let session = transport
            .open(&local_config(addr.to_string()), &PresentationCode::from("AB12"))
            .unwrap();

        let event = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("event in time")
            .expect("channel open");
        assert_eq!(event.session, session);
        assert!(matches!(event.kind, ChannelEventKind::Exception(_)));
    }

    #[tokio::test]
    async fn reopening_issues_a_new_session_and_close_is_idempotent() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut transport = SocketTransport::new(Handle::current(), tx);
        let config = local_config("127.0.0.1:9".to_string());

        let first = transport.open(&config, &PresentationCode::from("A")).unwrap();
        let second = transport.open(&config, &PresentationCode::from("B")).unwrap();
        assert!(second > first);

        transport.close();
        transport.close();
        assert!(matches!(
            transport.send_command(Command::ZoomIn),
            Err(ChannelError::Closed)
        ));
    }
}
