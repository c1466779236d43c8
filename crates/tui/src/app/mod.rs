use crate::input::CodeInput;
use crate::keybinds::Keybinds;
use crate::notices::NoticeBoard;
use crate::ui::layout::LayoutState;
use crate::ui::panel::PanelType;
use crate::Config;
use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::Frame;
use slide_remote_channel::api::ConfigApi;
use slide_remote_channel::{ChannelEvent, PresentationCode, SocketTransport};
use slide_remote_core::{Confirmation, ConnectionState, Controller, SlideDeck};
use std::future::Future;
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

mod actions;
mod effects;
mod input;
mod render;
mod state;
mod types;

pub use state::App;
pub use types::{AppAsyncEvent, HeadingRow};

impl App {
    pub(super) fn report_error(&mut self, context: &str, error: impl std::fmt::Display) {
        let message = format!("{context}: {error}");
        self.last_error = Some(message.clone());
        tracing::warn!("{message}");
    }

    pub(super) fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub(super) fn spawn_app_task<F>(&self, future: F)
    where
        F: Future<Output = AppAsyncEvent> + Send + 'static,
    {
        if let Some(tx) = self.app_async_tx.clone() {
            self.runtime.spawn(async move {
                let event = future.await;
                let _ = tx.send(event);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{App, AppAsyncEvent};
    use crate::Config;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use futures::{SinkExt, StreamExt};
    use slide_remote_channel::{ChannelEvent, ServerConfig, SessionId};
    use slide_remote_core::{ConnectionState, Notice};
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::runtime::Handle;
    use tokio_tungstenite::tungstenite::Message;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn offline_config() -> Config {
        let mut config = Config::default();
        config.server.fetch_remote_config = false;
        config
    }

    async fn tick_until(app: &mut App, done: impl Fn(&App) -> bool) {
        for _ in 0..200 {
            app.tick();
            if done(app) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached");
    }

    #[tokio::test]
    async fn typing_edits_the_presentation_code() {
        let mut app = App::new(offline_config(), Handle::current());

        for c in ['a', 'b', ' ', '1'] {
            app.handle_event(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_event(key(KeyCode::Backspace)).unwrap();
        app.handle_event(key(KeyCode::Char('2'))).unwrap();

        assert_eq!(app.controller.state().presentation_code.as_str(), "ab2");
        assert!(app.controller.state().controls().connect_enabled);
    }

    #[tokio::test]
    async fn initial_code_prefills_the_stage() {
        let mut app = App::new(offline_config(), Handle::current());
        app.set_initial_code("  XY-42 \n");

        assert_eq!(app.code_input.buffer, "XY-42");
        assert_eq!(app.controller.state().presentation_code.as_str(), "XY-42");
    }

    #[tokio::test]
    async fn enter_with_blank_code_does_not_connect() {
        let mut app = App::new(offline_config(), Handle::current());
        app.handle_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.controller.state().connection, ConnectionState::Disconnected);
        assert!(app.controller.session().is_none());
    }

    #[tokio::test]
    async fn events_without_a_session_are_discarded() {
        let mut app = App::new(offline_config(), Handle::current());
        let tx = app.event_tx.as_ref().expect("event tx").clone();

        tx.send(ChannelEvent::from_text(
            SessionId(7),
            r##"{"channel":"info","kind":"DATA","data":"# Deck\n"}"##,
        ))
        .expect("send event");
        app.tick();

        assert_eq!(app.controller.state().connection, ConnectionState::Disconnected);
        assert!(app.controller.deck().is_none());
    }

    #[tokio::test]
    async fn remote_config_replaces_local_endpoints() {
        let mut app = App::new(offline_config(), Handle::current());
        let tx = app.app_async_tx.as_ref().expect("async tx").clone();

        tx.send(AppAsyncEvent::ServerConfigLoaded {
            config: Some(ServerConfig {
                domain: "slides.example.com".to_string(),
                web_protocol: "https".to_string(),
                socket_protocol: "wss".to_string(),
            }),
            error: None,
        })
        .expect("send config");
        app.tick();

        assert_eq!(app.controller.server_config().domain, "slides.example.com");

        tx.send(AppAsyncEvent::ServerConfigLoaded {
            config: None,
            error: Some("Could not reach the presentation server.".to_string()),
        })
        .expect("send failure");
        app.tick();

        assert_eq!(app.controller.server_config().domain, "slides.example.com");
        assert!(app.last_error.is_some());
    }

    #[tokio::test]
    async fn pairs_navigates_and_disconnects_against_a_live_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            ws.send(Message::text(
                r#"{"channel":"info","kind":"REQUEST-SENT"}"#,
            ))
            .await
            .unwrap();
            ws.send(Message::text(
                r##"{"channel":"info","kind":"DATA","data":"# Demo\n## Intro\n"}"##,
            ))
            .await
            .unwrap();

            while let Some(Ok(msg)) = ws.next().await {
                if let Message::Text(text) = msg {
                    let frame: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
                    let index = frame["data"].as_u64().unwrap();
                    let reply = format!(
                        r#"{{"channel":"signal","kind":"SLIDE-SHOW","data":{index}}}"#
                    );
                    ws.send(Message::text(reply)).await.unwrap();
                }
            }
        });

        let mut config = offline_config();
        config.server.domain = addr.to_string();
        let mut app = App::new(config, Handle::current());
        app.set_initial_code("AB12");

        app.handle_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            app.controller.state().connection,
            ConnectionState::AwaitingAcceptance
        );

        tick_until(&mut app, |app| app.controller.state().is_connected()).await;
        assert_eq!(app.controller.state().slide_count, 4);
        let notices: Vec<Notice> = app
            .controller
            .notifier()
            .toasts()
            .map(|t| t.notice.clone())
            .collect();
        assert_eq!(notices, vec![Notice::RequestSent, Notice::Accepted]);

        app.handle_event(key(KeyCode::Right)).unwrap();
        tick_until(&mut app, |app| app.controller.state().current_slide_index == 1).await;
        assert_eq!(app.controller.state().presentation_progress, 33);
        assert_eq!(app.controller.binder().active_slide(), Some(1));

        app.handle_event(key(KeyCode::Char('d'))).unwrap();
        assert!(app.controller.notifier().pending_confirmation().is_some());
        app.handle_event(key(KeyCode::Char('n'))).unwrap();
        assert!(app.controller.state().is_connected());

        app.handle_event(key(KeyCode::Char('d'))).unwrap();
        app.handle_event(key(KeyCode::Char('y'))).unwrap();
        app.tick();

        assert_eq!(app.controller.state().connection, ConnectionState::Disconnected);
        assert!(app.code_input.buffer.is_empty());
        assert!(app.controller.deck().is_none());

        server.abort();
    }
}
