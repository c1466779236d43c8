use crate::binder::NavigationBinder;
use crate::deck::SlideDeck;
use crate::notice::{Notice, Notifier};
use crate::reducer::{reduce, ConnectionState, ControllerAction, ControllerState};
use slide_remote_channel::{
    ChannelEvent, ChannelEventKind, ChannelTransport, PresentationCode, ServerConfig, SessionId,
};
use tracing::{debug, info, warn};

mod commands;
mod pairing;
mod signals;

/// Controller side of a remote-control session.
///
/// Owns the canonical [`ControllerState`], the transport to the presenter,
/// the notifier the UI provides and the heading bindings for the loaded deck.
/// All methods run on the caller's thread; inbound traffic arrives through
/// [`Controller::handle_event`].
pub struct Controller<T, N> {
    state: ControllerState,
    server: ServerConfig,
    transport: T,
    notifier: N,
    binder: NavigationBinder,
    deck: Option<SlideDeck>,
    session: Option<SessionId>,
}

impl<T: ChannelTransport, N: Notifier> Controller<T, N> {
    pub fn new(server: ServerConfig, transport: T, notifier: N) -> Self {
        Self {
            state: ControllerState::default(),
            server,
            transport,
            notifier,
            binder: NavigationBinder::new(),
            deck: None,
            session: None,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn deck(&self) -> Option<&SlideDeck> {
        self.deck.as_ref()
    }

    pub fn binder(&self) -> &NavigationBinder {
        &self.binder
    }

    pub fn session(&self) -> Option<SessionId> {
        self.session
    }

    pub fn server_config(&self) -> &ServerConfig {
        &self.server
    }

    /// Takes effect from the next `connect`.
    pub fn set_server_config(&mut self, server: ServerConfig) {
        self.server = server;
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Edits the code. Refused once an attempt is in flight.
    pub fn set_code(&mut self, code: PresentationCode) -> bool {
        if self.state.connection != ConnectionState::Disconnected {
            debug!("Ignoring code change while {:?}", self.state.connection);
            return false;
        }
        self.dispatch(ControllerAction::SetCode(code));
        true
    }

    pub fn toggle_reading_mode(&mut self) {
        self.dispatch(ControllerAction::ToggleReadingMode);
    }

    pub fn handle_event(&mut self, event: ChannelEvent) {
        if self.session != Some(event.session) {
            debug!(session = %event.session, "Discarding event from stale session: {:?}", event.kind);
            return;
        }
        match event.kind {
            ChannelEventKind::Info(frame) => self.handle_info(frame),
            ChannelEventKind::Signal(frame) => self.handle_signal(frame),
            ChannelEventKind::Exception(message) => {
                warn!(session = %event.session, "Channel exception: {}", message);
                self.end_session(Notice::ChannelFailure(message));
            }
        }
    }

    fn dispatch(&mut self, action: ControllerAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    fn end_session(&mut self, notice: Notice) {
        info!(?notice, "Ending controller session");
        self.notifier.show_notice(notice);
        self.transport.close();
        self.teardown();
    }

    fn teardown(&mut self) {
        self.binder.teardown();
        self.deck = None;
        self.session = None;
        self.dispatch(ControllerAction::Reset);
    }
}
