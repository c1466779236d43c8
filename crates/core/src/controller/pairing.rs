use super::*;
use crate::notice::Confirmation;
use slide_remote_channel::InfoFrame;

impl<T: ChannelTransport, N: Notifier> Controller<T, N> {
    /// Starts an attempt to take control of the presentation behind `code`.
    ///
    /// Blank codes and calls made while an attempt is already outstanding do
    /// nothing. Returns whether the channel was opened.
    pub fn connect(&mut self, code: PresentationCode) -> bool {
        if self.state.connection != ConnectionState::Disconnected {
            debug!("Ignoring connect while {:?}", self.state.connection);
            return false;
        }
        if code.is_blank() {
            debug!("Ignoring connect without a presentation code");
            return false;
        }

        self.dispatch(ControllerAction::SetCode(code.clone()));
        match self.transport.open(&self.server, &code) {
            Ok(session) => {
                info!(%session, "Requested control of presentation {}", code);
                self.session = Some(session);
                self.dispatch(ControllerAction::AwaitAcceptance);
                true
            }
            Err(e) => {
                warn!("Failed to open presentation channel: {}", e);
                self.end_session(Notice::ChannelFailure(e.user_message().to_string()));
                false
            }
        }
    }

    /// Asks the UI to confirm before [`disconnect`](Self::disconnect).
    pub fn request_disconnect(&mut self) {
        if self.state.connection == ConnectionState::Disconnected {
            return;
        }
        self.notifier.request_confirmation(Confirmation::Disconnect);
    }

    /// Closes the channel and drops all session state. Unconditional.
    pub fn disconnect(&mut self) {
        info!(session = ?self.session, "Disconnecting from presentation");
        self.transport.close();
        self.teardown();
    }

    pub(super) fn handle_info(&mut self, frame: InfoFrame) {
        match frame {
            InfoFrame::RequestSent => {
                if self.state.connection == ConnectionState::AwaitingAcceptance {
                    self.notifier.show_notice(Notice::RequestSent);
                } else {
                    debug!("Ignoring REQUEST-SENT while {:?}", self.state.connection);
                }
            }
            InfoFrame::Data(markdown) => self.load_presentation(&markdown),
            InfoFrame::NoPresentation => self.end_session(Notice::NotFound),
            InfoFrame::Duplicate => self.end_session(Notice::AlreadyControlled),
            InfoFrame::Disconnection => self.end_session(Notice::RemoteEnded),
            InfoFrame::Unknown(kind) => debug!("Ignoring unknown info frame {}", kind),
        }
    }

    fn load_presentation(&mut self, markdown: &str) {
        let newly_accepted = match self.state.connection {
            ConnectionState::AwaitingAcceptance => true,
            ConnectionState::Connected => false,
            ConnectionState::Disconnected => {
                warn!("Discarding presentation data received while disconnected");
                return;
            }
        };

        self.binder.teardown();
        let deck = SlideDeck::render(markdown);
        if newly_accepted {
            self.notifier.show_notice(Notice::Accepted);
        }
        info!(slides = deck.len(), "Controlling presentation \"{}\"", deck.title());

        self.dispatch(ControllerAction::Connect {
            slide_count: deck.len(),
        });
        self.binder.rebuild(&deck);
        self.binder.highlight(0);
        self.deck = Some(deck);
    }
}
