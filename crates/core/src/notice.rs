/// Lifecycle outcomes surfaced to the user as short, self-dismissing notices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    RequestSent,
    Accepted,
    NotFound,
    AlreadyControlled,
    RemoteEnded,
    ChannelFailure(String),
}

impl Notice {
    pub fn title(&self) -> &str {
        match self {
            Notice::RequestSent => "Request sent to presentation",
            Notice::Accepted => "Connection accepted!",
            Notice::NotFound => "Sorry!",
            Notice::AlreadyControlled => "Hey!",
            Notice::RemoteEnded => "Oops!",
            Notice::ChannelFailure(_) => "Connection problem",
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Notice::RequestSent => {
                "Once accepted, you'll be able to control the presentation from here."
            }
            Notice::Accepted => "You now have control over the presentation",
            Notice::NotFound => "The presentation you tried to connect to does not exist!",
            Notice::AlreadyControlled => {
                "Someone is already controlling the presentation you tried to connect to!"
            }
            Notice::RemoteEnded => "The presentation you were controlling has ended",
            Notice::ChannelFailure(message) => message,
        }
    }

    /// Whether this notice ends the session it reports on.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Notice::RequestSent | Notice::Accepted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Disconnect,
}

impl Confirmation {
    pub fn title(&self) -> &'static str {
        match self {
            Confirmation::Disconnect => "About to disconnect!",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            Confirmation::Disconnect => "Are you sure you want to quit controlling the presentation?",
        }
    }

    pub fn labels(&self) -> (&'static str, &'static str) {
        match self {
            Confirmation::Disconnect => ("End", "Cancel"),
        }
    }
}

/// UI capability the controller reports through.
///
/// `request_confirmation` only asks; the UI answers by calling back into the
/// controller (for [`Confirmation::Disconnect`], `Controller::disconnect`).
pub trait Notifier {
    fn show_notice(&mut self, notice: Notice);
    fn request_confirmation(&mut self, confirmation: Confirmation);
}
