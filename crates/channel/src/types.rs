use crate::error::{ChannelError, ChannelResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use url::Url;

pub const SLIDE_SHOW: &str = "SLIDE-SHOW";
pub const SLIDE_ZOOM_IN: &str = "SLIDE-ZOOM-IN";
pub const SLIDE_ZOOM_OUT: &str = "SLIDE-ZOOM-OUT";

const REQUEST_SENT: &str = "REQUEST-SENT";
const DATA: &str = "DATA";
const NO_PRESENTATION: &str = "NO-PRESENTATION";
const DISCONNECTION: &str = "DISCONNECTION";
const DUPLICATE: &str = "DUPLICATE";

/// Short code the presenter shares so a controller can find its presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresentationCode(String);

impl PresentationCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PresentationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PresentationCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Where the presentation server lives, as published by its `/configs` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub domain: String,
    #[serde(rename = "web-protocol")]
    pub web_protocol: String,
    #[serde(rename = "socket-protocol")]
    pub socket_protocol: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            domain: "localhost:3000".to_string(),
            web_protocol: "http".to_string(),
            socket_protocol: "ws".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn socket_url(&self, code: &PresentationCode) -> ChannelResult<Url> {
        let mut url = Url::parse(&format!(
            "{}://{}/controller",
            self.socket_protocol, self.domain
        ))?;
        url.query_pairs_mut().append_pair("code", code.as_str());
        Ok(url)
    }

    /// Deep link that opens the controller pre-filled with `code`.
    pub fn controller_url(&self, code: &PresentationCode) -> String {
        format!("{}://{}/control/{}", self.web_protocol, self.domain, code)
    }
}

/// Identifies one connection attempt. Events from older attempts are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoFrame {
    RequestSent,
    Data(String),
    NoPresentation,
    Disconnection,
    Duplicate,
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalFrame {
    SlideShow(usize),
    ZoomIn,
    ZoomOut,
    Unknown(String),
}

/// Outbound request from the controller to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ShowSlide(usize),
    ZoomIn,
    ZoomOut,
}

impl Command {
    pub fn kind(&self) -> &'static str {
        match self {
            Command::ShowSlide(_) => SLIDE_SHOW,
            Command::ZoomIn => SLIDE_ZOOM_IN,
            Command::ZoomOut => SLIDE_ZOOM_OUT,
        }
    }

    pub fn encode(&self) -> String {
        let frame = OutboundFrame {
            kind: self.kind(),
            data: match self {
                Command::ShowSlide(index) => Some(*index),
                Command::ZoomIn | Command::ZoomOut => None,
            },
        };
        // Serializing a &str and an Option<usize> cannot fail.
        serde_json::to_string(&frame).unwrap_or_default()
    }
}

#[derive(Serialize)]
struct OutboundFrame {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum WireChannel {
    Info,
    Signal,
}

#[derive(Debug, Deserialize)]
struct WireFrame {
    channel: WireChannel,
    kind: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    Info(InfoFrame),
    Signal(SignalFrame),
}

impl InboundFrame {
    pub fn decode(text: &str) -> ChannelResult<Self> {
        let frame: WireFrame = serde_json::from_str(text)?;
        match frame.channel {
            WireChannel::Info => decode_info(frame.kind, frame.data).map(InboundFrame::Info),
            WireChannel::Signal => decode_signal(frame.kind, frame.data).map(InboundFrame::Signal),
        }
    }
}

fn decode_info(kind: String, data: Value) -> ChannelResult<InfoFrame> {
    Ok(match kind.as_str() {
        REQUEST_SENT => InfoFrame::RequestSent,
        DATA => match data {
            Value::String(markdown) => InfoFrame::Data(markdown),
            other => {
                return Err(ChannelError::Malformed(format!(
                    "DATA frame without presentation text: {other}"
                )))
            }
        },
        NO_PRESENTATION => InfoFrame::NoPresentation,
        DISCONNECTION => InfoFrame::Disconnection,
        DUPLICATE => InfoFrame::Duplicate,
        _ => InfoFrame::Unknown(kind),
    })
}

fn decode_signal(kind: String, data: Value) -> ChannelResult<SignalFrame> {
    Ok(match kind.as_str() {
        SLIDE_SHOW => {
            let index = data
                .as_u64()
                .and_then(|i| usize::try_from(i).ok())
                .ok_or_else(|| {
                    ChannelError::Malformed(format!("SLIDE-SHOW frame without slide index: {data}"))
                })?;
            SignalFrame::SlideShow(index)
        }
        SLIDE_ZOOM_IN => SignalFrame::ZoomIn,
        SLIDE_ZOOM_OUT => SignalFrame::ZoomOut,
        _ => SignalFrame::Unknown(kind),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEventKind {
    Info(InfoFrame),
    Signal(SignalFrame),
    Exception(String),
}

/// Everything the transport reports back, tagged with the attempt it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEvent {
    pub session: SessionId,
    pub kind: ChannelEventKind,
}

impl ChannelEvent {
    pub fn info(session: SessionId, frame: InfoFrame) -> Self {
        Self {
            session,
            kind: ChannelEventKind::Info(frame),
        }
    }

    pub fn signal(session: SessionId, frame: SignalFrame) -> Self {
        Self {
            session,
            kind: ChannelEventKind::Signal(frame),
        }
    }

    pub fn exception(session: SessionId, message: impl Into<String>) -> Self {
        Self {
            session,
            kind: ChannelEventKind::Exception(message.into()),
        }
    }

    /// Decodes a text frame, turning malformed input into an exception event.
    pub fn from_text(session: SessionId, text: &str) -> Self {
        match InboundFrame::decode(text) {
            Ok(InboundFrame::Info(frame)) => Self::info(session, frame),
            Ok(InboundFrame::Signal(frame)) => Self::signal(session, frame),
            Err(e) => Self::exception(session, e.to_string()),
        }
    }
}
