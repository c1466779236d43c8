pub mod api;
pub mod error;
pub mod socket;
pub mod types;

pub use error::{ChannelError, ChannelResult};
pub use socket::{ChannelTransport, SocketTransport};
pub use types::*;
