use slide_remote_channel::ServerConfig;

pub enum AppAsyncEvent {
    ServerConfigLoaded {
        config: Option<ServerConfig>,
        error: Option<String>,
    },
}

/// Screen row occupied by a slide heading in the last rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingRow {
    pub row: u16,
    pub x: u16,
    pub width: u16,
    pub element: usize,
}

impl HeadingRow {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.row && column >= self.x && column < self.x.saturating_add(self.width)
    }
}
