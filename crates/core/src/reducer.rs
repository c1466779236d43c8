//! Canonical controller state and the pure transition function over it.
//!
//! Nothing here performs I/O. Callers feed [`ControllerAction`]s through
//! [`reduce`] and render whatever comes out; [`Controls`] is the derived view
//! of which navigation affordances are currently usable.

use slide_remote_channel::PresentationCode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    AwaitingAcceptance,
    Connected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub connection: ConnectionState,
    pub presentation_code: PresentationCode,
    pub slide_count: usize,
    pub current_slide_index: usize,
    pub presentation_progress: u8,
    pub is_zoomed_in: bool,
    pub is_reading_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerAction {
    SetCode(PresentationCode),
    AwaitAcceptance,
    Connect { slide_count: usize },
    ShowSlide { index: usize, progress: u8 },
    ZoomIn,
    ZoomOut,
    ToggleReadingMode,
    Reset,
}

/// Percentage through a deck of `slide_count` slides when showing `index`,
/// rounded half up: `round(100 * index / max(slide_count - 1, 1))`.
pub fn presentation_progress(index: usize, slide_count: usize) -> u8 {
    if slide_count <= 1 {
        return 0;
    }
    let last = (slide_count - 1) as u64;
    let index = (index as u64).min(last);
    ((200 * index + last) / (2 * last)) as u8
}

pub fn reduce(state: ControllerState, action: ControllerAction) -> ControllerState {
    match action {
        ControllerAction::SetCode(code) => ControllerState {
            presentation_code: code,
            ..state
        },
        ControllerAction::AwaitAcceptance => ControllerState {
            connection: ConnectionState::AwaitingAcceptance,
            ..state
        },
        ControllerAction::Connect { slide_count } => ControllerState {
            connection: ConnectionState::Connected,
            slide_count,
            current_slide_index: 0,
            presentation_progress: 0,
            ..state
        },
        ControllerAction::ShowSlide { index, progress } => {
            if state.connection != ConnectionState::Connected {
                return state;
            }
            ControllerState {
                current_slide_index: index,
                presentation_progress: progress,
                ..state
            }
        }
        ControllerAction::ZoomIn => ControllerState {
            is_zoomed_in: true,
            ..state
        },
        ControllerAction::ZoomOut => ControllerState {
            is_zoomed_in: false,
            ..state
        },
        ControllerAction::ToggleReadingMode => ControllerState {
            is_reading_mode: !state.is_reading_mode,
            ..state
        },
        ControllerAction::Reset => ControllerState::default(),
    }
}

/// Which controls are usable for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub connect_enabled: bool,
    pub first_enabled: bool,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub last_enabled: bool,
    pub zoom_in_enabled: bool,
    pub zoom_out_enabled: bool,
}

impl ControllerState {
    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }

    pub fn last_slide_index(&self) -> Option<usize> {
        self.slide_count.checked_sub(1)
    }

    pub fn is_at_first_slide(&self) -> bool {
        self.current_slide_index == 0
    }

    pub fn is_at_last_slide(&self) -> bool {
        self.last_slide_index() == Some(self.current_slide_index)
    }

    pub fn controls(&self) -> Controls {
        let connected = self.is_connected();
        Controls {
            connect_enabled: self.connection == ConnectionState::Disconnected
                && !self.presentation_code.is_blank(),
            first_enabled: connected && !self.is_at_first_slide(),
            previous_enabled: connected && !self.is_at_first_slide(),
            next_enabled: connected && !self.is_at_last_slide(),
            last_enabled: connected && !self.is_at_last_slide(),
            zoom_in_enabled: connected && !self.is_zoomed_in,
            zoom_out_enabled: connected && self.is_zoomed_in,
        }
    }

    /// "Slide: 3/12" style position label.
    pub fn slide_label(&self) -> String {
        format!(
            "Slide: {}/{}",
            self.current_slide_index + 1,
            self.slide_count
        )
    }
}
