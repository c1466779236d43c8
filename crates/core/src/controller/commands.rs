use super::*;
use slide_remote_channel::Command;

impl<T: ChannelTransport, N: Notifier> Controller<T, N> {
    pub fn jump_to_slide(&mut self, index: usize) -> bool {
        if !self.state.is_connected() {
            return false;
        }
        if index >= self.state.slide_count {
            debug!(
                "Dropping jump to slide {} of {}",
                index, self.state.slide_count
            );
            return false;
        }
        self.send(Command::ShowSlide(index))
    }

    pub fn step_previous(&mut self) -> bool {
        if self.state.is_at_first_slide() {
            return false;
        }
        self.jump_to_slide(self.state.current_slide_index - 1)
    }

    pub fn step_next(&mut self) -> bool {
        if self.state.is_at_last_slide() {
            return false;
        }
        self.jump_to_slide(self.state.current_slide_index + 1)
    }

    pub fn jump_to_first(&mut self) -> bool {
        if self.state.is_at_first_slide() {
            return false;
        }
        self.jump_to_slide(0)
    }

    pub fn jump_to_last(&mut self) -> bool {
        match self.state.last_slide_index() {
            Some(last) if last != self.state.current_slide_index => self.jump_to_slide(last),
            _ => false,
        }
    }

    pub fn zoom_in(&mut self) -> bool {
        if !self.state.is_connected() || self.state.is_zoomed_in {
            return false;
        }
        self.send(Command::ZoomIn)
    }

    pub fn zoom_out(&mut self) -> bool {
        if !self.state.is_connected() || !self.state.is_zoomed_in {
            return false;
        }
        self.send(Command::ZoomOut)
    }

    /// Fires the binding attached to heading `element`, if one is live.
    pub fn activate_heading(&mut self, element: usize) -> bool {
        match self.binder.activate(element) {
            Some(Command::ShowSlide(index)) => self.jump_to_slide(index),
            Some(command) => self.send(command),
            None => false,
        }
    }

    fn send(&mut self, command: Command) -> bool {
        match self.transport.send_command(command) {
            Ok(()) => {
                debug!("Sent {}", command.kind());
                true
            }
            Err(e) => {
                warn!("Failed to send {}: {}", command.kind(), e);
                self.end_session(Notice::ChannelFailure(e.user_message().to_string()));
                false
            }
        }
    }
}
