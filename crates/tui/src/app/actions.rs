use super::*;

impl App {
    /// Pre-fills the code field, e.g. from the command line.
    pub fn set_initial_code(&mut self, code: &str) {
        self.code_input.clear();
        for c in code.trim().chars() {
            self.code_input.handle_char(c);
        }
        self.controller
            .set_code(PresentationCode::from(self.code_input.buffer.as_str()));
    }

    pub(super) fn edit_code(&mut self, edit: impl FnOnce(&mut CodeInput) -> bool) {
        if self.controller.state().connection != ConnectionState::Disconnected {
            return;
        }
        if edit(&mut self.code_input) {
            self.controller
                .set_code(PresentationCode::from(self.code_input.buffer.as_str()));
        }
    }

    pub(super) fn connect(&mut self) {
        if !self.controller.state().controls().connect_enabled {
            return;
        }
        let code = self.controller.state().presentation_code.clone();
        if self.controller.connect(code) {
            self.clear_error();
        }
    }

    pub(super) fn confirm_pending(&mut self) {
        match self.controller.notifier_mut().take_confirmation() {
            Some(Confirmation::Disconnect) => self.controller.disconnect(),
            None => {}
        }
    }

    pub(super) fn cancel_pending(&mut self) {
        self.controller.notifier_mut().take_confirmation();
    }

    /// Activates the heading drawn at the given screen cell, if any.
    pub(super) fn activate_heading_at(&mut self, column: u16, row: u16) -> bool {
        let hit = self
            .heading_rows
            .iter()
            .find(|heading| heading.contains(column, row))
            .map(|heading| heading.element);

        match hit {
            Some(element) => self.controller.activate_heading(element),
            None => false,
        }
    }
}
