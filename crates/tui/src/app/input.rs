use super::*;

impl App {
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            Event::Resize(_, _) => Ok(false),
            _ => Ok(false),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        if self.controller.notifier().pending_confirmation().is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.confirm_pending(),
                KeyCode::Char('n') | KeyCode::Esc => self.cancel_pending(),
                _ => {}
            }
            return Ok(false);
        }

        if key.code == KeyCode::Char('?') {
            self.show_help = !self.show_help;
            return Ok(false);
        }

        if self.show_help {
            if key.code == KeyCode::Esc {
                self.show_help = false;
            }
            return Ok(false);
        }

        match self.controller.state().connection {
            ConnectionState::Connected => self.handle_controller_key(key),
            ConnectionState::Disconnected | ConnectionState::AwaitingAcceptance => {
                self.handle_stage_key(key)
            }
        }

        Ok(false)
    }

    fn handle_stage_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.connect(),
            KeyCode::Esc => {
                if self.controller.state().connection == ConnectionState::AwaitingAcceptance {
                    self.controller.request_disconnect();
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Backspace => self.edit_code(CodeInput::handle_backspace),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit_code(|input| input.handle_char(c));
            }
            _ => {}
        }
    }

    fn handle_controller_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => {
                self.controller.step_previous();
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') | KeyCode::Char(' ') => {
                self.controller.step_next();
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.controller.jump_to_first();
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.controller.jump_to_last();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.controller.zoom_in();
            }
            KeyCode::Char('-') => {
                self.controller.zoom_out();
            }
            KeyCode::Char('r') => self.controller.toggle_reading_mode(),
            KeyCode::Char('d') | KeyCode::Esc => self.controller.request_disconnect(),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<bool> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if self.show_help || self.controller.notifier().pending_confirmation().is_some() {
                return Ok(false);
            }
            if !self.activate_heading_at(mouse.column, mouse.row) {
                tracing::debug!("No heading at ({}, {})", mouse.column, mouse.row);
            }
        }
        Ok(false)
    }
}
