use super::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const TOAST_WIDTH: u16 = 48;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.heading_rows.clear();

        if self.controller.state().is_connected() {
            self.layout.calculate_layout(area);

            let panels = self.layout.get_panels().to_vec();

            for panel in panels {
                match panel.panel_type {
                    PanelType::Topbar => self.render_topbar(frame, panel.rect),
                    PanelType::Slides => self.render_slides(frame, panel.rect),
                    PanelType::Progress => self.render_progress(frame, panel.rect),
                    PanelType::Controls => self.render_controls(frame, panel.rect),
                }
            }
        } else {
            self.render_stage(frame, area);
        }

        self.render_toasts(frame, area);

        if let Some(confirmation) = self.controller.notifier().pending_confirmation() {
            self.render_confirmation_dialog(frame, area, confirmation);
        }

        if self.show_help {
            self.render_help(frame, area);
        }
    }

    fn render_stage(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Paragraph};

        let state = self.controller.state();
        let controls = state.controls();

        let code = if self.code_input.buffer.is_empty() {
            Span::styled("[type the code]", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(
                self.code_input.buffer.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        };

        let connect_style = if controls.connect_enabled {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let status = match state.connection {
            ConnectionState::AwaitingAcceptance => {
                "Waiting for the presenter to accept...  [Esc] cancel".to_string()
            }
            _ if self.is_loading => self.loading_message.clone(),
            _ => "Ask the presenter for the code shown on their screen.".to_string(),
        };

        let mut lines = vec![
            Line::from(""),
            Line::from("  Control a presentation from your terminal."),
            Line::from(""),
            Line::from(vec![Span::raw("  Code: "), code]),
            Line::from(""),
            Line::from(vec![
                Span::raw("  "),
                Span::styled("[Enter] Connect", connect_style),
                Span::raw("   [Esc] Quit   [?] Help"),
            ]),
            Line::from(""),
            Line::from(format!("  {status}")),
        ];

        if !state.presentation_code.is_blank() {
            let link = self
                .controller
                .server_config()
                .controller_url(&state.presentation_code);
            lines.push(Line::from(""));
            lines.push(Line::styled(
                format!("  Link: {link}"),
                Style::default().fg(Color::Cyan),
            ));
        }

        if let Some(ref err) = self.last_error {
            lines.push(Line::from(""));
            lines.push(Line::styled(
                format!("  ⚠ {err}"),
                Style::default().fg(Color::Red),
            ));
        }

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" slide-remote "),
            ),
            area,
        );
    }

    fn render_topbar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Paragraph};

        let state = self.controller.state();
        let title = self.controller.deck().map_or("Untitled", SlideDeck::title);

        let text = format!(
            " ● {}   code: {}{}{}{}   [?] help",
            title,
            state.presentation_code,
            if state.is_zoomed_in { "   [zoomed]" } else { "" },
            if state.is_reading_mode {
                "   [reading]"
            } else {
                ""
            },
            if self.last_error.is_some() {
                "   ⚠ error"
            } else {
                ""
            },
        );

        frame.render_widget(Paragraph::new(text).block(Block::default()), area);
    }

    fn render_slides(&mut self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Paragraph};

        let Some(deck) = self.controller.deck() else {
            return;
        };
        let reading_mode = self.controller.state().is_reading_mode;
        let active = self.controller.binder().active_slide();

        let mut lines: Vec<Line> = Vec::new();
        // (line index, heading element)
        let mut heading_lines: Vec<(usize, usize)> = Vec::new();

        for (element, slide) in deck.slides().iter().enumerate() {
            let is_active = active == Some(element);
            let prefix = if is_active { "> " } else { "  " };
            let indent = if slide.level > 1 { "  " } else { "" };

            let style = if is_active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if slide.level == 1 {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            heading_lines.push((lines.len(), element));
            lines.push(Line::styled(
                format!("{prefix}{indent}{}", slide.heading),
                style,
            ));

            if reading_mode {
                for body_line in &slide.body {
                    lines.push(Line::styled(
                        format!("    {indent}{body_line}"),
                        Style::default().fg(Color::Gray),
                    ));
                }
            }
        }

        let inner = Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        let visible = inner.height as usize;

        // Keep the active heading near the middle of the panel.
        let active_line = active
            .and_then(|a| heading_lines.iter().find(|(_, element)| *element == a))
            .map_or(0, |(line, _)| *line);
        let scroll = active_line.saturating_sub(visible / 2);

        let heading_rows = heading_lines
            .iter()
            .filter(|(line, _)| *line >= scroll && *line < scroll + visible)
            .map(|(line, element)| HeadingRow {
                row: inner.y + (line - scroll) as u16,
                x: inner.x,
                width: inner.width,
                element: *element,
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" {} ", deck.title())),
                )
                .scroll((scroll as u16, 0)),
            area,
        );

        self.heading_rows = heading_rows;
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Gauge};

        let state = self.controller.state();
        let percent = state.presentation_progress.min(100);

        frame.render_widget(
            Gauge::default()
                .block(Block::default().borders(Borders::ALL).title(" Progress "))
                .gauge_style(Style::default().fg(Color::Cyan))
                .percent(u16::from(percent))
                .label(format!("{}  ({}%)", state.slide_label(), percent)),
            area,
        );
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Paragraph};

        let state = self.controller.state();
        let controls = state.controls();

        let item = |label: &str, enabled: bool| {
            let style = if enabled {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(format!(" {label} "), style)
        };

        let reading = if state.is_reading_mode {
            "[r] reading: on"
        } else {
            "[r] reading: off"
        };

        let line = Line::from(vec![
            item("[Home] first", controls.first_enabled),
            item("[←] prev", controls.previous_enabled),
            item("[→] next", controls.next_enabled),
            item("[End] last", controls.last_enabled),
            item("[-] zoom out", controls.zoom_out_enabled),
            item("[+] zoom in", controls.zoom_in_enabled),
            item(reading, true),
            item("[d] disconnect", true),
        ]);

        frame.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Controls ")),
            area,
        );
    }

    fn render_toasts(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

        let width = TOAST_WIDTH.min(area.width);
        let x = area.x + area.width - width;
        let mut y = area.y + 1;

        for toast in self.controller.notifier().toasts() {
            let notice = &toast.notice;
            let text_width = width.saturating_sub(2).max(1) as usize;
            let body_lines = notice.body().chars().count().div_ceil(text_width).clamp(1, 3);
            let height = body_lines as u16 + 2;
            if y + height > area.y + area.height {
                break;
            }

            let color = if notice.is_terminal() {
                Color::Red
            } else {
                Color::Green
            };
            let rect = Rect {
                x,
                y,
                width,
                height,
            };

            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(notice.body())
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(color))
                            .title(format!(" {} ", notice.title())),
                    ),
                rect,
            );
            y += height;
        }
    }

    fn render_confirmation_dialog(
        &self,
        frame: &mut Frame,
        area: Rect,
        confirmation: Confirmation,
    ) {
        use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

        let popup_area = self.centered_rect(50, 30, area);
        let (confirm, cancel) = confirmation.labels();
        let content = format!(
            "\n{}\n\n[y/Enter] {}   [n/Esc] {}",
            confirmation.body(),
            confirm,
            cancel
        );

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(content)
                .wrap(Wrap { trim: true })
                .centered()
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow))
                        .title(format!(" {} ", confirmation.title())),
                ),
            popup_area,
        );
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Clear, Paragraph};
        let help_text = self.keybinds.help_text();
        let popup_area = self.centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(help_text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help - Press ? to close "),
            ),
            popup_area,
        );
    }

    fn centered_rect(&self, percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = ratatui::layout::Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([
                ratatui::layout::Constraint::Percentage((100 - percent_y) / 2),
                ratatui::layout::Constraint::Percentage(percent_y),
                ratatui::layout::Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        ratatui::layout::Layout::default()
            .direction(ratatui::layout::Direction::Horizontal)
            .constraints([
                ratatui::layout::Constraint::Percentage((100 - percent_x) / 2),
                ratatui::layout::Constraint::Percentage(percent_x),
                ratatui::layout::Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
