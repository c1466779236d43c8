use super::*;

impl App {
    /// Starts the background `/configs` fetch when enabled. The locally
    /// configured endpoints stay in effect until it answers.
    pub fn init(&mut self) {
        if !self.config.server.fetch_remote_config {
            return;
        }

        self.is_loading = true;
        self.loading_message = "Fetching server configuration...".to_string();
        let api = self.config_api.clone();
        self.spawn_app_task(async move {
            match api.fetch_server_config().await {
                Ok(config) => AppAsyncEvent::ServerConfigLoaded {
                    config: Some(config),
                    error: None,
                },
                Err(e) => {
                    tracing::error!("Server config fetch failed: {}", e);
                    AppAsyncEvent::ServerConfigLoaded {
                        config: None,
                        error: Some(e.user_message().to_string()),
                    }
                }
            }
        });
    }

    /// One pass of background work: channel events, async results, notice
    /// expiry, then the code field catches up with controller state.
    pub fn tick(&mut self) {
        self.process_channel_events();
        self.controller.notifier_mut().expire(Instant::now());
        self.code_input
            .sync(self.controller.state().presentation_code.as_str());
    }

    pub fn process_channel_events(&mut self) {
        let mut channel_events = Vec::new();
        if let Some(ref mut rx) = self.event_rx {
            while let Ok(event) = rx.try_recv() {
                channel_events.push(event);
            }
        }

        for event in channel_events {
            self.controller.handle_event(event);
        }

        let mut async_events = Vec::new();
        if let Some(ref mut rx) = self.app_async_rx {
            while let Ok(event) = rx.try_recv() {
                async_events.push(event);
            }
        }

        for event in async_events {
            match event {
                AppAsyncEvent::ServerConfigLoaded { config, error } => {
                    self.is_loading = false;
                    self.loading_message.clear();
                    if let Some(err) = error {
                        self.report_error("Using local server settings", err);
                    } else if let Some(config) = config {
                        self.controller.set_server_config(config);
                        self.clear_error();
                    }
                }
            }
        }
    }
}
