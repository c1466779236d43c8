use super::*;

pub struct App {
    pub should_quit: bool,
    pub config: Config,
    pub controller: Controller<SocketTransport, NoticeBoard>,
    pub code_input: CodeInput,
    pub layout: LayoutState,
    pub keybinds: Keybinds,
    pub show_help: bool,
    pub config_api: ConfigApi,
    pub runtime: Handle,
    pub event_tx: Option<mpsc::UnboundedSender<ChannelEvent>>,
    pub event_rx: Option<mpsc::UnboundedReceiver<ChannelEvent>>,
    pub app_async_tx: Option<mpsc::UnboundedSender<AppAsyncEvent>>,
    pub app_async_rx: Option<mpsc::UnboundedReceiver<AppAsyncEvent>>,
    pub is_loading: bool,
    pub loading_message: String,
    pub heading_rows: Vec<HeadingRow>,
    pub last_error: Option<String>,
}

impl App {
    pub fn new(config: Config, runtime: Handle) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (app_async_tx, app_async_rx) = mpsc::unbounded_channel();

        let transport = SocketTransport::new(runtime.clone(), event_tx.clone());
        let notices = NoticeBoard::new(config.ui.notice_timeout());
        let controller = Controller::new(config.server.channel_config(), transport, notices);
        let config_api = ConfigApi::new(config.server.base_url.clone());

        Self {
            should_quit: false,
            config,
            controller,
            code_input: CodeInput::new(),
            layout: LayoutState::default(),
            keybinds: Keybinds,
            show_help: false,
            config_api,
            runtime,
            event_tx: Some(event_tx),
            event_rx: Some(event_rx),
            app_async_tx: Some(app_async_tx),
            app_async_rx: Some(app_async_rx),
            is_loading: false,
            loading_message: String::new(),
            heading_rows: Vec::new(),
            last_error: None,
        }
    }
}
