use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::atomic::Ordering, time::Duration};
use tokio::sync::mpsc;

use trashcam::api::ClassifierClient;
use trashcam::config::Config;
use trashcam::controller::{self, Effect};
use trashcam::handlers;
use trashcam::log_debug;
use trashcam::messages::Msg;
use trashcam::model::Model;
use trashcam::services::{spawn_api_service, ApiRequest, FeedStream, PredictionPoller};

mod ui;

use ui::icons::{IconMode, IconRenderer, IconTheme};

/// Terminal client for the waste classification camera
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to <tmp>/trashcam-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Backend base URL (overrides the config file)
    #[arg(short, long)]
    url: Option<String>,
}

pub struct App {
    pub model: Model,
    pub client: ClassifierClient,
    pub icon_renderer: IconRenderer,
    api_tx: mpsc::UnboundedSender<ApiRequest>,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
    poller: PredictionPoller<ClassifierClient>,
    feed: FeedStream,
    /// Set by the shutdown effect: the backend still has a stream open
    notify_backend_on_exit: bool,
}

impl App {
    fn new(config: &Config) -> Self {
        let client = ClassifierClient::new(config.base_url.clone(), config.request_timeout());
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();

        let api_tx = spawn_api_service(client.clone(), config.download_dir(), msg_tx.clone());
        let poller = PredictionPoller::new(client.clone(), msg_tx.clone());
        let feed = FeedStream::new(client.clone(), msg_tx);

        let icon_mode = IconMode::from_config(&config.icon_mode);

        Self {
            model: Model::new(),
            client,
            icon_renderer: IconRenderer::new(icon_mode, IconTheme::default()),
            api_tx,
            msg_rx,
            poller,
            feed,
            notify_backend_on_exit: false,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.feed.frame_count()
    }

    /// Run one message through the controller and perform its effects
    fn dispatch(&mut self, msg: Msg) {
        if !msg.is_completion() {
            log_debug(&format!("DEBUG [App]: {}", msg.name()));
        }
        let effects = controller::update(&mut self.model, msg);
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        log_debug(&format!("DEBUG [App]: effect {:?}", effect));
        match effect {
            Effect::OpenFeed => {
                let url = self.client.video_feed_url(Utc::now().timestamp_millis());
                self.model.ui.feed_url = Some(url.clone());
                self.feed.open(url);
            }
            Effect::CloseFeed => {
                self.feed.close();
                self.model.ui.feed_url = None;
            }
            Effect::StartPoller(token) => self.poller.start(token),
            Effect::StopPoller => self.poller.stop(),
            Effect::Api(request) => {
                if self.api_tx.send(request).is_err() {
                    log_debug("DEBUG [App]: API worker is gone, request dropped");
                }
            }
            Effect::Shutdown { notify_backend } => {
                self.poller.stop();
                self.feed.close();
                self.notify_backend_on_exit = notify_backend;
            }
        }
    }

    /// Best-effort stop notification, bounded by the grace period
    async fn teardown(&self, grace: Duration) {
        if !self.notify_backend_on_exit {
            return;
        }
        match tokio::time::timeout(grace, self.client.stop_camera()).await {
            Ok(Ok(())) => log_debug("DEBUG [App]: backend stopped at exit"),
            Ok(Err(e)) => log_debug(&format!("DEBUG [App]: stop at exit failed: {:#}", e)),
            Err(_) => log_debug("DEBUG [App]: stop at exit timed out"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set debug mode
    trashcam::DEBUG_MODE.store(args.debug, Ordering::Relaxed);

    if args.debug {
        log_debug("Debug mode enabled");
    }

    // Load configuration, then apply CLI overrides
    let mut config = Config::load(args.config)?;
    if let Some(url) = args.url {
        config.base_url = url;
    }

    if args.debug {
        log_debug(&format!("Config: {:?}", config));
    }

    let mut app = App::new(&config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    app.teardown(config.teardown_grace()).await;

    // Return result after cleanup
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        // Auto-dismiss toast after 1.5 seconds
        if app.model.ui.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit {
            break;
        }

        // Process completions from the poller, feed and API worker (non-blocking)
        while let Ok(msg) = app.msg_rx.try_recv() {
            app.dispatch(msg);
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(msg) = handlers::handle_key(&mut app.model, key) {
                        app.dispatch(msg);
                    }
                }
                Event::Paste(text) => {
                    if let Some(msg) = handlers::handle_paste(&mut app.model, &text) {
                        app.dispatch(msg);
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}
