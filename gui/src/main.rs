mod args;
mod messages;
mod styles;
mod update;
mod views;

use std::sync::Arc;

use clap::Parser;
use iced::theme::Palette;
use iced::{Color, Element, Task, Theme};
use tracing_subscriber::EnvFilter;

use qari_staking_core::config::DashboardConfig;
use qari_staking_core::{Dashboard, StakingService};

use args::GuiArgs;
use messages::Message;

// Dark palette
const BG:      Color = Color::from_rgb(0.051, 0.067, 0.090); // #0d1117
const SURFACE: Color = Color::from_rgb(0.114, 0.157, 0.227); // #1d283a
const BORDER:  Color = Color::from_rgb(0.204, 0.259, 0.337); // #344256
const ACTIVE:  Color = Color::from_rgb(0.086, 0.137, 0.251); // #162340
const MUTED:   Color = Color::from_rgb(0.396, 0.459, 0.545); // #65758b
const PRIMARY: Color = Color::from_rgb(0.953, 0.729, 0.184); // #f3ba2f

fn main() -> iced::Result {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = GuiArgs::parse();

    iced::application(move || App::new(&args), App::update, App::view)
        .title("QARI Staking")
        .theme(App::theme)
        .run()
}

// -- App state --

struct App {
    dashboard: Dashboard,
    service: Arc<StakingService>,
    config: DashboardConfig,
    clipboard: Option<arboard::Clipboard>,

    // Startup problems (bad config, bad provider URL) shown above the card
    setup_error: Option<String>,
    status_message: Option<String>,

    // Cached theme (avoids re-allocating every frame)
    theme: Theme,
}

impl App {
    fn new(args: &GuiArgs) -> (Self, Task<Message>) {
        let mut setup_error = None;

        let config = match args.resolve_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "failed to load config");
                setup_error = Some(format!("{e:#}"));
                DashboardConfig::default()
            }
        };
        let service = match StakingService::from_config(&config, args.simulate, args.insecure) {
            Ok(service) => service,
            Err(e) => {
                tracing::error!(error = %e, "failed to set up wallet provider");
                setup_error = Some(e.to_string());
                StakingService::new(None, qari_staking_core::StakingContract::new(config.contract_address))
            }
        };

        let app = Self {
            dashboard: Dashboard::new(config.decimals).with_referral(args.referral()),
            service: Arc::new(service),
            config,
            clipboard: arboard::Clipboard::new().ok(),
            setup_error,
            status_message: None,
            theme: Theme::custom(
                "QARI".to_string(),
                Palette {
                    background: BG,
                    text: Color::from_rgb(0.988, 0.988, 0.988),
                    primary: PRIMARY,
                    success: Color::from_rgb(0.059, 0.757, 0.718),
                    warning: Color::from_rgb(1.0, 0.757, 0.027),
                    danger: Color::from_rgb(0.906, 0.192, 0.192),
                },
            ),
        };
        (app, Task::none())
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn view(&self) -> Element<'_, Message> {
        self.view_dashboard()
    }
}
