use std::path::PathBuf;

use clap::{Parser, Subcommand};
use schedule_viewer::api::{Backend, HttpBackend, ScheduleType};
use schedule_viewer::config::Config;
use schedule_viewer::controller::{Endpoint, SearchForm, ViewController};
use schedule_viewer::i18n::Locale;
use schedule_viewer::render::{self, RenderStyle};
use schedule_viewer::view::ServerClock;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

type Error = Box<dyn std::error::Error + Send + Sync>;

/// Tournament schedule viewer
///
/// Loads tournaments and clubs from the schedule backend and renders a club's schedule as HTML.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Backend base URL [env: SCHEDULE_API_BASE_URL]
    #[arg(long)]
    base_url: Option<String>,

    /// Label language [env: SCHEDULE_LOCALE]
    #[arg(long)]
    locale: Option<Locale>,

    /// How many active tournaments to list [env: SCHEDULE_MAX_ACTIVE]
    #[arg(long)]
    max_active: Option<usize>,

    /// Day section style [env: SCHEDULE_RENDER_STYLE]
    #[arg(long)]
    style: Option<RenderStyle>,

    /// Do not load or show the club selector
    #[arg(long)]
    no_clubs: bool,

    /// Write the HTML here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load reference data and print the page
    Page {
        /// Show archived tournaments
        #[arg(long)]
        archived: bool,
    },
    /// Load reference data, run one search and print the page
    Search {
        #[arg(long)]
        event_id: String,

        #[arg(long)]
        club_id: Option<String>,

        #[arg(default_value_t = ScheduleType::Planned, long, value_enum)]
        schedule_type: ScheduleType,

        #[arg(default_value_t = Endpoint::Query, long, value_enum)]
        endpoint: Endpoint,

        /// Day sections to expand
        #[arg(long)]
        expand: Vec<String>,

        /// Print only the schedule container
        #[arg(long)]
        fragment: bool,
    },
    /// Print the tournament selector options
    Tournaments {
        #[arg(long)]
        archived: bool,
    },
    /// Print the club selector options
    Clubs,
    /// Print the server time line
    ServerTime,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("SCHEDULE_LOG_JSON").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr);
    // HTML goes to stdout, so logs must stay on stderr.
    let _ = if json { builder.json().with_current_span(false).try_init() } else { builder.try_init() };
}

fn config_from(args: &Args) -> Result<Config, Error> {
    let mut config = Config::from_env()?;
    if let Some(url) = &args.base_url {
        config.api_base_url = url.clone();
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if let Some(max) = args.max_active {
        if max == 0 {
            return Err("--max-active must be at least 1".into());
        }
        config.max_active_tournaments = max;
    }
    if let Some(style) = args.style {
        config.render_style = style;
    }
    if args.no_clubs {
        config.load_clubs = false;
    }
    Ok(config)
}

fn emit(args: &Args, html: &str) -> Result<(), Error> {
    match &args.output {
        Some(path) => {
            std::fs::write(path, html)?;
            info!(path = %path.display(), bytes = html.len(), "Wrote HTML");
        }
        None => println!("{}", html),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    let args = Args::parse();
    let config = config_from(&args)?;
    config.locale.activate();
    let backend = HttpBackend::new(&config.api_base_url)?;
    info!(base_url = %backend.base_url(), locale = ?config.locale, "Starting schedule viewer");

    match &args.command {
        Command::Page { archived } => {
            let mut controller = ViewController::new(backend, config);
            controller.load_reference_data().await;
            controller.toggle_tournament_scope(*archived);
            emit(&args, &controller.render_page())
        }
        Command::Search { event_id, club_id, schedule_type, endpoint, expand, fragment } => {
            let mut controller = ViewController::new(backend, config);
            controller.load_reference_data().await;
            let form = SearchForm {
                event_id: event_id.clone(),
                club_id: club_id.clone(),
                schedule_type: *schedule_type,
                endpoint: *endpoint,
            };
            controller.submit_search(&form, chrono::Utc::now()).await;
            for day in expand {
                if controller.toggle_collapse(day).is_none() {
                    error!(day = %day, "No such day section to expand");
                }
            }
            if *fragment {
                let html = match controller.display().error_message() {
                    Some(msg) => render::inline_error(msg),
                    None => controller.render_results().unwrap_or_default(),
                };
                emit(&args, &html)
            } else {
                emit(&args, &controller.render_page())
            }
        }
        Command::Tournaments { archived } => {
            let mut controller = ViewController::new(backend, config);
            controller.load_reference_data().await;
            controller.toggle_tournament_scope(*archived);
            let html = controller.tournament_select().options_html.clone();
            emit(&args, &html)
        }
        Command::Clubs => {
            let labels = config.locale.labels();
            let html = match tokio::task::spawn_blocking(move || backend.clubs()).await {
                Ok(Ok(clubs)) => render::club_options(&clubs),
                Ok(Err(e)) => {
                    error!(error = %e, "Error fetching clubs");
                    render::error_option(&labels)
                }
                Err(e) => {
                    error!(error = %e, "Club task failed");
                    render::error_option(&labels)
                }
            };
            emit(&args, &html)
        }
        Command::ServerTime => {
            let labels = config.locale.labels();
            let clock = match tokio::task::spawn_blocking(move || backend.server_time()).await {
                Ok(Ok(time)) => ServerClock::Known(time),
                Ok(Err(e)) => {
                    error!(error = %e, "Error fetching server time");
                    ServerClock::Unavailable
                }
                Err(e) => {
                    error!(error = %e, "Server time task failed");
                    ServerClock::Unavailable
                }
            };
            emit(&args, &render::server_time_line(&clock, &labels))
        }
    }
}
