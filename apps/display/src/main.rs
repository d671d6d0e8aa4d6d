use anyhow::Result;
use clap::{Parser, ValueEnum};
use display_core::{
    run_session, select_mode, Button, ClockFormat, ControllerLink, Session, SessionEvent,
    SessionExit,
};
use shared::domain::ModeKind;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

mod terminal;

use terminal::TerminalRenderer;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Remote,
    Standalone,
}

impl From<ModeArg> for ModeKind {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Remote => ModeKind::Remote,
            ModeArg::Standalone => ModeKind::Standalone,
        }
    }
}

/// Tennis scoreboard. Buttons are read from stdin, one per line:
/// u = up, d = down, s = select, b = back.
#[derive(Parser, Debug)]
struct Args {
    /// Start the first session in this mode instead of showing the menu.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    #[arg(long, default_value = "ws://127.0.0.1:8470/ws")]
    controller_url: Url,
    #[arg(long)]
    clock_12h: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    let clock_format = if args.clock_12h {
        ClockFormat::TwelveHour
    } else {
        ClockFormat::TwentyFourHour
    };

    let (events_tx, mut events) = mpsc::unbounded_channel();
    // Only the stdin reader and an open controller link keep the queue alive.
    let link_events = events_tx.downgrade();
    tokio::spawn(read_buttons(events_tx));

    let mut renderer = TerminalRenderer::new(std::io::stdout());
    let mut preselected = args.mode.map(ModeKind::from);

    loop {
        let mode = match preselected.take() {
            Some(mode) => mode,
            None => match select_mode(&mut events, &mut renderer).await {
                Some(mode) => mode,
                None => break,
            },
        };

        let exit = match mode {
            ModeKind::Standalone => {
                let session = Session::standalone().with_clock_format(clock_format);
                run_session(session, &mut events, &mut renderer).await
            }
            ModeKind::Remote => {
                let Some(tx) = link_events.upgrade() else {
                    break;
                };
                let link = match ControllerLink::connect(&args.controller_url, tx).await {
                    Ok(link) => link,
                    Err(err) => {
                        error!(%err, "remote mode unavailable");
                        renderer.notice(&err.to_string());
                        continue;
                    }
                };
                let session = Session::remote(link.action_sink()).with_clock_format(clock_format);
                run_session(session, &mut events, &mut renderer).await
            }
        };

        if exit == SessionExit::InputClosed {
            break;
        }
    }

    info!("display exiting");
    Ok(())
}

async fn read_buttons(events: mpsc::UnboundedSender<SessionEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                warn!(%err, "stdin read failed");
                break;
            }
        };
        let Some(button) = parse_button(&line) else {
            warn!(input = %line.trim(), "unknown button; use u, d, s or b");
            continue;
        };
        if events.send(SessionEvent::Button(button)).is_err() {
            break;
        }
    }
}

fn parse_button(line: &str) -> Option<Button> {
    match line.trim().to_ascii_lowercase().as_str() {
        "u" | "up" => Some(Button::Up),
        "d" | "down" => Some(Button::Down),
        "s" | "select" => Some(Button::Select),
        "b" | "back" => Some(Button::Back),
        _ => None,
    }
}
