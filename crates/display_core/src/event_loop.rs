use std::time::Duration;

use chrono::{Local, Timelike};
use shared::domain::ModeKind;
use tokio::{
    sync::mpsc,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::info;

use crate::{
    menu::{ModeSelectMenu, ModeSelection},
    projection::Renderer,
    session::{Session, SessionControl, SessionEvent},
};

const MINUTE: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    /// The player ended the game; the caller returns to mode selection.
    Ended,
    InputClosed,
}

/// Runs the mode selection menu until a mode is picked. `None` means the
/// user backed out or input closed.
pub async fn select_mode<R>(
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
    renderer: &mut R,
) -> Option<ModeKind>
where
    R: Renderer + ?Sized,
{
    let mut menu = ModeSelectMenu::new();
    renderer.render_menu(&menu.view());

    while let Some(event) = events.recv().await {
        let SessionEvent::Button(button) = event else {
            continue;
        };
        renderer.pulse();
        match menu.press(button) {
            ModeSelection::Pending => renderer.render_menu(&menu.view()),
            ModeSelection::Selected(mode) => {
                info!(?mode, "mode selected");
                return Some(mode);
            }
            ModeSelection::Exit => return None,
        }
    }
    None
}

/// Dispatches session events and minute ticks one at a time, each to
/// completion, until the session ends. Dropping the tick interval on return
/// stops clock delivery for the torn-down session.
pub async fn run_session<R>(
    mut session: Session,
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
    renderer: &mut R,
) -> SessionExit
where
    R: Renderer + ?Sized,
{
    info!(mode = ?session.mode().kind(), "session started");
    session.handle(SessionEvent::Tick(Local::now().time()));
    draw(&session, renderer);

    let mut ticks = minute_ticks();
    loop {
        let event = tokio::select! {
            event = events.recv() => match event {
                Some(event) => event,
                None => {
                    info!("session input closed");
                    return SessionExit::InputClosed;
                }
            },
            _ = ticks.tick() => SessionEvent::Tick(Local::now().time()),
        };

        let pressed = matches!(event, SessionEvent::Button(_));
        let control = session.handle(event);
        if pressed {
            renderer.pulse();
        }
        if control == SessionControl::Ended {
            info!(mode = ?session.mode().kind(), "session ended");
            return SessionExit::Ended;
        }
        draw(&session, renderer);
    }
}

fn draw<R>(session: &Session, renderer: &mut R)
where
    R: Renderer + ?Sized,
{
    match session.menu_view() {
        Some(menu) => renderer.render_menu(&menu),
        None => renderer.render(session.labels()),
    }
}

fn minute_ticks() -> Interval {
    let until_next_minute = MINUTE.as_secs() - u64::from(Local::now().second() % 60);
    let mut ticks = interval_at(
        Instant::now() + Duration::from_secs(until_next_minute),
        MINUTE,
    );
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticks
}

#[cfg(test)]
#[path = "tests/event_loop_tests.rs"]
mod tests;
