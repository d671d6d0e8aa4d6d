use chrono::NaiveTime;
use scoring::ScoreEngine;
use shared::{
    domain::{ModeKind, Player},
    protocol::{ActionCode, Dictionary},
};
use tracing::debug;

use crate::{
    menu::{GameMenu, GameMenuAction, MenuView},
    projection::{ClockFormat, DisplayProjection, ScoreboardLabels},
    sync::{ActionSink, FeedMirror},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
    Select,
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Button(Button),
    Inbound(Dictionary),
    Tick(NaiveTime),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Ended,
}

/// The single writer of what a session displays, fixed when it is built.
pub enum Mode {
    Standalone(ScoreEngine),
    Remote(FeedMirror),
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Standalone(_) => ModeKind::Standalone,
            Self::Remote(_) => ModeKind::Remote,
        }
    }
}

pub struct Session {
    mode: Mode,
    projection: DisplayProjection,
    menu: Option<GameMenu>,
    clock_format: ClockFormat,
}

impl Session {
    pub fn standalone() -> Self {
        let mut engine = ScoreEngine::new();
        engine.reset();
        let mut projection = DisplayProjection::new(ModeKind::Standalone);
        projection.refresh_from_state(engine.state());
        Self {
            mode: Mode::Standalone(engine),
            projection,
            menu: None,
            clock_format: ClockFormat::default(),
        }
    }

    pub fn remote(sink: impl ActionSink + 'static) -> Self {
        Self {
            mode: Mode::Remote(FeedMirror::new(sink)),
            projection: DisplayProjection::new(ModeKind::Remote),
            menu: None,
            clock_format: ClockFormat::default(),
        }
    }

    pub fn with_clock_format(mut self, clock_format: ClockFormat) -> Self {
        self.clock_format = clock_format;
        self
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn labels(&self) -> &ScoreboardLabels {
        self.projection.labels()
    }

    /// The open in-session menu, if any.
    pub fn menu_view(&self) -> Option<MenuView> {
        match (&self.mode, &self.menu) {
            (Mode::Standalone(engine), Some(menu)) => Some(menu.view(engine.can_undo())),
            _ => None,
        }
    }

    pub fn handle(&mut self, event: SessionEvent) -> SessionControl {
        match event {
            SessionEvent::Button(button) => return self.press(button),
            SessionEvent::Inbound(dict) => match &self.mode {
                Mode::Remote(feed) => {
                    let applied = feed.apply(&dict, &mut self.projection);
                    debug!(applied, "applied inbound fields");
                }
                Mode::Standalone(_) => debug!("standalone session ignores inbound message"),
            },
            SessionEvent::Tick(time) => self.projection.set_clock(self.clock_format.format(time)),
        }
        SessionControl::Continue
    }

    fn press(&mut self, button: Button) -> SessionControl {
        match &mut self.mode {
            Mode::Standalone(engine) => {
                if let Some(menu) = self.menu.as_mut() {
                    match menu.press(button, engine.can_undo()) {
                        GameMenuAction::Stay => {}
                        GameMenuAction::Close => self.menu = None,
                        GameMenuAction::Undo => {
                            engine.undo();
                            self.menu = None;
                            self.projection.refresh_from_state(engine.state());
                        }
                        GameMenuAction::EndGame => {
                            self.menu = None;
                            return SessionControl::Ended;
                        }
                    }
                    return SessionControl::Continue;
                }

                match button {
                    Button::Up | Button::Down => {
                        let player = if button == Button::Up {
                            Player::One
                        } else {
                            Player::Two
                        };
                        engine.add_point(player);
                        self.projection.refresh_from_state(engine.state());
                    }
                    Button::Select => self.menu = Some(GameMenu::new()),
                    Button::Back => return SessionControl::Ended,
                }
            }
            Mode::Remote(feed) => match button {
                Button::Up => feed.send(ActionCode::PointP1),
                Button::Down => feed.send(ActionCode::PointP2),
                Button::Select => feed.send(ActionCode::Undo),
                Button::Back => return SessionControl::Ended,
            },
        }
        SessionControl::Continue
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
