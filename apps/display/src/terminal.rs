use std::io::Write;

use display_core::{menu::MenuView, Renderer, ScoreboardLabels};
use shared::domain::Player;
use tracing::warn;

const SERVE_MARK: &str = "*";

/// Draws the scoreboard and menus as text frames.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn notice(&mut self, message: &str) {
        self.write_frame(&format!("! {message}\n"));
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, frame: &str) {
        let result = self
            .out
            .write_all(frame.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(err) = result {
            warn!(%err, "failed to draw frame");
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, labels: &ScoreboardLabels) {
        let mark = |player: Player| {
            if labels.serve_marker == player {
                SERVE_MARK
            } else {
                " "
            }
        };
        let mut frame = format!("{:<28}{:>6}\n", labels.status, labels.clock);
        frame.push_str(&format!(
            "   {:>3} {} | {:>3} {}\n",
            labels.scores[0],
            mark(Player::One),
            labels.scores[1],
            mark(Player::Two)
        ));
        for slot in 0..2 {
            frame.push_str(&format!(
                "{:<22}{:>6}{:>6}\n",
                labels.names[slot], labels.games[slot], labels.sets[slot]
            ));
        }
        frame.push('\n');
        self.write_frame(&frame);
    }

    fn render_menu(&mut self, menu: &MenuView) {
        let mut frame = String::new();
        for (index, item) in menu.items.iter().enumerate() {
            let cursor = if index == menu.highlighted { ">" } else { " " };
            let title = if item.enabled {
                item.title.to_string()
            } else {
                format!("({})", item.title)
            };
            frame.push_str(&format!("{cursor} {title}"));
            if let Some(subtitle) = item.subtitle {
                frame.push_str(&format!("  - {subtitle}"));
            }
            frame.push('\n');
        }
        frame.push('\n');
        self.write_frame(&frame);
    }

    fn pulse(&mut self) {
        self.write_frame("\x07");
    }
}
