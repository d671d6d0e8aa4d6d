use shared::domain::ModeKind;

use crate::session::Button;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemView {
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub items: Vec<MenuItemView>,
    pub highlighted: usize,
}

fn move_highlight(highlighted: usize, button: Button, len: usize) -> usize {
    match button {
        Button::Up => highlighted.saturating_sub(1),
        Button::Down => (highlighted + 1).min(len.saturating_sub(1)),
        Button::Select | Button::Back => highlighted,
    }
}

const MODE_ITEMS: [(ModeKind, &str); 2] = [
    (ModeKind::Remote, "Remote Mode"),
    (ModeKind::Standalone, "Standalone Mode"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSelection {
    Pending,
    Selected(ModeKind),
    Exit,
}

/// Chooses the mode a new session starts in.
#[derive(Debug, Clone, Default)]
pub struct ModeSelectMenu {
    highlighted: usize,
}

impl ModeSelectMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) -> ModeSelection {
        match button {
            Button::Select => ModeSelection::Selected(MODE_ITEMS[self.highlighted].0),
            Button::Back => ModeSelection::Exit,
            Button::Up | Button::Down => {
                self.highlighted = move_highlight(self.highlighted, button, MODE_ITEMS.len());
                ModeSelection::Pending
            }
        }
    }

    pub fn view(&self) -> MenuView {
        MenuView {
            items: MODE_ITEMS
                .iter()
                .map(|&(_, title)| MenuItemView {
                    title,
                    subtitle: None,
                    enabled: true,
                })
                .collect(),
            highlighted: self.highlighted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMenuAction {
    Stay,
    Close,
    Undo,
    EndGame,
}

const UNDO_INDEX: usize = 0;
const END_GAME_INDEX: usize = 1;
const GAME_MENU_LEN: usize = 2;

/// In-session menu of a standalone match.
#[derive(Debug, Clone, Default)]
pub struct GameMenu {
    highlighted: usize,
}

impl GameMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button, can_undo: bool) -> GameMenuAction {
        match button {
            Button::Back => GameMenuAction::Close,
            Button::Select => match self.highlighted {
                UNDO_INDEX if can_undo => GameMenuAction::Undo,
                END_GAME_INDEX => GameMenuAction::EndGame,
                _ => GameMenuAction::Stay,
            },
            Button::Up | Button::Down => {
                self.highlighted = move_highlight(self.highlighted, button, GAME_MENU_LEN);
                GameMenuAction::Stay
            }
        }
    }

    pub fn view(&self, can_undo: bool) -> MenuView {
        MenuView {
            items: vec![
                MenuItemView {
                    title: "Undo",
                    subtitle: Some("Revert last point"),
                    enabled: can_undo,
                },
                MenuItemView {
                    title: "End Game",
                    subtitle: None,
                    enabled: true,
                },
            ],
            highlighted: self.highlighted,
        }
    }
}
