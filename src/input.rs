//! Keyboard input mapping for the feedback form

use crate::platform::SHORTCUT_MODIFIER;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Form section that currently receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFocus {
    #[default]
    Category,
    Text,
    Rating,
    Screenshot,
    Submit,
}

impl FormFocus {
    pub const ALL: [FormFocus; 5] = [
        FormFocus::Category,
        FormFocus::Text,
        FormFocus::Rating,
        FormFocus::Screenshot,
        FormFocus::Submit,
    ];

    pub fn next(&self) -> Self {
        match self {
            Self::Category => Self::Text,
            Self::Text => Self::Rating,
            Self::Rating => Self::Screenshot,
            Self::Screenshot => Self::Submit,
            Self::Submit => Self::Category,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Category => Self::Submit,
            Self::Text => Self::Category,
            Self::Rating => Self::Text,
            Self::Screenshot => Self::Rating,
            Self::Submit => Self::Screenshot,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Text => "Feedback",
            Self::Rating => "Rating",
            Self::Screenshot => "Screenshot",
            Self::Submit => "Submit",
        }
    }
}

/// Operation requested on the form controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    CycleCategory,
    CycleRating,
    InsertChar(char),
    Newline,
    Backspace,
    Capture,
    Retake,
    ClearScreenshot,
    TogglePreview,
    Submit,
    Cancel,
}

/// What a key press means for the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    NextField,
    PrevField,
    Action(FormAction),
}

/// Translate a key press in the given focus into an input event
pub fn map_key(focus: FormFocus, key: &KeyEvent) -> Option<InputEvent> {
    let shortcut = key.modifiers.contains(SHORTCUT_MODIFIER)
        || key.modifiers.contains(KeyModifiers::CONTROL);

    // Shortcuts work from anywhere
    match key.code {
        KeyCode::Tab => return Some(InputEvent::NextField),
        KeyCode::BackTab => return Some(InputEvent::PrevField),
        KeyCode::Esc => return Some(InputEvent::Action(FormAction::Cancel)),
        KeyCode::Char('s') if shortcut => return Some(InputEvent::Action(FormAction::Submit)),
        KeyCode::Char('p') if shortcut => return Some(InputEvent::Action(FormAction::Capture)),
        _ => {}
    }
    if shortcut {
        return None;
    }

    let action = match focus {
        FormFocus::Category => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                FormAction::CycleCategory
            }
            _ => return None,
        },
        FormFocus::Rating => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                FormAction::CycleRating
            }
            _ => return None,
        },
        FormFocus::Text => match key.code {
            KeyCode::Char(c) => FormAction::InsertChar(c),
            KeyCode::Backspace => FormAction::Backspace,
            KeyCode::Enter => FormAction::Newline,
            _ => return None,
        },
        FormFocus::Screenshot => match key.code {
            KeyCode::Enter | KeyCode::Char('c') => FormAction::Capture,
            KeyCode::Char('r') => FormAction::Retake,
            KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => {
                FormAction::ClearScreenshot
            }
            KeyCode::Char('v') | KeyCode::Char(' ') => FormAction::TogglePreview,
            _ => return None,
        },
        FormFocus::Submit => match key.code {
            KeyCode::Enter => FormAction::Submit,
            _ => return None,
        },
    };
    Some(InputEvent::Action(action))
}
