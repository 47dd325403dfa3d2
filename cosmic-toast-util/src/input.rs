//! Discrete user input delivered to the dismissal race.

use crate::outcome::DismissOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Character(char),
    Delete,
    Escape,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputEvent {
    ButtonPressed(PointerButton),
    KeyPressed(Key),
}

impl InputEvent {
    /// Outcome this event settles the popup with, if any.
    ///
    /// The primary button, `q` and Delete reject the notification; the
    /// secondary button accepts it. Everything else is ignored.
    pub fn outcome(&self) -> Option<DismissOutcome> {
        match self {
            InputEvent::ButtonPressed(PointerButton::Primary)
            | InputEvent::KeyPressed(Key::Character('q'))
            | InputEvent::KeyPressed(Key::Delete) => Some(DismissOutcome::UserCancelled),
            InputEvent::ButtonPressed(PointerButton::Secondary) => {
                Some(DismissOutcome::UserDismissed)
            }
            _ => None,
        }
    }
}
