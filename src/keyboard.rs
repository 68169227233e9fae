use crate::navigator::{HistoryMode, NavigatorView, SectionNavigator};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Next,
    Previous,
    Cancel,
}

impl KeyCommand {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(KeyCommand::Next),
            "ArrowLeft" => Some(KeyCommand::Previous),
            "Escape" => Some(KeyCommand::Cancel),
            _ => None,
        }
    }

    pub fn apply<V: NavigatorView>(self, navigator: &mut SectionNavigator<V>) {
        match self {
            KeyCommand::Next => navigator.navigate_next(),
            KeyCommand::Previous => navigator.navigate_previous(),
            KeyCommand::Cancel => navigator.reset(HistoryMode::Push),
        }
    }
}

/// Runs the command bound to `key`. Returns `true` when the key was handled and
/// its default browser action should be suppressed.
pub fn dispatch_key<V: NavigatorView>(key: &str, navigator: &mut SectionNavigator<V>) -> bool {
    match KeyCommand::from_key(key) {
        Some(command) => {
            command.apply(navigator);
            true
        }
        None => false,
    }
}
