//! Key to viewer-action bindings.
//!
//! Bindings come from the `controls.keybindings` table of `config.ron`
//! (action name -> key name). Actions missing from the table keep their
//! defaults; unknown action names and unparsable keys are logged and ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::events::Key;

/// Discrete viewer commands bound to keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewAction {
    /// Toggle orbit lines of the highlighted system.
    ToggleOrbits,
    /// Re-run the camera focus on the current selection.
    FocusSelected,
    /// Toggle orbital motion.
    TogglePause,
}

impl ViewAction {
    /// Every action, in default-binding order.
    pub const ALL: [ViewAction; 3] = [
        ViewAction::ToggleOrbits,
        ViewAction::FocusSelected,
        ViewAction::TogglePause,
    ];

    /// Name used in the config table.
    pub fn config_name(self) -> &'static str {
        match self {
            ViewAction::ToggleOrbits => "toggle_orbits",
            ViewAction::FocusSelected => "focus",
            ViewAction::TogglePause => "pause",
        }
    }

    /// Key bound when the config does not say otherwise.
    pub fn default_key(self) -> Key {
        match self {
            ViewAction::ToggleOrbits => Key::Char('O'),
            ViewAction::FocusSelected => Key::Char('F'),
            ViewAction::TogglePause => Key::Space,
        }
    }

    fn from_config_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.config_name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Resolved key -> action table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    map: HashMap<Key, ViewAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            map: ViewAction::ALL.into_iter().map(|a| (a.default_key(), a)).collect(),
        }
    }
}

impl KeyBindings {
    /// Build from a config table, starting from the defaults.
    ///
    /// A rebound action releases its default key.
    pub fn from_config(table: &HashMap<String, String>) -> Self {
        let mut bindings = Self::default();
        for (action_name, key_name) in table {
            let Some(action) = ViewAction::from_config_name(action_name) else {
                warn!(action = %action_name, "unknown action in keybindings, ignoring");
                continue;
            };
            let Some(key) = Key::parse(key_name) else {
                warn!(action = %action_name, key = %key_name, "unparsable key in keybindings, ignoring");
                continue;
            };
            bindings.bind(key, action);
        }
        bindings
    }

    /// Bind `key` to `action`, replacing whatever either was bound to.
    pub fn bind(&mut self, key: Key, action: ViewAction) {
        self.map.retain(|_, a| *a != action);
        self.map.insert(key, action);
    }

    /// Action for a pressed key, if any.
    pub fn resolve(&self, key: &Key) -> Option<ViewAction> {
        self.map.get(key).copied()
    }

    /// Key currently bound to `action`.
    pub fn key_for(&self, action: ViewAction) -> Option<Key> {
        self.map.iter().find(|(_, a)| **a == action).map(|(k, _)| *k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let b = KeyBindings::default();
        assert_eq!(b.resolve(&Key::Char('O')), Some(ViewAction::ToggleOrbits));
        assert_eq!(b.resolve(&Key::Char('F')), Some(ViewAction::FocusSelected));
        assert_eq!(b.resolve(&Key::Space), Some(ViewAction::TogglePause));
        assert_eq!(b.resolve(&Key::Char('X')), None);
    }

    #[test]
    fn test_config_rebinds_and_releases_default() {
        let mut table = HashMap::new();
        table.insert("pause".to_string(), "p".to_string());
        let b = KeyBindings::from_config(&table);
        assert_eq!(b.resolve(&Key::Char('P')), Some(ViewAction::TogglePause));
        assert_eq!(b.resolve(&Key::Space), None);
        assert_eq!(b.key_for(ViewAction::ToggleOrbits), Some(Key::Char('O')));
    }

    #[test]
    fn test_config_ignores_garbage() {
        let mut table = HashMap::new();
        table.insert("warp".to_string(), "W".to_string());
        table.insert("focus".to_string(), "ctrl+f".to_string());
        assert_eq!(KeyBindings::from_config(&table), KeyBindings::default());
    }

    #[test]
    fn test_binding_a_taken_key_steals_it() {
        let mut b = KeyBindings::default();
        b.bind(Key::Char('O'), ViewAction::FocusSelected);
        assert_eq!(b.resolve(&Key::Char('O')), Some(ViewAction::FocusSelected));
        assert_eq!(b.key_for(ViewAction::ToggleOrbits), None);
        assert_eq!(b.resolve(&Key::Char('F')), None);
    }
}
