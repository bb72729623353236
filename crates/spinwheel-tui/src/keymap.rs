use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::action::Action;
use crate::config::KeybindingConfig;

/// A parsed key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyBinding {
    fn matches(&self, key: &KeyEvent) -> bool {
        if self.code != key.code {
            return false;
        }
        // Shift is implied by the character itself for printable keys
        let relevant = key.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT);
        match self.code {
            KeyCode::Char(_) => relevant == self.modifiers,
            _ => key.modifiers == self.modifiers,
        }
    }
}

/// Parse strings like "Ctrl+c", "Alt+s", "F1", "Space", "?" into a binding.
pub fn parse_key(spec: &str) -> Option<KeyBinding> {
    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = spec.split('+').collect();
    // "Ctrl++" binds the plus key
    if spec.ends_with("++") {
        parts.pop();
        parts.pop();
        parts.push("+");
    }
    let key = parts.pop()?.trim();

    for m in parts {
        match m.trim().to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match key.to_lowercase().as_str() {
        "space" => KeyCode::Char(' '),
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        lower if lower.len() > 1 && lower.starts_with('f') => {
            KeyCode::F(lower[1..].parse().ok()?)
        }
        _ => {
            let mut chars = key.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };

    Some(KeyBinding { modifiers, code })
}

/// Global key bindings resolved from config.
pub struct Keymap {
    bindings: Vec<(&'static str, KeyBinding, Action)>,
    labels: Vec<(&'static str, String)>,
}

impl Keymap {
    pub fn from_config(config: &KeybindingConfig) -> Self {
        let defaults = KeybindingConfig::default();
        let entries: [(&'static str, &str, &str, Action); 5] = [
            ("spin", &config.spin, &defaults.spin, Action::Spin),
            ("quit", &config.quit, &defaults.quit, Action::Quit),
            (
                "force_quit",
                &config.force_quit,
                &defaults.force_quit,
                Action::Quit,
            ),
            (
                "toggle_log_panel",
                &config.toggle_log_panel,
                &defaults.toggle_log_panel,
                Action::ToggleLogPanel,
            ),
            (
                "show_help",
                &config.show_help,
                &defaults.show_help,
                Action::ShowHelp,
            ),
        ];

        let mut bindings = Vec::new();
        let mut labels = Vec::new();
        for (name, wanted, fallback, action) in entries {
            let (binding, label) = match parse_key(wanted) {
                Some(binding) => (binding, wanted.to_string()),
                None => {
                    warn!("Invalid key '{}' for {}, using '{}'", wanted, name, fallback);
                    let binding = parse_key(fallback).unwrap_or(KeyBinding {
                        modifiers: KeyModifiers::NONE,
                        code: KeyCode::Null,
                    });
                    (binding, fallback.to_string())
                }
            };
            bindings.push((name, binding, action));
            labels.push((name, label));
        }

        Self { bindings, labels }
    }

    /// Resolve a key event to an action. Unbound keys map to `Action::None`.
    pub fn resolve(&self, key: &KeyEvent) -> Action {
        self.bindings
            .iter()
            .find(|(_, binding, _)| binding.matches(key))
            .map(|(_, _, action)| action.clone())
            .unwrap_or(Action::None)
    }

    /// Display label for a named binding, for hints and help.
    pub fn hint(&self, name: &str) -> &str {
        self.labels
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, label)| label.as_str())
            .unwrap_or("?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn keymap() -> Keymap {
        Keymap::from_config(&KeybindingConfig::default())
    }

    #[test]
    fn test_parse_key_variants() {
        assert_eq!(
            parse_key("Ctrl+c"),
            Some(KeyBinding {
                modifiers: KeyModifiers::CONTROL,
                code: KeyCode::Char('c')
            })
        );
        assert_eq!(parse_key("F5").unwrap().code, KeyCode::F(5));
        assert_eq!(parse_key("Space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(parse_key("Enter").unwrap().code, KeyCode::Enter);
        assert_eq!(parse_key("?").unwrap().code, KeyCode::Char('?'));
        assert_eq!(
            parse_key("Ctrl++"),
            Some(KeyBinding {
                modifiers: KeyModifiers::CONTROL,
                code: KeyCode::Char('+')
            })
        );
        assert_eq!(parse_key("Hyper+x"), None);
        assert_eq!(parse_key("word"), None);
    }

    #[test]
    fn test_default_bindings() {
        let keymap = keymap();
        assert!(matches!(keymap.resolve(&key(KeyCode::Char(' '))), Action::Spin));
        assert!(matches!(keymap.resolve(&key(KeyCode::Char('q'))), Action::Quit));
        assert!(matches!(keymap.resolve(&ctrl(KeyCode::Char('c'))), Action::Quit));
        assert!(matches!(
            keymap.resolve(&key(KeyCode::Char('l'))),
            Action::ToggleLogPanel
        ));
        assert!(matches!(keymap.resolve(&key(KeyCode::Char('x'))), Action::None));
    }

    #[test]
    fn test_shifted_character_binding() {
        let keymap = keymap();
        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert!(matches!(keymap.resolve(&question), Action::ShowHelp));
    }

    #[test]
    fn test_ctrl_does_not_match_plain_binding() {
        let keymap = keymap();
        assert!(matches!(keymap.resolve(&ctrl(KeyCode::Char('q'))), Action::None));
    }

    #[test]
    fn test_custom_binding_and_hint() {
        let config = KeybindingConfig {
            spin: "Enter".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert!(matches!(keymap.resolve(&key(KeyCode::Enter)), Action::Spin));
        assert!(matches!(keymap.resolve(&key(KeyCode::Char(' '))), Action::None));
        assert_eq!(keymap.hint("spin"), "Enter");
    }

    #[test]
    fn test_invalid_binding_falls_back() {
        let config = KeybindingConfig {
            quit: "Super+q".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert!(matches!(keymap.resolve(&key(KeyCode::Char('q'))), Action::Quit));
        assert_eq!(keymap.hint("quit"), "q");
    }
}
