use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::config::key::{Key, KeyBinding};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub help: KeyBinding,
    pub theme: KeyBinding,
    pub back: KeyBinding,
    pub account: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationKeybindings {
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub page_up: KeyBinding,
    pub page_down: KeyBinding,
    pub home: KeyBinding,
    pub end: KeyBinding,
    pub select: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchKeybindings {
    pub toggle: KeyBinding,
    pub exit: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketKeybindings {
    pub reload: KeyBinding,
    pub copy_phone: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountKeybindings {
    pub switch_tab: KeyBinding,
    pub next_field: KeyBinding,
    pub prev_field: KeyBinding,
    pub submit: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeybindingsConfig {
    #[serde(default)]
    pub global: GlobalKeybindings,
    #[serde(default)]
    pub navigation: NavigationKeybindings,
    #[serde(default)]
    pub search: SearchKeybindings,
    #[serde(default)]
    pub market: MarketKeybindings,
    #[serde(default)]
    pub account: AccountKeybindings,
}

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::new(KeyCode::Char('q')).into(),
            help: Key::new(KeyCode::Char('?')).into(),
            theme: Key::new(KeyCode::Char('t')).into(),
            back: Key::new(KeyCode::Esc).into(),
            account: Key::new(KeyCode::Char('a')).into(),
        }
    }
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: KeyBinding::multiple(vec![Key::new(KeyCode::Char('k')), Key::new(KeyCode::Up)]),
            down: KeyBinding::multiple(vec![Key::new(KeyCode::Char('j')), Key::new(KeyCode::Down)]),
            page_up: Key::new(KeyCode::PageUp).into(),
            page_down: Key::new(KeyCode::PageDown).into(),
            home: KeyBinding::multiple(vec![Key::new(KeyCode::Char('g')), Key::new(KeyCode::Home)]),
            end: KeyBinding::multiple(vec![Key::new(KeyCode::Char('G')), Key::new(KeyCode::End)]),
            select: Key::new(KeyCode::Enter).into(),
        }
    }
}

impl Default for SearchKeybindings {
    fn default() -> Self {
        Self {
            toggle: Key::new(KeyCode::Char('/')).into(),
            exit: Key::new(KeyCode::Esc).into(),
        }
    }
}

impl Default for MarketKeybindings {
    fn default() -> Self {
        Self {
            reload: Key::new(KeyCode::Char('r')).into(),
            copy_phone: Key::new(KeyCode::Char('y')).into(),
        }
    }
}

impl Default for AccountKeybindings {
    fn default() -> Self {
        Self {
            switch_tab: Key::new(KeyCode::Tab).into(),
            next_field: Key::new(KeyCode::Down).into(),
            prev_field: KeyBinding::multiple(vec![
                Key::new(KeyCode::Up),
                Key::new(KeyCode::BackTab),
            ]),
            submit: Key::new(KeyCode::Enter).into(),
        }
    }
}
