use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{AccountAction, GlobalAction, MarketAction, NavAction, SearchAction};
use crate::config::keybindings::KeybindingsConfig;

/// Resolves key events to actions against the active keybinding config.
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.matches(event),
            GlobalAction::Help => kb.help.matches(event),
            GlobalAction::Theme => kb.theme.matches(event),
            GlobalAction::Back => kb.back.matches(event),
            GlobalAction::Account => kb.account.matches(event),
        }
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.display(),
            GlobalAction::Help => kb.help.display(),
            GlobalAction::Theme => kb.theme.display(),
            GlobalAction::Back => kb.back.display(),
            GlobalAction::Account => kb.account.display(),
        }
    }

    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => kb.up.matches(event),
            NavAction::Down => kb.down.matches(event),
            NavAction::PageUp => kb.page_up.matches(event),
            NavAction::PageDown => kb.page_down.matches(event),
            NavAction::Home => kb.home.matches(event),
            NavAction::End => kb.end.matches(event),
            NavAction::Select => kb.select.matches(event),
        }
    }

    pub fn display_nav(&self, action: NavAction) -> String {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => kb.up.display(),
            NavAction::Down => kb.down.display(),
            NavAction::PageUp => kb.page_up.display(),
            NavAction::PageDown => kb.page_down.display(),
            NavAction::Home => kb.home.display(),
            NavAction::End => kb.end.display(),
            NavAction::Select => kb.select.display(),
        }
    }

    pub fn matches_search(&self, event: &KeyEvent, action: SearchAction) -> bool {
        let kb = &self.keybindings.search;
        match action {
            SearchAction::Toggle => kb.toggle.matches(event),
            SearchAction::Exit => kb.exit.matches(event),
        }
    }

    pub fn matches_market(&self, event: &KeyEvent, action: MarketAction) -> bool {
        let kb = &self.keybindings.market;
        match action {
            MarketAction::Reload => kb.reload.matches(event),
            MarketAction::CopyPhone => kb.copy_phone.matches(event),
        }
    }

    pub fn display_market(&self, action: MarketAction) -> String {
        let kb = &self.keybindings.market;
        match action {
            MarketAction::Reload => kb.reload.display(),
            MarketAction::CopyPhone => kb.copy_phone.display(),
        }
    }

    pub fn matches_account(&self, event: &KeyEvent, action: AccountAction) -> bool {
        let kb = &self.keybindings.account;
        match action {
            AccountAction::SwitchTab => kb.switch_tab.matches(event),
            AccountAction::NextField => kb.next_field.matches(event),
            AccountAction::PrevField => kb.prev_field.matches(event),
            AccountAction::Submit => kb.submit.matches(event),
        }
    }

    pub fn display_account(&self, action: AccountAction) -> String {
        let kb = &self.keybindings.account;
        match action {
            AccountAction::SwitchTab => kb.switch_tab.display(),
            AccountAction::NextField => kb.next_field.display(),
            AccountAction::PrevField => kb.prev_field.display(),
            AccountAction::Submit => kb.submit.display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn resolver() -> KeyResolver {
        KeyResolver::new(Arc::new(KeybindingsConfig::default()))
    }

    #[test]
    fn test_default_global_bindings() {
        let resolver = resolver();
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(resolver.matches_global(&quit, GlobalAction::Quit));
        assert!(!resolver.matches_global(&quit, GlobalAction::Help));
    }

    #[test]
    fn test_nav_accepts_arrows_and_vim_keys() {
        let resolver = resolver();
        for event in [
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE),
        ] {
            assert!(resolver.matches_nav(&event, NavAction::Down));
        }
    }
}
