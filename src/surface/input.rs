use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Navigation intent decoded from host input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRequest {
    /// Back gesture: pop the top screen unless a listener intercepts.
    Back,
    /// Close the surface regardless of pop listeners.
    Finish,
}

type Binding = (KeyCode, KeyModifiers);

/// Key bindings that translate terminal input into [`NavigationRequest`]s.
#[derive(Debug, Clone)]
pub struct NavigationKeymap {
    back: Vec<Binding>,
    finish: Vec<Binding>,
}

impl Default for NavigationKeymap {
    fn default() -> Self {
        Self {
            back: vec![
                (KeyCode::Esc, KeyModifiers::NONE),
                (KeyCode::Backspace, KeyModifiers::NONE),
                (KeyCode::Left, KeyModifiers::ALT),
            ],
            finish: vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)],
        }
    }
}

impl NavigationKeymap {
    /// A keymap with no bindings at all.
    pub fn empty() -> Self {
        Self {
            back: Vec::new(),
            finish: Vec::new(),
        }
    }

    pub fn bind_back(mut self, code: KeyCode, modifiers: KeyModifiers) -> Self {
        self.back.push((code, modifiers));
        self
    }

    pub fn bind_finish(mut self, code: KeyCode, modifiers: KeyModifiers) -> Self {
        self.finish.push((code, modifiers));
        self
    }

    pub fn resolve(&self, event: &Event) -> Option<NavigationRequest> {
        match event {
            Event::Key(key) => self.resolve_key(key),
            _ => None,
        }
    }

    pub fn resolve_key(&self, key: &KeyEvent) -> Option<NavigationRequest> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let binding = (key.code, key.modifiers);
        if self.finish.contains(&binding) {
            Some(NavigationRequest::Finish)
        } else if self.back.contains(&binding) {
            Some(NavigationRequest::Back)
        } else {
            None
        }
    }
}
