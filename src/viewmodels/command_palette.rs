// ============================================================================
// COMMAND PALETTE - Fuzzy route launcher (Ctrl/Cmd+K)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use futures::FutureExt;
use crate::platform::{ActionBindings, ActionEvent, ViewTarget};
use crate::views::command_palette::render_palette;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Route the command navigates to.
    pub route: String,
    pub label: String,
}

impl Command {
    pub fn new(route: &str, label: &str) -> Self {
        Self {
            route: route.to_string(),
            label: label.to_string(),
        }
    }
}

/// Case-insensitive subsequence match. Higher is better: prefix matches beat
/// word-start matches, which beat scattered ones.
pub fn fuzzy_score(query: &str, text: &str) -> Option<i32> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Some(0);
    }
    let text = text.to_lowercase();
    if text.starts_with(&query) {
        return Some(1_000 - text.chars().count() as i32);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut score = 100;
    let mut position = 0usize;
    let mut previous: Option<usize> = None;

    for wanted in query.chars() {
        let found = (position..chars.len()).find(|&i| chars[i] == wanted)?;
        let word_start = found == 0 || matches!(chars[found - 1], ' ' | '-' | '_' | '/');
        if word_start {
            score += 10;
        }
        match previous {
            Some(prev) if found == prev + 1 => score += 8,
            Some(prev) => score -= 2 * (found - prev - 1) as i32,
            None => score -= found as i32,
        }
        previous = Some(found);
        position = found + 1;
    }
    Some(score)
}

/// Matching commands, best first. Ties keep their original order.
pub fn filter_commands<'a>(commands: &'a [Command], query: &str) -> Vec<&'a Command> {
    let mut scored: Vec<(i32, usize, &Command)> = commands
        .iter()
        .enumerate()
        .filter_map(|(index, command)| {
            let by_label = fuzzy_score(query, &command.label);
            let by_route = fuzzy_score(query, &command.route);
            by_label.max(by_route).map(|score| (score, index, command))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, _, command)| command).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKey {
    Toggle,
    Up,
    Down,
    Enter,
    Escape,
}

impl PaletteKey {
    /// Map a browser `KeyboardEvent.key` plus modifier state.
    pub fn from_key(key: &str, ctrl_or_meta: bool) -> Option<Self> {
        match key {
            "k" | "K" if ctrl_or_meta => Some(Self::Toggle),
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "Enter" => Some(Self::Enter),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteState {
    pub open: bool,
    pub query: String,
    pub selected: usize,
    pub commands: Vec<Command>,
}

impl PaletteState {
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            commands,
            ..Self::default()
        }
    }

    pub fn matches(&self) -> Vec<&Command> {
        filter_commands(&self.commands, &self.query)
    }

    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.selected = 0;
    }

    fn step(&mut self, forward: bool) {
        let count = self.matches().len();
        if count == 0 {
            self.selected = 0;
            return;
        }
        self.selected = if forward {
            (self.selected + 1) % count
        } else {
            (self.selected + count - 1) % count
        };
    }

    /// Apply a key. Returns the route to navigate to on `Enter`.
    pub fn apply(&mut self, key: PaletteKey) -> Option<String> {
        match key {
            PaletteKey::Toggle => {
                if self.open {
                    self.close();
                } else {
                    self.open();
                }
                None
            }
            _ if !self.open => None,
            PaletteKey::Down => {
                self.step(true);
                None
            }
            PaletteKey::Up => {
                self.step(false);
                None
            }
            PaletteKey::Escape => {
                self.close();
                None
            }
            PaletteKey::Enter => {
                let route = self.matches().get(self.selected).map(|c| c.route.clone());
                if route.is_some() {
                    self.close();
                }
                route
            }
        }
    }
}

pub type Navigate = Rc<dyn Fn(&str)>;

/// Palette state bound to its overlay container.
pub struct CommandPalette {
    state: RefCell<PaletteState>,
    view: Rc<dyn ViewTarget>,
    navigate: Navigate,
}

impl CommandPalette {
    pub fn new(commands: Vec<Command>, view: Rc<dyn ViewTarget>, navigate: Navigate) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(PaletteState::new(commands)),
            view,
            navigate,
        })
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    pub fn state(&self) -> PaletteState {
        self.state.borrow().clone()
    }

    /// Global keydown hook. `true` when the palette consumed the key.
    pub fn handle_key(self: &Rc<Self>, key: &str, ctrl_or_meta: bool) -> bool {
        let Some(key) = PaletteKey::from_key(key, ctrl_or_meta) else {
            return false;
        };
        if key != PaletteKey::Toggle && !self.is_open() {
            return false;
        }
        let target = self.state.borrow_mut().apply(key);
        self.render();
        if let Some(route) = target {
            log::info!("⌨️ [PALETTE] -> {}", route);
            (self.navigate)(&route);
        }
        true
    }

    pub fn set_query(self: &Rc<Self>, query: &str) {
        self.state.borrow_mut().set_query(query);
        self.render();
    }

    fn select(self: &Rc<Self>, route: &str) {
        self.state.borrow_mut().close();
        self.render();
        (self.navigate)(route);
    }

    pub fn render(self: &Rc<Self>) {
        let markup = {
            let state = self.state.borrow();
            render_palette(&state)
        };
        self.view.render(&markup.into_string());
        self.view.bind(self.bindings());
    }

    fn bindings(self: &Rc<Self>) -> ActionBindings {
        let on_input = self.clone();
        let on_select = self.clone();
        let on_close = self.clone();
        ActionBindings::new()
            .on("palette-input", move |event: ActionEvent| {
                on_input.set_query(event.field("query").unwrap_or(""));
                async {}.boxed_local()
            })
            .on("palette-select", move |event: ActionEvent| {
                if let Some(route) = event.target_id.as_deref() {
                    on_select.select(route);
                }
                async {}.boxed_local()
            })
            .on("palette-close", move |_| {
                on_close.state.borrow_mut().close();
                on_close.render();
                async {}.boxed_local()
            })
    }
}
