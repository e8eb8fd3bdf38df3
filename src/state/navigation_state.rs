/// Current and previous tab. Only the store mutates this, once per route change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationSnapshot {
    pub current_tab: Option<String>,
    pub previous_tab: Option<String>,
}

impl NavigationSnapshot {
    pub(crate) fn shift_to(&mut self, tab: &str) {
        self.previous_tab = self.current_tab.take();
        self.current_tab = Some(tab.to_string());
    }
}
