//! Sidebar state: the three filter selectors and the save toggle.

use crossterm::event::{KeyCode, KeyEvent};

use crate::filter::{FilterField, FilterSelections, Selection};

/// Focus row in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarFocus {
    Selector(usize),
    SaveCharts,
}

impl Default for SidebarFocus {
    fn default() -> Self {
        Self::Selector(0)
    }
}

impl SidebarFocus {
    const ORDER: [Self; 4] = [
        Self::Selector(0),
        Self::Selector(1),
        Self::Selector(2),
        Self::SaveCharts,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Outcome of a key press in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    /// A selection or the toggle changed; the dashboard must re-render.
    Changed,
    /// Only the focus moved.
    Moved,
    Ignored,
}

/// One selector: its choices (`All` first) and the selected index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub field: FilterField,
    pub options: Vec<Selection>,
    pub selected: usize,
}

impl Selector {
    fn new(field: FilterField) -> Self {
        Self {
            field,
            options: vec![Selection::All],
            selected: 0,
        }
    }

    pub fn current(&self) -> &Selection {
        self.options.get(self.selected).unwrap_or(&Selection::All)
    }

    fn cycle(&mut self, forward: bool) -> bool {
        let n = self.options.len();
        if n < 2 {
            return false;
        }
        self.selected = if forward {
            (self.selected + 1) % n
        } else {
            (self.selected + n - 1) % n
        };
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    pub selectors: [Selector; 3],
    pub save_charts: bool,
    pub focus: SidebarFocus,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Sidebar {
    pub fn new(save_charts: bool) -> Self {
        Self {
            selectors: FilterField::ALL.map(Selector::new),
            save_charts,
            focus: SidebarFocus::default(),
        }
    }

    pub fn selector(&self, field: FilterField) -> &Selector {
        &self.selectors[Self::slot(field)]
    }

    fn slot(field: FilterField) -> usize {
        FilterField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or(0)
    }

    /// Replace the choices of `field`, keeping the current selection when it is still offered.
    pub fn set_options(&mut self, field: FilterField, options: Vec<Selection>) {
        let selector = &mut self.selectors[Self::slot(field)];
        let current = selector.current().clone();
        selector.options = if options.is_empty() {
            vec![Selection::All]
        } else {
            options
        };
        selector.selected = selector
            .options
            .iter()
            .position(|o| *o == current)
            .unwrap_or(0);
    }

    /// Select `selection` if `field` offers it. Returns false (and leaves the selector alone)
    /// for choices that are not offered.
    pub fn select(&mut self, field: FilterField, selection: &Selection) -> bool {
        let selector = &mut self.selectors[Self::slot(field)];
        match selector.options.iter().position(|o| o == selection) {
            Some(i) => {
                selector.selected = i;
                true
            }
            None => false,
        }
    }

    pub fn selections(&self) -> FilterSelections {
        self.selectors
            .iter()
            .fold(FilterSelections::new(), |acc, s| {
                acc.with(s.field, s.current().clone())
            })
    }

    pub fn focus_next(&mut self) {
        let i = self.focus.index();
        self.focus = SidebarFocus::ORDER[(i + 1) % SidebarFocus::ORDER.len()];
    }

    pub fn focus_prev(&mut self) {
        let n = SidebarFocus::ORDER.len();
        let i = self.focus.index();
        self.focus = SidebarFocus::ORDER[(i + n - 1) % n];
    }

    pub fn toggle_save(&mut self) {
        self.save_charts = !self.save_charts;
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> SidebarAction {
        match event.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.focus_next();
                SidebarAction::Moved
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.focus_prev();
                SidebarAction::Moved
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Right | KeyCode::Char('l') => {
                let forward = matches!(event.code, KeyCode::Right | KeyCode::Char('l'));
                match self.focus {
                    SidebarFocus::Selector(i) => {
                        if self.selectors[i].cycle(forward) {
                            SidebarAction::Changed
                        } else {
                            SidebarAction::Ignored
                        }
                    }
                    SidebarFocus::SaveCharts => {
                        self.toggle_save();
                        SidebarAction::Changed
                    }
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter if self.focus == SidebarFocus::SaveCharts => {
                self.toggle_save();
                SidebarAction::Changed
            }
            _ => SidebarAction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn tiers() -> Vec<Selection> {
        ["All", "High Value", "Mid Value", "Low Value"]
            .iter()
            .map(|s| Selection::parse(s))
            .collect()
    }

    #[test]
    fn starts_with_everything_all() {
        let sidebar = Sidebar::new(false);
        assert_eq!(sidebar.selections(), FilterSelections::new());
        assert_eq!(sidebar.focus, SidebarFocus::Selector(0));
    }

    #[test]
    fn cycling_wraps_and_reports_change() {
        let mut sidebar = Sidebar::new(false);
        sidebar.set_options(FilterField::ValueTier, tiers());
        sidebar.focus_next();

        assert_eq!(sidebar.handle_key(&key(KeyCode::Left)), SidebarAction::Changed);
        assert_eq!(
            sidebar.selections().value_tier,
            Selection::value("Low Value")
        );
        assert_eq!(sidebar.handle_key(&key(KeyCode::Char('l'))), SidebarAction::Changed);
        assert!(sidebar.selections().value_tier.is_all());
    }

    #[test]
    fn selector_without_choices_ignores_cycling() {
        let mut sidebar = Sidebar::new(false);
        assert_eq!(sidebar.handle_key(&key(KeyCode::Right)), SidebarAction::Ignored);
    }

    #[test]
    fn focus_wraps_and_space_toggles_save() {
        let mut sidebar = Sidebar::new(false);
        assert_eq!(sidebar.handle_key(&key(KeyCode::Up)), SidebarAction::Moved);
        assert_eq!(sidebar.focus, SidebarFocus::SaveCharts);
        assert_eq!(sidebar.handle_key(&key(KeyCode::Char(' '))), SidebarAction::Changed);
        assert!(sidebar.save_charts);
        sidebar.handle_key(&key(KeyCode::Enter));
        assert!(!sidebar.save_charts);
        sidebar.handle_key(&key(KeyCode::Down));
        assert_eq!(sidebar.focus, SidebarFocus::Selector(0));
    }

    #[test]
    fn new_options_keep_selection_when_still_offered() {
        let mut sidebar = Sidebar::new(false);
        sidebar.set_options(FilterField::ValueTier, tiers());
        assert!(sidebar.select(FilterField::ValueTier, &Selection::value("Mid Value")));
        sidebar.set_options(FilterField::ValueTier, tiers());
        assert_eq!(sidebar.selections().value_tier, Selection::value("Mid Value"));

        sidebar.set_options(FilterField::ValueTier, vec![Selection::All]);
        assert!(sidebar.selections().value_tier.is_all());
    }

    #[test]
    fn unknown_initial_choice_is_rejected() {
        let mut sidebar = Sidebar::new(false);
        sidebar.set_options(FilterField::ValueTier, tiers());
        assert!(!sidebar.select(FilterField::ValueTier, &Selection::value("Platinum")));
        assert!(sidebar.selections().value_tier.is_all());
    }
}
