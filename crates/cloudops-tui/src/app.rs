use ratatui::layout::Rect;
use ratatui::widgets::{ListState, TableState};
use tokio::sync::mpsc;
use cloudops_core::inventory::{self, COMMON_GUIDES};
use cloudops_core::{AdviceCoordinator, AdviceState, Inventory};
use crate::tui::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Resources,
    Monitoring,
    Security,
    Pipelines,
    Docs,
    Mentor,
}

impl Tab {
    pub fn all() -> [Tab; 7] {
        [
            Tab::Dashboard,
            Tab::Resources,
            Tab::Monitoring,
            Tab::Security,
            Tab::Pipelines,
            Tab::Docs,
            Tab::Mentor,
        ]
    }

    /// Label in the sidebar
    pub fn display_name(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Resources => "Resources",
            Tab::Monitoring => "Monitoring",
            Tab::Security => "IAM & Security",
            Tab::Pipelines => "CI/CD Pipelines",
            Tab::Docs => "Documentation",
            Tab::Mentor => "Mentor AI",
        }
    }

    pub fn index(&self) -> usize {
        Tab::all().iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(idx: usize) -> Option<Tab> {
        Tab::all().get(idx).copied()
    }

    pub fn next(&self) -> Tab {
        let all = Tab::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> Tab {
        let all = Tab::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardFocus {
    #[default]
    Alerts,
    Checklist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MentorFocus {
    #[default]
    Advice,
    Guides,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub tab: Tab,
    pub input_mode: InputMode,

    // Dashboard state
    pub dashboard_focus: DashboardFocus,
    pub alerts_state: ListState,
    pub checklist_state: ListState,

    // Resources state
    pub resources_state: TableState,

    // Mentor AI state
    pub mentor_focus: MentorFocus,
    pub query_input: String,
    pub query_cursor: usize, // cursor position in query_input, in chars
    pub advice: AdviceState,
    pub advice_scroll: u16,
    pub advice_rows: u16, // wrapped rows of the advice text, set during render
    pub guides_state: ListState,

    // Animation state
    pub animation_frame: usize,

    // Panel areas for mouse hit-testing (updated during render)
    pub sidebar_area: Option<Rect>,
    pub advice_area: Option<Rect>,

    // Data
    pub inventory: Inventory,
    pub coordinator: AdviceCoordinator,
    pub key_source: Option<&'static str>,
    events: mpsc::UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(
        inventory: Inventory,
        coordinator: AdviceCoordinator,
        events: mpsc::UnboundedSender<AppEvent>,
        key_source: Option<&'static str>,
    ) -> Self {
        let mut alerts_state = ListState::default();
        alerts_state.select(Some(0));
        let mut checklist_state = ListState::default();
        checklist_state.select(Some(0));
        let mut resources_state = TableState::default();
        resources_state.select(Some(0));
        let mut guides_state = ListState::default();
        guides_state.select(Some(0));

        Self {
            should_quit: false,
            tab: Tab::Dashboard,
            input_mode: InputMode::Normal,

            dashboard_focus: DashboardFocus::default(),
            alerts_state,
            checklist_state,

            resources_state,

            mentor_focus: MentorFocus::default(),
            query_input: String::new(),
            query_cursor: 0,
            advice: AdviceState::default(),
            advice_scroll: 0,
            advice_rows: 0,
            guides_state,

            animation_frame: 0,

            sidebar_area: None,
            advice_area: None,

            inventory,
            coordinator,
            key_source,
            events,
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.input_mode = InputMode::Normal;
    }

    /// Send `issue` to the mentor AI on a background task. The result comes
    /// back as `AppEvent::Advice`; overlapping requests are not sequenced, so
    /// whichever resolves last is what stays on screen.
    pub fn ask_mentor(&mut self, issue: String) {
        log::info!("Mentor AI request issued ({} chars)", issue.chars().count());
        self.advice.begin();
        self.advice_scroll = 0;

        let coordinator = self.coordinator.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let text = coordinator.request_advice(&issue).await;
            // Receiver is gone only when the app is shutting down
            let _ = events.send(AppEvent::Advice(text));
        });
    }

    /// Apply a resolved advice request and bring the mentor panel forward.
    /// Input mode is left alone so a half-typed question keeps its keys.
    pub fn settle_advice(&mut self, text: String) {
        log::info!("Mentor AI request settled ({} chars)", text.chars().count());
        self.advice.settle(text);
        self.advice_scroll = 0;
        self.tab = Tab::Mentor;
    }

    /// Submit the mentor input box. Empty input is ignored.
    pub fn submit_query(&mut self) -> bool {
        if self.query_input.is_empty() {
            return false;
        }
        let issue = std::mem::take(&mut self.query_input);
        self.query_cursor = 0;
        self.input_mode = InputMode::Normal;
        self.ask_mentor(issue);
        true
    }

    /// "Troubleshoot with AI" on the selected alert; only open incidents qualify.
    pub fn troubleshoot_selected_alert(&mut self) -> bool {
        let message = self
            .alerts_state
            .selected()
            .and_then(|i| self.inventory.critical_alerts().get(i))
            .filter(|incident| incident.is_open())
            .map(|incident| incident.message.clone());

        match message {
            Some(message) => {
                self.ask_mentor(message);
                true
            }
            None => false,
        }
    }

    pub fn ask_selected_guide(&mut self) -> bool {
        match self.guides_state.selected().and_then(|i| COMMON_GUIDES.get(i)) {
            Some(guide) => {
                self.ask_mentor(inventory::guide_question(guide));
                true
            }
            None => false,
        }
    }

    pub fn toggle_selected_checklist(&mut self) -> bool {
        let id = self
            .checklist_state
            .selected()
            .and_then(|i| self.inventory.checklist.get(i))
            .map(|item| item.id.clone());

        match id {
            Some(id) => self.inventory.toggle_checklist(&id),
            None => false,
        }
    }

    // List navigation
    pub fn nav_down(&mut self) {
        match self.tab {
            Tab::Dashboard => match self.dashboard_focus {
                DashboardFocus::Alerts => {
                    let len = self.inventory.critical_alerts().len();
                    step_down(&mut self.alerts_state, len);
                }
                DashboardFocus::Checklist => {
                    let len = self.inventory.checklist.len();
                    step_down(&mut self.checklist_state, len);
                }
            },
            Tab::Resources => {
                let len = self.inventory.resources.len();
                if len > 0 {
                    let i = self.resources_state.selected().unwrap_or(0);
                    self.resources_state.select(Some((i + 1).min(len - 1)));
                }
            }
            Tab::Mentor => match self.mentor_focus {
                MentorFocus::Advice => self.scroll_advice_down(1),
                MentorFocus::Guides => step_down(&mut self.guides_state, COMMON_GUIDES.len()),
            },
            _ => {}
        }
    }

    pub fn nav_up(&mut self) {
        match self.tab {
            Tab::Dashboard => match self.dashboard_focus {
                DashboardFocus::Alerts => step_up(&mut self.alerts_state),
                DashboardFocus::Checklist => step_up(&mut self.checklist_state),
            },
            Tab::Resources => {
                let i = self.resources_state.selected().unwrap_or(0);
                self.resources_state.select(Some(i.saturating_sub(1)));
            }
            Tab::Mentor => match self.mentor_focus {
                MentorFocus::Advice => self.scroll_advice_up(1),
                MentorFocus::Guides => step_up(&mut self.guides_state),
            },
            _ => {}
        }
    }

    pub fn toggle_focus(&mut self) {
        match self.tab {
            Tab::Dashboard => {
                self.dashboard_focus = match self.dashboard_focus {
                    DashboardFocus::Alerts => DashboardFocus::Checklist,
                    DashboardFocus::Checklist => DashboardFocus::Alerts,
                };
            }
            Tab::Mentor => {
                self.mentor_focus = match self.mentor_focus {
                    MentorFocus::Advice => MentorFocus::Guides,
                    MentorFocus::Guides => MentorFocus::Advice,
                };
            }
            _ => {}
        }
    }

    /// Scroll the advice panel, stopping with its last row still on screen.
    pub fn scroll_advice_down(&mut self, rows: u16) {
        let max = self.advice_rows.saturating_sub(1);
        self.advice_scroll = self.advice_scroll.saturating_add(rows).min(max);
    }

    pub fn scroll_advice_up(&mut self, rows: u16) {
        self.advice_scroll = self.advice_scroll.saturating_sub(rows);
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.advice.is_pending() {
            self.animation_frame = self.animation_frame.wrapping_add(1);
        }
    }
}

fn step_down(state: &mut ListState, len: usize) {
    if len > 0 {
        let i = state.selected().unwrap_or(0);
        state.select(Some((i + 1).min(len - 1)));
    }
}

fn step_up(state: &mut ListState) {
    let i = state.selected().unwrap_or(0);
    state.select(Some(i.saturating_sub(1)));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use cloudops_core::advice::CONNECTION_ERROR_MESSAGE;

    /// App wired to an endpoint that refuses connections, plus the receiving
    /// end of its event channel.
    pub(crate) fn test_app() -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let (tx, rx) = mpsc::unbounded_channel();
        let coordinator = AdviceCoordinator::gemini("", &base_url);
        (App::new(Inventory::mock(), coordinator, tx, None), rx)
    }

    async fn next_advice(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> String {
        loop {
            match rx.recv().await {
                Some(AppEvent::Advice(text)) => return text,
                Some(_) => continue,
                None => panic!("event channel closed"),
            }
        }
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Dashboard.next(), Tab::Resources);
        assert_eq!(Tab::Mentor.next(), Tab::Dashboard);
        assert_eq!(Tab::Dashboard.prev(), Tab::Mentor);
        assert_eq!(Tab::from_index(6), Some(Tab::Mentor));
        assert_eq!(Tab::from_index(7), None);
    }

    #[tokio::test]
    async fn test_submit_query_goes_pending_then_settles() {
        let (mut app, mut rx) = test_app();
        assert_eq!(app.advice, AdviceState::Idle);

        app.query_input = "How do I resolve a 403 Forbidden on S3?".to_string();
        app.query_cursor = 5;
        assert!(app.submit_query());
        assert!(app.advice.is_pending());
        assert!(app.query_input.is_empty());
        assert_eq!(app.query_cursor, 0);

        let text = next_advice(&mut rx).await;
        app.settle_advice(text);
        assert_eq!(app.advice.text(), Some(CONNECTION_ERROR_MESSAGE));
        assert_eq!(app.tab, Tab::Mentor);
    }

    #[tokio::test]
    async fn test_empty_query_is_ignored() {
        let (mut app, _rx) = test_app();
        assert!(!app.submit_query());
        assert_eq!(app.advice, AdviceState::Idle);
    }

    #[tokio::test]
    async fn test_troubleshoot_only_open_incidents() {
        let (mut app, mut rx) = test_app();

        // inc-103 is resolved
        app.alerts_state.select(Some(2));
        assert!(!app.troubleshoot_selected_alert());
        assert_eq!(app.advice, AdviceState::Idle);

        app.alerts_state.select(Some(0));
        assert!(app.troubleshoot_selected_alert());
        assert!(app.advice.is_pending());
        // Result arrives later; the tab only changes once it settles
        assert_eq!(app.tab, Tab::Dashboard);

        let text = next_advice(&mut rx).await;
        app.settle_advice(text);
        assert_eq!(app.tab, Tab::Mentor);
    }

    #[tokio::test]
    async fn test_guide_request() {
        let (mut app, mut rx) = test_app();
        app.guides_state.select(Some(3));
        assert!(app.ask_selected_guide());
        assert!(!next_advice(&mut rx).await.is_empty());
    }

    #[test]
    fn test_later_result_overwrites_earlier() {
        let (mut app, _rx) = test_app();

        app.advice.begin();
        app.advice.begin();
        app.settle_advice("B".to_string());
        app.settle_advice("A".to_string());
        assert_eq!(app.advice.text(), Some("A"));
    }

    #[test]
    fn test_checklist_toggle_from_selection() {
        let (mut app, _rx) = test_app();

        app.dashboard_focus = DashboardFocus::Checklist;
        app.nav_down();
        assert_eq!(app.checklist_state.selected(), Some(1));
        assert!(app.toggle_selected_checklist());
        assert!(app.inventory.checklist[1].completed);
        assert_eq!(app.inventory.completed_checklist_count(), 3);
    }

    #[test]
    fn test_advice_scroll_is_bounded() {
        let (mut app, _rx) = test_app();
        app.advice_rows = 4;
        app.scroll_advice_down(10);
        assert_eq!(app.advice_scroll, 3);
        app.scroll_advice_up(1);
        assert_eq!(app.advice_scroll, 2);

        // Nothing rendered yet: no room to scroll
        app.advice_rows = 0;
        app.advice_scroll = 0;
        app.scroll_advice_down(3);
        assert_eq!(app.advice_scroll, 0);
    }

    #[test]
    fn test_nav_clamps_to_list_bounds() {
        let (mut app, _rx) = test_app();

        for _ in 0..10 {
            app.nav_down();
        }
        assert_eq!(app.alerts_state.selected(), Some(2));
        for _ in 0..10 {
            app.nav_up();
        }
        assert_eq!(app.alerts_state.selected(), Some(0));
    }
}
