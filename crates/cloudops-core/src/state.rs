//! UI-agnostic application state types
//!
//! Shared by every front end; nothing here depends on a UI framework.

/// Lifecycle of the mentor AI panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdviceState {
    /// No request issued yet.
    #[default]
    Idle,
    /// A request is in flight.
    Pending,
    /// Final display text of the most recently resolved request.
    Settled(String),
}

impl AdviceState {
    /// Enter `Pending`, discarding any previous advice.
    pub fn begin(&mut self) {
        *self = AdviceState::Pending;
    }

    /// Store a resolved result. Results are applied in arrival order, so the
    /// last one to resolve wins.
    pub fn settle(&mut self, text: String) {
        *self = AdviceState::Settled(text);
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AdviceState::Pending)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            AdviceState::Settled(text) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let state = AdviceState::default();
        assert_eq!(state, AdviceState::Idle);
        assert!(!state.is_pending());
        assert_eq!(state.text(), None);
    }

    #[test]
    fn test_begin_then_settle() {
        let mut state = AdviceState::default();
        state.begin();
        assert!(state.is_pending());
        state.settle("done".to_string());
        assert_eq!(state.text(), Some("done"));
    }

    #[test]
    fn test_begin_clears_previous_advice() {
        let mut state = AdviceState::Settled("old".to_string());
        state.begin();
        assert_eq!(state, AdviceState::Pending);
    }

    #[test]
    fn test_later_settle_overwrites() {
        let mut state = AdviceState::Pending;
        state.settle("B".to_string());
        state.settle("A".to_string());
        assert_eq!(state.text(), Some("A"));
    }
}
