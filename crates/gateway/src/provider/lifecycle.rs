/// Provider lifecycle: a one-way `NotStarted -> Started` transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderState {
    #[default]
    NotStarted,
    Started,
}

impl ProviderState {
    pub fn is_started(&self) -> bool {
        matches!(self, ProviderState::Started)
    }

    /// State after a start request, or `None` if already started
    pub fn on_start(self) -> Option<ProviderState> {
        match self {
            ProviderState::NotStarted => Some(ProviderState::Started),
            ProviderState::Started => None,
        }
    }
}
