/// Lifecycle of one remote resource as seen by a client.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    Idle,
    Pending,
    Success(T),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceAction<T> {
    Request,
    Succeed(T),
    Fail(String),
    Reset,
}

impl<T> ResourceState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, ResourceState::Pending)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ResourceState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResourceState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Applies `action` to `state`. Completions only land on a pending state,
/// so a result arriving after `Reset` is dropped.
pub fn reduce<T>(state: ResourceState<T>, action: ResourceAction<T>) -> ResourceState<T> {
    match (state, action) {
        (_, ResourceAction::Request) => ResourceState::Pending,
        (_, ResourceAction::Reset) => ResourceState::Idle,
        (ResourceState::Pending, ResourceAction::Succeed(data)) => ResourceState::Success(data),
        (ResourceState::Pending, ResourceAction::Fail(message)) => ResourceState::Error(message),
        (state, _) => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_then_success() {
        let state = reduce(ResourceState::Idle, ResourceAction::Request);
        assert!(state.is_pending());
        let state = reduce(state, ResourceAction::Succeed(7));
        assert_eq!(state.data(), Some(&7));
    }

    #[test]
    fn request_then_failure() {
        let state = reduce(ResourceState::<u8>::Idle, ResourceAction::Request);
        let state = reduce(state, ResourceAction::Fail("Team not found".to_string()));
        assert_eq!(state.error(), Some("Team not found"));
    }

    #[test]
    fn settled_states_can_request_again_or_reset() {
        let state = reduce(ResourceState::Success(1), ResourceAction::Request);
        assert_eq!(state, ResourceState::Pending);
        let state = reduce(ResourceState::<u8>::Error("x".into()), ResourceAction::Reset);
        assert_eq!(state, ResourceState::Idle);
    }

    #[test]
    fn completion_without_request_is_ignored() {
        let state = reduce(ResourceState::Idle, ResourceAction::Succeed(3));
        assert_eq!(state, ResourceState::Idle);
        let state = reduce(ResourceState::Success(1), ResourceAction::Fail("late".into()));
        assert_eq!(state, ResourceState::Success(1));
    }
}
