/// Decides what happens to blank nodes that an endpoint returns.
///
/// A blank node label is only meaningful inside the result set that produced it. Storing it in a
/// local graph and using it in a later query is only sound if the endpoint keeps labels stable
/// across requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlankNodeMode {
    /// Blank nodes are rejected with an [InvalidTermError::EphemeralBlankNode](crate::InvalidTermError).
    #[default]
    Reject,
    /// Blank node labels are assumed to be stable and are kept verbatim.
    Persistent,
}

impl BlankNodeMode {
    pub fn from_persistent_flag(persistent: bool) -> Self {
        if persistent {
            Self::Persistent
        } else {
            Self::Reject
        }
    }

    pub fn is_persistent(self) -> bool {
        matches!(self, Self::Persistent)
    }
}
