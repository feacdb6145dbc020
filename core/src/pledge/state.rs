use crate::value::Value;

#[derive(Debug, Clone)]
pub enum PledgeState {
    Pending,
    Fulfilled(Value),
    Rejected(Value),
}

impl PledgeState {
    pub fn is_pending(&self) -> bool {
        matches!(self, PledgeState::Pending)
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(self, PledgeState::Fulfilled(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, PledgeState::Rejected(_))
    }

    /// The fulfillment value or rejection reason, once settled.
    pub fn outcome(&self) -> Option<&Value> {
        match self {
            PledgeState::Pending => None,
            PledgeState::Fulfilled(value) | PledgeState::Rejected(value) => Some(value),
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            PledgeState::Pending => "pending",
            PledgeState::Fulfilled(_) => "fulfilled",
            PledgeState::Rejected(_) => "rejected",
        }
    }
}
