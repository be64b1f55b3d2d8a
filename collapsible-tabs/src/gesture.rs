/// Vertical movement the header must see before a drag is claimed (anything less is a tap).
pub const DRAG_CLAIM_THRESHOLD: f32 = 5.0;
/// Overscroll divisor applied to the list on the direct-list-pull family.
pub const DIRECT_PULL_DAMPING: f32 = 3.0;
/// Overscroll divisor applied to the pull signal on the auxiliary-signal family.
pub const AUXILIARY_PULL_DAMPING: f32 = 1.5;
/// Minimum release speed (units/ms) that continues header motion with a decay.
pub const DECAY_MIN_VELOCITY: f32 = 0.2;
/// List offset held while refreshing on the direct-list-pull family.
pub const DIRECT_REFRESH_OFFSET: f32 = -50.0;
/// Pull signal value held while refreshing on the auxiliary-signal family.
pub const AUXILIARY_REFRESH_OFFSET: f32 = -150.0;
/// Duration of the pull signal's timed animations.
pub const AUXILIARY_ANIMATION_MS: u64 = 300;

/// Where the header gesture lifecycle currently is.
///
/// `Idle` is both the initial state and the state between gestures; `Releasing` is only observed
/// from inside release handling. While a refresh is in flight the phase is `Refreshing` except
/// during a drag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
    Releasing,
    Refreshing,
    SnappingBack,
    Decaying,
}

/// State scoped to a single header drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureState {
    /// Signal value when the drag was granted.
    pub start_offset: f32,
    /// Latest cumulative vertical movement (positive = finger moved down).
    pub delta: f32,
}

impl GestureState {
    /// The scroll offset the drag asks for: dragging down scrolls back towards the top.
    pub fn requested_offset(&self) -> f32 {
        self.start_offset - self.delta
    }
}

/// Latch guarding against overlapping refreshes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshState {
    active: bool,
    generation: u64,
}

impl RefreshState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn latch(&mut self) -> Option<RefreshTicket> {
        if self.active {
            return None;
        }
        self.active = true;
        self.generation = self.generation.wrapping_add(1);
        Some(RefreshTicket {
            generation: self.generation,
        })
    }

    /// Clears the latch if `ticket` belongs to the refresh in flight.
    pub(crate) fn release(&mut self, ticket: &RefreshTicket) -> bool {
        if !self.active || ticket.generation != self.generation {
            return false;
        }
        self.active = false;
        true
    }
}

/// Proof that a refresh is in flight. Hand it back to `finish_refresh` exactly once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a refresh stays latched until its ticket is passed to `finish_refresh`"]
pub struct RefreshTicket {
    generation: u64,
}

/// What a header release resolved to.
#[derive(Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// No drag was in progress, or nothing needed to move.
    Settled,
    /// Lists (or the pull signal) are animating back to the top.
    SnapBack,
    /// Header motion continues with a momentum decay.
    Decay,
    /// A refresh started; the host must run its refresh work and then finish it.
    Refresh(RefreshTicket),
}

impl ReleaseOutcome {
    pub fn into_refresh_ticket(self) -> Option<RefreshTicket> {
        match self {
            Self::Refresh(ticket) => Some(ticket),
            _ => None,
        }
    }
}
