use crate::interaction::Handle;
use crate::time::{Interval, OpenCloseWindow, Step};
use strum::Display as StrumDisplay;

/// The selected range. Owned by the host; the control only proposes changes to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Step,
    pub end: Step,
}

impl Range {
    pub fn new(start: Step, end: Step) -> Self {
        Self { start, end }
    }

    pub fn with(&self, handle: Handle, value: Step) -> Self {
        match handle {
            Handle::Start => Self::new(value, self.end),
            Handle::End => Self::new(self.start, value),
        }
    }

    pub fn apply(&mut self, request: RangeChangeRequest) {
        self.start = request.start;
        self.end = request.end;
    }
}

/// A committed change for the host to apply in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeChangeRequest {
    pub start: Step,
    pub end: Step,
}

impl From<RangeChangeRequest> for Range {
    fn from(request: RangeChangeRequest) -> Self {
        Self::new(request.start, request.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum RejectReason {
    Ordering,
    BeforeOpen,
    AfterClose,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept(Step),
    Reject(RejectReason),
    SnapTo(Step, Step),
}

impl Decision {
    pub fn request(&self, handle: Handle, current: Range) -> Option<RangeChangeRequest> {
        match *self {
            Self::Accept(value) => {
                let next = current.with(handle, value);
                Some(RangeChangeRequest {
                    start: next.start,
                    end: next.end,
                })
            }
            Self::SnapTo(start, end) => Some(RangeChangeRequest { start, end }),
            Self::Reject(_) => None,
        }
    }
}

/// How one unavailable interval relates to a requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    Clear,
    Overlap,
    Straddle,
}

impl Conflict {
    pub fn classify(requested: Range, interval: Interval) -> Self {
        let (req_start, req_end) = (requested.start, requested.end);
        let (exist_start, exist_end) = (interval.start(), interval.end());

        if req_start < exist_start {
            if req_end <= exist_start {
                Self::Clear
            } else if req_end > exist_end && req_start < exist_end {
                Self::Straddle
            } else {
                Self::Overlap
            }
        } else if req_start < exist_end {
            Self::Overlap
        } else {
            Self::Clear
        }
    }

    /// Snap target for a straddle, depending on which handle ran into the interval.
    fn snap(handle: Handle, requested: Range, interval: Interval) -> Decision {
        match handle {
            Handle::Start => Decision::SnapTo(interval.start() - 1, interval.start()),
            Handle::End => Decision::SnapTo(interval.end(), requested.end),
        }
    }
}

/// Decides what to do with `value` proposed for `handle`.
///
/// The first conflicting interval, in the order supplied, decides the outcome. A straddle
/// there snaps the selection next to the interval; any other overlap rejects the move.
pub fn resolve(
    handle: Handle,
    value: Step,
    current: Range,
    window: &OpenCloseWindow,
    unavailable: &[Interval],
) -> Decision {
    let requested = current.with(handle, value);

    if requested.start >= requested.end {
        return Decision::Reject(RejectReason::Ordering);
    }
    if requested.start < window.open_val() {
        return Decision::Reject(RejectReason::BeforeOpen);
    }
    if requested.end > window.close_val() {
        return Decision::Reject(RejectReason::AfterClose);
    }

    unavailable
        .iter()
        .find_map(|&interval| match Conflict::classify(requested, interval) {
            Conflict::Clear => None,
            Conflict::Overlap => Some(Decision::Reject(RejectReason::Unavailable)),
            Conflict::Straddle => Some(Conflict::snap(handle, requested, interval)),
        })
        .unwrap_or(Decision::Accept(value))
}

/// Whether `range` could be the result of an interactive edit: ordered, inside the window and
/// clear of every unavailable interval.
pub fn is_selectable(range: Range, window: &OpenCloseWindow, unavailable: &[Interval]) -> bool {
    range.start < range.end
        && range.start >= window.open_val()
        && range.end <= window.close_val()
        && unavailable
            .iter()
            .all(|&i| Conflict::classify(range, i) == Conflict::Clear)
}
