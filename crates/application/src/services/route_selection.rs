//! Route selection state
//!
//! What the user currently sees: which destination is selected, what each
//! provider returned, and which mode is drawn.

use std::fmt;

use domain::{RoutePlan, RouteQuery, RouteResult, TravelMode};
use serde::{Deserialize, Serialize};

/// Generation number of a hospital selection
///
/// Every selection and deselection advances it. Results tagged with an older
/// id are stale and must not touch the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct SelectionId(pub u64);

impl SelectionId {
    /// The id following this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "selection#{}", self.0)
    }
}

/// Routes of the current selection and the visible mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSelectionState {
    /// Destination being routed to
    pub selected_destination: Option<RouteQuery>,
    /// Driving result, `None` while in flight
    pub driving_result: Option<RouteResult>,
    /// Transit result, `None` while in flight
    pub transit_result: Option<RouteResult>,
    /// Mode currently drawn
    pub active_mode: TravelMode,
    /// Whether the transit fetch has not completed yet
    pub transit_pending: bool,
}

impl RouteSelectionState {
    /// Fresh state for a new selection
    #[must_use]
    pub const fn selecting(query: RouteQuery) -> Self {
        Self {
            selected_destination: Some(query),
            driving_result: None,
            transit_result: None,
            active_mode: TravelMode::Car,
            transit_pending: true,
        }
    }

    /// Result of the given mode, if completed
    #[must_use]
    pub const fn result(&self, mode: TravelMode) -> Option<&RouteResult> {
        match mode {
            TravelMode::Car => self.driving_result.as_ref(),
            TravelMode::Transit => self.transit_result.as_ref(),
        }
    }

    /// Successful plan of the given mode
    #[must_use]
    pub fn plan(&self, mode: TravelMode) -> Option<&RoutePlan> {
        self.result(mode).and_then(|r| r.as_ref().ok())
    }

    /// Whether switching to `mode` is allowed
    ///
    /// Car needs a successful driving result. Transit needs a successful
    /// transit result or a fetch still in flight.
    #[must_use]
    pub fn can_show(&self, mode: TravelMode) -> bool {
        if self.selected_destination.is_none() {
            return false;
        }
        match mode {
            TravelMode::Car => self.plan(TravelMode::Car).is_some(),
            TravelMode::Transit => {
                self.plan(TravelMode::Transit).is_some() || self.transit_pending
            },
        }
    }

    /// One-line description of the visible mode
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.selected_destination.is_none() {
            return "선택된 병원이 없습니다".to_string();
        }

        let mode = self.active_mode;
        match self.result(mode) {
            None if mode == TravelMode::Transit => "⏳ 대중교통 경로 검색 중...".to_string(),
            None => format!("{} 경로 검색 중...", mode.emoji()),
            Some(Err(err)) => err.user_message(mode),
            Some(Ok(plan)) => match mode {
                TravelMode::Car => format!(
                    "{} {:.1}km / 약 {}분",
                    mode.emoji(),
                    plan.distance_km,
                    plan.duration_min
                ),
                TravelMode::Transit => format_transit_status(plan),
            },
        }
    }
}

fn format_transit_status(plan: &RoutePlan) -> String {
    let summary = plan.summary.as_deref().unwrap_or("대중교통");
    let walking = if plan.is_estimated {
        format!("도보 약 {}분", plan.walking_minutes)
    } else {
        format!("도보 {}분", plan.walking_minutes)
    };
    format!(
        "{} {summary} / 약 {}분 ({walking}, 환승 {}회)",
        TravelMode::Transit.emoji(),
        plan.duration_min,
        plan.transfer_count
    )
}

#[cfg(test)]
mod tests {
    use domain::{Coordinate, RouteError};

    use super::*;

    fn query() -> RouteQuery {
        RouteQuery::new(
            Coordinate::new_unchecked(37.5665, 126.978),
            Coordinate::new_unchecked(37.5, 127.03),
            "강남병원",
        )
    }

    fn transit_plan() -> RoutePlan {
        RoutePlan {
            distance_km: 7.3,
            duration_min: 8,
            legs: Vec::new(),
            transfer_count: 0,
            walking_minutes: 3,
            is_estimated: true,
            summary: Some("지하철 2호선".to_string()),
        }
    }

    #[test]
    fn test_selection_id_next() {
        assert_eq!(SelectionId(1).next(), SelectionId(2));
        assert_eq!(SelectionId(u64::MAX).next(), SelectionId(0));
        assert_eq!(SelectionId(4).to_string(), "selection#4");
    }

    #[test]
    fn test_selecting_state() {
        let state = RouteSelectionState::selecting(query());
        assert_eq!(state.active_mode, TravelMode::Car);
        assert!(state.transit_pending);
        assert!(state.driving_result.is_none());
        assert!(state.transit_result.is_none());
    }

    #[test]
    fn test_can_show_guards() {
        let mut state = RouteSelectionState::selecting(query());
        assert!(!state.can_show(TravelMode::Car));
        assert!(state.can_show(TravelMode::Transit));

        state.transit_pending = false;
        assert!(!state.can_show(TravelMode::Transit));

        state.transit_result = Some(Err(RouteError::Upstream("HTTP 500".to_string())));
        assert!(!state.can_show(TravelMode::Transit));

        state.transit_result = Some(Ok(transit_plan()));
        assert!(state.can_show(TravelMode::Transit));

        state.driving_result = Some(Ok(RoutePlan::driving(6.2, 12, Vec::new())));
        assert!(state.can_show(TravelMode::Car));
    }

    #[test]
    fn test_nothing_can_show_without_selection() {
        let state = RouteSelectionState::default();
        assert!(!state.can_show(TravelMode::Car));
        assert!(!state.can_show(TravelMode::Transit));
    }

    #[test]
    fn test_status_line_driving() {
        let mut state = RouteSelectionState::selecting(query());
        assert_eq!(state.status_line(), "🚗 경로 검색 중...");

        state.driving_result = Some(Ok(RoutePlan::driving(6.2, 12, Vec::new())));
        assert_eq!(state.status_line(), "🚗 6.2km / 약 12분");

        state.driving_result = Some(Err(RouteError::NotConfigured("no key".to_string())));
        assert!(state.status_line().contains("설정 필요"));
    }

    #[test]
    fn test_status_line_transit() {
        let mut state = RouteSelectionState::selecting(query());
        state.active_mode = TravelMode::Transit;
        assert!(state.status_line().starts_with('⏳'));

        state.transit_pending = false;
        state.transit_result = Some(Ok(transit_plan()));
        assert_eq!(
            state.status_line(),
            "🚌 지하철 2호선 / 약 8분 (도보 약 3분, 환승 0회)"
        );
    }

    #[test]
    fn test_status_line_without_selection() {
        assert_eq!(
            RouteSelectionState::default().status_line(),
            "선택된 병원이 없습니다"
        );
    }
}
