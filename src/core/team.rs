//! Per-team tuning surface consumed by the planner

/// Risk-tolerance knobs and resources for one side. `leader_can_reach_keep`
/// is supplied by the caller each pass; the planner never pathfinds.
#[derive(Debug, Clone)]
pub struct Team {
    pub aggression: f32,
    pub caution: f32,
    pub gold: i32,
    pub leader_can_reach_keep: bool,
}

impl Default for Team {
    fn default() -> Self {
        Self {
            aggression: 0.4,
            caution: 0.25,
            gold: 0,
            leader_can_reach_keep: false,
        }
    }
}
