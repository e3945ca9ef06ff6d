use serde::{Deserialize, Serialize};

use super::{DutySchedule, FeeSchedule};

/// Every table a cost estimate needs, as handed over by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTables {
    pub duty_schedules: Vec<DutySchedule>,
    pub transfer: FeeSchedule,
    pub bond: FeeSchedule,
}
