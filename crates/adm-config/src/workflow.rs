//! Status workflow configuration.

use adm_core::enums::TransitionPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Transition policy enforced before every status update.
    #[serde(default)]
    pub policy: TransitionPolicy,
}
