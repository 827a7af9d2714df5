//! # `vp_token` Claim
//!
//! Used when the whole exchange is expressed as a single verifiable
//! presentation rather than per-credential claims.

use serde::{Deserialize, Serialize};

use crate::presentation::PresentationDefinition;

/// The `vp_token` member of a claims request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpTokenClaim {
    pub presentation_definition: PresentationDefinition,
}

impl VpTokenClaim {
    pub fn new(presentation_definition: PresentationDefinition) -> Self {
        Self {
            presentation_definition,
        }
    }
}

impl From<PresentationDefinition> for VpTokenClaim {
    fn from(presentation_definition: PresentationDefinition) -> Self {
        Self::new(presentation_definition)
    }
}
