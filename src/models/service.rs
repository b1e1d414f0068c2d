use serde::{Deserialize, Serialize};

/// Optional line item attached to a booking, priced additively.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdditionalService {
    pub name: String,
    pub price: f64,
}
