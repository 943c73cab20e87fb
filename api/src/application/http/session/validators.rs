use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateManualEntryRequest {
    #[validate(length(max = 200, message = "text must be at most 200 characters"))]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_entry_length_limit() {
        let ok = UpdateManualEntryRequest {
            text: "Flour".to_string(),
        };
        assert!(ok.validate().is_ok());

        let too_long = UpdateManualEntryRequest {
            text: "a".repeat(201),
        };
        assert!(too_long.validate().is_err());
    }
}
