use crate::error::ApiError;

pub fn validate_hours(start_hour: u8, end_hour: u8) -> Result<(), ApiError> {
    if start_hour < end_hour && end_hour <= 24 {
        Ok(())
    } else {
        Err(ApiError::BadRequest(
            "start_hour must be before end_hour, both within 0-24".into(),
        ))
    }
}

pub fn validate_equipment_name(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        Err(ApiError::BadRequest("equipment name must not be empty".into()))
    } else {
        Ok(())
    }
}
