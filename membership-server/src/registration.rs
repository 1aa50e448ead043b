//! Registration service
//!
//! Validates a submission, mints the membership number, stores the photo
//! and inserts the member record — in that order. A photo that was written
//! before a failing insert is left behind and logged; it is overwritten by
//! the next successful registration for the same mobile.

use crate::db::{districts, members};
use crate::error::{AppError, AppResult};
use crate::numbering;
use crate::photos;
use crate::state::AppState;

/// An uploaded photo: original file name plus raw bytes
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Outcome of a successful registration
#[derive(Debug, serde::Serialize)]
pub struct RegistrationOutcome {
    pub message: String,
    #[serde(rename = "membershipNo")]
    pub membership_no: String,
    pub id: String,
}

/// Mobile numbers are exactly ten ASCII digits
pub fn validate_mobile(mobile: &str) -> AppResult<()> {
    if mobile.len() != 10 || !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(
            "Mobile number must be exactly 10 digits",
        ));
    }
    Ok(())
}

fn require_field(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Validate all submitted fields before any side effect
async fn validate(state: &AppState, data: &members::NewMember) -> AppResult<()> {
    require_field(&data.name, "name")?;
    require_field(&data.blood_group, "bloodGroup")?;
    require_field(&data.state, "state")?;
    require_field(&data.district, "district")?;
    if data.age <= 0 {
        return Err(AppError::validation("age must be a positive integer"));
    }
    validate_mobile(&data.mobile)?;

    if !districts::exists(&state.pool, &data.district).await? {
        return Err(AppError::validation(format!(
            "Unknown district '{}'",
            data.district
        )));
    }

    // Checked up front so a duplicate does not consume a membership number;
    // the unique index still backstops the race between check and insert.
    if members::exists_by_mobile(&state.pool, &data.mobile).await? {
        return Err(AppError::conflict(format!(
            "Mobile number {} is already registered",
            data.mobile
        )));
    }

    Ok(())
}

/// Register a new member: validate → number → photo → insert
pub async fn register_member(
    state: &AppState,
    data: members::NewMember,
    photo: Option<PhotoUpload>,
) -> AppResult<RegistrationOutcome> {
    if let Some(ref upload) = photo {
        photos::validate_photo(&upload.data, &upload.file_name)?;
    }
    validate(state, &data).await?;

    let membership_no = numbering::next_membership_no(&state.pool).await?;

    let photo_name = match photo {
        Some(upload) => Some(photos::store_photo(
            &state.upload_dir,
            &data.mobile,
            &upload.data,
        )?),
        None => None,
    };

    let member = members::create(&state.pool, &data, &membership_no, photo_name.as_deref())
        .await
        .inspect_err(|_| {
            if let Some(ref name) = photo_name {
                // Orphaned photo is acceptable; record it for repair tooling
                tracing::warn!(photo = %name, mobile = %data.mobile, "Photo stored but member insert failed");
            }
        })?;

    tracing::info!(
        mobile = %member.mobile,
        membership_no = %member.membership_no,
        district = %member.district,
        "Member registered"
    );

    Ok(RegistrationOutcome {
        message: "Registration successful".to_string(),
        membership_no: member.membership_no,
        id: member.id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_must_be_ten_digits() {
        assert!(validate_mobile("9000000001").is_ok());
        assert!(validate_mobile("900000001").is_err());
        assert!(validate_mobile("90000000012").is_err());
        assert!(validate_mobile("90000abc01").is_err());
        assert!(validate_mobile("").is_err());
    }
}
