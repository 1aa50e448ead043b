//! Registration route
//!
//! Accepts the multipart form posted by the public registration page and
//! hands the parsed submission to the registration service.

use axum::extract::DefaultBodyLimit;
use axum::{Json, Router, extract::Multipart, extract::State, routing::post};

use crate::db::members::NewMember;
use crate::error::{AppError, AppResult};
use crate::photos;
use crate::registration::{self, PhotoUpload, RegistrationOutcome};
use crate::state::AppState;

/// Photo cap plus headroom for the text fields and multipart framing.
/// Without this the default 2 MB body limit rejects large photos before
/// validation ever sees them.
const BODY_LIMIT: usize = photos::MAX_PHOTO_SIZE + 64 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

/// Parsed multipart submission
struct RegisterForm {
    member: NewMember,
    photo: Option<PhotoUpload>,
}

async fn parse_form(mut multipart: Multipart) -> AppResult<RegisterForm> {
    let mut form = RegisterForm {
        member: NewMember {
            state: "Tamil Nadu".to_string(),
            ..NewMember::default()
        },
        photo: None,
    };

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            continue;
        };

        if name == "photo" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await?.to_vec();
            // An empty file input on the form means "no photo"
            if !data.is_empty() {
                form.photo = Some(PhotoUpload { file_name, data });
            }
            continue;
        }

        let value = field.text().await?.trim().to_string();
        let member = &mut form.member;
        match name.as_str() {
            "name" => member.name = value,
            "fatherName" => member.father_name = value,
            "gender" => member.gender = value,
            "dob" => member.dob = value,
            "age" => {
                member.age = value
                    .parse()
                    .map_err(|_| AppError::validation("age must be an integer"))?;
            }
            "bloodGroup" => member.blood_group = value,
            "mobile" => member.mobile = value,
            "email" => member.email = value,
            "state" => {
                if !value.is_empty() {
                    member.state = value;
                }
            }
            "district" => member.district = value,
            "localBody" => member.local_body = value,
            "localityType" => member.locality_type = value,
            "constituency" => member.constituency = value,
            "ward" => member.ward = value,
            "address" => member.address = value,
            "voterId" => member.voter_id = value,
            "nationalId" => member.national_id = value,
            // Unknown fields are ignored rather than rejected
            _ => {}
        }
    }

    Ok(form)
}

/// POST /register — validate and persist a new member
async fn register(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<RegistrationOutcome>> {
    let form = parse_form(multipart).await?;
    let outcome = registration::register_member(&state, form.member, form.photo).await?;
    Ok(Json(outcome))
}
