use chrono::{DateTime, Utc};
use domain::error::{DomainErrorKind, Error as DomainError, InternalErrorKind};
use domain::meeting::MeetingSpec;
use serde::Deserialize;
use utoipa::ToSchema;

/// Body of a meeting-provisioning request.
///
/// Every field is optional on the wire; whether omitted scheduling fields
/// are defaulted or rejected is decided by the configured policy.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateMeetingParams {
    pub topic: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub duration: Option<u32>,
    pub host_user_id: Option<String>,
    pub host_email: Option<String>,
    pub participant_user_ids: Option<Vec<String>>,
    pub room_id: Option<String>,
}

impl CreateMeetingParams {
    /// Validate the params against the field policy and produce the
    /// provisioning input.
    pub(crate) fn into_spec(self, require_meeting_fields: bool) -> Result<MeetingSpec, DomainError> {
        if require_meeting_fields {
            let mut missing = Vec::new();
            if self.start_time.is_none() {
                missing.push("start_time");
            }
            if self.duration.is_none() {
                missing.push("duration");
            }
            if !missing.is_empty() {
                return Err(validation_error(format!(
                    "missing required fields: {}",
                    missing.join(", ")
                )));
            }
        }

        if self.duration == Some(0) {
            return Err(validation_error(
                "duration must be at least one minute".to_string(),
            ));
        }

        Ok(MeetingSpec {
            topic: self.topic,
            start_time: self.start_time,
            duration: self.duration,
            host_user_id: self.host_user_id,
            host_email: self.host_email,
            participant_user_ids: self.participant_user_ids.unwrap_or_default(),
            room_id: self.room_id,
        })
    }
}

fn validation_error(detail: String) -> DomainError {
    DomainError {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Validation(detail)),
    }
}
