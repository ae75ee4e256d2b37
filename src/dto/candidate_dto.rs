use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::candidate::NewCandidate;
use crate::utils::tags::{find_unstorable_tag, parse_tag_input};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    pub email: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateCandidatePayload {
    /// Trims every field and turns blank optionals into `None`, so that a
    /// whitespace-only name or phone fails validation.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: non_blank(self.email),
            position: non_blank(self.position),
            experience: non_blank(self.experience),
            education: non_blank(self.education),
            status: non_blank(self.status),
            tags: self
                .tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Validates and converts into the storage input.
    pub fn into_new_candidate(self) -> Result<NewCandidate> {
        let payload = self.normalized();
        payload.validate()?;
        if let Some(tag) = find_unstorable_tag(&payload.tags) {
            return Err(Error::BadRequest(format!(
                "Tag '{}' must not contain a comma",
                tag
            )));
        }

        Ok(NewCandidate {
            name: payload.name,
            phone: payload.phone,
            email: payload.email,
            position: payload.position,
            experience: payload.experience,
            education: payload.education,
            status: payload.status,
            tags: payload.tags,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The HTML create form; tags arrive as one comma separated text box.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub position: String,
    pub experience: String,
    pub education: String,
    pub status: String,
    pub tags: String,
}

impl From<CandidateForm> for CreateCandidatePayload {
    fn from(form: CandidateForm) -> Self {
        Self {
            name: form.name,
            phone: form.phone,
            email: Some(form.email),
            position: Some(form.position),
            experience: Some(form.experience),
            education: Some(form.education),
            status: Some(form.status),
            tags: parse_tag_input(&form.tags),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Matches name or position as a substring, or a whole tag.
    pub keyword: Option<String>,
}
