use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCommentPayload {
    #[validate(length(min = 1, message = "comment text is required"))]
    #[serde(default)]
    pub text: String,
}

impl CreateCommentPayload {
    /// Whitespace-only text counts as empty.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
