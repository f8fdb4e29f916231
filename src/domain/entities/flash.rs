use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
}

/// One-shot notification attached to a redirect.
#[derive(Debug, Clone, Serialize)]
pub struct Flash {
    #[serde(rename = "type")]
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }
}

/// What a form submission answers with: where to go next and what to tell the user.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub redirect_to: String,
    pub flash: Flash,
}

impl ActionResponse {
    /// Success answer redirecting to `redirect_to`.
    pub fn success(id: Option<i64>, redirect_to: impl Into<String>, message: impl Into<String>) -> Self {
        ActionResponse {
            id,
            redirect_to: redirect_to.into(),
            flash: Flash::success(message),
        }
    }
}
