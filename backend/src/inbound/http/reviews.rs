//! Review submission handler.
//!
//! ```text
//! POST /query6/insertReview {"name":"Ann","password":"pw","email":"a@x","mediaID":7,"review":"Great","score":9}
//! ```

use actix_web::{post, web};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, NumericInput, ReviewSubmission, ReviewSummary, SubmissionDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Plain-text body returned for malformed JSON.
pub const INVALID_JSON_BODY: &str = "Invalid JSON body";

/// Number sent either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl From<NumericValue> for NumericInput {
    fn from(value: NumericValue) -> Self {
        match value {
            NumericValue::Integer(value) => Self::Integer(value),
            NumericValue::Decimal(value) => Self::Decimal(value),
            NumericValue::Text(value) => Self::Text(value),
        }
    }
}

/// Request body for `POST /query6/insertReview`.
///
/// Every field is optional at the JSON level so the handler can report the
/// first missing required field by name.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct InsertReviewRequest {
    #[schema(example = "Ann")]
    pub name: Option<String>,
    #[schema(example = "pw")]
    pub password: Option<String>,
    #[schema(example = "ann@example.com")]
    pub email: Option<String>,
    #[serde(rename = "profileImage")]
    pub profile_image: Option<String>,
    pub description: Option<String>,
    /// Integer or numeric string.
    #[serde(rename = "mediaID")]
    #[schema(value_type = Option<i64>, example = 7)]
    pub media_id: Option<NumericValue>,
    #[schema(example = "Great")]
    pub review: Option<String>,
    /// Integer or numeric string in `1..=10`.
    #[schema(value_type = Option<i64>, example = 9)]
    pub score: Option<NumericValue>,
}

impl From<InsertReviewRequest> for SubmissionDraft {
    fn from(request: InsertReviewRequest) -> Self {
        Self {
            name: request.name,
            password: request.password,
            email: request.email,
            profile_image: request.profile_image,
            description: request.description,
            media_id: request.media_id.map(NumericInput::from),
            review: request.review,
            score: request.score.map(NumericInput::from),
        }
    }
}

/// JSON extractor configuration answering malformed bodies with
/// [`INVALID_JSON_BODY`].
///
/// The content type is not enforced; any body that parses as the request
/// object is accepted.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            debug!(error = %err, "rejecting malformed JSON body");
            Error::invalid_request(INVALID_JSON_BODY).into()
        })
}

/// Create a user and their review in one transaction.
///
/// Responds with the joined summary: the new user's name, the review text,
/// the media title and the freshly computed average score for the media.
#[utoipa::path(
    post,
    path = "/query6/insertReview",
    request_body = InsertReviewRequest,
    responses(
        (status = 200, description = "Review stored", body = ReviewSummary),
        (status = 400, description = "Missing or malformed field", body = String, content_type = "text/plain"),
        (status = 500, description = "Transaction stage that failed", body = String, content_type = "text/plain")
    ),
    tags = ["reviews"],
    operation_id = "insertReview"
)]
#[post("/query6/insertReview")]
pub async fn insert_review(
    state: web::Data<HttpState>,
    payload: web::Json<InsertReviewRequest>,
) -> ApiResult<web::Json<ReviewSummary>> {
    let submission = ReviewSubmission::try_from(SubmissionDraft::from(payload.into_inner()))
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let summary = state.review_submission.submit_review(submission).await?;
    Ok(web::Json(summary))
}
