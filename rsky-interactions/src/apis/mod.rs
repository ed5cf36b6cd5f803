use crate::error::InteractionError;
use crate::ledger::InteractionLedger;
use crate::models::*;
use rocket::http::Status;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::{Request, State};

const MISSING_FIELDS: &str = "Missing required fields";

#[derive(Clone, Debug, PartialEq)]
pub enum ApiError {
    /// 400, `{"error": ..}`
    BadRequest(String),
    /// 404, `{"message": ..}`. An empty read is not a fault.
    NotFound(String),
    /// 500 with an opaque body; details are logged where the error happens.
    RuntimeError,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(error) => write!(f, "BadRequest: {}", error),
            ApiError::NotFound(message) => write!(f, "NotFound: {}", message),
            ApiError::RuntimeError => write!(f, "InternalServerError: Internal error"),
        }
    }
}

impl From<InteractionError> for ApiError {
    fn from(error: InteractionError) -> Self {
        match error {
            InteractionError::Validation(fields) => {
                tracing::warn!("Validation failed: {fields}");
                ApiError::BadRequest(MISSING_FIELDS.to_string())
            }
            InteractionError::Storage(error) => {
                tracing::error!("Storage error: {error}");
                ApiError::RuntimeError
            }
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        match self {
            ApiError::BadRequest(error) => {
                let body = ErrorMessageResponse {
                    error,
                    message: None,
                };
                status::Custom(Status::BadRequest, Json(body)).respond_to(req)
            }
            ApiError::NotFound(message) => {
                let body = MessageResponse { message };
                status::Custom(Status::NotFound, Json(body)).respond_to(req)
            }
            ApiError::RuntimeError => {
                let body = ErrorMessageResponse {
                    error: "Internal error".to_string(),
                    message: None,
                };
                status::Custom(Status::InternalServerError, Json(body)).respond_to(req)
            }
        }
    }
}

#[rocket::get("/")]
pub async fn index() -> &'static str {
    "ITS ALIVE"
}

#[tracing::instrument(skip_all)]
#[rocket::get("/health")]
pub async fn health(ledger: &State<InteractionLedger>) -> status::Custom<Json<HealthResponse>> {
    match ledger.health().await {
        Ok(()) => status::Custom(Status::Ok, Json(HealthResponse::healthy())),
        Err(error) => {
            tracing::error!("Health check failed: {error}");
            status::Custom(
                Status::InternalServerError,
                Json(HealthResponse::unhealthy(error.to_string())),
            )
        }
    }
}

#[tracing::instrument(skip_all)]
#[rocket::post("/interactions", data = "<body>")]
pub async fn log_interaction(
    body: Json<CreateInteractionRequest>,
    ledger: &State<InteractionLedger>,
) -> Result<status::Custom<Json<CreateInteractionResponse>>, ApiError> {
    tracing::info!("Received request to /interactions");
    let body = body.into_inner();
    tracing::debug!("Parsed JSON data: {body:?}");

    let (Some(user_id), Some(post_id), Some(action_type)) =
        (body.user_id, body.post_id, body.action_type)
    else {
        tracing::warn!("Missing required fields");
        return Err(ApiError::BadRequest(MISSING_FIELDS.to_string()));
    };

    let id = ledger
        .record(&user_id, &post_id, &action_type, body.context)
        .await?;

    Ok(status::Custom(
        Status::Created,
        Json(CreateInteractionResponse {
            message: "Interaction logged successfully".to_string(),
            id,
        }),
    ))
}

#[tracing::instrument(skip_all)]
#[rocket::get("/interactions/favourites?<user_id>")]
pub async fn get_favourites(
    user_id: Option<&str>,
    ledger: &State<InteractionLedger>,
) -> Result<Json<FavouritesResponse>, ApiError> {
    let user_id = match user_id {
        Some(user_id) if !user_id.is_empty() => user_id,
        _ => return Err(ApiError::BadRequest("Missing user_id".to_string())),
    };

    let favourites = ledger.favourites_for_user(user_id).await?;
    if favourites.is_empty() {
        return Err(ApiError::NotFound("No favourites found".to_string()));
    }

    Ok(Json(FavouritesResponse {
        user_id: user_id.to_string(),
        favourites: favourites.into_iter().map(Favourite::from).collect(),
    }))
}

#[tracing::instrument(skip_all)]
#[rocket::get("/interactions/analytics?<feed_id>")]
pub async fn get_analytics(
    feed_id: Option<&str>,
    ledger: &State<InteractionLedger>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let stats = ledger.feed_stats(feed_id).await?;
    Ok(Json(AnalyticsResponse {
        feed_id: feed_id.map(String::from),
        stats,
    }))
}

#[tracing::instrument(skip_all)]
#[rocket::get("/interactions/<post_id>")]
pub async fn get_interactions_by_post(
    post_id: &str,
    ledger: &State<InteractionLedger>,
) -> Result<Json<PostInteractionsResponse>, ApiError> {
    let interactions = ledger.interactions_for_post(post_id).await?;
    if interactions.is_empty() {
        return Err(ApiError::NotFound("No interactions found".to_string()));
    }

    Ok(Json(PostInteractionsResponse {
        post_id: post_id.to_string(),
        interactions: interactions.into_iter().map(PostInteraction::from).collect(),
    }))
}

#[tracing::instrument(skip_all)]
#[rocket::get("/user_data/<user_id>")]
pub async fn get_user_data(
    user_id: &str,
    ledger: &State<InteractionLedger>,
) -> Result<Json<UserDataResponse>, ApiError> {
    let interactions = ledger.interactions_for_user(user_id).await?;
    if interactions.is_empty() {
        return Err(ApiError::NotFound("No data found for this user".to_string()));
    }

    Ok(Json(UserDataResponse {
        user_id: user_id.to_string(),
        interactions: interactions.into_iter().map(UserInteraction::from).collect(),
    }))
}
