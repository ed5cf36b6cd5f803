pub mod analytics_response;
pub mod create_interaction_request;
pub mod create_interaction_response;
pub mod error_message_response;
pub mod favourites_response;
pub mod health_response;
pub mod interaction;
pub mod message_response;
pub mod post_interactions_response;
pub mod tracking_level;
pub mod user_data_response;

pub use self::analytics_response::AnalyticsResponse;
pub use self::create_interaction_request::CreateInteractionRequest;
pub use self::create_interaction_response::CreateInteractionResponse;
pub use self::error_message_response::ErrorMessageResponse;
pub use self::favourites_response::{Favourite, FavouritesResponse};
pub use self::health_response::HealthResponse;
pub use self::interaction::{Interaction, InteractionWrite};
pub use self::message_response::MessageResponse;
pub use self::post_interactions_response::{PostInteraction, PostInteractionsResponse};
pub use self::tracking_level::{PrivacySetting, TrackingLevel};
pub use self::user_data_response::{UserDataResponse, UserInteraction};
