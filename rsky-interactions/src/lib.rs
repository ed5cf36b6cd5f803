#[macro_use]
extern crate serde_derive;

extern crate serde;
extern crate serde_json;

pub mod action;
pub mod apis;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod pseudonym;
pub mod storage;

use crate::ledger::InteractionLedger;
use crate::models::ErrorMessageResponse;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::serde::json::Json;
use rocket::{catch, catchers, options, routes, Build, Request, Response, Rocket};

pub struct CORS;

#[catch(404)]
async fn not_found() -> Json<ErrorMessageResponse> {
    Json(ErrorMessageResponse {
        error: "NotFound".to_string(),
        message: Some("Not Found".to_string()),
    })
}

#[catch(422)]
async fn unprocessable_entity() -> Json<ErrorMessageResponse> {
    Json(ErrorMessageResponse {
        error: "InvalidRequest".to_string(),
        message: Some(
            "The request was well-formed but was unable to be followed due to semantic errors."
                .to_string(),
        ),
    })
}

#[catch(400)]
async fn bad_request() -> Json<ErrorMessageResponse> {
    Json(ErrorMessageResponse {
        error: "InvalidRequest".to_string(),
        message: Some("The request was improperly formed.".to_string()),
    })
}

#[catch(default)]
async fn default_catcher() -> Json<ErrorMessageResponse> {
    Json(ErrorMessageResponse {
        error: "InternalServerError".to_string(),
        message: Some("Internal error.".to_string()),
    })
}

/// Catches all OPTION requests in order to get the CORS related Fairing triggered.
#[options("/<_..>")]
async fn all_options() {
    /* Intentionally left empty */
}

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

/// Assemble the HTTP service around an already constructed ledger.
pub fn build_rocket(ledger: InteractionLedger, port: u16) -> Rocket<Build> {
    let figment = rocket::Config::figment().merge(("port", port));

    rocket::custom(figment)
        .mount(
            "/",
            routes![
                apis::index,
                apis::health,
                apis::log_interaction,
                apis::get_favourites,
                apis::get_analytics,
                apis::get_interactions_by_post,
                apis::get_user_data,
                all_options
            ],
        )
        .register(
            "/",
            catchers![default_catcher, unprocessable_entity, bad_request, not_found],
        )
        .attach(CORS)
        .manage(ledger)
}
