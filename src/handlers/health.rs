use actix_web::{web, HttpResponse, Responder};
use log::warn;
use serde::Serialize;

use crate::db::Connection;

#[derive(Debug, Serialize)]
struct HealthResponse<'a> {
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// @notice: liveness probe, pings through the injected connection once per request
pub async fn health(connection: web::Data<Connection>) -> impl Responder {
    match connection.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: "ok",
            database: Some(connection.database_name()),
            error: None,
        }),
        Err(err) => {
            warn!("database ping failed: {}", err);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "unavailable",
                database: None,
                error: Some(err.to_string()),
            })
        }
    }
}
