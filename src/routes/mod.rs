use actix_web::web;

use crate::handlers;

pub fn routes(cfg: &mut web::ServiceConfig) {
    // resource-level registration so other methods get 405, not 404
    cfg.service(web::resource("/health").route(web::get().to(handlers::health::health)));
}
