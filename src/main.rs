use std::process::ExitCode;

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use mongo_bootstrap::{init_database, routes, BootstrapError, Settings};

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run() -> Result<(), BootstrapError> {
    let settings = Settings::from_env()?;
    let connection = web::Data::new(init_database(&settings).await?);

    info!("listening on {}", settings.bind_addr());
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(connection.clone())
            .configure(routes::routes)
    })
    .bind(settings.bind_addr())?
    .run()
    .await?;

    Ok(())
}
