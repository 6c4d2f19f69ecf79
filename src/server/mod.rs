pub mod html;
pub mod routes;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};

use crate::{config::Config, error::Result, ui::UiController};

/// Serves the page and JSON API until the server is stopped.
pub async fn run(config: &Config, controller: Arc<UiController>) -> Result<()> {
    let data = web::Data::from(controller);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Dms"))
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.bind_host().to_string(), config.bind_port()))?
    .run()
    .await?;

    Ok(())
}
