use std::path::Path;

use actix_web::{App, HttpServer, web};

use streamcompare::models::config::ServerConfig;
use streamcompare::repository::csv::CsvCatalog;
use streamcompare::routes::api::{api_best_combination, api_compare, api_filter, api_search};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ServerConfig::load().map_err(std::io::Error::other)?;
    let catalog = CsvCatalog::load(Path::new(&config.data_dir))
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    log::info!(
        "catalog loaded: {} packages, {} games",
        catalog.package_count(),
        catalog.game_count()
    );

    let bind = (config.bind_address.clone(), config.port);
    let catalog = web::Data::new(catalog);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(catalog.clone())
            .app_data(config.clone())
            .service(
                web::scope("/api")
                    .service(api_search)
                    .service(api_filter)
                    .service(api_compare)
                    .service(api_best_combination),
            )
    })
    .bind(bind)?
    .run()
    .await
}
