use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use edumath_server::{
    app_state::AppState, config::Config, graphql::create_schema, handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();

    if config.is_production() {
        if let Err(e) = config.validate_for_production() {
            log::error!("Refusing to start: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config).await.map_err(|e| {
        log::error!("Failed to initialise application state: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    let schema = create_schema(state.clone());

    log::info!("Starting HTTP server on {}:{}", host, port);
    log::info!("GraphQL playground: http://{}:{}/graphql", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
