use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;
use taskbounty::{
    config::Config,
    repo::{AlbumRepo, TaskRepo, UserRepo},
    routes,
    services::{AccountService, TaskService},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let accounts = AccountService::new(UserRepo::new(pool.clone()));
    let tasks = TaskService::new(UserRepo::new(pool.clone()), TaskRepo::new(pool.clone()));
    let albums = AlbumRepo::new(pool.clone());

    log::info!("Starting taskbounty server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(accounts.clone()))
            .app_data(web::Data::new(tasks.clone()))
            .app_data(web::Data::new(albums.clone()))
            .configure(routes::config)
    })
    .bind((config.server_host.clone(), config.server_port))?
    .run()
    .await
}
