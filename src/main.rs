use std::io;

use store_console::{build_server, create_pool, run_migrations, AppState, Settings};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings =
        Settings::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let pool = create_pool(&settings.database_url).map_err(io::Error::other)?;
    let applied = run_migrations(&pool).map_err(io::Error::other)?;
    log::info!("Applied {} pending migration(s)", applied);

    log::info!("Starting server at http://{}:{}", settings.host, settings.port);

    let state = AppState::with_pool(pool, &settings);
    build_server(state, &settings.host, settings.port)?.await
}
