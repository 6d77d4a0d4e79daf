use std::sync::Arc;

use dotenvy::dotenv;
use shop_service::infrastructure::{DieselOrderRepository, DieselProductRepository, RedisCache};
use shop_service::{build_server, create_pool, create_redis_pool, run_migrations, AppConfig, AppState};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url)?;
    run_migrations(&pool)?;
    let redis = create_redis_pool(&config.redis_url)?;

    let state = AppState::new(
        Arc::new(DieselProductRepository::new(pool.clone())),
        Arc::new(DieselOrderRepository::new(pool)),
        Arc::new(RedisCache::new(redis)),
        config.cache.clone(),
        config.passcode,
    )?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, &config)?.await?;
    Ok(())
}
