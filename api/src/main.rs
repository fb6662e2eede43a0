use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use rh_api::{config, create_app, AppState};
use rh_core::repositories::{InMemoryStore, ItemRepository, PaymentRepository, RentalRepository};
use rh_infra::{DatabasePool, MySqlItemRepository, MySqlPaymentRepository, MySqlRentalRepository};
use rh_shared::{AppConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load();
    config::init_tracing(&config.logging)?;
    config::check(&config)?;

    tracing::info!(
        environment = %config.environment,
        storage = ?config.storage,
        "Starting RentHub API Server"
    );

    match config.storage {
        StorageBackend::MySql => {
            let pool = DatabasePool::new(&config.database)
                .await
                .context("Failed to connect to the database")?;
            let db = pool.get_pool().clone();
            let state = AppState::new(
                Arc::new(MySqlItemRepository::new(db.clone())),
                Arc::new(MySqlRentalRepository::new(db.clone())),
                Arc::new(MySqlPaymentRepository::new(db)),
            );
            let result = serve(state, config).await;
            pool.close().await;
            result
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            let store = InMemoryStore::new();
            let state = AppState::new(
                Arc::new(store.items()),
                Arc::new(store.rentals()),
                Arc::new(store.payments()),
            );
            serve(state, config).await
        }
    }
}

async fn serve<I, R, P>(state: AppState<I, R, P>, config: AppConfig) -> anyhow::Result<()>
where
    I: ItemRepository + 'static,
    R: RentalRepository + 'static,
    P: PaymentRepository + 'static,
{
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let state = web::Data::new(state);

    let mut server = HttpServer::new(move || create_app(state.clone(), &config));
    if workers > 0 {
        server = server.workers(workers);
    }

    tracing::info!(address = %bind_address, "Server listening");
    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server error")
}
