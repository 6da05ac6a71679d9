use std::sync::Arc;

use common::storage::{BlobStore, filesystem::FilesystemBlobStore, s3::S3BlobStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::config::{AppConfig, StorageBackend};
use server::state::AppState;
use server::{database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    seed::seed_contact_info(&db)
        .await
        .map_err(|e| anyhow::anyhow!("contact info seeding failed: {e:?}"))?;
    seed::seed_default_admin(&db, &config.auth)
        .await
        .map_err(|e| anyhow::anyhow!("admin seeding failed: {e:?}"))?;

    let blob_store = build_blob_store(&config).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        blob_store,
        config,
    };

    let app = server::build_router(state);

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_blob_store(config: &AppConfig) -> anyhow::Result<Arc<dyn BlobStore>> {
    let storage = &config.storage;
    match storage.backend {
        StorageBackend::Filesystem => {
            let store = FilesystemBlobStore::new(storage.root.clone(), storage.max_blob_size)
                .await
                .map_err(|e| anyhow::anyhow!("filesystem blob store init failed: {e}"))?;
            info!("Media storage: filesystem at {}", storage.root.display());
            Ok(Arc::new(store))
        }
        StorageBackend::S3 => {
            let s3 = storage
                .s3
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("storage.backend = \"s3\" requires [storage.s3]"))?;
            let store = S3BlobStore::new(
                &s3.bucket,
                &s3.region,
                &s3.endpoint,
                &s3.access_key,
                &s3.secret_key,
                &s3.prefix,
                storage.max_blob_size,
            )
            .map_err(|e| anyhow::anyhow!("s3 blob store init failed: {e}"))?;
            info!("Media storage: s3 bucket '{}'", s3.bucket);
            Ok(Arc::new(store))
        }
    }
}
