use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use ov_api::app::create_app;
use ov_api::logging::init_logging;
use ov_api::routes::organizations::AppState;
use ov_core::repositories::{
    InMemoryOrganizationRepository, InMemoryVerificationRecordRepository, OrganizationRepository,
    VerificationRecordRepository,
};
use ov_core::services::{
    Clock, OrganizationService, OtpService, OtpServiceConfig, SystemClock,
    VerificationCleanupConfig, VerificationCleanupService,
};
use ov_infra::database::{DatabasePool, MySqlOrganizationRepository, MySqlVerificationRecordRepository};
use ov_infra::email::{create_email_service, EmailService, EmailServiceAdapter};
use ov_shared::config::{AppConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_logging(&config.logging);
    config.validate().map_err(anyhow::Error::msg)?;

    info!(
        environment = %config.environment,
        storage = ?config.storage,
        event = "server_starting",
        "Starting OrgVerify API server"
    );

    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; all data is lost on restart");
            let records = Arc::new(InMemoryVerificationRecordRepository::new());
            let organizations = Arc::new(InMemoryOrganizationRepository::new());
            serve(config, records, organizations).await
        }
        StorageBackend::Mysql => {
            let pool = DatabasePool::new(&config.database)
                .await
                .context("failed to connect to MySQL")?;
            if config.database.run_migrations {
                pool.run_migrations().await.context("failed to run migrations")?;
            }
            let records = Arc::new(MySqlVerificationRecordRepository::new(pool.get_pool().clone()));
            let organizations = Arc::new(MySqlOrganizationRepository::new(pool.get_pool().clone()));
            let result = serve(config, records, organizations).await;
            pool.close().await;
            result
        }
    }
}

/// Wire the services over the chosen storage and run the HTTP server
async fn serve<V, O>(config: AppConfig, records: Arc<V>, organizations: Arc<O>) -> anyhow::Result<()>
where
    V: VerificationRecordRepository + 'static,
    O: OrganizationRepository + 'static,
{
    let provider = create_email_service(&config.email).context("failed to create email service")?;
    info!(provider = provider.provider_name(), "Email provider configured");
    let email_service = Arc::new(EmailServiceAdapter::new(provider, config.otp.expiry_seconds));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let otp_service = Arc::new(
        OtpService::new(
            records.clone(),
            organizations.clone(),
            email_service,
            OtpServiceConfig::from(&config.otp),
        )
        .with_clock(clock.clone()),
    );
    let organization_service = Arc::new(OrganizationService::new(organizations, otp_service.clone()));

    Arc::new(
        VerificationCleanupService::new(records, VerificationCleanupConfig::from(&config.otp))
            .with_clock(clock),
    )
    .start_background_task();

    let app_state = web::Data::new(AppState {
        otp_service,
        organization_service,
    });
    let allowed_origins = config.server.allowed_origins.clone();

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &allowed_origins))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");
    server.bind(&bind_address)?.run().await?;

    Ok(())
}
