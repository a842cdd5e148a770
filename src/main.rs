use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing::{error, info};

use clicklens::analytics::ClickManager;
use clicklens::api::services::{api_routes, redirect_routes};
use clicklens::config;
use clicklens::storage::SeaOrmStorage;
use clicklens::system::init_logging;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    // 配置错误（缺失 DATABASE_URL）直接退出，不降级启动
    let config = config::init_config();
    if let Err(e) = config.validate() {
        eprintln!("[FATAL] {}", e);
        std::process::exit(1);
    }

    let _log_guard = init_logging(config);

    let storage = match SeaOrmStorage::new(&config.database.database_url).await {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            std::process::exit(1);
        }
    };
    info!("ClickLens database connected");

    let click_manager = ClickManager::new(
        storage.as_click_sink(),
        Duration::from_secs(config.analytics.flush_interval_secs),
        config.analytics.max_buffered_events,
    );

    // 后台定期刷盘
    let background_manager = click_manager.clone();
    tokio::spawn(async move {
        background_manager.start_background_task().await;
    });

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("ClickLens running on http://{}", bind_address);

    let storage_data = web::Data::new(storage);
    let clicks_data = web::Data::new(click_manager.clone());

    HttpServer::new(move || {
        App::new()
            .app_data(storage_data.clone())
            .app_data(clicks_data.clone())
            .wrap(Cors::permissive())
            .service(api_routes())
            .service(redirect_routes())
    })
    .bind(&bind_address)?
    .run()
    .await?;

    // 服务器退出后，把缓冲区里尚未落库的点击事件刷掉
    info!("Server stopped, flushing buffered click events");
    click_manager.flush().await;

    Ok(())
}
