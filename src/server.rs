use actix_web::{web, App, HttpServer};

use crate::config::AppConfig;
use crate::server_handlers::{distribuir_json_handler, distribuir_resumen_handler, distribuir_xlsx_handler, help_handler};

/// Registra las rutas del servicio. Se usa tanto en `run_server` como en los tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/distribuir", web::post().to(distribuir_xlsx_handler))
        .route("/distribuir/resumen", web::post().to(distribuir_resumen_handler))
        .route("/distribuir/json", web::post().to(distribuir_json_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let bind_addr = config.bind.clone();
    let json_limit = config.max_upload_bytes;
    let data = web::Data::new(config);

    tracing::info!(bind = %bind_addr, "iniciando servidor");
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(web::JsonConfig::default().limit(json_limit))
            .configure(configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
