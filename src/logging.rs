//! Inicialización de tracing para el binario y los tests de integración.

use tracing_subscriber::{fmt, EnvFilter};

/// Filtro por defecto: nuestro crate al nivel pedido, actix en `warn`.
/// Si `level` ya es un filtro completo (`debug,actix_web=info`) se usa tal cual.
pub fn default_filter(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    format!("distribuidor={level},actix_web=warn,actix_server=warn")
}

/// Inicializa el subscriber global. `RUST_LOG` tiene prioridad sobre `filter`.
/// Llamarlo más de una vez no hace nada (útil en tests).
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
