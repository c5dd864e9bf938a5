use std::env;

use crate::error::{DistribucionError, Result};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 10;

/// Configuración del servicio. Se lee de variables de entorno (y `.env`);
/// los flags de la CLI pisan estos valores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind: String,
    pub max_upload_bytes: usize,
    /// Reutilizar presidentes cuando no hay uno nuevo en la vaga.
    pub president_reuse: bool,
    /// Nivel de log (`info`, `debug`, ...) o filtro completo de `EnvFilter`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            president_reuse: true,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Carga `.env` si existe y luego lee `DISTRIBUIDOR_*`.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Versión parametrizable para pruebas: recibe la función que resuelve cada variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();

        if let Some(bind) = lookup("DISTRIBUIDOR_BIND").filter(|s| !s.trim().is_empty()) {
            cfg.bind = bind.trim().to_string();
        }

        if let Some(mb) = lookup("DISTRIBUIDOR_MAX_UPLOAD_MB") {
            let parsed = mb
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid("DISTRIBUIDOR_MAX_UPLOAD_MB", &mb))?;
            cfg.max_upload_bytes = parsed * 1024 * 1024;
        }

        if let Some(v) = lookup("DISTRIBUIDOR_PRESIDENT_REUSE") {
            cfg.president_reuse = parse_bool(&v).ok_or_else(|| invalid("DISTRIBUIDOR_PRESIDENT_REUSE", &v))?;
        }

        if let Some(level) = lookup("DISTRIBUIDOR_LOG").filter(|s| !s.trim().is_empty()) {
            cfg.log_level = level.trim().to_string();
        }

        Ok(cfg)
    }
}

fn invalid(key: &str, value: &str) -> DistribucionError {
    DistribucionError::InvalidConfig { key: key.to_string(), value: value.to_string() }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "sim" | "si" | "on" => Some(true),
        "0" | "false" | "no" | "nao" | "não" | "off" => Some(false),
        _ => None,
    }
}
