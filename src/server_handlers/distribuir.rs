use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::stream::StreamExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::sync::{Arc, OnceLock};
use tokio::sync::Semaphore;

use crate::algorithm::{distribuir_planilha, run_with_rng};
use crate::api_json::{DistribucionResponse, DistribucionRequest};
use crate::config::AppConfig;
use crate::error::DistribucionError;
use crate::excel::{leer_planilha_bytes, output_file_name, workbook_bytes};
use crate::models::{RunOptions, RunOutput};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Limita las corridas simultáneas a la cantidad de CPUs.
fn run_semaphore() -> Arc<Semaphore> {
    static GLOBAL_SEM: OnceLock<Arc<Semaphore>> = OnceLock::new();
    GLOBAL_SEM
        .get_or_init(|| Arc::new(Semaphore::new(std::cmp::max(1, num_cpus::get()))))
        .clone()
}

fn error_response(e: &DistribucionError) -> HttpResponse {
    if e.is_input_error() {
        HttpResponse::BadRequest().json(json!({"error": e.to_string()}))
    } else {
        tracing::error!(error = %e, "fallo interno en la distribución");
        HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
    }
}

/// Corre `job` en el pool bloqueante con un permiso del semáforo.
/// Cada corrida crea su propio estado, así que las subidas concurrentes no se mezclan.
async fn run_blocking<T, F>(job: F) -> Result<T, HttpResponse>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, DistribucionError> + Send + 'static,
{
    let permit = match run_semaphore().acquire_owned().await {
        Ok(p) => p,
        Err(_) => return Err(HttpResponse::InternalServerError().json(json!({"error": "failed to acquire semaphore"}))),
    };

    let handle = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        job()
    });

    match handle.await {
        Ok(Ok(v)) => Ok(v),
        Ok(Err(e)) => Err(error_response(&e)),
        Err(e) => Err(HttpResponse::InternalServerError().json(json!({"error": format!("task join error: {}", e)}))),
    }
}

/// Lee el primer archivo del multipart respetando el límite de tamaño.
async fn read_upload(mut payload: Multipart, max_bytes: usize) -> Result<Vec<u8>, HttpResponse> {
    while let Some(field_res) = payload.next().await {
        let mut field = match field_res {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(error = %e, "multipart field error");
                return Err(HttpResponse::BadRequest().json(json!({"error": format!("multipart error: {}", e)})));
            }
        };

        let filename = field.content_disposition().get_filename().map(|s| s.to_string());
        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(data) => {
                    if bytes.len() + data.len() > max_bytes {
                        return Err(HttpResponse::PayloadTooLarge()
                            .json(json!({"error": format!("archivo mayor a {} bytes", max_bytes)})));
                    }
                    bytes.extend_from_slice(&data);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "upload stream error");
                    return Err(HttpResponse::BadRequest().json(json!({"error": format!("upload error: {}", e)})));
                }
            }
        }

        if bytes.is_empty() {
            continue;
        }
        tracing::info!(archivo = filename.as_deref().unwrap_or("-"), bytes = bytes.len(), "planilla recibida");
        return Ok(bytes);
    }

    Err(HttpResponse::BadRequest().json(json!({"error": "se esperaba un archivo .xlsx en el multipart"})))
}

fn upload_run(bytes: Vec<u8>, options: RunOptions) -> Result<RunOutput, DistribucionError> {
    let planilha = leer_planilha_bytes(bytes)?;
    Ok(distribuir_planilha(&planilha, options, &mut rand::thread_rng()))
}

fn options_from(cfg: &AppConfig) -> RunOptions {
    RunOptions { president_reuse: cfg.president_reuse }
}

/// POST /distribuir
/// Recibe la planilla y devuelve el libro con "Convocados" y "Nao Convocados".
pub async fn distribuir_xlsx_handler(cfg: web::Data<AppConfig>, payload: Multipart) -> impl Responder {
    let bytes = match read_upload(payload, cfg.max_upload_bytes).await {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let options = options_from(&cfg);

    let result = run_blocking(move || {
        let output = upload_run(bytes, options)?;
        workbook_bytes(&output.called, &output.not_called)
    })
    .await;

    match result {
        Ok(xlsx) => {
            let name = output_file_name(chrono::Local::now().date_naive());
            HttpResponse::Ok()
                .content_type(XLSX_MIME)
                .append_header((actix_web::http::header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", name)))
                .body(xlsx)
        }
        Err(resp) => resp,
    }
}

/// POST /distribuir/resumen
/// Igual que /distribuir pero responde las dos tablas y el resumen en JSON.
pub async fn distribuir_resumen_handler(cfg: web::Data<AppConfig>, payload: Multipart) -> impl Responder {
    let bytes = match read_upload(payload, cfg.max_upload_bytes).await {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let options = options_from(&cfg);

    match run_blocking(move || upload_run(bytes, options)).await {
        Ok(output) => {
            let name = output_file_name(chrono::Local::now().date_naive());
            HttpResponse::Ok().json(DistribucionResponse::from_output(&output, name))
        }
        Err(resp) => resp,
    }
}

/// POST /distribuir/json
/// Pedido y respuesta en JSON (ver `DistribucionRequest`).
pub async fn distribuir_json_handler(cfg: web::Data<AppConfig>, body: web::Json<serde_json::Value>) -> impl Responder {
    let req: DistribucionRequest = match serde_json::from_value(body.into_inner()) {
        Ok(r) => r,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("failed to parse input: {}", e)})),
    };
    let mut options = req.options();
    if req.opciones.is_none() {
        options = options_from(&cfg);
    }

    let result = run_blocking(move || {
        let planilha = req.to_planilha();
        let output = match req.seed {
            Some(seed) => run_with_rng(&planilha.candidates, &planilha.slots, options, &mut StdRng::seed_from_u64(seed)),
            None => run_with_rng(&planilha.candidates, &planilha.slots, options, &mut rand::thread_rng()),
        };
        Ok(output)
    })
    .await;

    match result {
        Ok(output) => {
            let name = output_file_name(chrono::Local::now().date_naive());
            HttpResponse::Ok().json(DistribucionResponse::from_output(&output, name))
        }
        Err(resp) => resp,
    }
}
