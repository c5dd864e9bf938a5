// Biblioteca raíz del crate `distribuidor`.
// Reexporta el motor de distribución, la lectura/escritura de planillas
// y el servidor HTTP que usa `main`.
pub mod algorithm;
pub mod api_json;
pub mod config;
pub mod error;
pub mod excel;
pub mod logging;
pub mod models;
pub mod server;
pub mod server_handlers;

pub use algorithm::{derive_not_called, distribuir_planilha, run, run_with_rng, RunState};
pub use config::AppConfig;
pub use error::{DistribucionError, Result};
pub use excel::{leer_planilha, leer_planilha_bytes, output_file_name, write_workbook, Planilha};
pub use models::{AssignmentRecord, Candidate, NotCalledRecord, RunOptions, RunOutput, RunReport, Slot};

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
