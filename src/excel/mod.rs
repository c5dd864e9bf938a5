//! Módulo `excel`: adaptadores de entrada y salida en planilla.
//!
//! Submódulos:
//! - `io`: helpers para lectura de celdas, normalización de texto y fechas
//! - `planilha`: lectura de la planilla de distribución (personas + vagas)
//! - `writer`: escritura del libro con las hojas de convocados y no convocados

/// Helpers de IO y utilidades para parsing de Excel
pub mod io;

/// Lectura de la planilla: `leer_planilha`, `leer_planilha_bytes`
pub mod planilha;

/// Escritura del resultado: `write_workbook`, `workbook_bytes`
pub mod writer;

pub use io::{normalize_header, normalize_text, parse_date_dayfirst, parse_flag, parse_headcount};
pub use planilha::{leer_planilha, leer_planilha_bytes, Planilha};
pub use writer::{output_file_name, workbook_bytes, write_workbook};
