pub mod distribuir;
pub mod docs;

pub use distribuir::{distribuir_json_handler, distribuir_resumen_handler, distribuir_xlsx_handler};
pub use docs::help_handler;
