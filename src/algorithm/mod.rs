// Módulo de alto nivel para la distribución de convocados
// Declarar submódulos (archivos en la carpeta `src/algorithm`)
pub mod availability;
pub mod fairness;
pub mod filters;
pub mod president;
pub mod state;
mod distribucion;

// Reexportar solo la API pública que se usa desde fuera
pub use availability::is_available;
pub use distribucion::{derive_not_called, run, run_with_rng};
pub use fairness::select_fair;
pub use filters::{apply_all_filters, base_filters, matches_category};
pub use president::assign_president;
pub use state::RunState;

use crate::excel::Planilha;
use crate::models::{RunOptions, RunOutput};
use rand::Rng;

/// Atajo para correr sobre una planilla ya leída.
pub fn distribuir_planilha<R: Rng + ?Sized>(planilha: &Planilha, options: RunOptions, rng: &mut R) -> RunOutput {
    run_with_rng(&planilha.candidates, &planilha.slots, options, rng)
}
