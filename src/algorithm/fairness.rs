use rand::seq::SliceRandom;
use rand::Rng;

use crate::algorithm::state::RunState;
use crate::models::Candidate;

/// Ordena por convocatorias ascendentes, baraja dentro de cada grupo con el mismo
/// conteo y devuelve los primeros `required`.
///
/// El barajado usa `rng`, así que con una semilla fija el resultado es reproducible.
pub fn select_fair<'a, R: Rng + ?Sized>(
    mut eligible: Vec<&'a Candidate>,
    required: usize,
    state: &RunState,
    rng: &mut R,
) -> Vec<&'a Candidate> {
    // sort estable: con la misma semilla, mismo orden de entrada => misma salida
    eligible.sort_by_key(|c| state.convocations(&c.name));

    for group in eligible.chunk_by_mut(|a, b| state.convocations(&a.name) == state.convocations(&b.name)) {
        group.shuffle(rng);
    }

    eligible.truncate(required);
    eligible
}
