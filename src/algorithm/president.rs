use crate::algorithm::state::RunState;
use crate::models::Candidate;

/// Elige a lo sumo un presidente entre los seleccionados de la vaga.
///
/// Preferencia: el primero (en el orden de selección) que pueda presidir y que
/// todavía no haya presidido en esta corrida. Si todos ya presidieron y
/// `allow_reuse` está activo, se repite el primero que pueda presidir.
pub fn assign_president(selected: &[&Candidate], state: &mut RunState, allow_reuse: bool) -> Option<String> {
    let mut presidentes = selected.iter().filter(|c| c.can_preside).peekable();
    let first = presidentes.peek().map(|c| c.name.clone())?;

    if let Some(fresh) = presidentes.find(|c| !state.president_used(&c.name)) {
        state.mark_president(&fresh.name);
        return Some(fresh.name.clone());
    }

    if allow_reuse {
        tracing::debug!(presidente = %first, "sin presidentes nuevos en la vaga, se repite uno ya usado");
        Some(first)
    } else {
        None
    }
}
