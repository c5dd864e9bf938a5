/// Módulo de filtros de candidatos por vaga.
///
/// Los filtros se aplican sobre el roster completo para dejar sólo a quienes
/// pueden ser convocados a una vaga. Cada filtro es un predicado puro: el orden
/// en que se aplican no cambia el resultado.

use crate::algorithm::availability::is_available;
use crate::algorithm::state::RunState;
use crate::excel::normalize_text;
use crate::models::{Candidate, Slot};

/// Filtros que no dependen del estado de la corrida (categoría, municipio, disponibilidad).
/// Son los que se reaplican al derivar los no convocados.
pub fn base_filters<'a>(slot: &Slot, roster: &'a [Candidate]) -> Vec<&'a Candidate> {
    let municipio = normalize_text(&slot.municipality);

    roster
        .iter()
        // Filtro 1: alguna categoría requerida aparece en las categorías de la persona
        .filter(|c| matches_category(c, &slot.required_categories))
        // Filtro 2: nadie trabaja en su propio municipio
        .filter(|c| c.home_municipality != municipio)
        // Filtro 3: disponibilidad en la fecha
        .filter(|c| is_available(c, slot.date))
        .collect()
}

/// Aplica todos los filtros y retorna los candidatos elegibles para la vaga.
pub fn apply_all_filters<'a>(slot: &Slot, roster: &'a [Candidate], state: &RunState) -> Vec<&'a Candidate> {
    let municipio = normalize_text(&slot.municipality);
    let mut resultado = base_filters(slot, roster);

    // Filtro 4: ya convocado en otra vaga con la misma etiqueta de día
    resultado.retain(|c| !state.is_booked(&slot.weekday_label, &c.name));

    // Filtros 5 y 6 sólo con fecha legible
    if let Some(date) = slot.date {
        // Filtro 5: mismo municipio el día anterior
        resultado.retain(|c| !state.served_previous_day(&c.name, &municipio, date));
        // Filtro 6: mismo municipio en la misma semana
        resultado.retain(|c| !state.served_same_week(&c.name, &municipio, date));
    }

    resultado
}

/// Verdadero si algún token requerido es substring de las categorías de la persona.
pub fn matches_category(candidate: &Candidate, required: &[String]) -> bool {
    let categorias = normalize_text(&candidate.categories);
    required.iter().any(|token| categorias.contains(token.as_str()))
}
