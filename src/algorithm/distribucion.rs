// distribucion.rs - Orquestador de la distribución de convocados
//
// Para cada vaga, en el orden de la planilla:
//   1. filtros (categoría, municipio, disponibilidad, día ocupado, historial)
//   2. selección por menor número de convocatorias (empates barajados)
//   3. presidente
//   4. actualización del historial
// Luego se derivan los no convocados por vaga.
//
// El orden de las vagas NO se reordena por fecha: el historial se acumula en el
// orden de entrada y reordenar cambia el resultado.

use chrono::NaiveDate;
use rand::Rng;
use std::collections::{HashMap, HashSet};

use crate::algorithm::fairness::select_fair;
use crate::algorithm::filters::{apply_all_filters, base_filters};
use crate::algorithm::president::assign_president;
use crate::algorithm::state::RunState;
use crate::excel::normalize_text;
use crate::models::{
    AssignmentRecord, Candidate, NotCalledRecord, RunOptions, RunOutput, RunReport, SkipReason,
    SkippedSlot, Slot,
};

/// Ejecuta la distribución con aleatoriedad del sistema y opciones por defecto.
pub fn run(roster: &[Candidate], slots: &[Slot]) -> RunOutput {
    run_with_rng(roster, slots, RunOptions::default(), &mut rand::thread_rng())
}

/// Ejecuta la distribución con una fuente aleatoria inyectada.
pub fn run_with_rng<R: Rng + ?Sized>(
    roster: &[Candidate],
    slots: &[Slot],
    options: RunOptions,
    rng: &mut R,
) -> RunOutput {
    let mut state = RunState::new(roster);
    let mut called: Vec<AssignmentRecord> = Vec::new();
    let mut report = RunReport {
        slots_total: slots.len(),
        ..RunReport::default()
    };

    tracing::info!(candidatos = roster.len(), vagas = slots.len(), "iniciando distribución");

    for slot in slots {
        let Some(required) = slot.required_count else {
            skip(&mut report, slot, SkipReason::MalformedHeadcount);
            continue;
        };
        if slot.required_categories.is_empty() {
            skip(&mut report, slot, SkipReason::NoCategories);
            continue;
        }

        let elegibles = apply_all_filters(slot, roster, &state);
        if elegibles.is_empty() {
            skip(&mut report, slot, SkipReason::NoEligibleCandidates);
            continue;
        }
        let n_elegibles = elegibles.len();

        let seleccionados = select_fair(elegibles, required, &state, rng);
        let presidente = assign_president(&seleccionados, &mut state, options.president_reuse);

        let municipio = normalize_text(&slot.municipality);
        for c in &seleccionados {
            called.push(AssignmentRecord {
                weekday_label: slot.weekday_label.clone(),
                date: slot.date,
                municipality: slot.municipality.clone(),
                name: c.name.clone(),
                categories: c.categories.clone(),
                is_president: presidente.as_deref() == Some(c.name.as_str()),
            });
            state.record(&c.name, &municipio, slot.date);
        }
        state.book_weekday(&slot.weekday_label, seleccionados.iter().map(|c| c.name.as_str()));

        report.slots_filled += 1;
        tracing::debug!(
            row = slot.row,
            dia = %slot.weekday_label,
            municipio = %slot.municipality,
            elegibles = n_elegibles,
            convocados = seleccionados.len(),
            presidente = presidente.as_deref().unwrap_or("-"),
            "vaga resuelta"
        );
    }

    let not_called = derive_not_called(roster, slots, &called);

    report.assignments = called.len();
    report.convocations = state.convocation_summary();
    tracing::info!(
        convocados = called.len(),
        nao_convocados = not_called.len(),
        vagas_saltadas = report.skipped.len(),
        "distribución terminada"
    );

    RunOutput { called, not_called, report }
}

fn skip(report: &mut RunReport, slot: &Slot, reason: SkipReason) {
    tracing::warn!(row = slot.row, dia = %slot.weekday_label, municipio = %slot.municipality, ?reason, "vaga saltada");
    report.skipped.push(SkippedSlot {
        row: slot.row,
        weekday_label: slot.weekday_label.clone(),
        municipality: slot.municipality.clone(),
        reason,
    });
}

/// Para cada vaga, todo candidato que pasa los filtros base y no figura entre los
/// convocados de la misma (etiqueta, fecha). Sin pares (nombre, día) repetidos.
///
/// Las vagas con cantidad malformada también aportan no convocados: sólo se
/// omiten las que no tienen categorías.
pub fn derive_not_called(roster: &[Candidate], slots: &[Slot], called: &[AssignmentRecord]) -> Vec<NotCalledRecord> {
    let mut convocados: HashMap<(&str, Option<NaiveDate>), HashSet<&str>> = HashMap::new();
    for r in called {
        convocados
            .entry((r.weekday_label.as_str(), r.date))
            .or_default()
            .insert(r.name.as_str());
    }

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut out = Vec::new();
    for slot in slots {
        if slot.required_categories.is_empty() {
            continue;
        }
        let ya = convocados.get(&(slot.weekday_label.as_str(), slot.date));
        for c in base_filters(slot, roster) {
            if ya.is_some_and(|names| names.contains(c.name.as_str())) {
                continue;
            }
            if seen.insert((c.name.clone(), slot.weekday_label.clone())) {
                out.push(NotCalledRecord {
                    name: c.name.clone(),
                    weekday_label: slot.weekday_label.clone(),
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cand(name: &str, cats: &str, home: &str, preside: bool) -> Candidate {
        Candidate {
            name: name.into(),
            categories: cats.into(),
            home_municipality: home.into(),
            unavailable: false,
            unavailable_from: None,
            unavailable_until: None,
            can_preside: preside,
        }
    }

    fn d(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 6, day)
    }

    #[test]
    fn malformed_and_empty_slots_are_reported() {
        let roster = vec![cand("A", "X", "NITEROI", false)];
        let slots = vec![
            Slot::new(2, "SEGUNDA", d(2), "Rio", vec!["X".into()], None),
            Slot::new(3, "SEGUNDA", d(2), "Rio", vec![], Some(1)),
            Slot::new(4, "SEGUNDA", d(2), "Niterói", vec!["X".into()], Some(1)),
        ];
        let out = run_with_rng(&roster, &slots, RunOptions::default(), &mut StdRng::seed_from_u64(0));
        assert!(out.called.is_empty());
        let reasons: Vec<_> = out.report.skipped.iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![SkipReason::MalformedHeadcount, SkipReason::NoCategories, SkipReason::NoEligibleCandidates]
        );
        assert_eq!(out.report.slots_filled, 0);
        // la vaga malformada en Rio igual lista a A como no convocada
        assert_eq!(
            out.not_called,
            vec![NotCalledRecord { name: "A".into(), weekday_label: "SEGUNDA".into() }]
        );
    }

    #[test]
    fn malformed_slot_lists_every_eligible_as_not_called() {
        let roster = vec![cand("A", "X", "M1", false), cand("B", "X", "M1", false)];
        let slots = vec![Slot::new(1, "", d(3), "M2", vec!["X".into()], None)];
        let out = run_with_rng(&roster, &slots, RunOptions::default(), &mut StdRng::seed_from_u64(0));

        assert!(out.called.is_empty());
        assert_eq!(out.report.skipped[0].reason, SkipReason::MalformedHeadcount);
        let names: Vec<&str> = out.not_called.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(out.not_called.iter().all(|r| r.weekday_label == "TERCA"));
    }

    #[test]
    fn one_president_per_slot() {
        let roster = vec![
            cand("A", "X", "NITEROI", true),
            cand("B", "X", "NITEROI", true),
            cand("C", "X", "NITEROI", false),
        ];
        let slots = vec![Slot::new(2, "", d(2), "Rio", vec!["X".into()], Some(3))];
        let out = run_with_rng(&roster, &slots, RunOptions::default(), &mut StdRng::seed_from_u64(9));
        assert_eq!(out.called.len(), 3);
        assert_eq!(out.called.iter().filter(|r| r.is_president).count(), 1);
        let pres = out.called.iter().find(|r| r.is_president).unwrap();
        assert_ne!(pres.name, "C");
    }

    #[test]
    fn not_called_is_deduplicated_per_label() {
        let roster = vec![
            cand("A", "X", "NITEROI", false),
            cand("B", "X", "NITEROI", false),
        ];
        // dos vagas sin fecha con la misma etiqueta: B queda fuera de ambas una sola vez
        let slots = vec![
            Slot::new(2, "segunda", None, "Rio", vec!["X".into()], Some(1)),
            Slot::new(3, "segunda", None, "Rio", vec!["X".into()], Some(1)),
        ];
        let out = run_with_rng(&roster, &slots, RunOptions::default(), &mut StdRng::seed_from_u64(5));
        // la segunda vaga toma a quien no fue convocado en la primera
        assert_eq!(out.called.len(), 2);
        assert!(out.not_called.is_empty());

        let slots = vec![
            Slot::new(2, "segunda", d(2), "Rio", vec!["X".into()], Some(1)),
            Slot::new(3, "segunda", d(2), "Maricá", vec!["X".into()], None),
        ];
        let out = run_with_rng(&roster, &slots, RunOptions::default(), &mut StdRng::seed_from_u64(5));
        assert_eq!(out.called.len(), 1);
        assert_eq!(out.not_called.len(), 1);
        assert_ne!(out.not_called[0].name, out.called[0].name);
    }
}
