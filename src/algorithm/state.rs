//! Estado de una corrida: conteo de convocatorias e historial por persona.
//!
//! Vive sólo durante una llamada a `run`; dos corridas nunca comparten estado.

use chrono::{Datelike, Days, NaiveDate};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::Candidate;

#[derive(Debug, Clone, Default)]
pub struct RunState {
    convocation_count: HashMap<String, usize>,
    /// (municipio normalizado, fecha) en orden de procesamiento.
    municipality_history: HashMap<String, Vec<(String, Option<NaiveDate>)>>,
    weekday_booked: HashMap<String, HashSet<String>>,
    presidents_used: HashSet<String>,
}

impl RunState {
    /// Estado inicial: todos los nombres del roster con 0 convocatorias.
    pub fn new(roster: &[Candidate]) -> Self {
        let mut state = RunState::default();
        for c in roster {
            state.convocation_count.entry(c.name.clone()).or_insert(0);
            state.municipality_history.entry(c.name.clone()).or_default();
        }
        state
    }

    pub fn convocations(&self, name: &str) -> usize {
        self.convocation_count.get(name).copied().unwrap_or(0)
    }

    pub fn history(&self, name: &str) -> &[(String, Option<NaiveDate>)] {
        self.municipality_history.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Registra una convocatoria: suma 1 al conteo y agrega (municipio, fecha) al historial.
    pub fn record(&mut self, name: &str, municipality: &str, date: Option<NaiveDate>) {
        *self.convocation_count.entry(name.to_string()).or_insert(0) += 1;
        self.municipality_history
            .entry(name.to_string())
            .or_default()
            .push((municipality.to_string(), date));
    }

    /// Marca a los seleccionados como ocupados en la etiqueta de día.
    pub fn book_weekday<'a, I>(&mut self, label: &str, names: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.weekday_booked
            .entry(label.to_string())
            .or_default()
            .extend(names.into_iter().map(str::to_string));
    }

    pub fn is_booked(&self, label: &str, name: &str) -> bool {
        self.weekday_booked
            .get(label)
            .is_some_and(|names| names.contains(name))
    }

    /// ¿Trabajó en el mismo municipio el día anterior?
    pub fn served_previous_day(&self, name: &str, municipality: &str, date: NaiveDate) -> bool {
        let Some(prev) = date.checked_sub_days(Days::new(1)) else {
            return false;
        };
        self.history(name)
            .iter()
            .any(|(m, d)| m == municipality && *d == Some(prev))
    }

    /// ¿Ya trabajó en el mismo municipio en la semana (lunes a domingo) de `date`?
    pub fn served_same_week(&self, name: &str, municipality: &str, date: NaiveDate) -> bool {
        let offset = u64::from(date.weekday().num_days_from_monday());
        let Some(week_start) = date.checked_sub_days(Days::new(offset)) else {
            return false;
        };
        let week_end = week_start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
        self.history(name).iter().any(|(m, d)| {
            m == municipality && d.is_some_and(|d| week_start <= d && d <= week_end)
        })
    }

    pub fn president_used(&self, name: &str) -> bool {
        self.presidents_used.contains(name)
    }

    pub fn mark_president(&mut self, name: &str) {
        self.presidents_used.insert(name.to_string());
    }

    /// Conteo final, ordenado por nombre para el reporte.
    pub fn convocation_summary(&self) -> BTreeMap<String, usize> {
        self.convocation_count
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}
