// Estructuras de datos principales

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persona que puede ser convocada. El nombre es la clave de identidad en
/// toda la corrida (no hay id numérico).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    /// Texto libre con las categorías de la persona (se compara por substring).
    pub categories: String,
    /// Municipio de origen ya normalizado (`normalize_text`).
    pub home_municipality: String,
    /// Bloqueo global: la persona no está disponible en ninguna fecha.
    pub unavailable: bool,
    pub unavailable_from: Option<NaiveDate>,
    pub unavailable_until: Option<NaiveDate>,
    pub can_preside: bool,
}

/// Necesidad de agenda: fecha + municipio + categorías + cantidad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Fila de origen (1-based, como en la planilla) para los reportes.
    pub row: usize,
    /// Etiqueta de día ya resuelta: derivada de `date` cuando existe.
    pub weekday_label: String,
    pub date: Option<NaiveDate>,
    /// Municipio tal como vino en la entrada (se usa en la salida).
    pub municipality: String,
    /// Tokens de categoría normalizados, en el orden de la entrada.
    pub required_categories: Vec<String>,
    /// `None` cuando la cantidad no es un entero positivo (vaga malformada).
    pub required_count: Option<usize>,
}

impl Slot {
    /// Construye una vaga resolviendo la etiqueta de día a partir de la fecha.
    pub fn new(
        row: usize,
        raw_label: &str,
        date: Option<NaiveDate>,
        municipality: &str,
        required_categories: Vec<String>,
        required_count: Option<usize>,
    ) -> Self {
        Slot {
            row,
            weekday_label: resolve_weekday_label(raw_label, date),
            date,
            municipality: municipality.trim().to_string(),
            required_categories,
            required_count,
        }
    }
}

/// Nombre del día en el vocabulario fijo de la planilla.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "SEGUNDA",
        Weekday::Tue => "TERCA",
        Weekday::Wed => "QUARTA",
        Weekday::Thu => "QUINTA",
        Weekday::Fri => "SEXTA",
        Weekday::Sat => "SABADO",
        Weekday::Sun => "DOMINGO",
    }
}

/// Si hay fecha, la etiqueta sale de la fecha; si no, se usa la etiqueta cruda normalizada.
pub fn resolve_weekday_label(raw_label: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => weekday_label(d.weekday()).to_string(),
        None => crate::excel::normalize_text(raw_label),
    }
}

/// Formato de fecha de salida (`dd/mm/yy`); fecha ausente => cadena vacía.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%y").to_string()).unwrap_or_default()
}

/// Fila de la hoja "Convocados".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub weekday_label: String,
    pub date: Option<NaiveDate>,
    pub municipality: String,
    pub name: String,
    pub categories: String,
    pub is_president: bool,
}

/// Fila de la hoja "Nao Convocados".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotCalledRecord {
    pub name: String,
    pub weekday_label: String,
}

/// Opciones de una corrida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Permite repetir un presidente ya usado cuando no hay otro elegible en la vaga.
    pub president_reuse: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { president_reuse: true }
    }
}

/// Motivo por el que una vaga no produjo convocados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MalformedHeadcount,
    NoCategories,
    NoEligibleCandidates,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSlot {
    pub row: usize,
    pub weekday_label: String,
    pub municipality: String,
    pub reason: SkipReason,
}

/// Resumen de la corrida: vagas procesadas/saltadas y conteo final por persona.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub slots_total: usize,
    pub slots_filled: usize,
    pub skipped: Vec<SkippedSlot>,
    pub assignments: usize,
    pub convocations: BTreeMap<String, usize>,
}

/// Resultado completo de `run`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutput {
    pub called: Vec<AssignmentRecord>,
    pub not_called: Vec<NotCalledRecord>,
    pub report: RunReport,
}
