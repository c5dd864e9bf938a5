//! Lectura de la planilla de distribución.
//!
//! La planilla es una sola tabla: cada fila puede describir a una persona
//! (columna de nombre con valor), una vaga (columna `DIA` con valor) o ambas.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{DistribucionError, Result};
use crate::excel::io::{
    normalize_header, normalize_text, parse_date_dayfirst, parse_flag, parse_headcount, read_sheet,
    read_sheet_from_bytes, PREFERRED_SHEET,
};
use crate::models::{Candidate, Slot};

/// Columnas aceptadas para el nombre, en orden de preferencia.
pub const NAME_COLUMNS: [&str; 3] = ["NOME", "NOME_COMPLETO", "NOME_PESSOA"];

/// Columnas de vaga sin las cuales no se puede distribuir.
pub const SLOT_COLUMNS: [&str; 4] = ["DIA", "MUNICIPIO", "CATEGORIA", "QUANTIDADE"];

/// Contenido de la planilla ya convertido al modelo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Planilha {
    pub candidates: Vec<Candidate>,
    pub slots: Vec<Slot>,
}

/// Lee la planilla desde disco (`Planilha1` o la primera hoja).
pub fn leer_planilha<P: AsRef<Path>>(path: P) -> Result<Planilha> {
    let rows = read_sheet(path, PREFERRED_SHEET)?;
    parse_rows(rows)
}

/// Lee la planilla desde bytes (archivo subido por HTTP).
pub fn leer_planilha_bytes(bytes: Vec<u8>) -> Result<Planilha> {
    let rows = read_sheet_from_bytes(bytes, PREFERRED_SHEET)?;
    parse_rows(rows)
}

/// Índice de columnas por encabezado normalizado.
struct Columns {
    index: HashMap<String, usize>,
    name: usize,
    has_date: bool,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self> {
        let mut index = HashMap::new();
        for (i, h) in header.iter().enumerate() {
            let key = normalize_header(h);
            if !key.is_empty() {
                // ante encabezados repetidos gana el primero
                index.entry(key).or_insert(i);
            }
        }

        let mut available: Vec<String> = header.iter().map(|h| normalize_header(h)).filter(|h| !h.is_empty()).collect();
        available.dedup();

        let name = NAME_COLUMNS
            .iter()
            .find_map(|c| index.get(*c).copied())
            .ok_or_else(|| DistribucionError::MissingNameColumn { available: available.clone() })?;

        if let Some(missing) = SLOT_COLUMNS.iter().find(|c| !index.contains_key(**c)) {
            return Err(DistribucionError::MissingColumn { column: missing.to_string(), available });
        }

        let has_date = index.contains_key("DATA");
        Ok(Columns { index, name, has_date })
    }

    /// Valor de la celda o "" si la columna no existe (columnas opcionales).
    fn get<'r>(&self, row: &'r [String], column: &str) -> &'r str {
        self.index
            .get(column)
            .and_then(|&i| row.get(i))
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

/// Convierte las filas crudas (encabezado incluido) en candidatos y vagas.
pub fn parse_rows(rows: Vec<Vec<String>>) -> Result<Planilha> {
    let header_idx = rows
        .iter()
        .position(|r| r.iter().any(|c| !c.trim().is_empty()))
        .ok_or(DistribucionError::EmptySheet)?;
    let cols = Columns::from_header(&rows[header_idx])?;

    let mut planilha = Planilha::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (offset, row) in rows.iter().enumerate().skip(header_idx + 1) {
        let row_number = offset + 1;

        let name = row.get(cols.name).map(|s| s.trim()).unwrap_or("");
        if !name.is_empty() {
            if seen.insert(name.to_string()) {
                planilha.candidates.push(candidate_from_row(&cols, row, name));
            } else {
                tracing::warn!(row = row_number, name, "nombre repetido en la planilla, se conserva la primera fila");
            }
        }

        let dia = cols.get(row, "DIA").trim();
        if !dia.is_empty() {
            planilha.slots.push(slot_from_row(&cols, row, dia, row_number));
        }
    }

    tracing::info!(
        candidatos = planilha.candidates.len(),
        vagas = planilha.slots.len(),
        "planilla cargada"
    );
    Ok(planilha)
}

fn candidate_from_row(cols: &Columns, row: &[String], name: &str) -> Candidate {
    let inicio = cols.get(row, "INICIO_INDISPONIBILIDADE");
    // un "SIM" escrito en la columna de inicio también bloquea todas las fechas
    let unavailable = parse_flag(cols.get(row, "INDISPONIBILIDADE")) || parse_flag(inicio);

    Candidate {
        name: name.to_string(),
        categories: cols.get(row, "CATEGORIA").trim().to_string(),
        home_municipality: normalize_text(cols.get(row, "MUNICIPIO_ORIGEM")),
        unavailable,
        unavailable_from: parse_date_dayfirst(inicio),
        unavailable_until: parse_date_dayfirst(cols.get(row, "FIM_INDISPONIBILIDADE")),
        can_preside: parse_flag(cols.get(row, "PRESIDENTE_DE_BANCA")),
    }
}

fn slot_from_row(cols: &Columns, row: &[String], dia: &str, row_number: usize) -> Slot {
    let date_src = if cols.has_date { cols.get(row, "DATA") } else { dia };
    Slot::new(
        row_number,
        dia,
        parse_date_dayfirst(date_src),
        cols.get(row, "MUNICIPIO"),
        split_categories(cols.get(row, "CATEGORIA")),
        parse_headcount(cols.get(row, "QUANTIDADE")),
    )
}

/// "A, b ,C" -> ["A", "B", "C"]; los tokens vacíos se descartan.
pub fn split_categories(s: &str) -> Vec<String> {
    s.split(',')
        .map(normalize_text)
        .filter(|t| !t.is_empty())
        .collect()
}
