//! Escritura del libro de resultados: hojas "Convocados" y "Nao Convocados".

use chrono::{Datelike, NaiveDate};
use std::io::Cursor;
use std::path::Path;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::error::{DistribucionError, Result};
use crate::models::{format_date, AssignmentRecord, NotCalledRecord};

pub const SHEET_CALLED: &str = "Convocados";
pub const SHEET_NOT_CALLED: &str = "Nao Convocados";

const CALLED_HEADER: [&str; 6] = ["DIA", "DATA", "MUNICIPIO", "NOME", "CATEGORIA", "PRESIDENTE"];
const NOT_CALLED_HEADER: [&str; 2] = ["NOME", "DIA"];

const MESES: [&str; 12] = [
    "JANEIRO", "FEVEREIRO", "MARCO", "ABRIL", "MAIO", "JUNHO",
    "JULHO", "AGOSTO", "SETEMBRO", "OUTUBRO", "NOVEMBRO", "DEZEMBRO",
];

/// Nombre sugerido del archivo de salida: `distribuicao_<MES>.xlsx`.
pub fn output_file_name(today: NaiveDate) -> String {
    format!("distribuicao_{}.xlsx", MESES[today.month0() as usize])
}

fn write_row(sheet: &mut Worksheet, row: u32, values: &[String]) {
    for (i, v) in values.iter().enumerate() {
        // umya usa coordenadas (columna, fila) 1-based
        sheet.get_cell_mut((i as u32 + 1, row)).set_value(v.clone());
    }
}

fn header(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Arma el libro en memoria.
pub fn build_workbook(called: &[AssignmentRecord], not_called: &[NotCalledRecord]) -> Result<Spreadsheet> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();

    let sheet = book
        .new_sheet(SHEET_CALLED)
        .map_err(|e| DistribucionError::WorkbookWrite(e.to_string()))?;
    write_row(sheet, 1, &header(&CALLED_HEADER));
    for (i, r) in called.iter().enumerate() {
        let values = vec![
            r.weekday_label.clone(),
            format_date(r.date),
            r.municipality.clone(),
            r.name.clone(),
            r.categories.clone(),
            if r.is_president { "SIM".to_string() } else { "NAO".to_string() },
        ];
        write_row(sheet, i as u32 + 2, &values);
    }

    let sheet = book
        .new_sheet(SHEET_NOT_CALLED)
        .map_err(|e| DistribucionError::WorkbookWrite(e.to_string()))?;
    write_row(sheet, 1, &header(&NOT_CALLED_HEADER));
    for (i, r) in not_called.iter().enumerate() {
        write_row(sheet, i as u32 + 2, &[r.name.clone(), r.weekday_label.clone()]);
    }

    Ok(book)
}

/// Escribe el libro de resultados en disco.
pub fn write_workbook<P: AsRef<Path>>(path: P, called: &[AssignmentRecord], not_called: &[NotCalledRecord]) -> Result<()> {
    let book = build_workbook(called, not_called)?;
    umya_spreadsheet::writer::xlsx::write(&book, path.as_ref())
        .map_err(|e| DistribucionError::WorkbookWrite(e.to_string()))?;
    tracing::info!(path = %path.as_ref().display(), convocados = called.len(), "libro de resultados escrito");
    Ok(())
}

/// Escribe el libro de resultados en memoria (descarga HTTP).
pub fn workbook_bytes(called: &[AssignmentRecord], not_called: &[NotCalledRecord]) -> Result<Vec<u8>> {
    let book = build_workbook(called, not_called)?;
    let mut buf = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buf)
        .map_err(|e| DistribucionError::WorkbookWrite(e.to_string()))?;
    Ok(buf.into_inner())
}
