#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;

use chrono::NaiveDate;
use distribuidor::excel::normalize_text;
use distribuidor::excel::planilha::split_categories;
use distribuidor::{Candidate, Slot};

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn cand(name: &str, cats: &str, home: &str) -> Candidate {
    Candidate {
        name: name.to_string(),
        categories: cats.to_string(),
        home_municipality: normalize_text(home),
        unavailable: false,
        unavailable_from: None,
        unavailable_until: None,
        can_preside: false,
    }
}

pub fn presidente(name: &str, cats: &str, home: &str) -> Candidate {
    Candidate { can_preside: true, ..cand(name, cats, home) }
}

pub fn vaga(row: usize, date: NaiveDate, municipio: &str, cats: &str, n: usize) -> Slot {
    Slot::new(row, "", Some(date), municipio, split_categories(cats), Some(n))
}

/// Libro de entrada con una hoja `Planilha1` y las filas dadas (encabezado incluido).
pub fn planilha_book(rows: &[&[&str]]) -> umya_spreadsheet::Spreadsheet {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book.new_sheet("Planilha1").unwrap();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.get_cell_mut((c as u32 + 1, r as u32 + 1)).set_value(value.to_string());
            }
        }
    }
    book
}

pub fn write_planilha(path: &Path, rows: &[&[&str]]) {
    let book = planilha_book(rows);
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

pub fn planilha_bytes(rows: &[&[&str]]) -> Vec<u8> {
    let book = planilha_book(rows);
    let mut buf = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut buf).unwrap();
    buf.into_inner()
}

pub const HEADER: &[&str] = &[
    "Nome",
    "Categoria",
    "Município Origem",
    "Indisponibilidade",
    "Presidente de Banca",
    "Início Indisponibilidade",
    "Fim Indisponibilidade",
    "Dia",
    "Data",
    "Município",
    "Quantidade",
];

/// Planilla chica: tres personas y dos vagas en Maricá la misma semana.
pub fn sample_rows() -> Vec<&'static [&'static str]> {
    vec![
        HEADER,
        &["Ana", "FISCAL", "Niterói", "NAO", "SIM", "", "", "SEGUNDA", "02/06/2025", "Maricá", "2"],
        &["Bruno", "FISCAL", "Rio de Janeiro", "NAO", "NAO", "", "", "QUARTA", "04/06/2025", "Maricá", "1"],
        &["Carla", "FISCAL", "Maricá", "SIM", "SIM", "", "", "", "", "", ""],
        &["Davi", "FISCAL", "Niterói", "", "", "01/06/25", "03/06/25", "", "", "", ""],
    ]
}
