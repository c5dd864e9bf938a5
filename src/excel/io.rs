use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use chrono::{Days, NaiveDate};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::Result;

/// Hoja preferida cuando el libro tiene varias.
pub const PREFERRED_SHEET: &str = "Planilha1";

/// Convierte un `Data` de calamine a String.
/// Las celdas de fecha salen como `dd/mm/yyyy` para que `parse_date_dayfirst` las lea igual
/// que una fecha escrita a mano.
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => if *b { "SIM".to_string() } else { "NAO".to_string() },
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Número de serie de Excel (días desde 1899-12-30) a fecha.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_days(Days::new(serial.floor() as u64))
}

/// Mayúsculas, sin espacios en los extremos y sin acentos.
pub fn normalize_text(s: &str) -> String {
    s.trim()
        .chars()
        .map(|ch| match ch {
            'Á' | 'À' | 'Ä' | 'Â' | 'Ã' | 'á' | 'à' | 'ä' | 'â' | 'ã' => 'A',
            'É' | 'È' | 'Ë' | 'Ê' | 'é' | 'è' | 'ë' | 'ê' => 'E',
            'Í' | 'Ì' | 'Ï' | 'Î' | 'í' | 'ì' | 'ï' | 'î' => 'I',
            'Ó' | 'Ò' | 'Ö' | 'Ô' | 'Õ' | 'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'O',
            'Ú' | 'Ù' | 'Ü' | 'Û' | 'ú' | 'ù' | 'ü' | 'û' => 'U',
            'Ñ' | 'ñ' => 'N',
            'Ç' | 'ç' => 'C',
            other => other,
        })
        .flat_map(char::to_uppercase)
        .collect()
}

/// Normaliza encabezados: `normalize_text` y espacios -> `_`.
/// Ejemplo: "Município de Origem" -> "MUNICIPIO_DE_ORIGEM"
pub fn normalize_header(s: &str) -> String {
    normalize_text(s)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// `SIM` (tras normalizar) => true; cualquier otro valor => false.
pub fn parse_flag(s: &str) -> bool {
    normalize_text(s) == "SIM"
}

/// Parsea una fecha con el día primero. Devuelve `None` si el texto no es una fecha;
/// quien llama interpreta la ausencia como "la restricción no aplica".
pub fn parse_date_dayfirst(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    // descartar la parte de hora ("2025-06-03 00:00:00", "2025-06-03T00:00:00")
    let date_part = s.split([' ', 'T']).next().unwrap_or(s);

    // %y antes que %Y: "03/06/2025" no entra en %y y "03/06/25" no debe leerse como año 25
    const FORMATS: [&str; 7] = [
        "%d/%m/%y", "%d/%m/%Y", "%d-%m-%y", "%d-%m-%Y", "%d.%m.%y", "%d.%m.%Y", "%Y-%m-%d",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Cantidad requerida: entero positivo ("3", "3.0"). Cualquier otra cosa => `None`.
pub fn parse_headcount(s: &str) -> Option<usize> {
    let s = s.trim();
    if let Ok(n) = s.parse::<usize>() {
        return (n > 0).then_some(n);
    }
    let f = s.replace(',', ".").parse::<f64>().ok()?;
    if f.is_finite() && f >= 1.0 && (f.floor() - f).abs() < f64::EPSILON {
        Some(f as usize)
    } else {
        None
    }
}

fn rows_from_workbook<RS: Read + Seek>(workbook: &mut Sheets<RS>, sheet_name: &str) -> Result<Vec<Vec<String>>> {
    // Preferir la hoja con el nombre solicitado; si no existe, tomar la primera
    let names = workbook.sheet_names().to_owned();
    let sheet_to_use = names
        .iter()
        .find(|s| *s == sheet_name)
        .or_else(|| names.first())
        .cloned()
        .unwrap_or_default();

    if sheet_to_use.is_empty() {
        return Ok(Vec::new());
    }

    let range = workbook.worksheet_range(&sheet_to_use)?;
    tracing::debug!(sheet = %sheet_to_use, rows = range.height(), "hoja leída");
    Ok(range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect())
        .collect())
}

/// Lee una hoja del archivo Excel y la devuelve como `Vec<Vec<String>>`.
pub fn read_sheet<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)?;
    rows_from_workbook(&mut workbook, sheet_name)
}

/// Igual que `read_sheet` pero desde bytes en memoria (archivo subido).
pub fn read_sheet_from_bytes(bytes: Vec<u8>, sheet_name: &str) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    rows_from_workbook(&mut workbook, sheet_name)
}
