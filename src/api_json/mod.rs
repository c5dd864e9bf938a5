use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::Result;
use crate::excel::planilha::split_categories;
use crate::excel::{normalize_text, parse_date_dayfirst, parse_flag, parse_headcount, Planilha};
use crate::models::{format_date, AssignmentRecord, Candidate, NotCalledRecord, RunOptions, RunOutput, RunReport, Slot};

/// Parámetros de entrada para una distribución vía JSON
///
/// # Estructura del JSON esperado:
/// ```json
/// {
///   "candidatos": [
///     {
///       "nome": "Ana Souza",
///       "categoria": "FISCAL, TECNICO",
///       "municipio_origem": "Niterói",
///       "indisponibilidade": "NAO",
///       "presidente_de_banca": true,
///       "inicio_indisponibilidade": "01/06/25",
///       "fim_indisponibilidade": "05/06/25"
///     }
///   ],
///   "vagas": [
///     { "dia": "SEGUNDA", "data": "02/06/2025", "municipio": "Maricá", "categoria": "FISCAL", "quantidade": 2 }
///   ],
///   "opciones": { "president_reuse": true },
///   "seed": 42
/// }
/// ```
///
/// # Campos:
/// - `candidatos`: personas (mismas columnas que la planilla, en minúsculas)
/// - `vagas`: necesidades en el orden en que deben procesarse
/// - `opciones`: opcional, ver `RunOptions`
/// - `seed`: opcional; con semilla fija los desempates son reproducibles
#[derive(Debug, Serialize, Deserialize)]
pub struct DistribucionRequest {
    pub candidatos: Vec<CandidatoInput>,
    pub vagas: Vec<VagaInput>,
    #[serde(default)]
    pub opciones: Option<RunOptions>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// `SIM`/`NAO` como texto o como booleano.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagInput {
    Bool(bool),
    Text(String),
}

impl Default for FlagInput {
    fn default() -> Self {
        FlagInput::Bool(false)
    }
}

impl FlagInput {
    pub fn is_set(&self) -> bool {
        match self {
            FlagInput::Bool(b) => *b,
            FlagInput::Text(s) => parse_flag(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatoInput {
    pub nome: String,
    #[serde(default)]
    pub categoria: String,
    #[serde(default)]
    pub municipio_origem: String,
    #[serde(default)]
    pub indisponibilidade: FlagInput,
    #[serde(default)]
    pub presidente_de_banca: FlagInput,
    #[serde(default)]
    pub inicio_indisponibilidade: Option<String>,
    #[serde(default)]
    pub fim_indisponibilidade: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VagaInput {
    pub dia: String,
    #[serde(default)]
    pub data: Option<String>,
    pub municipio: String,
    pub categoria: String,
    /// Número o texto; lo que no sea entero positivo deja la vaga como malformada.
    pub quantidade: serde_json::Value,
}

pub fn parse_json_input(json_str: &str) -> Result<DistribucionRequest> {
    Ok(serde_json::from_str::<DistribucionRequest>(json_str)?)
}

impl DistribucionRequest {
    pub fn options(&self) -> RunOptions {
        self.opciones.unwrap_or_default()
    }

    /// Convierte el pedido al mismo modelo que produce la planilla.
    pub fn to_planilha(&self) -> Planilha {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut candidates = Vec::new();
        for c in &self.candidatos {
            let name = c.nome.trim();
            if name.is_empty() {
                continue;
            }
            if !seen.insert(name) {
                tracing::warn!(name, "nombre repetido en el pedido, se conserva el primero");
                continue;
            }
            let inicio = c.inicio_indisponibilidade.as_deref().unwrap_or("");
            candidates.push(Candidate {
                name: name.to_string(),
                categories: c.categoria.trim().to_string(),
                home_municipality: normalize_text(&c.municipio_origem),
                unavailable: c.indisponibilidade.is_set() || parse_flag(inicio),
                unavailable_from: parse_date_dayfirst(inicio),
                unavailable_until: c.fim_indisponibilidade.as_deref().and_then(parse_date_dayfirst),
                can_preside: c.presidente_de_banca.is_set(),
            });
        }

        let slots = self
            .vagas
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let date_src = v.data.as_deref().unwrap_or(&v.dia);
                let quantidade = match &v.quantidade {
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::String(s) => s.clone(),
                    _ => String::new(),
                };
                Slot::new(
                    i + 1,
                    &v.dia,
                    parse_date_dayfirst(date_src),
                    &v.municipio,
                    split_categories(&v.categoria),
                    parse_headcount(&quantidade),
                )
            })
            .collect();

        Planilha { candidates, slots }
    }
}

/// Fila de convocado con las mismas columnas que la hoja de salida.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvocadoOutput {
    pub dia: String,
    pub data: String,
    pub municipio: String,
    pub nome: String,
    pub categoria: String,
    pub presidente: String,
}

impl From<&AssignmentRecord> for ConvocadoOutput {
    fn from(r: &AssignmentRecord) -> Self {
        ConvocadoOutput {
            dia: r.weekday_label.clone(),
            data: format_date(r.date),
            municipio: r.municipality.clone(),
            nome: r.name.clone(),
            categoria: r.categories.clone(),
            presidente: if r.is_president { "SIM".to_string() } else { "NAO".to_string() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaoConvocadoOutput {
    pub nome: String,
    pub dia: String,
}

impl From<&NotCalledRecord> for NaoConvocadoOutput {
    fn from(r: &NotCalledRecord) -> Self {
        NaoConvocadoOutput { nome: r.name.clone(), dia: r.weekday_label.clone() }
    }
}

/// Respuesta JSON de una distribución.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistribucionResponse {
    /// Nombre sugerido para el libro de resultados.
    pub archivo: String,
    pub convocados: Vec<ConvocadoOutput>,
    pub nao_convocados: Vec<NaoConvocadoOutput>,
    pub resumen: RunReport,
}

impl DistribucionResponse {
    pub fn from_output(output: &RunOutput, archivo: String) -> Self {
        DistribucionResponse {
            archivo,
            convocados: output.called.iter().map(ConvocadoOutput::from).collect(),
            nao_convocados: output.not_called.iter().map(NaoConvocadoOutput::from).collect(),
            resumen: output.report.clone(),
        }
    }
}
