use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::{CandidatoInput, DistribucionRequest, FlagInput, VagaInput};
use crate::excel::planilha::{NAME_COLUMNS, SLOT_COLUMNS};
use crate::models::RunOptions;

/// GET /help
pub async fn help_handler() -> impl Responder {
    let example = DistribucionRequest {
        candidatos: vec![
            CandidatoInput {
                nome: "Ana Souza".to_string(),
                categoria: "FISCAL, TECNICO".to_string(),
                municipio_origem: "Niterói".to_string(),
                indisponibilidade: FlagInput::Text("NAO".to_string()),
                presidente_de_banca: FlagInput::Bool(true),
                inicio_indisponibilidade: Some("01/06/25".to_string()),
                fim_indisponibilidade: Some("05/06/25".to_string()),
            },
            CandidatoInput {
                nome: "Bruno Lima".to_string(),
                categoria: "FISCAL".to_string(),
                municipio_origem: "Maricá".to_string(),
                indisponibilidade: FlagInput::default(),
                presidente_de_banca: FlagInput::default(),
                inicio_indisponibilidade: None,
                fim_indisponibilidade: None,
            },
        ],
        vagas: vec![VagaInput {
            dia: "SEGUNDA".to_string(),
            data: Some("09/06/2025".to_string()),
            municipio: "Rio de Janeiro".to_string(),
            categoria: "FISCAL".to_string(),
            quantidade: json!(2),
        }],
        opciones: Some(RunOptions::default()),
        seed: Some(42),
    };

    let help = json!({
        "description": "Distribuye candidatos en vagas (día, municipio, categorías, cantidad) respetando disponibilidad, municipio de origen, un día por persona, días consecutivos y semana en el mismo municipio. Elige primero a quien tiene menos convocatorias y un presidente de banca por vaga.",
        "endpoints": {
            "POST /distribuir": "multipart con la planilla .xlsx; responde el libro con las hojas 'Convocados' y 'Nao Convocados'",
            "POST /distribuir/resumen": "mismo multipart; responde convocados, no convocados y resumen en JSON",
            "POST /distribuir/json": "body JSON (ver 'post_example')",
        },
        "planilha": {
            "hoja": "Planilha1 (o la primera hoja)",
            "columnas_nombre": NAME_COLUMNS,
            "columnas_vaga": SLOT_COLUMNS,
            "columnas_opcionales": ["DATA", "MUNICIPIO_ORIGEM", "INDISPONIBILIDADE", "INICIO_INDISPONIBILIDADE", "FIM_INDISPONIBILIDADE", "PRESIDENTE_DE_BANCA"],
        },
        "post_example": example,
        "note": "Las fechas se leen día primero (dd/mm/aa o dd/mm/aaaa). Con 'seed' los desempates son reproducibles.",
    });

    HttpResponse::Ok().json(help)
}
