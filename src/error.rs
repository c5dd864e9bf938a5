use thiserror::Error;

#[derive(Error, Debug)]
pub enum DistribucionError {
    #[error("no se encontró la columna de nombres (NOME, NOME_COMPLETO o NOME_PESSOA); columnas disponibles: {available:?}")]
    MissingNameColumn { available: Vec<String> },

    #[error("falta la columna obligatoria {column}; columnas disponibles: {available:?}")]
    MissingColumn { column: String, available: Vec<String> },

    #[error("la planilla está vacía")]
    EmptySheet,

    #[error("error leyendo Excel: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("error escribiendo Excel: {0}")]
    WorkbookWrite(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuración inválida: {key} = {value}")]
    InvalidConfig { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, DistribucionError>;

impl DistribucionError {
    /// Errores causados por la entrada del usuario (planilla o JSON), no por el servicio.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DistribucionError::MissingNameColumn { .. }
                | DistribucionError::MissingColumn { .. }
                | DistribucionError::EmptySheet
                | DistribucionError::Workbook(_)
                | DistribucionError::Json(_)
        )
    }
}
