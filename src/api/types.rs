// API wire types module
// Payload and error messages for the /api/dados endpoint

use serde::Serialize;

/// Fixed success message echoed with every valid request
pub const SUCCESS_MESSAGE: &str = "Parâmetros recebidos com sucesso!";

/// Echo payload for a validated request.
///
/// Field declaration order is wire order; serialization is compact so
/// repeated identical requests produce byte-identical bodies.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DadosResponse {
    #[serde(rename = "OLT")]
    pub olt: String,
    #[serde(rename = "SLOT")]
    pub slot: i64,
    #[serde(rename = "PON")]
    pub pon: i64,
    /// Optional diagnostic value; explicit `null` when absent
    pub debug: Option<i64>,
    pub message: String,
}

/// Client input errors, surfaced as 400 responses in the same request
/// cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// One of OLT/SLOT/PON is absent or empty
    MissingParameters,
    /// SLOT or PON has no parseable integer
    InvalidInteger,
    /// debug is present but has no parseable integer
    InvalidDebugInteger,
}

impl ValidationError {
    /// Human-readable `error` string for the JSON body
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingParameters => {
                "Parâmetros obrigatórios ausentes. São necessários: OLT, SLOT e PON."
            }
            Self::InvalidInteger => "Os parâmetros SLOT e PON devem ser números inteiros.",
            Self::InvalidDebugInteger => {
                "O parâmetro debug, se fornecido, deve ser um número inteiro."
            }
        }
    }
}
