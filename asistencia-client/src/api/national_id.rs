//! National-ID registry lookup (`/reniec/{dni}`)

use serde::Deserialize;
use shared::models::NationalIdPerson;
use shared::registration::validation::is_valid_dni;
use shared::response::ApiResponse;

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// The registry proxy answers either with the bare person or an envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum LookupResponse {
    Bare(NationalIdPerson),
    Envelope(ApiResponse<NationalIdPerson>),
}

pub struct NationalIdApi<'a, H> {
    http: &'a H,
}

impl<'a, H: HttpClient> NationalIdApi<'a, H> {
    pub fn new(http: &'a H) -> Self {
        Self { http }
    }

    pub async fn lookup(&self, dni: &str) -> ClientResult<NationalIdPerson> {
        let dni = dni.trim();
        if !is_valid_dni(dni) {
            return Err(ClientError::Validation("El DNI debe tener 8 dígitos".to_string()));
        }

        let response: LookupResponse = self.http.get(&format!("reniec/{dni}")).await?;
        match response {
            LookupResponse::Bare(person) => Ok(person),
            LookupResponse::Envelope(ApiResponse {
                success: true,
                data: Some(person),
                ..
            }) => Ok(person),
            LookupResponse::Envelope(envelope) => Err(ClientError::NotFound(
                envelope
                    .message
                    .unwrap_or_else(|| "No se encontraron datos para el DNI".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_response_shapes() {
        let bare: LookupResponse =
            serde_json::from_str(r#"{"nombres": "ANA", "apellidoPaterno": "QUISPE"}"#).unwrap();
        assert!(matches!(bare, LookupResponse::Bare(_)));

        let envelope: LookupResponse = serde_json::from_str(
            r#"{"success": true, "data": {"nombres": "ANA", "apellido_paterno": "QUISPE"}}"#,
        )
        .unwrap();
        assert!(matches!(envelope, LookupResponse::Envelope(ApiResponse { success: true, .. })));

        let missing: LookupResponse =
            serde_json::from_str(r#"{"success": false, "message": "DNI no encontrado"}"#).unwrap();
        assert!(matches!(missing, LookupResponse::Envelope(ApiResponse { success: false, .. })));
    }
}
