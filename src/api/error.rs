//! Tipos de erro para o cliente da API de jobs.
//!
//! Define [`ApiError`] com variantes para falhas de autenticação, erros do
//! gateway e erros de rede. Usa `thiserror` para derivar `Display` e `Error`
//! automaticamente a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao interagir com a API de controle de jobs.
///
/// As variantes cobrem os três cenários de falha:
/// - [`Auth`](ApiError::Auth) — o servidor recusou o token (HTTP 401/403)
/// - [`Gateway`](ApiError::Gateway) — qualquer outro erro HTTP (4xx/5xx)
/// - [`Network`](ApiError::Network) — falha na camada de rede
#[derive(Debug, Error)]
pub enum ApiError {
    /// O servidor recusou a autenticação (token ausente ou inválido).
    /// Contém o código de status HTTP e a mensagem do corpo da resposta.
    #[error("authentication rejected (status {status}): {message}")]
    Auth { status: u16, message: String },

    /// Erro retornado pelo gateway (ex.: 404 job inexistente, 500 erro interno).
    /// Contém o código de status HTTP e a mensagem de erro do corpo da resposta.
    #[error("gateway error (status {status}): {message}")]
    Gateway { status: u16, message: String },

    /// Falha de rede subjacente (DNS, conexão recusada, timeout).
    /// Encapsula o erro original do `reqwest` via `#[from]`.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Classifica um status HTTP não-2xx: 401/403 viram [`Auth`](ApiError::Auth),
    /// todo o resto vira [`Gateway`](ApiError::Gateway).
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ApiError::Auth { status, message },
            _ => ApiError::Gateway { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_display() {
        let err = ApiError::Auth {
            status: 401,
            message: "missing token".into(),
        };
        assert_eq!(
            err.to_string(),
            "authentication rejected (status 401): missing token"
        );
    }

    #[test]
    fn gateway_display() {
        let err = ApiError::Gateway {
            status: 500,
            message: "internal error".into(),
        };
        assert_eq!(err.to_string(), "gateway error (status 500): internal error");
    }

    #[test]
    fn from_status_classifies_auth_codes() {
        assert!(matches!(
            ApiError::from_status(401, "".into()),
            ApiError::Auth { .. }
        ));
        assert!(matches!(
            ApiError::from_status(403, "".into()),
            ApiError::Auth { .. }
        ));
        assert!(matches!(
            ApiError::from_status(404, "".into()),
            ApiError::Gateway { .. }
        ));
        assert!(matches!(
            ApiError::from_status(500, "".into()),
            ApiError::Gateway { .. }
        ));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
