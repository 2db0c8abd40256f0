//! Configuração do ferry carregada a partir de `ferry.toml`.
//!
//! A struct [`FerryConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `FERRY_TOKEN` tem precedência sobre o arquivo;
//! flags de linha de comando têm precedência sobre ambos.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// Configuração de nível superior carregada de `ferry.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FerryConfig {
    /// URL base da API do serviço de jobs.
    #[serde(default)]
    pub base_url: String,

    /// Token de autorização. Vazio significa modo não autenticado.
    #[serde(default)]
    pub token: String,

    /// Tempo máximo de espera por arquivo finalizado, em segundos.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Intervalo entre verificações de disponibilidade, em segundos.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Número máximo de transferências simultâneas por lote.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

// Valor padrão para o timeout de polling: 600s.
fn default_timeout_secs() -> u64 {
    600
}

// Valor padrão para o intervalo de polling: 10s.
fn default_poll_interval_secs() -> u64 {
    10
}

// Valor padrão para o limite de workers: 5.
fn default_workers() -> usize {
    5
}

impl Default for FerryConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            workers: default_workers(),
        }
    }
}

impl FerryConfig {
    /// Carrega a configuração de `ferry.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        let path = Path::new("ferry.toml");
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<FerryConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo de configuração para o token.
        if let Ok(token) = std::env::var("FERRY_TOKEN")
            && !token.is_empty()
        {
            config.token = token;
        }

        Ok(config)
    }
}
