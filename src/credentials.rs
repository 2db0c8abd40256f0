//! Armazenamento em disco de credenciais de desenvolvedor.
//!
//! Tokens emitidos pelo endpoint administrativo são gravados como arquivos
//! YAML com carimbo de data/hora em `./credentials`, um arquivo por token.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Conteúdo de um arquivo de credencial.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    #[serde(rename = "developerToken")]
    developer_token: String,
}

/// Grava um token de desenvolvedor em um arquivo de credencial novo dentro
/// de `dir`, retornando o caminho do arquivo criado.
pub fn store_developer_token(dir: &Path, token: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create credentials directory {}", dir.display()))?;

    let timestamp = Utc::now().format("%Y%m%dT%H%M%S");
    let path = dir.join(format!("Ferry_Developer.credential.{timestamp}.yaml"));
    let contents = serde_yaml::to_string(&StoredCredential {
        developer_token: token.to_string(),
    })?;
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write credential file {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_token_as_yaml_credential() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_developer_token(dir.path(), "dev-9").unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("Ferry_Developer.credential."));
        assert!(name.ends_with(".yaml"));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("developerToken: dev-9"));
        let parsed: StoredCredential = serde_yaml::from_str(&contents).unwrap();
        assert_eq!(parsed.developer_token, "dev-9");
    }

    #[test]
    fn creates_missing_credentials_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep/credentials");
        let path = store_developer_token(&nested, "dev-1").unwrap();
        assert!(path.exists());
    }
}
