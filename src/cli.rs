//! Interface de linha de comando do ferry baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (run, jobs, content,
//! admin) e flags globais (--base-url, --token).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ferry — cliente para o serviço remoto de análise de mídia.
#[derive(Debug, Parser)]
#[command(name = "ferry", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// URL base da API do serviço de jobs.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Token de autorização enviado nas chamadas à API.
    #[arg(long, global = true)]
    pub token: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Executa o fluxo completo: cria o job, envia os arquivos de entrada,
    /// submete os parâmetros e baixa os resultados.
    Run {
        /// Diretório contendo os arquivos de entrada.
        #[arg(long)]
        inputs_dir: PathBuf,

        /// Diretório onde os resultados serão gravados.
        #[arg(long, default_value = "./results")]
        output_dir: PathBuf,

        /// Tempo máximo de espera por arquivo, em segundos.
        #[arg(long)]
        timeout: Option<u64>,

        /// Intervalo entre verificações de disponibilidade, em segundos.
        #[arg(long)]
        interval: Option<u64>,

        /// Agentes que processarão o job, na ordem de execução.
        #[arg(long, num_args = 1.., default_values_t = [
            String::from("health-generic"),
            String::from("clinical"),
        ])]
        agents: Vec<String>,

        /// Prefixo opcional incluído nos parâmetros do job.
        #[arg(long)]
        prefix: Option<String>,

        /// Número máximo de transferências simultâneas.
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Lista os jobs associados ao token configurado.
    Jobs,

    /// Lista o conteúdo registrado para um job.
    Content {
        /// Identificador do job.
        #[arg(long)]
        job_id: String,
    },

    /// Operações administrativas de tokens de desenvolvedor.
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Emite um novo token de desenvolvedor e grava a credencial em disco.
    MintToken {
        /// Token administrativo (enviado como Bearer).
        #[arg(long)]
        admin_token: String,
    },

    /// Lista os tokens de desenvolvedor existentes.
    ListTokens {
        /// Token administrativo (enviado como Bearer).
        #[arg(long)]
        admin_token: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_run_subcommand() {
        let cli = Cli::parse_from([
            "ferry",
            "--base-url",
            "https://api.example.com",
            "--token",
            "tok-1",
            "run",
            "--inputs-dir",
            "./audio",
            "--timeout",
            "120",
            "--prefix",
            "batch-7",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(cli.token.as_deref(), Some("tok-1"));
        match cli.command {
            Command::Run {
                inputs_dir,
                output_dir,
                timeout,
                interval,
                agents,
                prefix,
                workers,
            } => {
                assert_eq!(inputs_dir, PathBuf::from("./audio"));
                assert_eq!(output_dir, PathBuf::from("./results"));
                assert_eq!(timeout, Some(120));
                assert!(interval.is_none());
                assert_eq!(agents, vec!["health-generic", "clinical"]);
                assert_eq!(prefix.as_deref(), Some("batch-7"));
                assert!(workers.is_none());
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn cli_parses_custom_agent_list() {
        let cli = Cli::parse_from([
            "ferry",
            "run",
            "--inputs-dir",
            "./audio",
            "--agents",
            "clinical",
            "summarizer",
        ]);
        match cli.command {
            Command::Run { agents, .. } => {
                assert_eq!(agents, vec!["clinical", "summarizer"]);
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn cli_parses_admin_mint_token() {
        let cli = Cli::parse_from(["ferry", "admin", "mint-token", "--admin-token", "adm-1"]);
        match cli.command {
            Command::Admin {
                command: AdminCommand::MintToken { admin_token },
            } => assert_eq!(admin_token, "adm-1"),
            _ => panic!("expected Admin MintToken command"),
        }
    }

    #[test]
    fn cli_parses_content_subcommand() {
        let cli = Cli::parse_from(["ferry", "content", "--job-id", "job-123"]);
        match cli.command {
            Command::Content { job_id } => assert_eq!(job_id, "job-123"),
            _ => panic!("expected Content command"),
        }
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
