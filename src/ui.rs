//! Interface de terminal do ferry — barras de progresso e saída colorida.
//!
//! Usa as crates `indicatif` para barras/spinners de progresso e `console`
//! para estilização com cores. O [`BatchProgress`] acompanha visualmente um
//! lote de transferências; o [`PhaseSpinner`] cobre as fases sequenciais
//! (criação do job, envio do descritor).

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::orchestrator::RunReport;

/// Spinner para uma fase sequencial do fluxo (sem contagem de itens).
pub struct PhaseSpinner {
    pb: ProgressBar,
    green: Style,
    red: Style,
}

impl PhaseSpinner {
    /// Inicia o spinner com a mensagem da fase.
    pub fn start(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
        }
    }

    /// Finaliza a fase com sucesso.
    pub fn done(self, message: &str) {
        self.pb.finish_and_clear();
        println!("  {} {message}", self.green.apply_to("✓"));
    }

    /// Finaliza a fase com falha.
    pub fn fail(self, message: &str) {
        self.pb.finish_and_clear();
        println!("  {} {message}", self.red.apply_to("✗"));
    }
}

/// Indicador visual de progresso para um lote de transferências.
///
/// Exibe uma barra com a contagem de itens concluídos e imprime uma linha
/// por arquivo: sucesso em verde, falha em vermelho.
#[derive(Clone)]
pub struct BatchProgress {
    // Barra de progresso do indicatif; clonável entre os workers do lote.
    pb: ProgressBar,
    green: Style,
    red: Style,
}

impl BatchProgress {
    /// Inicia a barra para um lote com `total` itens.
    pub fn start(label: &str, total: u64) -> Self {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:30.cyan/blue}] {pos}/{len}")
                .expect("invalid template"),
        );
        pb.set_message(label.to_string());

        Self {
            pb,
            green: Style::new().green(),
            red: Style::new().red(),
        }
    }

    /// Registra a conclusão de um arquivo do lote.
    pub fn file_done(&self, name: &str) {
        self.pb
            .println(format!("  {} {name}", self.green.apply_to("✓")));
        self.pb.inc(1);
    }

    /// Registra a falha de um arquivo do lote, com o motivo.
    pub fn file_failed(&self, name: &str, reason: &str) {
        self.pb
            .println(format!("  {} {name}: {reason}", self.red.apply_to("✗")));
        self.pb.inc(1);
    }

    /// Encerra a barra do lote.
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

/// Imprime o relatório final da execução: resumo colorido e o mapeamento
/// de resultados em JSON formatado.
pub fn print_report(report: &RunReport) {
    let green = Style::new().green().bold();
    let red = Style::new().red().bold();

    println!();
    println!("{}", green.apply_to("─── Run Report ───"));
    println!(
        "  job {} — {} uploaded, {} downloaded",
        report.job_id,
        report.uploaded.len(),
        report.results.len()
    );
    let failures = report.upload_failures + report.download_failures;
    if failures > 0 {
        println!(
            "  {} {} upload failure(s), {} download failure(s)",
            red.apply_to("!"),
            report.upload_failures,
            report.download_failures
        );
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&report.results).unwrap_or_default()
    );
}
