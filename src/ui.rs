//! Interface de terminal do dfa-explorer: spinners e saída colorida.
//!
//! Usa as crates `indicatif` para o spinner da enumeração e `console` para
//! estilização com cores. O [`Reporter`] imprime DFAs, amostras e
//! enumerações em texto ou JSON.

use std::path::Path;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use crate::automaton::Automaton;
use crate::explore::Enumeration;

/// Mensagem impressa quando uma amostra não encontrou string aceita.
const SAMPLE_FAILED: &str = "Failed to generate a valid string.";

/// Indicador visual enquanto a enumeração exaustiva roda.
pub struct EnumerationProgress {
    // Spinner do indicatif; `None` em modo JSON.
    pb: Option<ProgressBar>,
}

impl EnumerationProgress {
    /// Inicia o spinner com o padrão e o comprimento máximo.
    pub fn start(pattern: &str, max_length: usize, quiet: bool) -> Self {
        if quiet {
            return Self { pb: None };
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(format!("Enumerating {pattern} up to length {max_length}"));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb: Some(pb) }
    }

    /// Finaliza e limpa o spinner.
    pub fn finish(self) {
        if let Some(pb) = self.pb {
            pb.finish_and_clear();
        }
    }
}

/// Impressão dos resultados de cada subcomando.
///
/// Em modo JSON cada chamada emite um único documento em stdout.
pub struct Reporter {
    json: bool,
    // Estilo verde para aceitação e estados finais.
    green: Style,
    // Estilo vermelho para rejeição e falhas.
    red: Style,
    // Estilo ciano para cabeçalhos.
    cyan: Style,
    dim: Style,
}

impl Reporter {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            cyan: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Imprime estados, alfabeto, estado inicial, finais e a tabela de transições.
    pub fn print_automaton(&self, automaton: &Automaton) {
        let summary = automaton.summary();
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).unwrap_or_default()
            );
            return;
        }

        println!("{}", self.cyan.apply_to("─── DFA ───"));
        println!("States:      {}", summary.states.join(", "));
        println!("Alphabet:    {}", summary.alphabet.join(", "));
        println!("Start state: {}", summary.start);
        println!(
            "Final states: {}",
            self.green.apply_to(summary.finals.join(", "))
        );
        println!("Transitions:");
        for t in &summary.transitions {
            println!(
                "  {} {} {}",
                t.from,
                self.dim.apply_to(format!("--{}-->", t.symbol)),
                t.to
            );
        }
    }

    /// Imprime, para cada palavra, se ela é aceita.
    pub fn print_checks(&self, results: &[(String, bool)]) {
        if self.json {
            let rows: Vec<_> = results
                .iter()
                .map(|(word, accepted)| json!({ "word": word, "accepted": accepted }))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).unwrap_or_default()
            );
            return;
        }

        for (word, accepted) in results {
            if *accepted {
                println!("  {} {word:?} accepted", self.green.apply_to("✓"));
            } else {
                println!("  {} {word:?} rejected", self.red.apply_to("✗"));
            }
        }
    }

    /// Imprime as amostras; posições sem string aceita mostram a mensagem de falha.
    pub fn print_samples(&self, samples: &[Option<String>]) {
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "samples": samples })).unwrap_or_default()
            );
            return;
        }

        println!("{}", self.cyan.apply_to("─── Random samples ───"));
        for sample in samples {
            match sample {
                Some(word) => println!("  {word}"),
                None => println!("  {}", self.red.apply_to(SAMPLE_FAILED)),
            }
        }
    }

    /// Imprime o total seguido das strings enumeradas.
    pub fn print_enumeration(&self, enumeration: &Enumeration) {
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(enumeration).unwrap_or_default()
            );
            return;
        }

        println!("{}", self.cyan.apply_to("─── Accepted strings ───"));
        println!("Total strings found: {}", enumeration.count);
        for word in &enumeration.strings {
            println!("  {word}");
        }
    }

    pub fn print_dot(&self, dot: &str) {
        if self.json {
            println!("{}", json!({ "dot": dot }));
        } else {
            print!("{dot}");
        }
    }

    pub fn wrote(&self, path: &Path) {
        if self.json {
            println!("{}", json!({ "written": path.display().to_string() }));
        } else {
            println!("  {} DOT written to {}", self.green.apply_to("✓"), path.display());
        }
    }

    /// Imprime um erro em stderr, com a cadeia de causas do anyhow.
    pub fn error(&self, err: &anyhow::Error) {
        let message = describe(err);
        if self.json {
            eprintln!("{}", json!({ "error": message }));
        } else {
            eprintln!("{} {message}", self.red.apply_to("error:"));
        }
    }
}

/// Junta a cadeia de causas, pulando as que a mensagem externa já repete.
fn describe(err: &anyhow::Error) -> String {
    let mut message = err.to_string();
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !message.contains(&cause) {
            message.push_str(": ");
            message.push_str(&cause);
        }
    }
    message
}
