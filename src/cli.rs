//! Interface de linha de comando do dfa-explorer baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (build, check, sample,
//! enumerate, dot) e flags globais (--config, --json, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ExplorerConfig;

/// dfa-explorer: converte expressões regulares em DFAs e explora a linguagem aceita.
#[derive(Debug, Parser)]
#[command(name = "dfa-explorer", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Arquivo de configuração TOML (padrão: ./dfa-explorer.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emite JSON em vez de texto formatado.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Gera o DFA e mostra estados, estado inicial, finais e transições.
    Build {
        /// Expressão regular de entrada.
        regex: String,
    },

    /// Testa se cada palavra é aceita pelo DFA.
    Check {
        /// Expressão regular de entrada.
        regex: String,

        /// Palavras a testar.
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Gera strings aleatórias aceitas pelo DFA.
    Sample {
        /// Expressão regular de entrada.
        regex: String,

        /// Número de strings aleatórias a gerar.
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Comprimento máximo de cada string.
        #[arg(long)]
        max_length: Option<usize>,

        /// Tentativas por string antes de desistir.
        #[arg(long)]
        attempts: Option<u32>,

        /// Semente do gerador aleatório.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Enumera todas as strings aceitas até um comprimento máximo.
    Enumerate {
        /// Expressão regular de entrada.
        regex: String,

        /// Comprimento máximo da enumeração.
        #[arg(long)]
        max_length: Option<usize>,
    },

    /// Exporta o DFA no formato Graphviz DOT.
    Dot {
        /// Expressão regular de entrada.
        regex: String,

        /// Arquivo de saída; sem ele o DOT vai para stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

impl Command {
    /// Aplica as flags do subcomando sobre a configuração carregada.
    pub fn apply_overrides(&self, config: &mut ExplorerConfig) {
        match self {
            Command::Sample {
                count,
                max_length,
                attempts,
                seed,
                ..
            } => {
                if let Some(count) = count {
                    config.num_samples = *count;
                }
                if let Some(max_length) = max_length {
                    config.max_length = *max_length;
                }
                if let Some(attempts) = attempts {
                    config.attempt_limit = *attempts;
                }
                if seed.is_some() {
                    config.seed = *seed;
                }
            }
            Command::Enumerate {
                max_length: Some(max_length),
                ..
            } => {
                config.max_enum_length = *max_length;
            }
            _ => {}
        }
    }

    pub fn regex(&self) -> &str {
        match self {
            Command::Build { regex }
            | Command::Check { regex, .. }
            | Command::Sample { regex, .. }
            | Command::Enumerate { regex, .. }
            | Command::Dot { regex, .. } => regex,
        }
    }
}
