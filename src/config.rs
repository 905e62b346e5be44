//! Configuração do dfa-explorer carregada a partir de `dfa-explorer.toml`.
//!
//! A struct [`ExplorerConfig`] contém os limites de amostragem, enumeração e
//! compilação. Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `DFA_EXPLORER_SEED` tem precedência sobre o arquivo.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Nome do arquivo procurado no diretório atual.
pub const CONFIG_FILE: &str = "dfa-explorer.toml";

/// Configuração de nível superior carregada de `dfa-explorer.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerConfig {
    /// Quantidade de strings aleatórias por chamada de `sample`.
    #[serde(default = "default_num_samples")]
    pub num_samples: usize,

    /// Comprimento máximo de cada passeio aleatório.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Tentativas por amostra antes de desistir.
    #[serde(default = "default_attempt_limit")]
    pub attempt_limit: u32,

    /// Comprimento máximo da enumeração exaustiva.
    #[serde(default = "default_max_enum_length")]
    pub max_enum_length: usize,

    /// Teto de sequências candidatas; acima disso a enumeração falha imediatamente.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: u64,

    /// Maior classe de caracteres expandida em símbolos pelo compilador.
    #[serde(default = "default_max_class_size")]
    pub max_class_size: usize,

    /// Maior NFA (e maior DFA) construído para um padrão.
    #[serde(default = "default_max_states")]
    pub max_states: usize,

    /// Semente do gerador aleatório, para amostras reproduzíveis.
    #[serde(default)]
    pub seed: Option<u64>,
}

// Valor padrão de amostras por chamada: 5.
fn default_num_samples() -> usize {
    5
}

// Valor padrão do comprimento do passeio: 5.
fn default_max_length() -> usize {
    5
}

// Valor padrão de tentativas por amostra: 100.
fn default_attempt_limit() -> u32 {
    crate::explore::DEFAULT_ATTEMPT_LIMIT
}

// Valor padrão do comprimento de enumeração: 5.
fn default_max_enum_length() -> usize {
    5
}

fn default_max_candidates() -> u64 {
    5_000_000
}

fn default_max_class_size() -> usize {
    256
}

fn default_max_states() -> usize {
    10_000
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            num_samples: default_num_samples(),
            max_length: default_max_length(),
            attempt_limit: default_attempt_limit(),
            max_enum_length: default_max_enum_length(),
            max_candidates: default_max_candidates(),
            max_class_size: default_max_class_size(),
            max_states: default_max_states(),
            seed: None,
        }
    }
}

impl ExplorerConfig {
    /// Carrega a configuração de `path`, ou de `dfa-explorer.toml` no diretório
    /// atual. Usa valores padrão se o arquivo não existir.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
        let mut config = Self::from_file(path)?;

        // Variável de ambiente tem precedência sobre o arquivo para a semente.
        if let Ok(raw) = std::env::var("DFA_EXPLORER_SEED") {
            if !raw.is_empty() {
                let seed = raw
                    .parse::<u64>()
                    .with_context(|| format!("DFA_EXPLORER_SEED is not a number: {raw}"))?;
                config.seed = Some(seed);
            }
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = toml::from_str::<ExplorerConfig>(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}
