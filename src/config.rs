//! src/config.rs
//!
//! Configuration : fichier TOML optionnel + options de ligne de commande (natif).
//!
//! Ordre de priorité : options CLI > fichier > valeurs par défaut.
//! En wasm32 : valeurs par défaut seulement (ni fichier ni CLI).

use serde::Deserialize;

use crate::noyau::format::{CHIFFRES_DEFAUT, CHIFFRES_MAX};

/// Filtre de journal par défaut (syntaxe EnvFilter).
pub const JOURNAL_DEFAUT: &str = "info";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Décimales affichées (bornées à CHIFFRES_MAX).
    pub chiffres: usize,
    /// Filtre tracing (ex: "info", "calculatrice_clavier=debug").
    pub journal: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chiffres: CHIFFRES_DEFAUT,
            journal: JOURNAL_DEFAUT.to_string(),
        }
    }
}

impl Config {
    pub fn depuis_toml(texte: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(texte)?;
        config.chiffres = config.chiffres.min(CHIFFRES_MAX);
        Ok(config)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use natif::{Args, ErreurConfig};

#[cfg(not(target_arch = "wasm32"))]
mod natif {
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use thiserror::Error;

    use super::Config;
    use crate::noyau::format::CHIFFRES_MAX;

    #[derive(Debug, Error)]
    pub enum ErreurConfig {
        #[error("lecture de {chemin}: {source}")]
        Lecture {
            chemin: PathBuf,
            #[source]
            source: io::Error,
        },

        #[error("configuration invalide dans {chemin}: {source}")]
        Toml {
            chemin: PathBuf,
            #[source]
            source: toml::de::Error,
        },
    }

    impl Config {
        /// `<config_dir>/calculatrice-clavier/config.toml`
        pub fn chemin_defaut() -> Option<PathBuf> {
            dirs::config_dir().map(|d| d.join("calculatrice-clavier").join("config.toml"))
        }

        /// Fichier absent => valeurs par défaut.
        pub fn charger(chemin: &Path) -> Result<Self, ErreurConfig> {
            let texte = match fs::read_to_string(chemin) {
                Ok(t) => t,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
                Err(source) => {
                    return Err(ErreurConfig::Lecture {
                        chemin: chemin.to_path_buf(),
                        source,
                    })
                }
            };

            Config::depuis_toml(&texte).map_err(|source| ErreurConfig::Toml {
                chemin: chemin.to_path_buf(),
                source,
            })
        }
    }

    /// Calculatrice clavier : pavé + historique.
    #[derive(Debug, Default, Parser)]
    #[command(version)]
    pub struct Args {
        /// Fichier de configuration (défaut : dossier de config utilisateur)
        #[arg(long)]
        pub config: Option<PathBuf>,

        /// Décimales affichées
        #[arg(long)]
        pub chiffres: Option<usize>,

        /// Filtre de journal (remplacé par RUST_LOG s’il est défini)
        #[arg(long)]
        pub journal: Option<String>,
    }

    impl Args {
        pub fn chemin_config(&self) -> Option<PathBuf> {
            self.config.clone().or_else(Config::chemin_defaut)
        }

        /// Les options présentes l’emportent sur le fichier.
        pub fn surcharger(&self, config: &mut Config) {
            if let Some(chiffres) = self.chiffres {
                config.chiffres = chiffres.min(CHIFFRES_MAX);
            }
            if let Some(journal) = &self.journal {
                config.journal = journal.clone();
            }
        }
    }

}
