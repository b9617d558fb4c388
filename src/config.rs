// src/config.rs
//
// Configuration optionnelle (TOML) :
//
//   mode_angle = "deg"      # ou "rad"
//   style      = "arcade"   # ou "minimal"
//   allumee    = true
//   demarche   = false
//
// Emplacement par défaut : <config_dir>/calculatrice-arcade/config.toml
// Fichier par défaut absent => valeurs par défaut ; fichier explicite illisible => erreur.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::app::StyleInterface;
use crate::noyau::ModeAngle;

const DOSSIER_APP: &str = "calculatrice-arcade";
const FICHIER: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ErreurConfig {
    #[error("lecture de {chemin} impossible : {source}")]
    Lecture {
        chemin: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuration invalide dans {chemin} : {message}")]
    Format { chemin: PathBuf, message: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub mode_angle: ModeAngle,
    pub style: StyleInterface,
    pub allumee: bool,
    /// Afficher la démarche (normalisé, arbre, preuve) après chaque calcul.
    pub demarche: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode_angle: ModeAngle::Deg,
            style: StyleInterface::Arcade,
            allumee: true,
            demarche: false,
        }
    }
}

impl Config {
    /// Charge un fichier TOML.
    pub fn charger(chemin: &Path) -> Result<Self, ErreurConfig> {
        let contenu = fs::read_to_string(chemin).map_err(|source| ErreurConfig::Lecture {
            chemin: chemin.to_path_buf(),
            source,
        })?;
        Self::depuis_toml(&contenu).map_err(|message| ErreurConfig::Format {
            chemin: chemin.to_path_buf(),
            message,
        })
    }

    pub fn depuis_toml(contenu: &str) -> Result<Self, String> {
        toml::from_str(contenu).map_err(|e| e.message().to_string())
    }

    /// Fichier explicite : doit exister. Sinon : fichier par défaut s’il existe.
    pub fn charger_ou_defaut(explicite: Option<&Path>) -> Result<Self, ErreurConfig> {
        if let Some(chemin) = explicite {
            return Self::charger(chemin);
        }

        let Some(chemin) = chemin_par_defaut() else {
            return Ok(Self::default());
        };
        if !chemin.exists() {
            return Ok(Self::default());
        }

        match Self::charger(&chemin) {
            Ok(c) => Ok(c),
            Err(e) => {
                tracing::warn!(erreur = %e, "configuration ignorée, valeurs par défaut");
                Ok(Self::default())
            }
        }
    }
}

pub fn chemin_par_defaut() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(DOSSIER_APP).join(FICHIER))
}
