// src/main.rs
//
// Calculatrice arcade — point d’entrée console
// --------------------------------------------
// - sans -e : boucle interactive (stdin/stdout)
// - avec -e : toutes les expressions sont évaluées, code de sortie non nul si l’une échoue
//
// Journal sur stderr : RUST_LOG, sinon warn / -v info / -vv debug.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use calculatrice_arcade::app::{Console, Session, StyleInterface};
use calculatrice_arcade::config::Config;
use calculatrice_arcade::noyau::{evaluer, ModeAngle};

/// Calculatrice arcade (DEG/RAD, mémoire, visage)
#[derive(Parser, Debug)]
#[command(name = "calculatrice-arcade")]
#[command(version)]
struct Cli {
    /// Mode d’angle : deg ou rad (remplace la configuration)
    #[arg(short, long)]
    mode: Option<ModeAngle>,

    /// Écran seul, sans visage
    #[arg(long)]
    minimal: bool,

    /// Fichier de configuration TOML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Évalue l’expression et quitte (répétable)
    #[arg(short = 'e', long = "expr", value_name = "EXPR")]
    expressions: Vec<String>,

    /// Verbosité du journal (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn installer_journal(verbose: u8) {
    let niveau = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(niveau));

    tracing_subscriber::registry()
        .with(filtre)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    installer_journal(cli.verbose);

    let config = Config::charger_ou_defaut(cli.config.as_deref())
        .context("chargement de la configuration")?;
    let mode = cli.mode.unwrap_or(config.mode_angle);

    if !cli.expressions.is_empty() {
        return Ok(evaluer_direct(&cli.expressions, mode));
    }

    let style = if cli.minimal {
        StyleInterface::Minimal
    } else {
        config.style
    };
    let session = Session::new(mode, style, config.allumee);
    let mut console = Console::new(session, config.demarche);

    console
        .executer(io::stdin().lock(), io::stdout().lock())
        .context("entrée/sortie console")?;
    Ok(ExitCode::SUCCESS)
}

/// Mode direct : un résultat par ligne, erreurs sur stderr.
fn evaluer_direct(expressions: &[String], mode: ModeAngle) -> ExitCode {
    let mut code = ExitCode::SUCCESS;
    for expr in expressions {
        let r = evaluer(expr, mode);
        println!("{}", r.affichage);
        if !r.succes {
            eprintln!("{expr} : {}", r.message_erreur);
            code = ExitCode::FAILURE;
        }
    }
    code
}
