// src/cli.rs
//
// Ligne de commande : `calc [-p N] [-v] [EXPRESSION...]`
// Les arguments restants sont recollés SANS séparateur ("2" "+3" => "2+3").
// Expression commençant par '-' : passer par `--` (calc -- -cos(0)).

use calculatrice_bedmas::noyau::PRECISION_MAX;
use clap::Parser;

/// Décimales du résultat affiché par défaut.
pub const PRECISION_CLI_DEFAUT: usize = 6;

#[derive(Parser, Debug)]
#[command(
    name = "calc",
    author,
    version,
    about = "Calculatrice BEDMAS (sans expression : interface graphique)",
    long_about = None
)]
pub struct Cli {
    /// Nombre de décimales du résultat
    #[arg(short, long, value_name = "N")]
    pub precision: Option<usize>,

    /// Affiche la forme canonique et la dernière étape (logs en debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Expression à évaluer (ex: 2 x 3 + 4)
    #[arg(value_name = "EXPRESSION")]
    pub expression: Vec<String>,
}

impl Cli {
    /// Expression recollée, ou None si aucun argument.
    pub fn expression_string(&self) -> Option<String> {
        if self.expression.is_empty() {
            None
        } else {
            Some(self.expression.concat())
        }
    }

    pub fn precision(&self) -> usize {
        self.precision
            .unwrap_or(PRECISION_CLI_DEFAUT)
            .min(PRECISION_MAX)
    }
}
