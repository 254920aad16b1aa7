//! Noyau : évaluation (point d’entrée de l’application)
//!
//! texte -> Expression -> result() -> forme canonique + dernière étape (démarche)

use tracing::debug;

use super::erreur::{ExprError, Result};
use super::expression::Expression;
use super::format::format_etape;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    /// Forme canonique rendue (nombres à `precision` décimales).
    pub canonique: String,
    /// Dernière étape calculée au niveau le plus externe.
    pub etape: String,
    pub note: String,
}

/// API publique : évalue une expression et retourne :
/// - la valeur (f64, IEEE : inf / NaN possibles)
/// - la forme canonique
/// - la démarche (forme canonique + dernière étape)
pub fn eval_expression(
    expr_str: &str,
    precision: usize,
) -> Result<(f64, String, DemarcheNoyau)> {
    if expr_str.trim().is_empty() {
        return Err(ExprError::InvalidSyntax("entrée vide".into()));
    }

    let mut expr = Expression::new(expr_str).with_precision(precision);
    let valeur = expr.result()?;
    let canonique = expr.expression()?;
    let precision = expr.precision();

    let etape = match expr.outer_step_mut() {
        Some(etape) => format_etape(etape, precision)?,
        None => "atomique".to_string(),
    };
    debug!("évaluation : {expr_str:?} = {valeur} (étape : {etape})");

    let d = DemarcheNoyau {
        canonique: canonique.clone(),
        etape,
        note: "Ordre BEDMAS : la dernière étape est l’opération la moins prioritaire du niveau externe.".into(),
    };

    Ok((valeur, canonique, d))
}
