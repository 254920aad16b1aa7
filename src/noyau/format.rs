// src/noyau/format.rs
//
// Rendu texte d’un noeud (vue de formatage, pas l’entrée d’origine) :
// - nombre     : `precision` décimales
// - fonction   : nom(argument)
// - chaîne     : jetons entrecoupés des opérateurs (`*` toujours rendu `x`)
//
// Après calcul, le niveau est rendu depuis sa dernière étape : les groupes créés
// par la résolution des priorités sont “aplatis”, on retrouve la suite de jetons.

use super::erreur::Result;
use super::expression::Expression;
use super::jetons::TokenizedExpression;
use super::operateur::Operator;
use super::priorite::Step;

/// Décimales par défaut pour le rendu d’un noeud.
pub const PRECISION_DEFAUT: usize = 3;

/// Garde-fou : au-delà, un f64 n’a plus de chiffres significatifs à montrer.
pub const PRECISION_MAX: usize = 17;

pub fn format_nombre(valeur: f64, precision: usize) -> String {
    format!("{valeur:.precision$}")
}

pub(crate) fn rendre_niveau(niveau: &mut TokenizedExpression, precision: usize) -> Result<String> {
    if let Some(f) = niveau.function {
        let argument = match niveau.tokens.first_mut() {
            Some(jeton) => jeton.rendre(precision)?,
            None => String::new(),
        };
        return Ok(format!("{}({argument})", f.symbol()));
    }
    rendre_chaine(&mut niveau.tokens, &niveau.operators, precision, false)
}

pub(crate) fn rendre_etape(etape: &mut Step, precision: usize) -> Result<String> {
    if etape.is_unary() {
        let op = etape.operators[0];
        let argument = etape.operands[0].rendre(precision)?;
        return Ok(match op {
            Operator::Identity => argument,
            f => format!("{}({argument})", f.symbol()),
        });
    }
    rendre_chaine(&mut etape.operands, &etape.operators, precision, true)
}

fn rendre_chaine(
    operandes: &mut [Expression],
    operators: &[Operator],
    precision: usize,
    aplatir_groupes: bool,
) -> Result<String> {
    let mut out = String::new();
    for (i, operande) in operandes.iter_mut().enumerate() {
        if let Some(op) = i.checked_sub(1).and_then(|k| operators.get(k)) {
            out.push_str(op.symbol());
        }
        let texte = operande.rendre(precision)?;
        if (aplatir_groupes && operande.is_group()) || !operande.est_compose() {
            out.push_str(&texte);
        } else {
            out.push('(');
            out.push_str(&texte);
            out.push(')');
        }
    }
    Ok(out)
}

/// Dernière étape lisible (démarche) : opérandes composés entre crochets.
/// Ex: "2x3+4" -> "[2.000x3.000] + 4.000"
pub fn format_etape(etape: &mut Step, precision: usize) -> Result<String> {
    if etape.is_unary() {
        return rendre_etape(etape, precision);
    }

    let Step { operators, operands } = etape;
    let mut morceaux: Vec<String> = Vec::with_capacity(operands.len() * 2);
    for (i, operande) in operands.iter_mut().enumerate() {
        if let Some(op) = i.checked_sub(1).and_then(|k| operators.get(k)) {
            morceaux.push(op.symbol().to_string());
        }
        let texte = operande.rendre(precision)?;
        if operande.est_compose() {
            morceaux.push(format!("[{texte}]"));
        } else {
            morceaux.push(texte);
        }
    }
    Ok(morceaux.join(" "))
}
