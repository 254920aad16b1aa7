// src/noyau/jetons.rs
//
// Découpage d’UN niveau d’expression (texte canonique) en :
// - jetons    : sous-expressions (nombre, groupe entre parenthèses, appel de fonction)
// - operators : opérateurs binaires entre jetons consécutifs (len = jetons - 1)
// - function  : fonction unaire enveloppant tout le niveau (au plus une)
//
// Les groupes et appels de fonction deviennent des Expression “brutes” :
// leur propre découpage n’a lieu que lorsqu’on leur demande un résultat.

use tracing::debug;

use super::erreur::{ExprError, Result};
use super::expression::Expression;
use super::grammaire::{closing_bracket_index, motif_jeton_nombre, nom_de_fonction};
use super::operateur::Operator;

#[derive(Debug, Default)]
pub struct TokenizedExpression {
    pub tokens: Vec<Expression>,
    pub operators: Vec<Operator>,
    pub function: Option<Operator>,
}

/// Découpe un niveau. `texte` doit être canonique (validé).
pub fn tokenize(texte: &str) -> Result<TokenizedExpression> {
    let mut tokens: Vec<Expression> = Vec::new();
    let mut operators: Vec<Operator> = Vec::new();
    let mut function: Option<Operator> = None;

    // Opérateurs en tête : "-x" => (-1) x (x)
    let mut reste = match texte.chars().next() {
        Some('-') => {
            tokens.push(Expression::from_value(-1.0));
            operators.push(Operator::Times);
            &texte[1..]
        }
        Some('+') => &texte[1..],
        Some(c) if Operator::is_binary_char(c) => {
            return Err(ExprError::LeadingOperator(texte.to_string()));
        }
        _ => texte,
    };

    // true quand rien (ou un opérateur explicite) ne précède : pas de x implicite
    let mut prec_operateur = true;

    while let Some(c) = reste.chars().next() {
        // 1) opérateur binaire
        if let Some(op) = Operator::from_binary_char(c) {
            if prec_operateur {
                return Err(ExprError::DanglingOperator(reste.to_string()));
            }
            operators.push(op);
            prec_operateur = true;
            reste = &reste[1..];
            continue;
        }

        // 2) groupe, nombre ou appel de fonction
        let jeton = if c == '(' {
            let fin = closing_bracket_index(reste)?;
            let jeton = Expression::new(&reste[1..fin]);
            reste = &reste[fin + 1..];
            jeton
        } else if let Some(m) = motif_jeton_nombre().find(reste) {
            let valeur: f64 = m
                .as_str()
                .parse()
                .map_err(|_| ExprError::InvalidSyntax(m.as_str().to_string()))?;
            reste = &reste[m.end()..];
            Expression::from_value(valeur)
        } else if let Some((nom, op)) = nom_de_fonction(reste) {
            let apres_nom = &reste[nom.len()..];
            if !apres_nom.starts_with('(') {
                return Err(ExprError::FunctionMissingArgument(reste.to_string()));
            }
            let fin = nom.len() + closing_bracket_index(apres_nom)?;
            let argument = &reste[nom.len() + 1..fin];
            if argument.is_empty() {
                return Err(ExprError::FunctionMissingArgument(reste[..=fin].to_string()));
            }

            if tokens.is_empty() && operators.is_empty() && fin + 1 == reste.len() {
                // la fonction enveloppe tout le niveau
                function = Some(op);
                tokens.push(Expression::new(argument));
                break;
            }

            // sinon : simple jeton, découpé plus tard à son propre niveau
            let jeton = Expression::new(&reste[..=fin]);
            reste = &reste[fin + 1..];
            jeton
        } else {
            return Err(ExprError::UnexpectedToken(reste.to_string()));
        };

        // deux opérandes adjacents : "(a)(b)", "2cos(0)" => multiplication implicite
        if !prec_operateur {
            operators.push(Operator::Times);
        }
        tokens.push(jeton);
        prec_operateur = false;
    }

    if tokens.is_empty() || operators.len() + 1 != tokens.len() {
        return Err(ExprError::DanglingOperator(texte.to_string()));
    }

    debug!(
        "niveau découpé : {texte:?} -> {} jeton(s), {} opérateur(s), fonction {:?}",
        tokens.len(),
        operators.len(),
        function
    );

    Ok(TokenizedExpression {
        tokens,
        operators,
        function,
    })
}
