// src/noyau/priorite.rs
//
// Dernière étape d’un niveau selon BEDMAS.
//
// On cherche la classe la plus faible présente (+- puis x/% puis ^).
// Chaque opérateur de cette classe devient un opérateur de l’étape ; les suites
// de jetons plus prioritaires entre deux coupures sont regroupées dans une
// nouvelle Expression (évaluée plus tard, récursivement).
//
// Associativité à gauche dans une classe, y compris pour ^ : 2^3^2 = (2^3)^2.

use tracing::debug;

use super::erreur::{ExprError, Result};
use super::expression::Expression;
use super::jetons::TokenizedExpression;
use super::operateur::{Operator, Priorite};

/// Opération calculée en dernier à un niveau.
/// - unaire : 1 opérateur, 1 opérande
/// - chaîne binaire : operators.len() == operands.len() - 1, évaluée de gauche à droite
#[derive(Debug, Default)]
pub struct Step {
    pub operators: Vec<Operator>,
    pub operands: Vec<Expression>,
}

impl Step {
    pub fn is_unary(&self) -> bool {
        self.operators.len() == 1 && self.operands.len() == 1
    }

    fn unaire(op: Operator, operande: Expression) -> Step {
        Step {
            operators: vec![op],
            operands: vec![operande],
        }
    }
}

/// Calcule la dernière étape d’un niveau découpé (consomme ses jetons).
pub fn last_calculation_step(niveau: TokenizedExpression) -> Result<Step> {
    let TokenizedExpression {
        mut tokens,
        operators,
        function,
    } = niveau;

    // un seul jeton : fonction, ou nombre déjà calculé
    if tokens.len() == 1 {
        if !operators.is_empty() {
            return Err(ExprError::DanglingOperator(format!(
                "{} opérateur(s) pour un seul jeton",
                operators.len()
            )));
        }
        let jeton = tokens.remove(0);
        return match function {
            Some(f) => Ok(Step::unaire(f, jeton)),
            None if jeton.is_calculated() => Ok(Step::unaire(Operator::Identity, jeton)),
            None => Err(ExprError::DanglingOperator(
                "jeton unique sans fonction ni valeur".to_string(),
            )),
        };
    }

    if tokens.is_empty() {
        return Err(ExprError::NoCalculableStep);
    }
    if function.is_some() {
        // une fonction n’enveloppe qu’un niveau réduit à un seul jeton
        return Err(ExprError::NoCalculableStep);
    }
    if operators.len() + 1 != tokens.len() {
        return Err(ExprError::DanglingOperator(format!(
            "{} opérateur(s) pour {} jeton(s)",
            operators.len(),
            tokens.len()
        )));
    }

    // deux jetons : étape binaire directe
    if operators.len() == 1 {
        return Ok(Step {
            operators,
            operands: tokens,
        });
    }

    let classe = Priorite::DE_LA_PLUS_FAIBLE
        .into_iter()
        .find(|p| operators.iter().any(|op| op.priorite() == Some(*p)))
        .ok_or(ExprError::NoCalculableStep)?;

    let mut etape = Step::default();

    let mut jetons = tokens.into_iter();
    let mut suite_jetons: Vec<Expression> = jetons.next().into_iter().collect();
    let mut suite_ops: Vec<Operator> = Vec::new();

    for (op, jeton) in operators.into_iter().zip(jetons) {
        if op.priorite() == Some(classe) {
            etape.operands.push(regrouper(
                std::mem::take(&mut suite_jetons),
                std::mem::take(&mut suite_ops),
            ));
            etape.operators.push(op);
        } else {
            suite_ops.push(op);
        }
        suite_jetons.push(jeton);
    }
    etape.operands.push(regrouper(suite_jetons, suite_ops));

    debug!(
        "dernière étape ({classe:?}) : {} opérateur(s), {} opérande(s)",
        etape.operators.len(),
        etape.operands.len()
    );

    Ok(etape)
}

/// Une suite contiguë de jetons : le jeton seul, ou une nouvelle sous-expression.
fn regrouper(mut tokens: Vec<Expression>, operators: Vec<Operator>) -> Expression {
    if tokens.len() == 1 {
        return tokens.remove(0);
    }
    Expression::from_tokens(TokenizedExpression {
        tokens,
        operators,
        function: None,
    })
}
