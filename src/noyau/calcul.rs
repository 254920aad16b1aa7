// src/noyau/calcul.rs
//
// Application des opérateurs sur des valeurs déjà résolues.
// IEEE-754 partout : 1/0 = inf, ln(-1) = NaN, ... ne sont pas des erreurs.
// Une valeur NaN est seulement signalée (warn!).

use num_traits::Float;
use tracing::warn;

use super::erreur::{ExprError, Result};
use super::operateur::Operator;
use super::priorite::Step;

/// Fonction unaire (ou identité) sur un nombre.
pub fn apply_unary<F: Float>(op: Operator, x: F) -> Result<F> {
    use Operator::*;

    let v = match op {
        Identity => x,
        Exp => x.exp(),
        Sqrt => x.sqrt(),
        Ln => x.ln(),
        Log => x.log10(),
        Sin => x.sin(),
        Cos => x.cos(),
        Tan => x.tan(),
        Sinh => x.sinh(),
        Cosh => x.cosh(),
        Tanh => x.tanh(),
        Plus | Minus | Times | Divide | Mod | Pow => {
            return Err(ExprError::InvalidUnaryOperator(op));
        }
    };
    signaler_nan(op, v);
    Ok(v)
}

/// Opérateur binaire. `%` : reste flottant, signe du dividende (fmod).
pub fn apply_binary<F: Float>(op: Operator, a: F, b: F) -> Result<F> {
    use Operator::*;

    let v = match op {
        Plus => a + b,
        Minus => a - b,
        Times => a * b,
        Divide => a / b,
        Mod => a % b,
        Pow => a.powf(b),
        Identity | Exp | Sqrt | Ln | Log | Sin | Cos | Tan | Sinh | Cosh | Tanh => {
            return Err(ExprError::InvalidBinaryOperator(op));
        }
    };
    signaler_nan(op, v);
    Ok(v)
}

/// Évalue une étape : chaque opérande est résolu (récursion), puis on replie
/// de gauche à droite.
pub fn apply_step(etape: &mut Step) -> Result<f64> {
    let n_ops = etape.operators.len();
    let n_operandes = etape.operands.len();

    if n_operandes == 1 {
        if n_ops != 1 {
            return Err(ExprError::OperatorOperandMismatch {
                operateurs: n_ops,
                operandes: n_operandes,
            });
        }
        let x = etape.operands[0].result()?;
        return apply_unary(etape.operators[0], x);
    }

    if n_operandes == 0 || n_ops + 1 != n_operandes {
        return Err(ExprError::OperatorOperandMismatch {
            operateurs: n_ops,
            operandes: n_operandes,
        });
    }

    let (premier, suivants) = etape.operands.split_at_mut(1);
    let mut cumul = premier[0].result()?;
    for (op, operande) in etape.operators.iter().zip(suivants.iter_mut()) {
        cumul = apply_binary(*op, cumul, operande.result()?)?;
    }
    Ok(cumul)
}

fn signaler_nan<F: Float>(op: Operator, v: F) {
    if v.is_nan() {
        warn!("résultat NaN pour l’opérateur {op}");
    }
}
