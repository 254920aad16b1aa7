//! Noyau BEDMAS (f64)
//!
//! Organisation interne :
//! - grammaire.rs  : validation + forme canonique (regex, structure)
//! - jetons.rs     : découpage d’un niveau (jetons, opérateurs, fonction)
//! - priorite.rs   : dernière étape selon BEDMAS (regroupement récursif)
//! - calcul.rs     : application des opérateurs (IEEE-754)
//! - expression.rs : noeud paresseux + mémorisation (machine à états)
//! - format.rs     : rendu canonique + démarche
//! - eval.rs       : point d’entrée pour l’application

pub mod calcul;
pub mod erreur;
pub mod eval;
pub mod expression;
pub mod format;
pub mod grammaire;
pub mod jetons;
pub mod operateur;
pub mod priorite;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique
pub use erreur::{ExprError, Result};
pub use eval::{eval_expression, DemarcheNoyau};
pub use expression::Expression;
pub use format::{PRECISION_DEFAUT, PRECISION_MAX};
pub use grammaire::PROFONDEUR_MAX;
pub use jetons::TokenizedExpression;
pub use operateur::Operator;
pub use priorite::Step;
