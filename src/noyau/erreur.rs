// src/noyau/erreur.rs
//
// Erreurs du noyau. Toutes sont “fail-fast” : elles remontent telles quelles
// jusqu’à l’appelant de result()/validate().
// Les cas arithmétiques (division par zéro, ln(-1), ...) ne sont PAS des erreurs :
// ils donnent inf/NaN selon IEEE-754.

use thiserror::Error;

use super::operateur::Operator;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("parenthèses déséquilibrées : {ouvrantes} '(' pour {fermantes} ')'")]
    UnbalancedParentheses { ouvrantes: usize, fermantes: usize },

    #[error("syntaxe invalide : {0:?}")]
    InvalidSyntax(String),

    #[error("opérateur binaire en tête d’expression : {0:?}")]
    LeadingOperator(String),

    #[error("parenthèse sans correspondance : {0:?}")]
    UnmatchedBracket(String),

    #[error("fonction sans argument : {0:?}")]
    FunctionMissingArgument(String),

    #[error("jeton inattendu : {0:?}")]
    UnexpectedToken(String),

    #[error("opérateur binaire sans opérande : {0:?}")]
    DanglingOperator(String),

    #[error("imbrication trop profonde : {profondeur} niveaux de parenthèses (maximum {max})")]
    TooDeep { profondeur: usize, max: usize },

    #[error("étape incohérente : {operateurs} opérateur(s) pour {operandes} opérande(s)")]
    OperatorOperandMismatch { operateurs: usize, operandes: usize },

    #[error("aucune dernière étape calculable")]
    NoCalculableStep,

    #[error("opérateur {0} appliqué à un seul opérande")]
    InvalidUnaryOperator(Operator),

    #[error("opérateur {0} appliqué à deux opérandes")]
    InvalidBinaryOperator(Operator),
}

pub type Result<T> = std::result::Result<T, ExprError>;
