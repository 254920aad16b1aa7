// src/noyau/expression.rs
//
// Noeud d’expression : texte brut -> (validation) -> découpage -> dernière étape -> valeur.
//
// Cycle de vie (une seule machine à états, pas de drapeaux épars) :
//
//   Brut -> Valide -> Atomique                      (nombre nu, calculé tout de suite)
//                  -> Decoupe -> Resolu -> Calcule  (valeur mémorisée)
//
// Les sous-expressions appartiennent au noeud (arbre strict, pas de partage).
// Elles ne sont découpées que lorsqu’on leur demande un résultat (ou un rendu).

use tracing::{debug, trace, warn};

use super::calcul::apply_step;
use super::erreur::{ExprError, Result};
use super::format::{self, PRECISION_DEFAUT, PRECISION_MAX};
use super::grammaire::{motif_nombre, valider};
use super::jetons::{tokenize, TokenizedExpression};
use super::priorite::{last_calculation_step, Step};

/// D’où vient le noeud.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Origine {
    Texte,
    /// Suite de jetons regroupée par la résolution des priorités.
    Groupe,
    Valeur,
}

#[derive(Debug)]
enum Etat {
    Brut,
    Valide,
    Atomique(f64),
    Decoupe(TokenizedExpression),
    Resolu(Step),
    Calcule { etape: Step, valeur: f64 },
    /// Échec après découpage (les jetons ont été consommés) : mémorisé.
    Echec(ExprError),
}

#[derive(Debug)]
pub struct Expression {
    brut: Option<String>,
    canonique: Option<String>,
    origine: Origine,
    etat: Etat,
    precision: usize,
}

impl Expression {
    /// Noeud à partir d’un texte. Rien n’est validé ni calculé ici.
    pub fn new(texte: impl Into<String>) -> Self {
        let texte = texte.into();
        trace!("expression instanciée : {texte:?}");
        Self {
            brut: Some(texte),
            canonique: None,
            origine: Origine::Texte,
            etat: Etat::Brut,
            precision: PRECISION_DEFAUT,
        }
    }

    /// Nombre déjà calculé (terminal).
    pub fn from_value(valeur: f64) -> Self {
        Self {
            brut: None,
            canonique: None,
            origine: Origine::Valeur,
            etat: Etat::Atomique(valeur),
            precision: PRECISION_DEFAUT,
        }
    }

    /// Suite de jetons déjà découpée (usage interne : regroupement par priorité).
    pub(crate) fn from_tokens(niveau: TokenizedExpression) -> Self {
        Self {
            brut: None,
            canonique: None,
            origine: Origine::Groupe,
            etat: Etat::Decoupe(niveau),
            precision: PRECISION_DEFAUT,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.set_precision(precision);
        self
    }

    /// Nombre de décimales pour le rendu des nombres (borné).
    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision.min(PRECISION_MAX);
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Texte d’entrée, tel que fourni.
    pub fn raw(&self) -> Option<&str> {
        self.brut.as_deref()
    }

    /// Texte normalisé (présent une fois validé).
    pub fn canonical(&self) -> Option<&str> {
        self.canonique.as_deref()
    }

    /// Repart de zéro avec un nouveau texte.
    pub fn set_expression(&mut self, texte: impl Into<String>) {
        let precision = self.precision;
        *self = Self::new(texte);
        self.precision = precision;
    }

    /// Nouveau texte puis result().
    pub fn calculate(&mut self, texte: impl Into<String>) -> Result<f64> {
        self.set_expression(texte);
        self.result()
    }

    /// Passe de validation seule (idempotente).
    pub fn validate(&mut self) -> Result<()> {
        if !matches!(self.etat, Etat::Brut) {
            return Ok(());
        }

        let canonique = valider(self.brut.as_deref().unwrap_or_default())?;
        self.canonique = Some(canonique);
        self.etat = Etat::Valide;
        Ok(())
    }

    pub fn is_validated(&self) -> bool {
        !matches!(self.etat, Etat::Brut)
    }

    /// Nombre nu ? Découpe ce niveau si besoin, jamais les sous-niveaux.
    pub fn is_atomic(&mut self) -> Result<bool> {
        self.parse()?;
        Ok(matches!(self.etat, Etat::Atomique(_)))
    }

    pub fn is_calculated(&self) -> bool {
        matches!(self.etat, Etat::Atomique(_) | Etat::Calcule { .. })
    }

    /// Valeur de l’expression. Tout le travail nécessaire est fait au premier appel,
    /// les appels suivants relisent la valeur mémorisée.
    pub fn result(&mut self) -> Result<f64> {
        loop {
            match self.etat {
                Etat::Atomique(v) | Etat::Calcule { valeur: v, .. } => return Ok(v),
                Etat::Echec(ref e) => return Err(e.clone()),
                Etat::Brut => self.validate()?,
                Etat::Valide => self.parse()?,
                Etat::Decoupe(_) => self.resoudre()?,
                Etat::Resolu(ref mut etape) => {
                    let valeur = apply_step(etape)?;
                    self.marquer_calcule(valeur);
                }
            }
        }
    }

    /// Forme canonique affichable (les nombres à `precision` décimales, `*` rendu `x`).
    pub fn expression(&mut self) -> Result<String> {
        let precision = self.precision;
        self.rendre(precision)
    }

    /// Découpage de ce niveau, tant que la dernière étape n’est pas résolue.
    pub fn tokens(&self) -> Option<&TokenizedExpression> {
        match &self.etat {
            Etat::Decoupe(niveau) => Some(niveau),
            _ => None,
        }
    }

    pub fn outer_step(&self) -> Option<&Step> {
        match &self.etat {
            Etat::Resolu(etape) | Etat::Calcule { etape, .. } => Some(etape),
            _ => None,
        }
    }

    pub fn outer_step_mut(&mut self) -> Option<&mut Step> {
        match &mut self.etat {
            Etat::Resolu(etape) | Etat::Calcule { etape, .. } => Some(etape),
            _ => None,
        }
    }

    pub(crate) fn is_group(&self) -> bool {
        self.origine == Origine::Groupe
    }

    /// Valide -> Atomique | Decoupe
    fn parse(&mut self) -> Result<()> {
        self.validate()?;
        if !matches!(self.etat, Etat::Valide) {
            return Ok(());
        }

        let canonique = self.canonique.as_deref().unwrap_or_default();
        if motif_nombre().is_match(canonique) {
            let valeur: f64 = canonique
                .parse()
                .map_err(|_| ExprError::InvalidSyntax(canonique.to_string()))?;
            self.etat = Etat::Atomique(valeur);
        } else {
            self.etat = Etat::Decoupe(tokenize(canonique)?);
        }
        Ok(())
    }

    /// Decoupe -> Resolu (ou Echec, mémorisé)
    fn resoudre(&mut self) -> Result<()> {
        self.etat = match std::mem::replace(&mut self.etat, Etat::Brut) {
            Etat::Decoupe(niveau) => match last_calculation_step(niveau) {
                Ok(etape) => Etat::Resolu(etape),
                Err(e) => {
                    debug!("échec de résolution : {e}");
                    self.etat = Etat::Echec(e.clone());
                    return Err(e);
                }
            },
            autre => autre,
        };
        Ok(())
    }

    fn marquer_calcule(&mut self, valeur: f64) {
        if !valeur.is_finite() && self.origine == Origine::Texte {
            warn!("résultat non fini : {valeur} pour {:?}", self.canonique);
        }
        self.etat = match std::mem::replace(&mut self.etat, Etat::Brut) {
            Etat::Resolu(etape) => Etat::Calcule { etape, valeur },
            autre => autre,
        };
    }

    pub(crate) fn rendre(&mut self, precision: usize) -> Result<String> {
        self.parse()?;
        match &mut self.etat {
            Etat::Atomique(v) => Ok(format::format_nombre(*v, precision)),
            Etat::Decoupe(niveau) => format::rendre_niveau(niveau, precision),
            Etat::Resolu(etape) | Etat::Calcule { etape, .. } => {
                format::rendre_etape(etape, precision)
            }
            Etat::Echec(e) => self.canonique.clone().ok_or_else(|| e.clone()),
            Etat::Brut | Etat::Valide => Ok(self.canonique.clone().unwrap_or_default()),
        }
    }

    /// Faut-il des parenthèses autour de ce noeud quand il est un jeton parmi d’autres ?
    /// Lit l’état tel quel : à appeler après rendre().
    pub(crate) fn est_compose(&self) -> bool {
        match &self.etat {
            Etat::Decoupe(niveau) => niveau.function.is_none() && niveau.tokens.len() > 1,
            Etat::Resolu(etape) | Etat::Calcule { etape, .. } => !etape.is_unary(),
            Etat::Echec(_) => true,
            Etat::Brut | Etat::Valide | Etat::Atomique(_) => false,
        }
    }
}
