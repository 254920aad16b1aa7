//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, forme canonique,
//! erreur, précision, démarche) et offrir les actions C/CLR/AC.
//! Aucune évaluation ici : vue.rs appelle le noyau puis dépose le résultat.

use calculatrice_bedmas::noyau::PRECISION_MAX;

/// Décimales affichées par défaut.
const PRECISION_DEFAUT: usize = 6;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub canonique: String,
    pub etape: String,
    pub note: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,
    pub canonique: String,
    pub erreur: String,
    pub resultat_dispo: bool,

    pub demarche: Demarche,

    pub precision: usize,

    // vue.rs redonne le focus à l’entrée après un clic sur un bouton
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            canonique: String::new(),
            erreur: String::new(),
            resultat_dispo: false,
            demarche: Demarche::default(),
            precision: PRECISION_DEFAUT,
            focus_entree: true,
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + précision par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.precision = PRECISION_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée.
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.canonique.clear();
        self.erreur.clear();
        self.resultat_dispo = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Erreur : le dernier résultat reste affiché, la démarche est effacée.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.resultat_dispo = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    pub fn set_resultats(
        &mut self,
        resultat: impl Into<String>,
        canonique: impl Into<String>,
        demarche: Demarche,
    ) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.canonique = canonique.into();
        self.resultat_dispo = true;
        self.demarche = demarche;
        self.focus_entree = true;
    }

    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision.min(PRECISION_MAX);
        self.focus_entree = true;
    }
}
