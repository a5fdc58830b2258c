//! Noyau de la calculatrice (sans UI)
//!
//! Organisation interne :
//! - erreur.rs   : erreurs typées (ErreurCalcul)
//! - jetons.rs   : tokenisation de l’équation
//! - rpn.rs      : shunting-yard + évaluation de la RPN (pile explicite)
//! - valeur.rs   : Valeur exacte + opérations (+ - * / ** √ neg)
//! - lecture.rs  : décimal scalé, √ approchée, puissances
//! - format.rs   : Valeur -> texte affiché
//! - eval.rs     : pipeline complet (evaluer)
//! - saisie.rs   : contrôleur de saisie (jetons, affichage, historique)

pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod rpn;
pub mod saisie;
pub mod valeur;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use eval::evaluer;
pub use saisie::{Action, Affichage, Controleur, EntreeHistorique, Operateur, Unaire};
