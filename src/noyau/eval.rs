//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN -> Valeur (pile explicite)
//!
//! Fonction pure : aucune mutation, aucun code exécuté en dehors de la grammaire
//! (décimaux, + - * /, parenthèses, sqrt(x), x**n, moins unaire).

use tracing::trace;

use super::erreur::{ErreurCalcul, Resultat};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{evaluer_rpn, to_rpn};
use super::valeur::Valeur;

/// API publique : évalue une équation et retourne sa valeur.
pub fn evaluer(equation: &str) -> Resultat<Valeur> {
    let s = equation.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::malformee("entrée vide"));
    }

    // 1) Jetons
    let jetons = tokenize(s)?;

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    trace!(equation = s, rpn = %format_tokens(&rpn), "équation lue");

    // 3) Valeur
    evaluer_rpn(&rpn)
}
