// src/noyau/erreur.rs
//
// Erreurs du noyau.
// - Le calcul (eval.rs) remonte toutes ses erreurs à l’appelant.
// - La saisie (saisie.rs) avale les erreurs d’évaluation, sauf AucunResultatPrecedent.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    /// Équation vide, incomplète ou illisible.
    #[error("expression malformée: {0}")]
    ExpressionMalformee(String),

    #[error("division par zéro")]
    DivisionParZero,

    #[error("racine carrée d’un nombre négatif")]
    RacineNegative,

    /// Résultat trop grand pour rester calculable (x² répété, etc.).
    #[error("nombre trop grand")]
    Depassement,

    /// Opérateur pressé sans saisie ni historique à reprendre.
    #[error("aucun résultat précédent")]
    AucunResultatPrecedent,
}

impl ErreurCalcul {
    pub(crate) fn malformee(msg: impl Into<String>) -> Self {
        ErreurCalcul::ExpressionMalformee(msg.into())
    }
}

pub type Resultat<T> = Result<T, ErreurCalcul>;
