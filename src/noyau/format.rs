// src/noyau/format.rs
//
// Affichage d’une Valeur dans l’écran principal.
// - entier exact         : "10", "-3"
// - sinon                : arrondi à `chiffres` décimales, zéros finaux retirés
// - "-0" n’existe pas    : "0"

use num_traits::One;

use super::valeur::Valeur;
use super::lecture::{rational_scaled_arrondi, scaled_to_decimal};

/// Précision d’affichage par défaut (décimales).
pub const CHIFFRES_DEFAUT: usize = 16;

/// Garde-fou : on borne la précision (anti-abus / anti-gel).
pub const CHIFFRES_MAX: usize = 200;

impl Valeur {
    pub fn en_texte(&self, chiffres: usize) -> String {
        if self.exacte && self.r.denom().is_one() {
            return format!("{}", self.r.numer());
        }

        let chiffres = chiffres.min(CHIFFRES_MAX);
        let scaled = rational_scaled_arrondi(&self.r, chiffres);
        let texte = scaled_to_decimal(scaled, chiffres);
        nettoyer_decimal(texte)
    }
}

fn nettoyer_decimal(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}
