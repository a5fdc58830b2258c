//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder le contrôleur de saisie et la dernière copie de ce qu’il faut afficher.
//!
//! Contrats :
//! - Aucune logique de calcul ici : tout passe par `Controleur::appliquer`.
//! - L’affichage n’est relu qu’à travers l’`Affichage` renvoyé après chaque action.
//! - Une action refusée (aucun résultat précédent) laisse l’écran intact et pose un message.

use tracing::warn;

use crate::config::Config;
use crate::noyau::{Action, Affichage, Controleur, EntreeHistorique};

#[derive(Clone, Debug)]
pub struct AppCalc {
    controleur: Controleur,

    // --- sorties ---
    pub affichage: Affichage,
    pub erreur: String, // message de la dernière action refusée
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppCalc {
    pub fn new(config: &Config) -> Self {
        let controleur = Controleur::new(config.chiffres);
        Self {
            affichage: controleur.affichage(),
            controleur,
            erreur: String::new(),
        }
    }

    /// Point d’entrée unique de la vue (pavé + clavier).
    pub fn appliquer(&mut self, action: Action) {
        match self.controleur.appliquer(action) {
            Ok(affichage) => {
                self.affichage = affichage;
                self.erreur.clear();
            }
            Err(e) => {
                warn!(?action, erreur = %e, "action refusée");
                self.erreur = e.to_string();
            }
        }
    }

    pub fn historique(&self) -> &[EntreeHistorique] {
        self.controleur.historique()
    }
}
