// src/app.rs
//
// Module App (racine)
// -------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Traduire le clavier physique en Action (le pavé le fait dans vue.rs)

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use crate::noyau::Action;

/// Touches sans caractère : Enter, Échap, Suppr, ⌫.
fn action_touche_speciale(key: egui::Key) -> Option<Action> {
    match key {
        egui::Key::Enter => Some(Action::Egal),
        egui::Key::Escape => Some(Action::Effacer),
        egui::Key::Delete => Some(Action::EffacerEntree),
        egui::Key::Backspace => Some(Action::Retour),
        _ => None,
    }
}

/// Événements clavier de la frame -> actions, dans l’ordre de frappe.
fn actions_clavier(events: &[egui::Event]) -> Vec<Action> {
    let mut out = Vec::new();
    for ev in events {
        match ev {
            egui::Event::Text(texte) => {
                out.extend(texte.chars().filter_map(Action::depuis_touche));
            }
            egui::Event::Key {
                key, pressed: true, ..
            } => {
                out.extend(action_touche_speciale(*key));
            }
            _ => {}
        }
    }
    out
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let actions = ctx.input(|i| actions_clavier(&i.events));
        for action in actions {
            self.appliquer(action);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
