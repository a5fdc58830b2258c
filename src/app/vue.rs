// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Minimaliste : widgets egui par défaut, aucun thème.
// - Écran : équation (petite ligne) + valeur
// - Pavé : 6 rangées de touches, chaque touche = une Action
// - Historique : liste défilante "équation = valeur"

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::{Action, Operateur, Unaire};

/// Pavé : libellé affiché + action envoyée au contrôleur.
const PAVE: [&[(&str, Action)]; 6] = [
    &[
        ("√", Action::Unaire(Unaire::Racine)),
        ("x²", Action::Unaire(Unaire::Carre)),
        ("1/x", Action::Unaire(Unaire::Inverse)),
    ],
    &[
        ("CE", Action::EffacerEntree),
        ("C", Action::Effacer),
        ("⌫", Action::Retour),
        ("÷", Action::Operateur(Operateur::Divise)),
    ],
    &[
        ("7", Action::Chiffre('7')),
        ("8", Action::Chiffre('8')),
        ("9", Action::Chiffre('9')),
        ("×", Action::Operateur(Operateur::Fois)),
    ],
    &[
        ("4", Action::Chiffre('4')),
        ("5", Action::Chiffre('5')),
        ("6", Action::Chiffre('6')),
        ("−", Action::Operateur(Operateur::Moins)),
    ],
    &[
        ("1", Action::Chiffre('1')),
        ("2", Action::Chiffre('2')),
        ("3", Action::Chiffre('3')),
        ("+", Action::Operateur(Operateur::Plus)),
    ],
    &[
        ("±", Action::Unaire(Unaire::Oppose)),
        ("0", Action::Chiffre('0')),
        (".", Action::Virgule),
        ("=", Action::Egal),
    ],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        self.ui_ecran(ui);
        ui.separator();
        self.ui_pave(ui);

        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }

        ui.separator();
        self.ui_historique(ui);
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        ui.monospace(&self.affichage.equation);
        ui.heading(&self.affichage.valeur);
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave").num_columns(4).show(ui, |ui| {
            for rangee in PAVE {
                for &(libelle, action) in rangee {
                    if ui.button(libelle).clicked() {
                        self.appliquer(action);
                    }
                }
                ui.end_row();
            }
        });
    }

    fn ui_historique(&self, ui: &mut egui::Ui) {
        ui.label("Historique :");
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for h in self.historique() {
                    ui.monospace(format!("{} = {}", h.equation, h.valeur));
                }
            });
    }
}
