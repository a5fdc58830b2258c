//! src/noyau/saisie.rs
//!
//! Contrôleur de saisie : touches -> jetons -> équation -> valeur affichée -> historique.
//!
//! Contrats :
//! - Les jetons alternent (jamais deux opérandes de suite, jamais un opérateur en tête).
//! - Les erreurs d’évaluation sont avalées ici : l’affichage garde sa valeur précédente.
//! - Seule `AucunResultatPrecedent` remonte (opérateur sans saisie ni historique).
//! - Aucune dépendance à l’UI : la vue applique une `Action` et relit l’`Affichage`.

use std::fmt;

use tracing::{debug, warn};

use super::erreur::{ErreurCalcul, Resultat};
use super::eval::evaluer;
use super::format::{CHIFFRES_DEFAUT, CHIFFRES_MAX};

/// Valeur affichée au démarrage et après `C`.
pub const VALEUR_INITIALE: &str = "0";

/* ------------------------ Jetons ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl Operateur {
    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '*',
            Operateur::Divise => '/',
        }
    }
}

impl TryFrom<char> for Operateur {
    type Error = char;

    fn try_from(c: char) -> Result<Self, char> {
        match c {
            '+' => Ok(Operateur::Plus),
            '-' | '−' => Ok(Operateur::Moins),
            '*' | '×' | 'x' => Ok(Operateur::Fois),
            '/' | '÷' => Ok(Operateur::Divise),
            _ => Err(c),
        }
    }
}

/// Fonctions unaires : réécrivent le dernier opérande en texte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unaire {
    Racine,
    Carre,
    Inverse,
    Oppose,
}

impl Unaire {
    pub fn appliquer(self, operande: &str) -> String {
        match self {
            Unaire::Racine => format!("sqrt({operande})"),
            Unaire::Carre => format!("({operande})**2"),
            Unaire::Inverse => format!("1/({operande})"),
            Unaire::Oppose => format!("-({operande})"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Jeton {
    /// Littéral en cours de frappe (chiffres et points, non validé).
    Nombre(String),
    /// Opérande réécrit par une fonction unaire : "sqrt(4)", "(3)**2", ...
    Compose(String),
    Op(Operateur),
}

impl Jeton {
    pub fn est_operande(&self) -> bool {
        !matches!(self, Jeton::Op(_))
    }
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jeton::Nombre(t) | Jeton::Compose(t) => f.write_str(t),
            Jeton::Op(op) => write!(f, "{}", op.symbole()),
        }
    }
}

/* ------------------------ Historique + actions ------------------------ */

/// Entrée d’historique : figée à la création, jamais modifiée.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeHistorique {
    pub equation: String,
    pub valeur: String,
}

/// Une touche du pavé (ou du clavier), déjà interprétée.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Chiffre(char),
    Virgule,
    Operateur(Operateur),
    Unaire(Unaire),
    Egal,
    Effacer,
    EffacerEntree,
    Retour,
}

impl Action {
    /// Touche caractère -> action (Enter/Échap/Suppr/⌫ sont traitées par la vue).
    pub fn depuis_touche(c: char) -> Option<Action> {
        match c {
            '0'..='9' => Some(Action::Chiffre(c)),
            '.' | ',' => Some(Action::Virgule),
            '=' => Some(Action::Egal),
            _ => Operateur::try_from(c).ok().map(Action::Operateur),
        }
    }
}

/// Ce que la vue doit montrer après une action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Affichage {
    pub equation: String,
    pub valeur: String,
}

/* ------------------------ Contrôleur ------------------------ */

#[derive(Clone, Debug)]
pub struct Controleur {
    jetons: Vec<Jeton>,
    valeur: String,
    historique: Vec<EntreeHistorique>,
    chiffres: usize,
}

impl Default for Controleur {
    fn default() -> Self {
        Self::new(CHIFFRES_DEFAUT)
    }
}

impl Controleur {
    pub fn new(chiffres: usize) -> Self {
        Self {
            jetons: Vec::new(),
            valeur: VALEUR_INITIALE.to_string(),
            historique: Vec::new(),
            chiffres: chiffres.min(CHIFFRES_MAX),
        }
    }

    /* --- lecture seule --- */

    /// Équation affichée : vide tant qu’il n’y a pas au moins deux jetons.
    pub fn equation_text(&self) -> String {
        if self.jetons.len() < 2 {
            String::new()
        } else {
            self.equation_complete()
        }
    }

    pub fn display_text(&self) -> &str {
        &self.valeur
    }

    pub fn historique(&self) -> &[EntreeHistorique] {
        &self.historique
    }

    pub fn jetons(&self) -> &[Jeton] {
        &self.jetons
    }

    pub fn affichage(&self) -> Affichage {
        Affichage {
            equation: self.equation_text(),
            valeur: self.valeur.clone(),
        }
    }

    /* --- interface commande --- */

    /// Applique une action et renvoie l’affichage à jour.
    pub fn appliquer(&mut self, action: Action) -> Resultat<Affichage> {
        debug!(?action, "action");
        match action {
            Action::Chiffre(d) => self.handle_digit(d),
            Action::Virgule => self.handle_decimal_point(),
            Action::Operateur(op) => self.handle_operator(op)?,
            Action::Unaire(u) => self.handle_unary(u),
            Action::Egal => self.handle_equals(),
            Action::Effacer => self.handle_clear(),
            Action::EffacerEntree => self.handle_clear_entry(),
            Action::Retour => self.handle_backspace(),
        }
        Ok(self.affichage())
    }

    /* --- touches --- */

    pub fn handle_digit(&mut self, d: char) {
        if !d.is_ascii_digit() {
            warn!(touche = %d, "chiffre attendu, touche ignorée");
            return;
        }
        self.saisir_litteral(d);
    }

    pub fn handle_decimal_point(&mut self) {
        self.saisir_litteral('.');
    }

    /// Opérateur : ajoute (ou remplace) puis évalue la partie déjà complète.
    /// L’historique ne reçoit que les parties d’au moins deux jetons (pas "7" seul).
    pub fn handle_operator(&mut self, op: Operateur) -> Resultat<()> {
        if self.jetons.is_empty() {
            let precedent = self
                .historique
                .last()
                .ok_or(ErreurCalcul::AucunResultatPrecedent)?;
            self.jetons.push(Jeton::Nombre(precedent.valeur.clone()));
        }

        match self.jetons.last_mut() {
            Some(dernier @ Jeton::Op(_)) => *dernier = Jeton::Op(op),
            _ => self.jetons.push(Jeton::Op(op)),
        }

        // L’équation complète finit par l’opérateur (toujours malformée) :
        // on évalue ce qui le précède.
        let complete = &self.jetons[..self.jetons.len() - 1];
        let (equation, n_complets) = (concat(complete), complete.len());
        if let Some(valeur) = self.evaluer_silencieux(&equation) {
            self.valeur = valeur;
            if n_complets >= 2 {
                self.historiser(equation);
            }
        }
        Ok(())
    }

    /// Fonction unaire sur le dernier opérande (sans effet sur un opérateur ou une saisie vide).
    pub fn handle_unary(&mut self, u: Unaire) {
        let Some(dernier) = self.jetons.last_mut() else {
            return;
        };
        if !dernier.est_operande() {
            debug!(?u, "fonction unaire sur un opérateur, ignorée");
            return;
        }

        let texte = u.appliquer(&dernier.to_string());
        *dernier = Jeton::Compose(texte.clone());

        if let Some(valeur) = self.evaluer_silencieux(&texte) {
            self.valeur = valeur;
        }
    }

    pub fn handle_equals(&mut self) {
        if self.jetons.is_empty() {
            return;
        }

        let equation = self.equation_complete();
        if let Some(valeur) = self.evaluer_silencieux(&equation) {
            self.valeur = valeur;
        }
        self.historiser(equation);
        self.jetons.clear();
    }

    /// C : tout effacer sauf l’historique.
    pub fn handle_clear(&mut self) {
        self.jetons.clear();
        self.valeur = VALEUR_INITIALE.to_string();
    }

    /// CE : retire le dernier jeton.
    pub fn handle_clear_entry(&mut self) {
        self.jetons.pop();
    }

    /// ⌫ : retire un caractère du littéral en cours, sinon le jeton entier
    /// (l’affichage repart alors de "0").
    pub fn handle_backspace(&mut self) {
        match self.jetons.last_mut() {
            None => {}
            Some(Jeton::Nombre(t)) if t.chars().count() > 1 => {
                t.pop();
                self.valeur = t.clone();
            }
            Some(_) => {
                self.handle_clear_entry();
                self.valeur = VALEUR_INITIALE.to_string();
            }
        }
    }

    /* --- interne --- */

    fn saisir_litteral(&mut self, c: char) {
        match self.jetons.last_mut() {
            Some(Jeton::Nombre(t)) => t.push(c),
            // On ne tape pas “dans” sqrt(4) : un nouveau nombre le remplace.
            Some(dernier @ Jeton::Compose(_)) => *dernier = Jeton::Nombre(c.to_string()),
            _ => self.jetons.push(Jeton::Nombre(c.to_string())),
        }
        if let Some(dernier) = self.jetons.last() {
            self.valeur = dernier.to_string();
        }
    }

    fn equation_complete(&self) -> String {
        concat(&self.jetons)
    }

    fn evaluer_silencieux(&self, equation: &str) -> Option<String> {
        match evaluer(equation) {
            Ok(v) => Some(v.en_texte(self.chiffres)),
            Err(e) => {
                debug!(equation, erreur = %e, "évaluation ignorée");
                None
            }
        }
    }

    fn historiser(&mut self, equation: String) {
        self.historique.push(EntreeHistorique {
            equation,
            valeur: self.valeur.clone(),
        });
    }
}

fn concat(jetons: &[Jeton]) -> String {
    jetons.iter().map(Jeton::to_string).collect()
}
