// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> Valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), en refusant tôt ce qui est malformé
// - Puis évaluer la RPN sur une pile de valeurs
//
// Règles:
// - Ident("sqrt") => fonction unaire, doit être suivie de '('
// - Moins unaire : '-' quand on n’attend PAS une valeur => Tok::Neg (priorité maximale)
// - Précédence : Neg > ** (droite) > * / > + -

use super::erreur::{ErreurCalcul, Resultat};
use super::jetons::Tok;
use super::valeur::{Binaire, Valeur};

/// Garde-fou : profondeur maximale d’imbrication acceptée.
pub const PROFONDEUR_MAX: usize = 512;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::StarStar => 3,
        Tok::Neg => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::StarStar | Tok::Neg)
}

/// Identificateurs reconnus comme fonctions (unaire).
fn is_fonction_ident(name: &str) -> bool {
    name == "sqrt"
}

fn est_fonction(t: &Tok) -> bool {
    matches!(t, Tok::Ident(name) if is_fonction_ident(name))
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Plus, Num(3), Star, Num(4)]
///   rpn:    [Num(2), Num(3), Num(4), Star, Plus]
pub fn to_rpn(tokens: &[Tok]) -> Resultat<Vec<Tok>> {
    if tokens.is_empty() {
        return Err(ErreurCalcul::malformee("entrée vide"));
    }

    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les opérandes manquants.
    let mut prev_was_value = false;

    let mut iter = tokens.iter().cloned().peekable();
    while let Some(tok) = iter.next() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err(ErreurCalcul::malformee("opérateur manquant"));
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if !is_fonction_ident(&name) {
                    return Err(ErreurCalcul::malformee(format!("identifiant inconnu: {name}")));
                }
                if prev_was_value {
                    return Err(ErreurCalcul::malformee("opérateur manquant"));
                }
                if !matches!(iter.peek(), Some(Tok::LPar)) {
                    return Err(ErreurCalcul::malformee(format!("{name} sans parenthèse")));
                }
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(Tok::Ident(name));
                prev_was_value = false;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurCalcul::malformee("opérateur manquant avant '('"));
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurCalcul::malformee("opérande manquant avant ')'"));
                }

                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurCalcul::malformee("')' sans '('"));
                }

                // si une fonction est au sommet, on la sort aussi
                if ops.last().is_some_and(est_fonction) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Minus if !prev_was_value => {
                // moins unaire préfixe : rien à dépiler
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::StarStar => {
                if !prev_was_value {
                    return Err(ErreurCalcul::malformee(format!(
                        "opérande manquant avant '{}'",
                        super::jetons::format_tokens(std::slice::from_ref(&tok))
                    )));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || est_fonction(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err(ErreurCalcul::malformee("jeton neg inattendu")),
        }
    }

    if !prev_was_value {
        return Err(ErreurCalcul::malformee("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurCalcul::malformee("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Évalue une RPN sur une pile explicite de valeurs (aucune récursion).
/// Chaque valeur porte sa profondeur : au-delà de PROFONDEUR_MAX on refuse,
/// avant de calculer le noeud.
pub fn evaluer_rpn(rpn: &[Tok]) -> Resultat<Valeur> {
    let mut st: Vec<(Valeur, usize)> = Vec::new();

    fn invalide() -> ErreurCalcul {
        ErreurCalcul::malformee("expression invalide")
    }

    fn profondeur_bornee(p: usize) -> Resultat<usize> {
        if p > PROFONDEUR_MAX {
            return Err(ErreurCalcul::malformee("imbrication trop profonde"));
        }
        Ok(p)
    }

    for tok in rpn {
        let entree = match tok {
            Tok::Num(r) => (Valeur::exacte(r.clone()), 1),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::StarStar => {
                let (b, pb) = st.pop().ok_or_else(invalide)?;
                let (a, pa) = st.pop().ok_or_else(invalide)?;
                let p = profondeur_bornee(1 + pa.max(pb))?;

                let op = match tok {
                    Tok::Plus => Binaire::Add,
                    Tok::Minus => Binaire::Sub,
                    Tok::Star => Binaire::Mul,
                    Tok::Slash => Binaire::Div,
                    _ => Binaire::Pow,
                };
                (a.binaire(op, b)?, p)
            }

            Tok::Neg => {
                let (x, p) = st.pop().ok_or_else(invalide)?;
                (x.oppose(), profondeur_bornee(p + 1)?)
            }

            Tok::Ident(name) => {
                if !is_fonction_ident(name) {
                    return Err(ErreurCalcul::malformee(format!("identifiant inconnu: {name}")));
                }
                let (x, p) = st
                    .pop()
                    .ok_or_else(|| ErreurCalcul::malformee("fonction sans argument"))?;
                let p = profondeur_bornee(p + 1)?;
                (x.racine()?, p)
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurCalcul::malformee("parenthèse inattendue en RPN"))
            }
        };
        st.push(entree);
    }

    match (st.pop(), st.is_empty()) {
        (Some((v, _)), true) => Ok(v),
        _ => Err(invalide()),
    }
}
