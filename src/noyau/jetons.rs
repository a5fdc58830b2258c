// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use super::erreur::{ErreurCalcul, Resultat};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),

    // Fonctions (seule "sqrt" est reconnue; le reste est refusé par rpn.rs)
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    StarStar, // **

    // Moins unaire : n’existe qu’en sortie de to_rpn (la lecture ne sait pas encore le distinguer)
    Neg,

    LPar,
    RPar,
}

/// Tokenize une équation en jetons.
/// Supporte:
/// - littéraux décimaux (ex: 12, 1.5, .5, 5.)
/// - opérateurs + - * / et puissance **
/// - parenthèses ( )
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Resultat<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // "**" = puissance, "*" = produit
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::StarStar);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '√' => {
                out.push(Tok::Ident("sqrt".to_string()));
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
            continue;
        }

        // Littéral décimal : chiffres, au plus un point
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut entier = String::new();
            let mut fraction = String::new();
            let mut point = false;

            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    if point {
                        let lu: String = chars[start..=i].iter().collect();
                        return Err(ErreurCalcul::malformee(format!(
                            "deux points décimaux dans '{lu}'"
                        )));
                    }
                    point = true;
                } else if point {
                    fraction.push(chars[i]);
                } else {
                    entier.push(chars[i]);
                }
                i += 1;
            }

            if entier.is_empty() && fraction.is_empty() {
                return Err(ErreurCalcul::malformee("point décimal sans chiffre"));
            }

            out.push(Tok::Num(parse_decimal(&entier, &fraction)?));
            continue;
        }

        return Err(ErreurCalcul::malformee(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// "12" + "34" => 1234/100 (réduit par BigRational::new)
fn parse_decimal(entier: &str, fraction: &str) -> Resultat<BigRational> {
    let chiffres = format!("{entier}{fraction}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)
        .ok_or_else(|| ErreurCalcul::malformee("nombre invalide"))?;
    let d = BigInt::from(10).pow(fraction.len() as u32);
    Ok(BigRational::new(n, d))
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::StarStar => "**".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
