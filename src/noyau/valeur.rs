// src/noyau/valeur.rs
//
// Valeur numérique + opérations de la grammaire.
// - Neg  : moins unaire
// - Sqrt : racine carrée (exacte si carré parfait, sinon approchée)
// - Pow  : puissance à exposant entier (x**2 pour le carré)
// - + - * / : rationnels exacts
//
// IMPORTANT (SAFE):
// - Aucune évaluation de code : rpn.rs applique ces opérations sur une pile explicite.
// - Aucune récursion ici : la profondeur d’imbrication ne touche pas la pile d’appels.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::erreur::{ErreurCalcul, Resultat};
use super::lecture::{racine_scalee, rational_pow_int};

/// Chiffres internes pour les racines non exactes (au-delà de l’affichage).
pub const PRECISION_INTERNE: usize = 40;

/// Garde-fou : |exposant| maximal accepté pour `**`.
pub const EXPOSANT_MAX: i64 = 4096;

/// Garde-fou : taille maximale (en bits) du numérateur ou du dénominateur.
pub const BITS_MAX: u64 = 1 << 16;

/// Opérateurs binaires (dans l’ordre de la RPN : gauche, droite).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binaire {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Résultat numérique d’une évaluation.
///
/// `exacte` passe à false dès qu’une racine non exacte a été approchée :
/// `r` est alors une troncature décimale à PRECISION_INTERNE chiffres.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Valeur {
    pub r: BigRational,
    pub exacte: bool,
}

impl Valeur {
    pub fn exacte(r: BigRational) -> Self {
        Self { r, exacte: true }
    }

    fn avec(&self, autre: &Valeur, r: BigRational) -> Valeur {
        Valeur {
            r,
            exacte: self.exacte && autre.exacte,
        }
    }

    pub fn oppose(self) -> Valeur {
        Valeur {
            r: -self.r,
            exacte: self.exacte,
        }
    }

    pub fn racine(self) -> Resultat<Valeur> {
        if self.r.is_negative() {
            return Err(ErreurCalcul::RacineNegative);
        }
        match racine_exacte(&self.r) {
            Some(r) => Ok(Valeur {
                r,
                exacte: self.exacte,
            }),
            None => {
                let scaled = racine_scalee(&self.r, PRECISION_INTERNE);
                let scale = BigInt::from(10).pow(PRECISION_INTERNE as u32);
                Ok(Valeur {
                    r: BigRational::new(scaled, scale),
                    exacte: false,
                })
            }
        }
    }

    pub fn binaire(self, op: Binaire, autre: Valeur) -> Resultat<Valeur> {
        match op {
            Binaire::Add => {
                let r = &self.r + &autre.r;
                Ok(self.avec(&autre, r))
            }
            Binaire::Sub => {
                let r = &self.r - &autre.r;
                Ok(self.avec(&autre, r))
            }
            Binaire::Mul => {
                let r = borne(&self.r * &autre.r)?;
                Ok(self.avec(&autre, r))
            }
            Binaire::Div => {
                if autre.r.is_zero() {
                    return Err(ErreurCalcul::DivisionParZero);
                }
                let r = borne(&self.r / &autre.r)?;
                Ok(self.avec(&autre, r))
            }
            Binaire::Pow => {
                let n = exposant_entier(&autre)?;
                if n < 0 && self.r.is_zero() {
                    return Err(ErreurCalcul::DivisionParZero);
                }
                // estimation avant calcul : bits(base) * |n|
                let bits = self.r.numer().bits().max(self.r.denom().bits());
                if bits.saturating_mul(n.unsigned_abs()) > BITS_MAX {
                    return Err(ErreurCalcul::Depassement);
                }
                let r = borne(rational_pow_int(self.r.clone(), n))?;
                Ok(self.avec(&autre, r))
            }
        }
    }
}

fn borne(r: BigRational) -> Resultat<BigRational> {
    if r.numer().bits() > BITS_MAX || r.denom().bits() > BITS_MAX {
        return Err(ErreurCalcul::Depassement);
    }
    Ok(r)
}

/// √(n/d) exacte si n et d sont des carrés parfaits (n/d est déjà réduit).
fn racine_exacte(r: &BigRational) -> Option<BigRational> {
    let sn = r.numer().sqrt();
    let sd = r.denom().sqrt();
    if &(&sn * &sn) == r.numer() && &(&sd * &sd) == r.denom() {
        Some(BigRational::new(sn, sd))
    } else {
        None
    }
}

/// Exposant : entier exact, borné par EXPOSANT_MAX.
fn exposant_entier(v: &Valeur) -> Resultat<i64> {
    if !v.exacte || !v.r.denom().is_one() {
        return Err(ErreurCalcul::malformee("exposant doit être entier"));
    }
    let n: i64 = v
        .r
        .numer()
        .to_string()
        .parse()
        .map_err(|_| ErreurCalcul::malformee("exposant trop grand"))?;
    if n.unsigned_abs() > EXPOSANT_MAX as u64 {
        return Err(ErreurCalcul::malformee("exposant trop grand"));
    }
    Ok(n)
}
