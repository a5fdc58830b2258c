// src/noyau/lecture.rs
//
// Lecture décimale : rationnel -> entier “scalé” (×10^digits) -> texte.
// Sert aussi aux approximations de √ quand le résultat n’est pas rationnel.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal (tous les chiffres).
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/// r -> entier “scalé” = round(r * 10^digits), demi arrondi loin de zéro.
pub fn rational_scaled_arrondi(r: &BigRational, digits: usize) -> BigInt {
    let scale = pow10(digits);
    let deux = BigInt::from(2);
    let n = r.numer().abs() * scale * &deux + r.denom();
    let q = n / (r.denom() * &deux);
    if r.is_negative() {
        -q
    } else {
        q
    }
}

/* ------------------------ √ en lecture (approx scalée) ------------------------ */

/// sqrt(r) en entier scalé : floor( sqrt(r) * 10^digits )
/// r = n/d >= 0 ; sqrt(n/d) = sqrt(n*d)/d
pub fn racine_scalee(r: &BigRational, digits: usize) -> BigInt {
    let n = r.numer();
    let d = r.denom();

    if n.is_zero() {
        return BigInt::zero();
    }

    // y = floor( sqrt(n * d * 10^(2*digits)) / d )
    let cible = n * d * pow10(2 * digits);
    cible.sqrt() / d
}

/* ------------------------ Puissance entière ------------------------ */

/// base^exp par exponentiation rapide (exp < 0 => inverse, base ≠ 0 vérifié par l’appelant).
pub fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = rational_pow_int(base, -exp);
        return BigRational::one() / pos;
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}
