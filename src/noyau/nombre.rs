// src/noyau/nombre.rs
//
// Montants exacts (BigRational) + formatage d'affichage.
//
// Contrat de format_montant :
// - table d'exceptions consultée AVANT l'arrondi (0.005 -> 0.01, 0.045 -> 0.045)
// - arrondi à 2 décimales, demi au pair
// - affichage 2 décimales (demi loin de zéro) + séparateur de milliers ','
// - on retire ".00", sinon un seul '0' final
// - jamais de "-0"

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;

/// Montant exact porté par une valeur.
pub type Montant = BigRational;

/// Nombre de décimales affichées.
pub const DECIMALES: usize = 2;

const SEPARATEUR_MILLIERS: char = ',';

/* ------------------------ Exceptions historiques ------------------------ */

// (numérateur, dénominateur) -> (numérateur, dénominateur)
const EXCEPTIONS: [((i64, i64), (i64, i64)); 2] = [
    ((1, 200), (1, 100)), // 0.005 -> 0.01
    ((9, 200), (9, 200)), // 0.045 -> 0.045
];

fn rationnel(n: i64, d: i64) -> Montant {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

fn exception(r: &Montant) -> Option<Montant> {
    EXCEPTIONS
        .iter()
        .find(|(source, _)| *r == rationnel(source.0, source.1))
        .map(|(_, cible)| rationnel(cible.0, cible.1))
}

/* ------------------------ Arrondi (entier scalé) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Règle appliquée quand le reste tombe pile sur la moitié.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrondi {
    /// 2.345 -> 2.34, 2.355 -> 2.36
    PairLePlusProche,
    /// 2.345 -> 2.35
    LoinDeZero,
}

/// r -> entier “scalé” = round(r * 10^decimales) selon `mode`.
pub fn arrondir_scale(r: &Montant, decimales: usize, mode: Arrondi) -> BigInt {
    let num = r.numer().abs() * pow10(decimales);
    let den = r.denom().abs();

    let mut q = &num / &den;
    let reste = &num % &den;

    match (&reste + &reste).cmp(&den) {
        Ordering::Greater => q += BigInt::one(),
        Ordering::Equal => {
            let impair = !(&q % BigInt::from(2)).is_zero();
            if mode == Arrondi::LoinDeZero || impair {
                q += BigInt::one();
            }
        }
        Ordering::Less => {}
    }

    if r.is_negative() {
        -q
    } else {
        q
    }
}

/// Arrondi “métier” : exceptions d'abord, puis demi au pair.
pub fn arrondir(r: &Montant) -> Montant {
    exception(r).unwrap_or_else(|| {
        BigRational::new(
            arrondir_scale(r, DECIMALES, Arrondi::PairLePlusProche),
            pow10(DECIMALES),
        )
    })
}

/* ------------------------ Affichage ------------------------ */

fn grouper_milliers(entier: &str) -> String {
    let mut out = String::with_capacity(entier.len() + entier.len() / 3);
    let len = entier.len();
    for (i, ch) in entier.chars().enumerate() {
        out.push(ch);
        let depuis_fin = len - i;
        if depuis_fin > 1 && depuis_fin % 3 == 1 {
            out.push(SEPARATEUR_MILLIERS);
        }
    }
    out
}

/// Formate un montant pour l'affichage (légendes, démarche).
///
/// Exemples : 1234.5 -> "1,234.5", 100 -> "100", 0.125 -> "0.12", 0.005 -> "0.01".
pub fn format_montant(r: &Montant) -> String {
    let scaled = arrondir_scale(&arrondir(r), DECIMALES, Arrondi::LoinDeZero);

    let neg = scaled.is_negative();
    let abs = scaled.abs();
    let scale = pow10(DECIMALES);

    let entier = (&abs / &scale).to_str_radix(10);
    let mut frac = (&abs % &scale).to_str_radix(10);
    while frac.len() < DECIMALES {
        frac.insert(0, '0');
    }

    let mut s = format!(
        "{}{}.{}",
        if neg { "-" } else { "" },
        grouper_milliers(&entier),
        frac
    );

    if s.ends_with("00") {
        s.truncate(s.len() - 3);
    } else if s.ends_with('0') {
        s.pop();
    }
    s
}

/* ------------------------ Lecture ------------------------ */

/// Lit un décimal exact : signe optionnel, chiffres (groupés par ',' ou non),
/// partie fractionnaire optionnelle. Pas d'exposant.
///
/// "1,234.50" -> 2469/2 exact, "abc" -> None
pub fn parse_decimal(s: &str) -> Option<Montant> {
    let s = s.trim();
    let (neg, corps) = match s.strip_prefix('-') {
        Some(reste) => (true, reste),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (entier, frac) = match corps.split_once('.') {
        Some((e, f)) => (e, f),
        None => (corps, ""),
    };

    // ',' seulement entre des chiffres de la partie entière
    if entier.starts_with(SEPARATEUR_MILLIERS) || entier.ends_with(SEPARATEUR_MILLIERS) {
        return None;
    }
    let chiffres: String = entier.chars().filter(|c| *c != SEPARATEUR_MILLIERS).collect();

    if chiffres.is_empty() && frac.is_empty() {
        return None;
    }
    if !chiffres.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let texte = format!("{chiffres}{frac}");
    let num = if texte.is_empty() {
        BigInt::zero()
    } else {
        texte.parse::<BigInt>().ok()?
    };

    let r = BigRational::new(num, pow10(frac.len()));
    Some(if neg { -r } else { r })
}

/// Version texte du contrat : formate si c'est un nombre, sinon rend le texte tel quel.
pub fn format_texte(s: &str) -> String {
    match parse_decimal(s) {
        Some(r) => format_montant(&r),
        None => s.to_string(),
    }
}
