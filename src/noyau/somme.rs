// src/noyau/somme.rs
//
// Agrégation d'une suite de valeurs par '+'.
// - vide          : "0" (montant 0, journal vide)
// - 1 élément     : "legende[montant]"
// - <= 3 éléments : somme développée "A[10] + B[20] + C[30]"
// - > 3 éléments  : "Sum(Libellé, count(n))[total]"
// Dans tous les cas le journal de chaque élément est conservé (hors affectations simples).

use log::debug;
use num_traits::Zero;
use std::iter::Sum;

use super::etapes::Etapes;
use super::nombre::{format_montant, Montant};
use super::operateurs::{format_operande, Operateur};
use super::valeur::{Precedence, Valeur};

/// Au-delà, la légende est compactée.
pub const SEUIL_COMPACTAGE: usize = 3;

// un élément de somme montre toujours sa valeur, même nommé avec calcul
fn texte_element(v: &Valeur) -> String {
    match v.precedence() {
        Precedence::Nommee | Precedence::Base => {
            format!("{}[{}]", v.legende(), v.montant_formate())
        }
        _ => format_operande(v, Operateur::Plus.precedence()),
    }
}

/// Libellé commun : suffixe commun (sans caractères non-lettres en tête),
/// sinon préfixe commun (sans non-lettres en queue).
///
/// ["Employee1Advance", "Employee2Advance"] -> "Advance", ["Value1", "Value2"] -> "Value"
pub fn libelle_commun(libelles: &[&str]) -> Option<String> {
    let premier: Vec<char> = libelles.first()?.chars().collect();
    let autres: Vec<Vec<char>> = libelles[1..].iter().map(|l| l.chars().collect()).collect();

    let mut n_suffixe = premier.len();
    let mut n_prefixe = premier.len();
    for l in &autres {
        n_suffixe = n_suffixe.min(
            premier
                .iter()
                .rev()
                .zip(l.iter().rev())
                .take_while(|(a, b)| a == b)
                .count(),
        );
        n_prefixe = n_prefixe.min(
            premier
                .iter()
                .zip(l.iter())
                .take_while(|(a, b)| a == b)
                .count(),
        );
    }

    let suffixe: String = premier[premier.len() - n_suffixe..].iter().collect();
    let suffixe = suffixe.trim_start_matches(|c: char| !c.is_alphabetic());
    if !suffixe.is_empty() {
        return Some(suffixe.to_string());
    }

    let prefixe: String = premier[..n_prefixe].iter().collect();
    let prefixe = prefixe.trim_end_matches(|c: char| !c.is_alphabetic());
    (!prefixe.is_empty()).then(|| prefixe.to_string())
}

/// Somme d'une suite de valeurs.
pub fn somme<'a>(valeurs: impl IntoIterator<Item = &'a Valeur>) -> Valeur {
    let valeurs: Vec<&Valeur> = valeurs.into_iter().collect();

    if valeurs.is_empty() {
        // terme atomique : jamais parenthésé
        return Valeur::composee(
            Montant::zero(),
            "0".to_string(),
            Precedence::Multiplicative,
            Etapes::new(),
        );
    }

    let mut total = Montant::zero();
    let mut etapes = Etapes::new();
    for v in &valeurs {
        total += v.montant();
        etapes = Etapes::fusionner(&etapes, v.etapes());
    }

    if let [seule] = valeurs.as_slice() {
        return Valeur::composee(total, texte_element(seule), Precedence::Multiplicative, etapes);
    }

    let legende = if valeurs.len() <= SEUIL_COMPACTAGE {
        valeurs
            .iter()
            .map(|v| texte_element(v))
            .collect::<Vec<_>>()
            .join(Operateur::Plus.motif())
    } else {
        let libelles: Vec<&str> = valeurs.iter().map(|v| v.legende()).collect();
        let n = valeurs.len();
        let total_fmt = format_montant(&total);
        let compacte = match libelle_commun(&libelles) {
            Some(commun) => format!("Sum({commun}, count({n}))[{total_fmt}]"),
            None => format!("Sum(count({n}))[{total_fmt}]"),
        };
        debug!("somme compactée : {compacte}");
        compacte
    };

    Valeur::composee(total, legende, Precedence::Additive, etapes)
}

impl Sum<Valeur> for Valeur {
    fn sum<I: Iterator<Item = Valeur>>(iter: I) -> Valeur {
        let valeurs: Vec<Valeur> = iter.collect();
        somme(&valeurs)
    }
}

impl<'a> Sum<&'a Valeur> for Valeur {
    fn sum<I: Iterator<Item = &'a Valeur>>(iter: I) -> Valeur {
        somme(iter)
    }
}
