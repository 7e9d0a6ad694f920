// src/lib.rs
//
// calcul_lisible : valeurs légendées pour rapports de calcul
// ---------------------------------------------------------
// - légende algébrique en ligne, parenthésée selon la précédence
//     (a[10] + b[5]) × c[2]
// - démarche multi-étapes, une entrée par résultat nommé
//     Tax = price[50] × rate[0.1] = 5
//
// Exemple:
//   let p = Valeur::entier(50, "price");
//   let r = Valeur::decimal("0.1", "rate")?;
//   let tax = (&p * &r).nommer("Tax");
//   println!("{}", tax.trace());
//
// Bibliothèque pure : aucune E/S, aucun logger installé (façade `log` seulement).

pub mod noyau;

pub use noyau::{
    combiner, format_montant, format_texte, parse_decimal, somme, ErreurCalcul, Etapes, Montant,
    Operateur, Precedence, Seuils, Valeur,
};
