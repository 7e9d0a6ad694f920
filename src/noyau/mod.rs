//! Noyau : valeurs légendées + démarche de calcul lisible
//!
//! Organisation interne :
//! - nombre.rs      : montants exacts (BigRational) + format d'affichage (arrondi, milliers)
//! - erreur.rs      : ErreurCalcul (division par zéro, décimal invalide)
//! - valeur.rs      : Valeur, Precedence, nommage (“As”)
//! - operateurs.rs  : + - × ÷ , légende parenthésée selon la précédence
//! - etapes.rs      : journal de provenance + substitution nom -> nom[valeur]
//! - disposition.rs : une ligne / multi-ligne, rendu récursif des groupements
//! - seuils.rs      : seuils de mise en page (serde)
//! - trace.rs       : démarche complète (pipeline pur)
//! - somme.rs       : agrégation (développée / compactée)
//! - libelle.rs     : valeur! (libellé pris au site d'appel)

pub mod disposition;
pub mod erreur;
pub mod etapes;
pub mod libelle;
pub mod nombre;
pub mod operateurs;
pub mod seuils;
pub mod somme;
pub mod trace;
pub mod valeur;

#[cfg(test)]
mod tests_scenarios;


// API publique minimale
pub use erreur::ErreurCalcul;
pub use etapes::Etapes;
pub use nombre::{format_montant, format_texte, parse_decimal, Montant};
pub use operateurs::{combiner, Operateur};
pub use seuils::Seuils;
pub use somme::somme;
pub use valeur::{Precedence, Valeur};
