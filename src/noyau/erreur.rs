// src/noyau/erreur.rs
//
// Erreurs du noyau.
// - DivisionParZero : seule erreur arithmétique (propagée, jamais récupérée ici)
// - DecimalInvalide : texte décimal refusé à la construction d'une valeur
//
// Le formatage des nombres et le rendu de la démarche ne lèvent JAMAIS d'erreur
// (repli silencieux sur le texte d'origine).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    /// Le diviseur vaut exactement zéro.
    #[error("division par zéro : {dividende} ÷ {diviseur}")]
    DivisionParZero { dividende: String, diviseur: String },

    /// Texte qui n'est pas un nombre décimal (ex: "12,3.4", "abc").
    #[error("nombre décimal invalide : {0:?}")]
    DecimalInvalide(String),
}
