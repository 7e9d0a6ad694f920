// src/noyau/seuils.rs
//
// Politique de mise en page de la démarche (pas des constantes physiques).
// Chargeable depuis JSON/TOML côté appelant via serde ; clés absentes => défauts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seuils {
    /// Nombre d'opérateurs “de surface” au-delà duquel on passe en multi-ligne.
    #[serde(rename = "bracketOperatorThreshold")]
    pub operateurs_max: usize,

    /// Longueur max du contenu d'une parenthèse mathématique.
    #[serde(rename = "bracketLengthThreshold")]
    pub longueur_parenthese_max: usize,

    /// Longueur max d'un terme à l'intérieur d'une parenthèse.
    #[serde(rename = "termLengthThreshold")]
    pub longueur_terme_max: usize,

    /// Longueur max de l'expression entière.
    #[serde(rename = "overallLengthThreshold")]
    pub longueur_totale_max: usize,
}

impl Default for Seuils {
    fn default() -> Self {
        Self {
            operateurs_max: 3,
            longueur_parenthese_max: 60,
            longueur_terme_max: 40,
            longueur_totale_max: 80,
        }
    }
}
