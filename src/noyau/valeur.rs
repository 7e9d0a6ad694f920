// src/noyau/valeur.rs
//
// Valeur légendée (immuable).
// - montant   : rationnel exact
// - legende   : "x", "x[5]" ou expression composée "a[10] + b[5]"
// - precedence: rang de l'opérateur de tête (-1 nommée, 0 base, 1 additif, 2 multiplicatif)
// - etapes    : journal de provenance (seul `nommer` y ajoute une entrée)
//
// IMPORTANT:
// - aucune opération ne modifie une valeur existante : tout renvoie une nouvelle Valeur
// - une valeur nommée s'affiche TOUJOURS par sa légende nue (jamais re-parenthésée)

use log::trace;
use num_bigint::BigInt;
use num_rational::BigRational;
use std::cmp::Ordering;
use std::fmt;

use super::erreur::ErreurCalcul;
use super::etapes::{substituer_definitions, Etapes, SEPARATEUR};
use super::nombre::{format_montant, parse_decimal, Montant};
use super::seuils::Seuils;
use super::trace::rendre_trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precedence {
    /// Résultat figé sous un nom (rang -1).
    Nommee,
    /// Littéral jamais nommé (rang 0).
    Base,
    /// + et - (rang 1).
    Additive,
    /// × et ÷ (rang 2).
    Multiplicative,
}

impl Precedence {
    pub fn rang(self) -> i32 {
        match self {
            Precedence::Nommee => -1,
            Precedence::Base => 0,
            Precedence::Additive => 1,
            Precedence::Multiplicative => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Valeur {
    montant: Montant,
    legende: String,
    precedence: Precedence,
    etapes: Etapes,
}

/* ------------------------ Construction ------------------------ */

impl Valeur {
    /// Introduit un nouveau libellé : valeur nommée + entrée "legende = montant".
    pub fn envelopper(montant: Montant, legende: impl Into<String>) -> Self {
        let legende = legende.into();
        let entree = format!("{legende}{SEPARATEUR}{}", format_montant(&montant));
        Self {
            montant,
            legende,
            precedence: Precedence::Nommee,
            etapes: Etapes::avec(entree),
        }
    }

    pub fn entier(n: i64, legende: impl Into<String>) -> Self {
        Self::envelopper(BigRational::from_integer(BigInt::from(n)), legende)
    }

    /// "0.18", "1,250.5"... lu exactement.
    pub fn decimal(texte: &str, legende: impl Into<String>) -> Result<Self, ErreurCalcul> {
        let montant =
            parse_decimal(texte).ok_or_else(|| ErreurCalcul::DecimalInvalide(texte.to_string()))?;
        Ok(Self::envelopper(montant, legende))
    }

    /// Littéral non nommé (précédence 0, journal vide) : ce que renvoie `valeur!`.
    pub fn base(montant: Montant, legende: impl Into<String>) -> Self {
        Self {
            montant,
            legende: legende.into(),
            precedence: Precedence::Base,
            etapes: Etapes::new(),
        }
    }

    pub(crate) fn composee(
        montant: Montant,
        legende: String,
        precedence: Precedence,
        etapes: Etapes,
    ) -> Self {
        Self {
            montant,
            legende,
            precedence,
            etapes,
        }
    }

    /* ------------------------ Accès ------------------------ */

    pub fn montant(&self) -> &Montant {
        &self.montant
    }

    pub fn legende(&self) -> &str {
        &self.legende
    }

    pub fn precedence(&self) -> Precedence {
        self.precedence
    }

    pub fn etapes(&self) -> &Etapes {
        &self.etapes
    }

    pub fn est_nommee(&self) -> bool {
        self.precedence == Precedence::Nommee
    }

    /// Le journal contient un vrai calcul (pas seulement des affectations simples).
    pub fn a_des_calculs(&self) -> bool {
        self.etapes.a_des_calculs()
    }

    /// Montant formaté pour l'affichage.
    pub fn montant_formate(&self) -> String {
        format_montant(&self.montant)
    }

    /// Texte de la valeur utilisée comme opérande (hors parenthésage).
    /// - nommée sans calcul, ou base : "legende[montant]"
    /// - nommée avec calcul, ou composée : "legende"
    pub fn texte_operande(&self) -> String {
        let crochets = match self.precedence {
            Precedence::Nommee => !self.a_des_calculs(),
            Precedence::Base => true,
            Precedence::Additive | Precedence::Multiplicative => false,
        };
        if crochets {
            format!("{}[{}]", self.legende, self.montant_formate())
        } else {
            self.legende.clone()
        }
    }

    /* ------------------------ Nommage ------------------------ */

    /// Fige la valeur sous `legende` (opération “As”).
    ///
    /// - base, ou expression qui n'est que le montant : ajoute "legende = montant"
    /// - sinon : ajoute "legende = expression substituée = montant"
    /// - entrée déjà présente : rien n'est ajouté
    pub fn nommer(&self, legende: impl Into<String>) -> Valeur {
        let legende = legende.into();

        // renommer sous le même nom : inchangé
        if self.est_nommee() && self.legende == legende {
            return self.clone();
        }

        let montant = self.montant_formate();
        let entree = match self.precedence {
            Precedence::Base => format!("{legende}{SEPARATEUR}{montant}"),
            _ => {
                let expression = self.expression_substituee();
                // expression réduite au montant (somme vide "0") : affectation simple
                if expression == montant {
                    format!("{legende}{SEPARATEUR}{montant}")
                } else {
                    format!("{legende}{SEPARATEUR}{expression}{SEPARATEUR}{montant}")
                }
            }
        };

        let mut etapes = self.etapes.clone();
        if etapes.ajouter(entree) {
            trace!("nommer {legende:?} : {} entrée(s)", etapes.len());
        }

        Valeur {
            montant: self.montant.clone(),
            legende,
            precedence: Precedence::Nommee,
            etapes,
        }
    }

    /// Légende où chaque nom défini du journal devient "nom[valeur]".
    pub fn expression_substituee(&self) -> String {
        substituer_definitions(&self.legende, &self.etapes)
    }

    /* ------------------------ Démarche ------------------------ */

    /// Démarche lisible avec les seuils par défaut.
    pub fn trace(&self) -> String {
        rendre_trace(self, &Seuils::default())
    }

    pub fn trace_avec(&self, seuils: &Seuils) -> String {
        rendre_trace(self, seuils)
    }
}

impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.texte_operande())
    }
}

/* ------------------------ Comparaisons (montant seul) ------------------------ */

impl PartialEq for Valeur {
    fn eq(&self, autre: &Self) -> bool {
        self.montant == autre.montant
    }
}

impl PartialOrd for Valeur {
    fn partial_cmp(&self, autre: &Self) -> Option<Ordering> {
        self.montant.partial_cmp(&autre.montant)
    }
}

impl PartialEq<Montant> for Valeur {
    fn eq(&self, autre: &Montant) -> bool {
        self.montant == *autre
    }
}

impl PartialOrd<Montant> for Valeur {
    fn partial_cmp(&self, autre: &Montant) -> Option<Ordering> {
        self.montant.partial_cmp(autre)
    }
}

impl PartialEq<Valeur> for Montant {
    fn eq(&self, autre: &Valeur) -> bool {
        *self == autre.montant
    }
}

impl PartialOrd<Valeur> for Montant {
    fn partial_cmp(&self, autre: &Valeur) -> Option<Ordering> {
        self.partial_cmp(&autre.montant)
    }
}
