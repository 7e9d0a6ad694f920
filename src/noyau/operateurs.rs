// src/noyau/operateurs.rs
//
// Moteur d'opérateurs : + - × ÷ entre deux valeurs.
//
// Règles:
// - opérande parenthésé ssi 0 < rang(opérande) < rang(opération)
//   => pas de parenthèse à précédence égale (associativité gauche, même pour a - (b - c))
// - légende = "{gauche} {symbole} {droite}", précédence = celle de l'opération
// - journal = union gauche puis droite, sans les affectations simples
// - aucun opérateur n'ajoute d'entrée au journal (seul `nommer` le fait)

use log::debug;
use num_traits::Zero;
use std::ops::{Add, Div, Mul, Sub};

use super::erreur::ErreurCalcul;
use super::etapes::Etapes;
use super::nombre::Montant;
use super::valeur::{Precedence, Valeur};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl Operateur {
    pub const TOUS: [Operateur; 4] = [
        Operateur::Plus,
        Operateur::Moins,
        Operateur::Fois,
        Operateur::Divise,
    ];

    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '×',
            Operateur::Divise => '÷',
        }
    }

    /// Symbole entouré d'espaces, tel qu'il apparaît dans une légende.
    pub fn motif(self) -> &'static str {
        match self {
            Operateur::Plus => " + ",
            Operateur::Moins => " - ",
            Operateur::Fois => " × ",
            Operateur::Divise => " ÷ ",
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            Operateur::Plus | Operateur::Moins => Precedence::Additive,
            Operateur::Fois | Operateur::Divise => Precedence::Multiplicative,
        }
    }

    pub fn depuis_symbole(c: char) -> Option<Operateur> {
        Operateur::TOUS.into_iter().find(|op| op.symbole() == c)
    }
}

/// Texte d'un opérande dans une opération de précédence `courante`.
pub fn format_operande(operande: &Valeur, courante: Precedence) -> String {
    let rang = operande.precedence().rang();
    if rang > 0 && rang < courante.rang() {
        return format!("({})", operande.legende());
    }
    operande.texte_operande()
}

// montant déjà calculé : ne peut plus échouer
fn assembler(gauche: &Valeur, droite: &Valeur, op: Operateur, montant: Montant) -> Valeur {
    let precedence = op.precedence();
    let legende = format!(
        "{}{}{}",
        format_operande(gauche, precedence),
        op.motif(),
        format_operande(droite, precedence)
    );
    Valeur::composee(
        montant,
        legende,
        precedence,
        Etapes::fusionner(gauche.etapes(), droite.etapes()),
    )
}

/// Applique `op` à deux valeurs. Seule ÷ par un zéro exact échoue.
pub fn combiner(gauche: &Valeur, droite: &Valeur, op: Operateur) -> Result<Valeur, ErreurCalcul> {
    let (a, b) = (gauche.montant(), droite.montant());

    let montant = match op {
        Operateur::Plus => a + b,
        Operateur::Moins => a - b,
        Operateur::Fois => a * b,
        Operateur::Divise => {
            if b.is_zero() {
                let precedence = op.precedence();
                let dividende = format_operande(gauche, precedence);
                let diviseur = format_operande(droite, precedence);
                debug!("division refusée : {dividende} ÷ {diviseur}");
                return Err(ErreurCalcul::DivisionParZero {
                    dividende,
                    diviseur,
                });
            }
            a / b
        }
    };

    Ok(assembler(gauche, droite, op, montant))
}

/* ------------------------ std::ops ------------------------ */

// + - × : infaillibles, toutes les combinaisons valeur / référence
macro_rules! impl_operateur {
    ($Trait:ident, $methode:ident, $op:expr, $calcul:tt) => {
        impl $Trait<&Valeur> for &Valeur {
            type Output = Valeur;

            fn $methode(self, droite: &Valeur) -> Valeur {
                let montant = self.montant() $calcul droite.montant();
                assembler(self, droite, $op, montant)
            }
        }

        impl $Trait<Valeur> for Valeur {
            type Output = Valeur;

            fn $methode(self, droite: Valeur) -> Valeur {
                $Trait::$methode(&self, &droite)
            }
        }

        impl $Trait<&Valeur> for Valeur {
            type Output = Valeur;

            fn $methode(self, droite: &Valeur) -> Valeur {
                $Trait::$methode(&self, droite)
            }
        }

        impl $Trait<Valeur> for &Valeur {
            type Output = Valeur;

            fn $methode(self, droite: Valeur) -> Valeur {
                $Trait::$methode(self, &droite)
            }
        }
    };
}

impl_operateur!(Add, add, Operateur::Plus, +);
impl_operateur!(Sub, sub, Operateur::Moins, -);
impl_operateur!(Mul, mul, Operateur::Fois, *);

// ÷ : le diviseur peut être nul => Result
impl Div<&Valeur> for &Valeur {
    type Output = Result<Valeur, ErreurCalcul>;

    fn div(self, droite: &Valeur) -> Self::Output {
        combiner(self, droite, Operateur::Divise)
    }
}

impl Div<Valeur> for Valeur {
    type Output = Result<Valeur, ErreurCalcul>;

    fn div(self, droite: Valeur) -> Self::Output {
        combiner(&self, &droite, Operateur::Divise)
    }
}

impl Div<&Valeur> for Valeur {
    type Output = Result<Valeur, ErreurCalcul>;

    fn div(self, droite: &Valeur) -> Self::Output {
        combiner(&self, droite, Operateur::Divise)
    }
}

impl Div<Valeur> for &Valeur {
    type Output = Result<Valeur, ErreurCalcul>;

    fn div(self, droite: Valeur) -> Self::Output {
        combiner(self, &droite, Operateur::Divise)
    }
}
