// src/noyau/libelle.rs
//
// Extraction de libellé au site d'appel (pas de réflexion à l'exécution) :
//   valeur!(prix_ht)              -> base "prix_ht[…]"
//   valeur!(facture.lignes.total) -> base "total[…]" (dernier identifiant)
//   valeur!(prix_ht => "Prix HT") -> libellé imposé
//   valeur!(12)                   -> libellé = texte du littéral
//
// Le résultat est une valeur de base (précédence 0, journal vide).

use num_bigint::BigInt;
use num_rational::BigRational;

use super::nombre::Montant;

/// Types acceptés comme montant par `valeur!`.
pub trait EnMontant {
    fn en_montant(self) -> Montant;
}

impl EnMontant for BigRational {
    fn en_montant(self) -> Montant {
        self
    }
}

impl EnMontant for &BigRational {
    fn en_montant(self) -> Montant {
        self.clone()
    }
}

impl EnMontant for BigInt {
    fn en_montant(self) -> Montant {
        BigRational::from_integer(self)
    }
}

macro_rules! en_montant_entier {
    ($($t:ty),*) => {
        $(
            impl EnMontant for $t {
                fn en_montant(self) -> Montant {
                    BigRational::from_integer(BigInt::from(self))
                }
            }
        )*
    };
}

en_montant_entier!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Construit une valeur de base en prenant le libellé au site d'appel.
#[macro_export]
macro_rules! valeur {
    (@nom $dernier:ident) => {
        stringify!($dernier)
    };
    (@nom $premier:ident $($reste:ident)+) => {
        $crate::valeur!(@nom $($reste)+)
    };
    ($litteral:literal) => {
        $crate::noyau::valeur::Valeur::base(
            $crate::noyau::libelle::EnMontant::en_montant($litteral),
            $crate::noyau::nombre::format_texte(stringify!($litteral)),
        )
    };
    ($premier:ident $(. $reste:ident)*) => {
        $crate::noyau::valeur::Valeur::base(
            $crate::noyau::libelle::EnMontant::en_montant(
                ::std::clone::Clone::clone(&$premier $(. $reste)*),
            ),
            $crate::valeur!(@nom $premier $($reste)*),
        )
    };
    ($montant:expr => $libelle:expr) => {
        $crate::noyau::valeur::Valeur::base(
            $crate::noyau::libelle::EnMontant::en_montant($montant),
            $libelle,
        )
    };
}
