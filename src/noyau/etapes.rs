// src/noyau/etapes.rs
//
// Journal de provenance : entrées texte "Nom = expression = résultat".
// - ordre d'insertion conservé
// - doublons (texte identique) ignorés
// - la classification simple / calcul est TOUJOURS recalculée sur le texte
//   (le même texte circule dans plusieurs valeurs)

use log::warn;
use regex::{Captures, Regex};

use super::nombre::format_texte;
use super::operateurs::Operateur;

/// Séparateur entre nom, expression et résultat.
pub const SEPARATEUR: &str = " = ";

/* ------------------------ Classification ------------------------ */

/// Découpe une entrée sur " = ".
pub fn decouper(entree: &str) -> Vec<&str> {
    entree.split(SEPARATEUR).collect()
}

/// Contient au moins un opérateur entouré d'espaces (" + ", " × "...).
pub fn contient_operateur(texte: &str) -> bool {
    Operateur::TOUS.iter().any(|op| texte.contains(op.motif()))
}

// ni opérateur, ni crochet, ni parenthèse
fn est_nu(texte: &str) -> bool {
    !contient_operateur(texte) && !texte.contains(['[', ']', '(', ')'])
}

/// Entrée "simple" : exactement deux parties et un membre droit nu (un nombre).
/// Ex: "x = 5" (simple), "Tax = x[5] × r[0.2] = 1" (calcul).
pub fn est_simple(entree: &str) -> bool {
    let parties = decouper(entree);
    parties.len() == 2 && est_nu(parties[1].trim())
}

/// Entrée dont le membre gauche est un identifiant nu : une “définition”.
pub fn est_definition(entree: &str) -> bool {
    entree.contains(SEPARATEUR) && est_nu(decouper(entree)[0].trim())
}

/// Simple ET définition (ce que la démarche considère comme une affectation de base).
pub fn est_affectation_simple(entree: &str) -> bool {
    est_simple(entree) && est_definition(entree)
}

/// Nom défini par une entrée (membre gauche).
pub fn nom_defini(entree: &str) -> &str {
    decouper(entree)[0].trim()
}

/* ------------------------ Journal ------------------------ */

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Etapes(Vec<String>);

impl Etapes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Journal d'une seule entrée.
    pub fn avec(entree: impl Into<String>) -> Self {
        Self(vec![entree.into()])
    }

    /// Ajoute une entrée si son texte est absent. Renvoie `true` si ajoutée.
    pub fn ajouter(&mut self, entree: impl Into<String>) -> bool {
        let entree = entree.into();
        if self.contient(&entree) {
            return false;
        }
        self.0.push(entree);
        true
    }

    /// Union gauche puis droite, sans les entrées simples, sans doublons.
    pub fn fusionner(gauche: &Etapes, droite: &Etapes) -> Etapes {
        let mut out = Etapes::new();
        for entree in gauche.iter().chain(droite.iter()) {
            if !est_simple(entree) {
                out.ajouter(entree);
            }
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contient(&self, entree: &str) -> bool {
        self.0.iter().any(|e| e == entree)
    }

    /// Au moins une entrée qui n'est pas une affectation simple.
    pub fn a_des_calculs(&self) -> bool {
        self.iter().any(|e| !est_simple(e))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for Etapes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut out = Etapes::new();
        for entree in iter {
            out.ajouter(entree);
        }
        out
    }
}

/* ------------------------ Substitution nom -> nom[valeur] ------------------------ */

fn est_car_mot(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// \b seulement du côté où le nom commence / finit par un caractère de mot ;
// groupe 1 = '[' qui suit (occurrence déjà crochetée)
fn motif_mot_entier(nom: &str) -> Result<Regex, regex::Error> {
    let debut = if nom.chars().next().is_some_and(est_car_mot) {
        r"\b"
    } else {
        ""
    };
    let fin = if nom.chars().last().is_some_and(est_car_mot) {
        r"\b"
    } else {
        ""
    };
    Regex::new(&format!(r"{debut}{}{fin}(\[)?", regex::escape(nom)))
}

/// "12.00" -> "12", "3.0 + x" -> "3 + x" (zéros décimaux inutiles).
pub fn nettoyer_decimales(texte: &str) -> String {
    let chars: Vec<char> = texte.chars().collect();
    let mut out = String::with_capacity(texte.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;

        // chiffre suivi de ".0…0" puis d'un non-chiffre (ou fin)
        if c.is_ascii_digit() && i < chars.len() && chars[i] == '.' {
            let mut j = i + 1;
            while j < chars.len() && chars[j] == '0' {
                j += 1;
            }
            let zeros = j > i + 1;
            let suivi_chiffre = j < chars.len() && chars[j].is_ascii_digit();
            if zeros && !suivi_chiffre {
                i = j;
            }
        }
    }
    out
}

/// Remplace chaque nom défini dans `etapes` par `nom[valeur]` (mot entier).
/// Une occurrence déjà suivie de '[' est laissée telle quelle.
///
/// Noms les plus longs d'abord : "Prix HT" passe avant "HT".
/// Même nom présent deux fois => deux substitutions identiques.
pub fn substituer_definitions(expression: &str, etapes: &Etapes) -> String {
    let mut definitions: Vec<(&str, &str)> = etapes
        .iter()
        .filter(|e| est_definition(e))
        .map(|e| {
            let parties = decouper(e);
            (parties[0].trim(), parties[parties.len() - 1].trim())
        })
        .filter(|(nom, _)| !nom.is_empty())
        .collect();
    definitions.sort_by_key(|(nom, _)| std::cmp::Reverse(nom.chars().count()));

    let mut expr = expression.to_string();
    for (nom, resultat) in definitions {
        let re = match motif_mot_entier(nom) {
            Ok(re) => re,
            Err(e) => {
                warn!("substitution ignorée pour {nom:?} : {e}");
                continue;
            }
        };
        let remplacement = format!("{nom}[{}]", format_texte(resultat));
        expr = re
            .replace_all(&expr, |caps: &Captures<'_>| {
                if caps.get(1).is_some() {
                    caps[0].to_string()
                } else {
                    remplacement.clone()
                }
            })
            .into_owned();
    }

    nettoyer_decimales(&expr)
}
