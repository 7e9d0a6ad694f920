// src/noyau/disposition.rs
//
// Mise en page d'une expression de démarche :
// - détection des parenthèses “mathématiques” (groupement) vs parenthèses de libellé
// - décision une ligne / multi-ligne (Seuils)
// - découpage en jetons opérande / opérateur / groupe
// - rendu récursif, 2 espaces par niveau d'imbrication
//
// Exemple (profondeur 0) :
//   "(a[1] + b[2]) × c[3]"  =>
//     "  ("
//     "    a[1]"
//     "  + b[2]"
//     "  )"
//     "× c[3]"

use log::trace;

use super::etapes::contient_operateur;
use super::operateurs::Operateur;
use super::seuils::Seuils;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Jeton {
    /// Terme (libellé, "x[5]", ou libellé contenant ses propres parenthèses).
    Operande(String),
    Operateur(Operateur),
    /// Contenu (sans les parenthèses) d'un groupement mathématique.
    Groupe(String),
}

/* ------------------------ Parenthèses ------------------------ */

/// Indice de la ')' qui ferme la '(' en `ouvrante`, si elle existe.
fn fermante(chars: &[char], ouvrante: usize) -> Option<usize> {
    let mut niveau = 0i32;
    for (i, c) in chars.iter().enumerate().skip(ouvrante) {
        match c {
            '(' => niveau += 1,
            ')' => {
                niveau -= 1;
                if niveau == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn est_symbole(c: char) -> bool {
    Operateur::depuis_symbole(c).is_some()
}

fn texte(chars: &[char]) -> String {
    chars.iter().collect()
}

/// La '(' en `pos` groupe-t-elle un calcul (plutôt que faire partie d'un libellé) ?
///
/// Vrai si : elle ouvre le texte, OU son contenu contient un opérateur,
/// OU un symbole d'opérateur la touche (avant '(' ou après ')').
/// Faux si elle n'est jamais refermée.
pub fn est_parenthese_mathematique(chars: &[char], pos: usize) -> bool {
    if pos == 0 {
        return true;
    }
    let Some(fin) = fermante(chars, pos) else {
        return false;
    };

    if contient_operateur(&texte(&chars[pos + 1..fin])) {
        return true;
    }

    let avant = est_symbole(chars[pos - 1]);
    let apres = chars.get(fin + 1).is_some_and(|c| est_symbole(*c));
    avant || apres
}

/* ------------------------ Décision ------------------------ */

/// Nombre d'opérateurs " + ", " - ", " × ", " ÷ " dans le texte.
pub fn compter_operateurs(texte: &str) -> usize {
    Operateur::TOUS
        .iter()
        .map(|op| texte.matches(op.motif()).count())
        .sum()
}

// termes séparés par les opérateurs de surface
fn termes(texte: &str) -> Vec<String> {
    let mut morceaux = vec![texte.to_string()];
    for op in Operateur::TOUS {
        morceaux = morceaux
            .iter()
            .flat_map(|m| m.split(op.motif()))
            .map(str::to_string)
            .collect();
    }
    morceaux
}

/// Multi-ligne si une parenthèse mathématique est “chargée” (opérateur, contenu long,
/// terme long), ou si l'expression entière a trop d'opérateurs ou est trop longue.
pub fn doit_passer_multiligne(expression: &str, seuils: &Seuils) -> bool {
    let chars: Vec<char> = expression.chars().collect();

    for (pos, c) in chars.iter().enumerate() {
        if *c != '(' || !est_parenthese_mathematique(&chars, pos) {
            continue;
        }
        let Some(fin) = fermante(&chars, pos) else {
            continue;
        };
        let contenu = texte(&chars[pos + 1..fin]);

        if compter_operateurs(&contenu) > 0
            || contenu.chars().count() > seuils.longueur_parenthese_max
        {
            return true;
        }
        if termes(&contenu)
            .iter()
            .any(|t| t.trim().chars().count() > seuils.longueur_terme_max)
        {
            return true;
        }
    }

    compter_operateurs(expression) > seuils.operateurs_max
        || chars.len() > seuils.longueur_totale_max
}

/* ------------------------ Jetons ------------------------ */

fn pousser_operande(jetons: &mut Vec<Jeton>, courant: &mut String) {
    let t = courant.trim();
    if !t.is_empty() {
        jetons.push(Jeton::Operande(t.to_string()));
    }
    courant.clear();
}

/// Découpe le niveau courant d'une expression.
/// Un opérateur n'est reconnu qu'entouré d'espaces ; une paire de parenthèses
/// refermée reste entière dans l'opérande, sauf groupement mathématique.
pub fn decouper_jetons(expression: &str) -> Vec<Jeton> {
    let chars: Vec<char> = expression.chars().collect();
    let mut jetons = Vec::new();
    let mut courant = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '(' {
            if let Some(fin) = fermante(&chars, i) {
                let contenu = texte(&chars[i + 1..fin]);
                let groupe = courant.trim().is_empty()
                    && est_parenthese_mathematique(&chars, i)
                    && contient_operateur(&contenu);

                if groupe {
                    courant.clear();
                    jetons.push(Jeton::Groupe(contenu));
                } else {
                    courant.extend(&chars[i..=fin]);
                }
                i = fin + 1;
                continue;
            }
        }

        if let Some(op) = Operateur::depuis_symbole(c) {
            let entoure = i > 0 && chars[i - 1] == ' ' && chars.get(i + 1) == Some(&' ');
            if entoure {
                pousser_operande(&mut jetons, &mut courant);
                jetons.push(Jeton::Operateur(op));
                i += 2;
                continue;
            }
        }

        courant.push(c);
        i += 1;
    }

    pousser_operande(&mut jetons, &mut courant);
    jetons
}

/* ------------------------ Rendu ------------------------ */

/// Rendu multi-ligne, une ligne par terme.
/// - marge = 2 espaces × profondeur
/// - premier terme : marge + "  " + terme ; suivants : marge + op + " " + terme
/// - groupe : marge + (op | " ") + " (" ... contenu à profondeur+1 ... marge + "  )"
pub fn rendre_multiligne(expression: &str, profondeur: usize) -> Vec<String> {
    let marge = "  ".repeat(profondeur);
    let mut lignes = Vec::new();
    let mut en_attente: Option<Operateur> = None;

    for jeton in decouper_jetons(expression) {
        match jeton {
            Jeton::Operateur(op) => {
                // deux opérateurs de suite : le premier reste seul sur sa ligne
                if let Some(seul) = en_attente.replace(op) {
                    lignes.push(format!("{marge}{}", seul.symbole()));
                }
            }
            Jeton::Operande(terme) => {
                let tete = en_attente.take().map_or(' ', Operateur::symbole);
                lignes.push(format!("{marge}{tete} {terme}"));
            }
            Jeton::Groupe(contenu) => {
                let tete = en_attente.take().map_or(' ', Operateur::symbole);
                lignes.push(format!("{marge}{tete} ("));
                lignes.extend(rendre_multiligne(&contenu, profondeur + 1));
                lignes.push(format!("{marge}  )"));
            }
        }
    }

    if let Some(seul) = en_attente {
        lignes.push(format!("{marge}{}", seul.symbole()));
    }

    trace!("{} ligne(s) à la profondeur {profondeur}", lignes.len());
    lignes
}
