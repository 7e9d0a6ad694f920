// src/noyau/trace.rs
//
// Démarche lisible d'une valeur : fonction PURE du journal (aucun état).
//
// Pipeline:
// 1) garder les entrées contenant " = " (zéros décimaux nettoyés)
// 2) aucune entrée de calcul + une seule affectation simple => on la rend telle quelle
// 3) sinon : entrées de calcul seulement, sans doublons, ordre conservé
// 4) ligne de synthèse "{légende} = {expression substituée} = {montant}" si la légende
//    contient un opérateur, n'est pas déjà un nom défini, et (référence un nom OU
//    plusieurs calculs)
// 5) chaque entrée : une ligne, ou multi-ligne selon les Seuils ; séparées par une ligne vide
//
// Une entrée mal formée (moins de 3 parties) est rendue telle quelle, jamais d'erreur.

use log::debug;

use super::disposition::{doit_passer_multiligne, rendre_multiligne};
use super::etapes::{decouper, est_affectation_simple, nettoyer_decimales, nom_defini, SEPARATEUR};
use super::seuils::Seuils;
use super::valeur::Valeur;

/// Séparateur entre deux entrées de la démarche.
pub const SEPARATEUR_ENTREES: &str = "\n\n";

const SYMBOLES: [char; 4] = ['+', '-', '×', '÷'];

/// Rend une entrée "Nom = expression = résultat".
pub fn rendre_entree(entree: &str, seuils: &Seuils) -> String {
    let parties = decouper(entree);
    if parties.len() < 3 {
        return entree.to_string();
    }

    let nom = parties[0].trim();
    let expression = parties[1].trim();
    let resultat = parties[parties.len() - 1].trim();

    if !doit_passer_multiligne(expression, seuils) {
        return format!("{nom}{SEPARATEUR}{expression}{SEPARATEUR}{resultat}");
    }

    debug!("entrée {nom:?} en multi-ligne");
    let corps = rendre_multiligne(expression, 0).join("\n");
    format!("{nom} =\n{corps}\n= {resultat}")
}

/// Démarche complète d'une valeur.
pub fn rendre_trace(valeur: &Valeur, seuils: &Seuils) -> String {
    let entrees: Vec<String> = valeur
        .etapes()
        .iter()
        .filter(|e| e.contains(SEPARATEUR))
        .map(nettoyer_decimales)
        .collect();

    let (simples, calculs): (Vec<String>, Vec<String>) = entrees
        .into_iter()
        .partition(|e| est_affectation_simple(e));

    if calculs.is_empty() && simples.len() == 1 {
        return rendre_entree(&simples[0], seuils);
    }

    let mut uniques: Vec<String> = Vec::with_capacity(calculs.len() + 1);
    for entree in calculs {
        if !uniques.contains(&entree) {
            uniques.push(entree);
        }
    }

    if synthese_requise(valeur, &uniques) {
        let synthese = format!(
            "{}{SEPARATEUR}{}{SEPARATEUR}{}",
            valeur.legende(),
            valeur.expression_substituee(),
            valeur.montant_formate()
        );
        debug!("synthèse ajoutée : {synthese}");
        uniques.push(synthese);
    }

    uniques
        .iter()
        .map(|e| rendre_entree(e, seuils))
        .collect::<Vec<_>>()
        .join(SEPARATEUR_ENTREES)
}

fn synthese_requise(valeur: &Valeur, uniques: &[String]) -> bool {
    let legende = valeur.legende();
    let noms: Vec<&str> = uniques.iter().map(|e| nom_defini(e)).collect();

    if noms.contains(&legende) {
        return false;
    }

    let reference_un_nom = noms.iter().any(|n| legende.contains(n));
    let plusieurs = uniques.len() > 1;
    let a_operateur = legende.contains(SYMBOLES);

    (reference_un_nom || plusieurs) && a_operateur
}
