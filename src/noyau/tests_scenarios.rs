//! Tests de scénarios (campagne) : légendes + démarches complètes de bout en bout.
//!
//! But : figer le texte exact produit pour des calculs “métier” réalistes.
//! - précédence et parenthésage des légendes
//! - ordre des dépendances dans la démarche, sans doublons
//! - arrondi d'affichage (exceptions historiques comprises)
//! - bascule une ligne / multi-ligne
//!
//! Notes :
//! - pas d'annulation symbolique : a - a reste "a[15] - a[15]"
//! - précédence égale => jamais de parenthèses, même pour a - (b - c)

use pretty_assertions::assert_eq;

use super::{somme, ErreurCalcul, Seuils, Valeur};

/* ------------------------ Helpers ------------------------ */

fn n(montant: i64, legende: &str) -> Valeur {
    Valeur::entier(montant, legende)
}

fn d(texte: &str, legende: &str) -> Valeur {
    Valeur::decimal(texte, legende).unwrap_or_else(|e| panic!("texte={texte:?} err={e}"))
}

fn lignes(l: &[&str]) -> String {
    l.join("\n")
}

fn assert_trace(v: &Valeur, attendu: &str) {
    assert_eq!(v.trace(), attendu, "légende={:?}", v.legende());
}

/* ------------------------ Précédence ------------------------ */

#[test]
fn precedence_multiplication_prioritaire() {
    let (a, b, c) = (n(10, "a"), n(5, "b"), n(2, "c"));

    let v = &a + &b * &c;
    assert_eq!(v, n(20, "vingt"));
    assert_eq!(v.legende(), "a[10] + b[5] × c[2]");

    let w = (&a + &b) * &c;
    assert_eq!(w, n(30, "trente"));
    assert_eq!(w.legende(), "(a[10] + b[5]) × c[2]");
}

#[test]
fn meme_variable_plusieurs_fois() {
    let x = n(5, "x");
    let v = &x + &x * &x;
    assert_eq!(v, n(30, "r"));
    assert_eq!(v.legende(), "x[5] + x[5] × x[5]");

    let a = n(7, "a");
    let w = (&a + &a) * (&a - &a);
    assert_eq!(w, n(0, "r"));
    assert_eq!(w.legende(), "(a[7] + a[7]) × (a[7] - a[7])");
}

#[test]
fn pas_d_annulation_symbolique() {
    let a = n(15, "a");
    assert_trace(&(&a - &a).nommer("Zero"), "Zero = a[15] - a[15] = 0");

    let (a, b) = (n(12, "a"), n(8, "b"));
    let v = ((&a + &b) - (&a - &b)).nommer("TwoB");
    // précédence égale : aucune parenthèse (texte volontairement plat)
    assert_trace(&v, "TwoB = a[12] + b[8] - a[12] - b[8] = 16");

    let (x, y) = (n(8, "x"), n(5, "y"));
    let v = (&x * &y / &x).expect("x non nul").nommer("Simplified");
    assert_trace(&v, "Simplified = x[8] × y[5] ÷ x[8] = 5");
}

#[test]
fn division_par_zero_propagee() {
    let r = n(5, "x") / n(0, "y");
    assert!(matches!(r, Err(ErreurCalcul::DivisionParZero { .. })));

    let chaine = || -> Result<Valeur, ErreurCalcul> {
        let moyenne = (n(10, "total") / n(0, "jours"))?;
        Ok(moyenne.nommer("Moyenne"))
    };
    assert!(chaine().is_err());
}

/* ------------------------ Démarches une ligne ------------------------ */

#[test]
fn nommer_un_litteral() {
    // littéral de base : pas de démarche tant qu'il n'est pas nommé
    assert_trace(&crate::valeur!(100), "");
    assert_trace(&crate::valeur!(100).nommer("BasePrice"), "BasePrice = 100");

    // valeur enveloppée : son affectation suffit
    assert_trace(&d("0.180", "TaxRate"), "TaxRate = 0.18");
    assert_trace(
        &n(100, "prix").nommer("BasePrice"),
        "BasePrice = prix[100] = 100",
    );
}

#[test]
fn demarche_ordonnee_par_dependances() {
    let tax1 = (n(50, "price1") * d("0.1", "tax1Rate")).nommer("Tax1");
    let tax2 = (n(30, "price2") * d("0.15", "tax2Rate")).nommer("Tax2");
    let total = (&tax1 + &tax2).nommer("Total");

    assert_trace(
        &total,
        &lignes(&[
            "Tax1 = price1[50] × tax1Rate[0.1] = 5",
            "",
            "Tax2 = price2[30] × tax2Rate[0.15] = 4.5",
            "",
            "Total = Tax1[5] + Tax2[4.5] = 9.5",
        ]),
    );
}

#[test]
fn chaine_lineaire() {
    let base = n(10, "Base");
    let step_a = (&base * n(2, "Factor1")).nommer("StepA");
    let step_b = (&step_a + n(5, "Adjustment")).nommer("StepB");
    let fin = (&step_b * n(3, "Multiplier")).nommer("Final");

    assert_trace(
        &fin,
        &lignes(&[
            "StepA = Base[10] × Factor1[2] = 20",
            "",
            "StepB = StepA[20] + Adjustment[5] = 25",
            "",
            "Final = StepB[25] × Multiplier[3] = 75",
        ]),
    );
}

#[test]
fn losange_deux_branches() {
    let root = n(100, "Root");
    let b = (&root - n(20, "DeductionB")).nommer("BranchB");
    let c = (&root * d("0.5", "FactorC")).nommer("BranchC");
    let conv = (&b + &c).nommer("Convergence");

    assert_trace(
        &conv,
        &lignes(&[
            "BranchB = Root[100] - DeductionB[20] = 80",
            "",
            "BranchC = Root[100] × FactorC[0.5] = 50",
            "",
            "Convergence = BranchB[80] + BranchC[50] = 130",
        ]),
    );
}

#[test]
fn intermediaire_reutilise() {
    let principal = n(1000, "Principal");
    let interest = (&principal * d("0.06", "Rate") * n(2, "Time")).nommer("Interest");
    let avec = (&principal + &interest).nommer("TotalWithInterest");
    let impot = (&interest * d("0.25", "TaxRate")).nommer("InterestTax");
    let net = (&avec - &impot).nommer("NetTotal");

    assert_trace(
        &net,
        &lignes(&[
            "Interest = Principal[1,000] × Rate[0.06] × Time[2] = 120",
            "",
            "TotalWithInterest = Principal[1,000] + Interest[120] = 1,120",
            "",
            "InterestTax = Interest[120] × TaxRate[0.25] = 30",
            "",
            "NetTotal = TotalWithInterest[1,120] - InterestTax[30] = 1,090",
        ]),
    );
}

#[test]
fn noms_prefixes_les_uns_des_autres() {
    let base = n(200, "BasePrice");
    let discount = (&base * d("0.15", "DiscountRate")).nommer("Discount");
    let discounted = (&base - &discount).nommer("DiscountedPrice");
    let tax = (&discounted * d("0.08", "TaxRate")).nommer("Tax");
    let shipping = (&discounted * d("0.05", "ShippingRate")).nommer("Shipping");
    let total = (&discounted + &tax + &shipping).nommer("FinalTotal");

    assert_trace(
        &total,
        &lignes(&[
            "Discount = BasePrice[200] × DiscountRate[0.15] = 30",
            "",
            "DiscountedPrice = BasePrice[200] - Discount[30] = 170",
            "",
            "Tax = DiscountedPrice[170] × TaxRate[0.08] = 13.6",
            "",
            "Shipping = DiscountedPrice[170] × ShippingRate[0.05] = 8.5",
            "",
            "FinalTotal = DiscountedPrice[170] + Tax[13.6] + Shipping[8.5] = 192.1",
        ]),
    );
}

#[test]
fn pret_avec_exceptions_d_arrondi() {
    let loan = n(50000, "LoanAmount");
    let interest_rate = d("0.045", "InterestRate");
    let fee_rate = d("0.01", "OriginationFeeRate");
    let insurance_rate = d("0.005", "InsuranceRate");
    let years = n(5, "Years");

    let fee = (&loan * &fee_rate).nommer("OriginationFee");
    let annual = (&loan * &insurance_rate).nommer("AnnualInsurance");
    let insurance = (&annual * &years).nommer("TotalInsurance");
    let principal = (&loan + &fee + &insurance).nommer("PrincipalWithFees");
    let interest = (&principal * &interest_rate * &years).nommer("TotalInterest");
    let payment = (&principal + &interest).nommer("TotalPayment");

    let texte = payment.trace();
    assert_eq!(texte.lines().filter(|l| !l.is_empty()).count(), 6);
    assert_eq!(
        texte,
        lignes(&[
            "OriginationFee = LoanAmount[50,000] × OriginationFeeRate[0.01] = 500",
            "",
            "AnnualInsurance = LoanAmount[50,000] × InsuranceRate[0.01] = 250",
            "",
            "TotalInsurance = AnnualInsurance[250] × Years[5] = 1,250",
            "",
            "PrincipalWithFees = LoanAmount[50,000] + OriginationFee[500] + TotalInsurance[1,250] = 51,750",
            "",
            "TotalInterest = PrincipalWithFees[51,750] × InterestRate[0.05] × Years[5] = 11,643.75",
            "",
            "TotalPayment = PrincipalWithFees[51,750] + TotalInterest[11,643.75] = 63,393.75",
        ])
    );
}

#[test]
fn remises_en_cascade() {
    let subtotal = (n(1000, "BasePrice") * n(15, "Quantity")).nommer("Subtotal");
    let volume = (&subtotal * d("0.1", "VolumeDiscountRate")).nommer("VolumeDiscount");
    let apres_volume = (&subtotal - &volume).nommer("AfterVolumeDiscount");
    let loyal = (&apres_volume * d("0.05", "LoyaltyDiscountRate")).nommer("LoyaltyDiscount");
    let apres_loyal = (&apres_volume - &loyal).nommer("AfterLoyaltyDiscount");
    let rush = (&apres_loyal * d("0.15", "RushOrderSurcharge")).nommer("RushFee");
    let apres_rush = (&apres_loyal + &rush).nommer("AfterRushFee");
    let tax = (&apres_rush * d("0.0875", "TaxRate")).nommer("Tax");
    let fin = (&apres_rush + &tax).nommer("FinalPrice");

    assert_eq!(fin, d("16039.265625", "exact"));
    assert_trace(
        &fin,
        &lignes(&[
            "Subtotal = BasePrice[1,000] × Quantity[15] = 15,000",
            "",
            "VolumeDiscount = Subtotal[15,000] × VolumeDiscountRate[0.1] = 1,500",
            "",
            "AfterVolumeDiscount = Subtotal[15,000] - VolumeDiscount[1,500] = 13,500",
            "",
            "LoyaltyDiscount = AfterVolumeDiscount[13,500] × LoyaltyDiscountRate[0.05] = 675",
            "",
            "AfterLoyaltyDiscount = AfterVolumeDiscount[13,500] - LoyaltyDiscount[675] = 12,825",
            "",
            "RushFee = AfterLoyaltyDiscount[12,825] × RushOrderSurcharge[0.15] = 1,923.75",
            "",
            "AfterRushFee = AfterLoyaltyDiscount[12,825] + RushFee[1,923.75] = 14,748.75",
            "",
            "Tax = AfterRushFee[14,748.75] × TaxRate[0.09] = 1,290.52",
            "",
            "FinalPrice = AfterRushFee[14,748.75] + Tax[1,290.52] = 16,039.27",
        ]),
    );
}

#[test]
fn libelles_unicode_avec_espaces_et_tirets() {
    let base = n(100, "საბაზო ღირებულება");
    let discount = n(25, "ფასდაკლება");
    let dgg = d("0.18", "დღგ");
    let service = n(15, "მომსახურების გადასახადი");
    let mult = d("1.2", "მრავალი");

    let apres = (&base - &discount).nommer("ფასდაკლების შემდეგ");
    let tax = (&apres * &dgg).nommer("დღგ-ის რაოდენობა");
    let avec_tax = (&apres + &tax).nommer("დღგ-ით");
    let avec_service = (&avec_tax + &service).nommer("მომსახურებით");
    let fin = (&avec_service * &mult).nommer("საბოლოო თანხა");

    assert_trace(
        &fin,
        &lignes(&[
            "ფასდაკლების შემდეგ = საბაზო ღირებულება[100] - ფასდაკლება[25] = 75",
            "",
            "დღგ-ის რაოდენობა = ფასდაკლების შემდეგ[75] × დღგ[0.18] = 13.5",
            "",
            "დღგ-ით = ფასდაკლების შემდეგ[75] + დღგ-ის რაოდენობა[13.5] = 88.5",
            "",
            "მომსახურებით = დღგ-ით[88.5] + მომსახურების გადასახადი[15] = 103.5",
            "",
            "საბოლოო თანხა = მომსახურებით[103.5] × მრავალი[1.2] = 124.2",
        ]),
    );
}

#[test]
fn composee_non_nommee_puis_nommee() {
    let base = n(100, "BaseAmount");
    let rate = d("0.1", "Rate");
    let inter = &base * &rate;
    assert_eq!(inter.legende(), "BaseAmount[100] × Rate[0.1]");

    let fin = (&inter + &base).nommer("FinalResult");
    assert_eq!(fin.legende(), "FinalResult");
    assert_trace(
        &fin,
        "FinalResult = BaseAmount[100] × Rate[0.1] + BaseAmount[100] = 110",
    );
}

#[test]
fn libelle_qui_termine_un_autre_libelle() {
    let prix_ht = (n(3, "c") + n(4, "d")).nommer("Prix HT");
    let ht = (n(1, "a") + n(2, "b")).nommer("HT");

    assert_trace(
        &(&prix_ht + &ht).nommer("R"),
        &lignes(&[
            "Prix HT = c[3] + d[4] = 7",
            "",
            "HT = a[1] + b[2] = 3",
            "",
            "R = Prix HT[7] + HT[3] = 10",
        ]),
    );
    assert_trace(
        &(&ht + &prix_ht).nommer("R"),
        &lignes(&[
            "HT = a[1] + b[2] = 3",
            "",
            "Prix HT = c[3] + d[4] = 7",
            "",
            "R = HT[3] + Prix HT[7] = 10",
        ]),
    );
}

#[test]
fn somme_puis_calculs_nommes() {
    let subtotal = somme(&[n(100, "Price1"), n(200, "Price2")]).nommer("Subtotal");
    let tax = (&subtotal * d("0.18", "TaxRate")).nommer("TaxAmount");
    let total = (&subtotal + &tax).nommer("Total");

    assert_trace(
        &total,
        &lignes(&[
            "Subtotal = Price1[100] + Price2[200] = 300",
            "",
            "TaxAmount = Subtotal[300] × TaxRate[0.18] = 54",
            "",
            "Total = Subtotal[300] + TaxAmount[54] = 354",
        ]),
    );
}

/* ------------------------ Démarches multi-lignes ------------------------ */

#[test]
fn groupement_en_tete_multiligne() {
    let base = n(100, "საბაზო ფასი");
    let dgg = d("0.18", "დღგ");
    let discount = n(15, "ფასდაკლება");

    let tax = (&base * &dgg).nommer("TaxValue");
    let apres = &base - &discount;
    let prix = (&apres + &tax) * d("120.0", "ასოცი");
    let fin = prix.nommer("FinalValue");

    assert_trace(
        &fin,
        &lignes(&[
            "TaxValue = საბაზო ფასი[100] × დღგ[0.18] = 18",
            "",
            "FinalValue =",
            "  (",
            "    საბაზო ფასი[100]",
            "  - ფასდაკლება[15]",
            "  + TaxValue[18]",
            "  )",
            "× ასოცი[120]",
            "= 12,360",
        ]),
    );
}

#[test]
fn groupement_au_milieu_multiligne() {
    let base = n(100, "საბაზო ფასი");
    let dgg = d("0.18", "დღგ");
    let discount = n(15, "ფასდაკლება");

    let tax = (&base * &dgg).nommer("TaxValue");
    let apres = (&base - &discount).nommer("DiscountedPrice");
    let some = (&apres * d("55.233", "SomeValue")).nommer("SomeValueResult");
    let fin = (&some * (&apres + &tax) * d("120.0", "ასოცი")).nommer("FinalValue");

    assert_trace(
        &fin,
        &lignes(&[
            "DiscountedPrice = საბაზო ფასი[100] - ფასდაკლება[15] = 85",
            "",
            "SomeValueResult = DiscountedPrice[85] × SomeValue[55.23] = 4,694.8",
            "",
            "TaxValue = საბაზო ფასი[100] × დღგ[0.18] = 18",
            "",
            "FinalValue =",
            "  SomeValueResult[4,694.8]",
            "× (",
            "    DiscountedPrice[85]",
            "  + TaxValue[18]",
            "  )",
            "× ასოცი[120]",
            "= 58,027,789.8",
        ]),
    );
}

#[test]
fn trop_d_operateurs_multiligne() {
    let v = (n(1, "a") + n(2, "b") + n(3, "c") + n(4, "d") + n(5, "e")).nommer("Somme");
    assert_trace(
        &v,
        &lignes(&[
            "Somme =",
            "  a[1]",
            "+ b[2]",
            "+ c[3]",
            "+ d[4]",
            "+ e[5]",
            "= 15",
        ]),
    );
}

#[test]
fn seuils_charges_depuis_json() {
    let seuils: Seuils =
        serde_json::from_str(r#"{ "bracketOperatorThreshold": 0 }"#).expect("json valide");
    let tax = (n(50, "price1") * d("0.1", "tax1Rate")).nommer("Tax1");

    assert_eq!(tax.trace(), "Tax1 = price1[50] × tax1Rate[0.1] = 5");
    assert_eq!(
        tax.trace_avec(&seuils),
        lignes(&["Tax1 =", "  price1[50]", "× tax1Rate[0.1]", "= 5"])
    );
}

#[test]
fn synthese_finale_pour_une_composee() {
    let t1 = (n(50, "p1") * d("0.1", "r1")).nommer("Tax1");
    let t2 = (n(40, "p2") * d("0.1", "r2")).nommer("Tax2");
    let net = &t1 - &t2;
    assert_trace(
        &net,
        &lignes(&[
            "Tax1 = p1[50] × r1[0.1] = 5",
            "",
            "Tax2 = p2[40] × r2[0.1] = 4",
            "",
            "Tax1 - Tax2 = Tax1[5] - Tax2[4] = 1",
        ]),
    );
}
