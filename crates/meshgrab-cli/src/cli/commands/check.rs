//! `meshgrab check <candidate>...` – print classifier verdicts.

use meshgrab_core::classify::AssetClassifier;

pub fn run_check(candidates: &[String], classifier: &AssetClassifier) {
    for candidate in candidates {
        let verdict = if classifier.is_asset_reference(candidate) {
            "asset"
        } else {
            "skip"
        };
        println!("{:<6} {}", verdict, candidate);
    }
}
