//! Canned clique documents used across harnesses.
//!
//! Curies and names are taken from a real Babel build so failures read
//! naturally.

use super::builders::DocBuilder;
use serde_json::Value;

pub const BACE1_INHIBITOR: &str = "CHEBI:74925";
pub const ALZHEIMER_6: &str = "MONDO:0011561";
pub const ALZHEIMER_DISEASE: &str = "MONDO:0004975";
pub const LATE_ONSET_ALZHEIMER: &str = "MONDO:0000828";
pub const BACE1_GENE: &str = "NCBIGene:23621";
/// A curie no index contains.
pub const UNKNOWN_CURIE: &str = "NONE:1234";

pub const HUMAN: &str = "NCBITaxon:9606";

pub fn bace1_inhibitor() -> Value {
    DocBuilder::new(BACE1_INHIBITOR, "BACE1 inhibitor")
        .names(&["BACE1 inhibitor", "beta-secretase inhibitor", "BACE1 inhibitors"])
        .types(&["MolecularEntity", "ChemicalEntity", "NamedThing"])
        .score(41.7)
        .build()
}

pub fn bace1_gene() -> Value {
    DocBuilder::new(BACE1_GENE, "BACE1")
        .names(&["BACE1", "beta-secretase 1", "beta-site APP-cleaving enzyme 1"])
        .types(&["Gene", "GeneOrGeneProduct", "NamedThing"])
        .taxa(&[HUMAN])
        .clique_size(12)
        .score(38.2)
        .build()
}

pub fn alzheimer_disease() -> Value {
    DocBuilder::new(ALZHEIMER_DISEASE, "Alzheimer disease")
        .names(&["Alzheimer disease", "Alzheimer's disease", "AD"])
        .types(&["Disease", "DiseaseOrPhenotypicFeature", "NamedThing"])
        .clique_size(24)
        .score(52.0)
        .build()
}

pub fn alzheimer_6() -> Value {
    DocBuilder::new(ALZHEIMER_6, "Alzheimer disease 6")
        .names(&["Alzheimer disease 6", "AD6", "Alzheimer disease type 6"])
        .types(&["Disease", "DiseaseOrPhenotypicFeature", "NamedThing"])
        .clique_size(5)
        .score(30.4)
        .build()
}

pub fn late_onset_alzheimer() -> Value {
    DocBuilder::new(LATE_ONSET_ALZHEIMER, "late-onset Alzheimer disease")
        .names(&["late-onset Alzheimer disease", "LOAD"])
        .types(&["Disease", "NamedThing"])
        .clique_size(7)
        .build()
}
