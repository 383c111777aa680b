//! DOI and PubMed identifier helpers

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Link-style prefixes pasted in from browsers or reference managers
    static ref DOI_LINK_PREFIX: Regex =
        Regex::new(r"(?i)^((https?://)?(dx\.)?doi\.org/|doi:\s*)").unwrap();

    // Registrant code is 4-9 digits
    static ref DOI_PATTERN: Regex = Regex::new(r"^10\.\d{4,9}/").unwrap();
}

const DOI_RESOLVER: &str = "https://doi.org/";
const PUBMED_BASE: &str = "https://www.ncbi.nlm.nih.gov/pubmed/";

/// Strip resolver prefixes and surrounding whitespace from a DOI
pub fn normalize_doi(doi: &str) -> String {
    DOI_LINK_PREFIX.replace(doi.trim(), "").into_owned()
}

/// Whether `doi` looks like a bare DOI (`10.NNNN/...`)
pub fn is_valid_doi(doi: &str) -> bool {
    DOI_PATTERN.is_match(doi)
}

/// Resolver link for a DOI, if it is well formed
pub fn doi_link(doi: &str) -> Option<String> {
    let doi = normalize_doi(doi);
    is_valid_doi(&doi).then(|| format!("{}{}", DOI_RESOLVER, doi))
}

/// PubMed link for a positive PMID
pub fn pubmed_link(pmid: u64) -> Option<String> {
    (pmid > 0).then(|| format!("{}{}", PUBMED_BASE, pmid))
}
