use leadgen_core::{EmailRecord, WebsiteId};

use crate::{BackendError, BackendErrorKind};

/// Accepts `output` only if it is an order-preserving subsequence of `input`.
pub fn ensure_subsequence(
    input: &[WebsiteId],
    output: Vec<WebsiteId>,
) -> Result<Vec<WebsiteId>, BackendError> {
    let mut remaining = input.iter();
    for site in &output {
        if !remaining.any(|candidate| candidate == site) {
            return Err(BackendError::new(
                BackendErrorKind::ContractViolation,
                format!("filter returned {site:?}, which is missing from its input or out of order"),
            ));
        }
    }
    Ok(output)
}

/// Accepts `output` only if it holds one record per input website, in order.
pub fn ensure_one_record_per_site(
    input: &[WebsiteId],
    output: Vec<EmailRecord>,
) -> Result<Vec<EmailRecord>, BackendError> {
    if output.len() != input.len() {
        return Err(BackendError::new(
            BackendErrorKind::ContractViolation,
            format!(
                "extractor returned {} records for {} websites",
                output.len(),
                input.len()
            ),
        ));
    }
    if let Some((expected, record)) = input
        .iter()
        .zip(&output)
        .find(|(expected, record)| **expected != record.website)
    {
        return Err(BackendError::new(
            BackendErrorKind::ContractViolation,
            format!(
                "extractor returned a record for {:?} where {expected:?} was expected",
                record.website
            ),
        ));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::{ensure_one_record_per_site, ensure_subsequence};
    use crate::BackendErrorKind;
    use leadgen_core::EmailRecord;

    fn sites(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn subsequence_with_duplicates_is_accepted() {
        let input = sites(&["a.com", "b.com", "a.com"]);
        let out = ensure_subsequence(&input, sites(&["a.com", "a.com"])).unwrap();
        assert_eq!(out, sites(&["a.com", "a.com"]));
    }

    #[test]
    fn reordered_or_new_sites_are_rejected() {
        let input = sites(&["a.com", "b.com"]);
        let err = ensure_subsequence(&input, sites(&["b.com", "a.com"])).unwrap_err();
        assert_eq!(err.kind, BackendErrorKind::ContractViolation);
        assert!(ensure_subsequence(&input, sites(&["c.com"])).is_err());
    }

    #[test]
    fn records_must_match_input_one_to_one() {
        let input = sites(&["a.com", "b.com"]);
        let ok = vec![
            EmailRecord::new("a.com", vec![]),
            EmailRecord::new("b.com", vec![]),
        ];
        assert!(ensure_one_record_per_site(&input, ok).is_ok());

        let short = vec![EmailRecord::new("a.com", vec![])];
        assert!(ensure_one_record_per_site(&input, short).is_err());

        let swapped = vec![
            EmailRecord::new("b.com", vec![]),
            EmailRecord::new("a.com", vec![]),
        ];
        assert!(ensure_one_record_per_site(&input, swapped).is_err());
    }
}
