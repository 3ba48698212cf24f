//! Isolation layer: the private working copy used by reconstruction.
//!
//! Every model type derives `Clone` and `PartialEq` field by field, so a new
//! field is picked up by both without further changes. The copy is owned, so
//! nothing in it can alias the caller's file.

use crate::error::{ReconstructError, ReconstructResult};
use crate::models::AchFile;

/// Produce an independent copy of `original`.
///
/// The copy is compared against the original before it is handed out; any
/// difference is a [`ReconstructError::DeepCopyFailure`] raised before a
/// single edit is applied.
pub fn isolate(original: &AchFile) -> ReconstructResult<AchFile> {
    let copy = original.clone();
    audit(original, &copy)?;
    Ok(copy)
}

fn audit(original: &AchFile, copy: &AchFile) -> ReconstructResult<()> {
    if copy.batches.len() != original.batches.len()
        || copy.iat_batches.len() != original.iat_batches.len()
    {
        return Err(ReconstructError::DeepCopyFailure(format!(
            "copy has {} batches and {} IAT batches, original has {} and {}",
            copy.batches.len(),
            copy.iat_batches.len(),
            original.batches.len(),
            original.iat_batches.len()
        )));
    }
    if copy != original {
        return Err(ReconstructError::DeepCopyFailure(
            "copy differs from the original".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Addenda, Addenda05, Addenda18, Batch, EntryDetail, IatBatch, IatEntryDetail,
    };

    fn sample() -> AchFile {
        let mut file = AchFile::default();
        let mut entry = EntryDetail {
            amount: 10,
            ..EntryDetail::default()
        };
        entry.attach(Addenda::PaymentInfo(Addenda05::new("orig", 1))).unwrap();
        let mut batch = Batch::default();
        batch.add_entry(entry);
        file.add_batch(batch);

        let mut iat_entry = IatEntryDetail::default();
        iat_entry.attach(Addenda::IatCorrespondentBank(Addenda18::default())).unwrap();
        let mut iat = IatBatch::default();
        iat.add_entry(iat_entry);
        file.add_iat_batch(iat);
        file
    }

    #[test]
    fn test_copy_is_equal() {
        let original = sample();
        assert_eq!(isolate(&original).unwrap(), original);
    }

    #[test]
    fn test_nested_mutation_does_not_leak() {
        let original = sample();
        let mut copy = isolate(&original).unwrap();

        copy.batches[0].entries[0].amount = 99;
        copy.batches[0].entries[0].addenda05[0].payment_related_information = "changed".into();
        copy.iat_batches[0].entries[0].addenda18[0].foreign_correspondent_bank_name = "x".into();
        copy.batches[0].entries.push(EntryDetail::default());

        let entry = &original.batches[0].entries[0];
        assert_eq!(entry.amount, 10);
        assert_eq!(entry.addenda05[0].payment_related_information, "orig");
        let untouched = &original.iat_batches[0].entries[0].addenda18[0];
        assert_eq!(untouched.foreign_correspondent_bank_name, "");
        assert_eq!(original.batches[0].entries.len(), 1);
    }

    #[test]
    fn test_audit_reports_shape_mismatch() {
        let original = sample();
        let mut copy = original.clone();
        copy.batches.clear();
        let err = audit(&original, &copy).unwrap_err();
        assert!(matches!(err, ReconstructError::DeepCopyFailure(_)));
        assert!(err.to_string().contains("0 batches"));
    }
}
