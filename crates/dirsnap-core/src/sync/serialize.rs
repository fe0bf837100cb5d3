//! Snapshot serialization.
//!
//! Entries already carry every field the store needs, so serialization is
//! the identity transform. The only massaging happens on the
//! replace-persist path, where [`to_storage_record`] guarantees a
//! populated `last_modified` on the stored copy.

use crate::fs::entry::FileEntry;

/// Returns the entries as the storable representation.
///
/// Identity: a [`FileEntry`] is its own storage form (the handle is
/// skipped by serde, not by this function).
pub fn serialize(entries: &[FileEntry]) -> &[FileEntry] {
    entries
}

/// Produces the storage record for one entry.
///
/// Shallow copy with `last_modified` guaranteed present: entries built
/// from degraded metadata store `0` rather than an absent field. The
/// entry's other fields and meaning are unchanged.
pub fn to_storage_record(entry: &FileEntry) -> FileEntry {
    let mut record = entry.clone();
    record.set_last_modified(Some(entry.last_modified().unwrap_or(0)));
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_is_identity() {
        let entries = vec![
            FileEntry::new("a/b.txt", "b.txt", Some(1)),
            FileEntry::new("a/c.txt", "c.txt", None),
        ];
        assert_eq!(serialize(&entries), entries.as_slice());
    }

    #[test]
    fn storage_record_keeps_present_last_modified() {
        let entry = FileEntry::new("a/b.txt", "b.txt", Some(4242));
        let record = to_storage_record(&entry);
        assert_eq!(record.last_modified(), Some(4242));
    }

    #[test]
    fn storage_record_defaults_absent_last_modified_to_zero() {
        let entry = FileEntry::new("a/b.txt", "b.txt", None);
        let record = to_storage_record(&entry);
        assert_eq!(record.last_modified(), Some(0));
    }

    #[test]
    fn storage_record_preserves_identity_fields() {
        let entry = FileEntry::new("a/b.txt", "b.txt", None);
        let record = to_storage_record(&entry);
        assert_eq!(record.relative_path(), "a/b.txt");
        assert_eq!(record.name(), "b.txt");
    }
}
