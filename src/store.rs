use chrono::Utc;

use crate::error::{AppError, Result};

/// A flat record identified by a string id.
pub trait Record {
    fn id(&self) -> &str;
}

/// The caller-supplied half of a record: every field except the id.
pub trait Draft {
    type Record: Record;

    fn into_record(self, id: String) -> Self::Record;
}

/// Issues timestamp-based ids. Two ids requested within the same millisecond
/// (a CSV batch, say) still come out distinct and increasing.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last.to_string()
    }
}

#[derive(Debug)]
pub struct Collection<T> {
    items: Vec<T>,
    ids: IdGenerator,
}

impl<T: Record> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            ids: IdGenerator::default(),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    /// Append a new record built from `draft`; the collection assigns the id.
    pub fn create<D>(&mut self, draft: D) -> &T
    where
        D: Draft<Record = T>,
    {
        let id = self.ids.next_id();
        tracing::debug!(%id, "record created");
        self.items.push(draft.into_record(id));
        let last = self.items.len() - 1;
        &self.items[last]
    }

    pub fn create_many<D>(&mut self, drafts: Vec<D>) -> usize
    where
        D: Draft<Record = T>,
    {
        let count = drafts.len();
        for draft in drafts {
            self.create(draft);
        }
        count
    }

    /// Replace every field of the record `id` with `draft`, keeping the id and
    /// the record's position.
    pub fn update<D>(&mut self, id: &str, draft: D) -> Result<&T>
    where
        D: Draft<Record = T>,
    {
        let idx = self
            .items
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        self.items[idx] = draft.into_record(id.to_string());
        tracing::debug!(%id, "record updated");
        Ok(&self.items[idx])
    }

    /// Remove exactly the record `id`; the rest keep their relative order.
    pub fn delete(&mut self, id: &str) -> Result<T> {
        let idx = self
            .items
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        tracing::debug!(%id, "record deleted");
        Ok(self.items.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostCenter, CostCenterDraft};

    fn center(id: &str, name: &str) -> CostCenter {
        CostCenter {
            id: id.into(),
            name: name.into(),
            description: String::new(),
        }
    }

    fn draft(name: &str) -> CostCenterDraft {
        CostCenterDraft {
            name: name.into(),
            description: String::new(),
        }
    }

    fn ids(c: &Collection<CostCenter>) -> Vec<&str> {
        c.as_slice().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_delete_removes_only_that_record() {
        let mut c = Collection::new(vec![
            center("1", "A"),
            center("2", "B"),
            center("3", "C"),
            center("4", "D"),
        ]);
        let removed = c.delete("2").unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(ids(&c), vec!["1", "3", "4"]);
    }

    #[test]
    fn test_delete_unknown_id_is_not_found() {
        let mut c = Collection::new(vec![center("1", "A")]);
        assert!(matches!(c.delete("9"), Err(AppError::NotFound(_))));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_update_keeps_id_and_position() {
        let mut c = Collection::new(vec![center("1", "A"), center("2", "B"), center("3", "C")]);
        c.update("2", draft("Renamed")).unwrap();
        assert_eq!(ids(&c), vec!["1", "2", "3"]);
        assert_eq!(c.get("2").unwrap().name, "Renamed");
    }

    #[test]
    fn test_create_assigns_distinct_ids() {
        let mut c: Collection<CostCenter> = Collection::new(Vec::new());
        let added = c.create_many(vec![draft("A"), draft("B"), draft("C")]);
        assert_eq!(added, 3);
        let mut seen = ids(&c);
        seen.dedup();
        assert_eq!(seen.len(), 3);
        let numeric: Vec<i64> = seen.iter().map(|s| s.parse().unwrap()).collect();
        assert!(numeric.windows(2).all(|w| w[0] < w[1]));
    }
}
