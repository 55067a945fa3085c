//! Aggregation of records between flushes.
use super::{Record, RecordValue};
use std::collections::HashSet;
use xxhash_rust::xxh3::Xxh3Builder;

/// Stores records and aggregates them on flush.
///
/// A scalar key occurring in several stored records is summarized into
/// `_min`, `_max`, `_mean` and `_median` entries; a scalar occurring once
/// passes through under its own key. For any other value type the most
/// recent occurrence wins.
pub struct RecordStorage {
    data: Vec<Record>,
}

fn min(vs: &Vec<f32>) -> RecordValue {
    RecordValue::Scalar(*vs.iter().min_by(|x, y| x.total_cmp(y)).unwrap())
}

fn max(vs: &Vec<f32>) -> RecordValue {
    RecordValue::Scalar(*vs.iter().max_by(|x, y| x.total_cmp(y)).unwrap())
}

fn mean(vs: &Vec<f32>) -> RecordValue {
    RecordValue::Scalar(vs.iter().map(|v| *v).sum::<f32>() / vs.len() as f32)
}

/// Sorts the values to find the median.
fn median(mut vs: Vec<f32>) -> RecordValue {
    vs.sort_by(|x, y| x.partial_cmp(y).unwrap());
    RecordValue::Scalar(vs[vs.len() / 2])
}

impl RecordStorage {
    /// Creates a new empty record storage.
    pub fn new() -> Self {
        Self { data: vec![] }
    }

    /// Stores a record.
    pub fn store(&mut self, record: Record) {
        self.data.push(record);
    }

    fn get_keys(&self) -> HashSet<String, Xxh3Builder> {
        let mut keys = HashSet::<String, Xxh3Builder>::default();
        for record in self.data.iter() {
            for k in record.keys() {
                keys.insert(k.clone());
            }
        }
        keys
    }

    /// Finds the first occurrence of a value with the given key.
    ///
    /// Panics if the key is not in any stored record.
    fn find(&self, key: &String) -> &RecordValue {
        for record in self.data.iter() {
            if let Some(value) = record.get(key) {
                return value;
            }
        }
        panic!("Key '{}' was not found. ", key);
    }

    /// Returns a record with the most recent value for the given key.
    fn latest(&self, key: &String) -> Record {
        for record in self.data.iter().rev() {
            if let Some(value) = record.get(key) {
                return Record::from_slice(&[(key, value.clone())]);
            }
        }
        panic!("Unexpected");
    }

    /// Summarizes the scalar values stored under the given key.
    ///
    /// Panics if a value under the key is not a scalar.
    fn scalar(&self, key: &String) -> Record {
        let vs: Vec<f32> = self
            .data
            .iter()
            .filter_map(|record| match record.get(key) {
                Some(v) => match v {
                    RecordValue::Scalar(v) => Some(*v),
                    _ => panic!("Expect RecordValue::Scalar for {}", key),
                },
                None => None,
            })
            .collect();

        if vs.len() == 1 {
            Record::from_slice(&[(format!("{}", key), RecordValue::Scalar(vs[0]))])
        } else {
            Record::from_slice(&[
                (format!("{}_min", key), min(&vs)),
                (format!("{}_max", key), max(&vs)),
                (format!("{}_mean", key), mean(&vs)),
                (format!("{}_median", key), median(vs)),
            ])
        }
    }

    /// Aggregates all stored records and clears the storage.
    pub fn aggregate(&mut self) -> Record {
        let mut record = Record::empty();

        for key in self.get_keys().iter() {
            let r = match self.find(key) {
                RecordValue::Scalar(..) => self.scalar(key),
                _ => self.latest(key),
            };
            record = record.merge(r);
        }

        self.data = vec![];

        record
    }
}

#[cfg(test)]
mod tests {
    use super::RecordStorage;
    use crate::record::{Record, RecordValue};

    #[test]
    fn test_aggregates_repeated_scalars() {
        let mut storage = RecordStorage::new();
        for v in vec![1.0f32, 3.0, 2.0] {
            storage.store(Record::from_scalar("loss", v));
        }

        let record = storage.aggregate();
        assert_eq!(record.get_scalar("loss_min").unwrap(), 1.0);
        assert_eq!(record.get_scalar("loss_max").unwrap(), 3.0);
        assert_eq!(record.get_scalar("loss_mean").unwrap(), 2.0);
        assert_eq!(record.get_scalar("loss_median").unwrap(), 2.0);
        assert!(record.get("loss").is_none());
    }

    #[test]
    fn test_single_scalar_passes_through() {
        let mut storage = RecordStorage::new();
        storage.store(Record::from_scalar("loss", 0.5));

        let record = storage.aggregate();
        assert_eq!(record.get_scalar("loss").unwrap(), 0.5);
        assert!(record.get("loss_mean").is_none());
    }

    #[test]
    fn test_latest_wins_for_strings() {
        let mut storage = RecordStorage::new();
        let mut r1 = Record::from_scalar("loss", 0.5);
        r1.insert("phase", RecordValue::String("warmup".to_string()));
        let mut r2 = Record::from_scalar("loss", 0.25);
        r2.insert("phase", RecordValue::String("train".to_string()));
        storage.store(r1);
        storage.store(r2);

        let record = storage.aggregate();
        assert_eq!(record.get_string("phase").unwrap(), "train");
    }

    #[test]
    fn test_aggregate_drains_storage() {
        let mut storage = RecordStorage::new();
        storage.store(Record::from_scalar("loss", 0.5));

        let _ = storage.aggregate();
        assert!(storage.aggregate().is_empty());
    }
}
