//! Read-only, predicate-filtered views over a collection.

use std::cmp::Ordering;
use std::fmt;

use crate::record::Record;

type Clause<F> = Box<dyn Fn(&Record<F>) -> bool>;
type Comparator<F> = Box<dyn Fn(&Record<F>, &Record<F>) -> Ordering>;

/// A conjunction of predicates over records.
///
/// Every clause must hold for a record to match; a filter with no clauses
/// matches everything.
pub struct Filter<F> {
    clauses: Vec<Clause<F>>,
}

impl<F: 'static> Filter<F> {
    /// A filter that matches every record.
    pub fn all() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Case-insensitive substring match across one or more text fields.
    ///
    /// A blank `term` adds no clause.
    pub fn text<X>(mut self, term: &str, fields: X) -> Self
    where
        X: for<'r> Fn(&'r F) -> Vec<&'r str> + 'static,
    {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self;
        }
        self.clauses.push(Box::new(move |record| {
            fields(&record.fields)
                .iter()
                .any(|haystack| haystack.to_lowercase().contains(&needle))
        }));
        self
    }

    /// Exact match on a categorical or date field.
    pub fn eq<V, X>(mut self, value: V, field: X) -> Self
    where
        V: PartialEq + 'static,
        X: for<'r> Fn(&'r F) -> &'r V + 'static,
    {
        self.clauses
            .push(Box::new(move |record| *field(&record.fields) == value));
        self
    }

    /// Like [`eq`](Self::eq), but `None` adds no clause.
    pub fn eq_opt<V, X>(self, value: Option<V>, field: X) -> Self
    where
        V: PartialEq + 'static,
        X: for<'r> Fn(&'r F) -> &'r V + 'static,
    {
        match value {
            Some(value) => self.eq(value, field),
            None => self,
        }
    }

    /// Arbitrary predicate over the whole record.
    pub fn matching(mut self, predicate: impl Fn(&Record<F>) -> bool + 'static) -> Self {
        self.clauses.push(Box::new(predicate));
        self
    }
}

impl<F> Filter<F> {
    pub fn matches(&self, record: &Record<F>) -> bool {
        self.clauses.iter().all(|clause| clause(record))
    }

    /// Returns true when the filter has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl<F: 'static> Default for Filter<F> {
    fn default() -> Self {
        Self::all()
    }
}

impl<F> fmt::Debug for Filter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("clauses", &self.clauses.len())
            .finish()
    }
}

/// An ordering applied to query results. Stable: ties keep collection order.
pub struct Sort<F> {
    compare: Comparator<F>,
}

impl<F: 'static> Sort<F> {
    /// Ascending by the extracted key.
    pub fn by_key<K, X>(key: X) -> Self
    where
        K: Ord,
        X: Fn(&Record<F>) -> K + 'static,
    {
        Self {
            compare: Box::new(move |a, b| key(a).cmp(&key(b))),
        }
    }

    /// Reverse this ordering.
    pub fn reversed(self) -> Self {
        let compare = self.compare;
        Self {
            compare: Box::new(move |a, b| compare(b, a)),
        }
    }
}

impl<F> fmt::Debug for Sort<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sort").finish_non_exhaustive()
    }
}

/// A lazy view over the records matching a [`Filter`].
///
/// Nothing is evaluated until [`iter`](Self::iter) is called, and every call
/// starts over from the beginning. The view borrows the store, so it cannot
/// outlive a mutation.
#[derive(Debug)]
pub struct Query<'a, F> {
    records: &'a [Record<F>],
    filter: Filter<F>,
    sort: Option<Sort<F>>,
}

impl<'a, F> Query<'a, F> {
    pub(crate) fn new(records: &'a [Record<F>], filter: Filter<F>, sort: Option<Sort<F>>) -> Self {
        Self {
            records,
            filter,
            sort,
        }
    }

    /// Iterate over matching records.
    pub fn iter(&self) -> QueryIter<'_, 'a, F> {
        let inner = match &self.sort {
            None => Inner::Ordered {
                records: self.records.iter(),
                filter: &self.filter,
            },
            Some(sort) => {
                let mut matched: Vec<&'a Record<F>> = self
                    .records
                    .iter()
                    .filter(|record| self.filter.matches(record))
                    .collect();
                matched.sort_by(|a, b| (sort.compare)(*a, *b));
                Inner::Sorted(matched.into_iter())
            }
        };
        QueryIter { inner }
    }

    /// Number of matching records.
    pub fn count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| self.filter.matches(record))
            .count()
    }

    /// Collect references to the matching records, in result order.
    pub fn to_vec(&self) -> Vec<&'a Record<F>> {
        self.iter().collect()
    }
}

impl<'q, 'a, F> IntoIterator for &'q Query<'a, F> {
    type Item = &'a Record<F>;
    type IntoIter = QueryIter<'q, 'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`Query::iter`].
pub struct QueryIter<'q, 'a, F> {
    inner: Inner<'q, 'a, F>,
}

enum Inner<'q, 'a, F> {
    Ordered {
        records: std::slice::Iter<'a, Record<F>>,
        filter: &'q Filter<F>,
    },
    Sorted(std::vec::IntoIter<&'a Record<F>>),
}

impl<'a, F> Iterator for QueryIter<'_, 'a, F> {
    type Item = &'a Record<F>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Ordered { records, filter } => records.find(|record| filter.matches(record)),
            Inner::Sorted(records) => records.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordId;
    use chrono::{Duration, Utc};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: String,
        kind: String,
    }

    fn records() -> Vec<Record<Item>> {
        let base = Utc::now();
        [("Apple", "fruit"), ("carrot", "veg"), ("Banana", "fruit")]
            .iter()
            .enumerate()
            .map(|(i, (name, kind))| Record {
                id: RecordId::new(i as u64 + 1),
                fields: Item {
                    name: name.to_string(),
                    kind: kind.to_string(),
                },
                created_at: base + Duration::seconds(i as i64),
                updated_at: base + Duration::seconds(i as i64),
            })
            .collect()
    }

    fn names<'a>(iter: impl Iterator<Item = &'a Record<Item>>) -> Vec<&'a str> {
        iter.map(|r| r.fields.name.as_str()).collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let records = records();
        let query = Query::new(&records, Filter::all(), None);
        assert_eq!(query.count(), 3);
    }

    #[test]
    fn text_is_case_insensitive() {
        let records = records();
        let filter = Filter::all().text("AN", |item: &Item| vec![item.name.as_str()]);
        let query = Query::new(&records, filter, None);
        assert_eq!(names(query.iter()), vec!["Banana"]);
    }

    #[test]
    fn blank_term_adds_no_clause() {
        let filter = Filter::<Item>::all().text("   ", |item: &Item| vec![item.name.as_str()]);
        assert!(filter.is_empty());
    }

    #[test]
    fn clauses_are_combined_with_and() {
        let records = records();
        let filter = Filter::all()
            .text("a", |item: &Item| vec![item.name.as_str()])
            .eq("fruit".to_string(), |item: &Item| &item.kind);
        let query = Query::new(&records, filter, None);
        assert_eq!(names(query.iter()), vec!["Apple", "Banana"]);
    }

    #[test]
    fn eq_opt_none_is_ignored() {
        let records = records();
        let filter = Filter::all().eq_opt(None::<String>, |item: &Item| &item.kind);
        assert_eq!(Query::new(&records, filter, None).count(), 3);
    }

    #[test]
    fn query_is_restartable() {
        let records = records();
        let filter = Filter::all().eq("fruit".to_string(), |item: &Item| &item.kind);
        let query = Query::new(&records, filter, None);
        let first = names(query.iter());
        let second = names(query.iter());
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn sort_orders_results() {
        let records = records();
        let sort = Sort::by_key(|r: &Record<Item>| r.fields.name.to_lowercase());
        let query = Query::new(&records, Filter::all(), Some(sort));
        assert_eq!(names(query.iter()), vec!["Apple", "Banana", "carrot"]);

        let newest_first = Sort::by_key(|r: &Record<Item>| r.created_at).reversed();
        let query = Query::new(&records, Filter::all(), Some(newest_first));
        assert_eq!(names(query.iter()), vec!["Banana", "carrot", "Apple"]);
    }

    #[test]
    fn matching_uses_whole_record() {
        let records = records();
        let filter = Filter::all().matching(|r: &Record<Item>| r.id.as_u64() > 1);
        let query = Query::new(&records, filter, None);
        assert_eq!(names(query.iter()), vec!["carrot", "Banana"]);
    }
}
