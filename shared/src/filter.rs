use crate::resource::Record;

/// Case-insensitive substring match over title and body; a blank query matches everything.
/// Surrounding spaces of a non-blank query are part of the match.
pub fn matches<R: Record>(record: &R, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    record.title().to_lowercase().contains(&query)
        || record.body().to_lowercase().contains(&query)
}

pub fn apply<'a, R: Record>(records: &'a [R], query: &str) -> Vec<&'a R> {
    records.iter().filter(|record| matches(*record, query)).collect()
}
