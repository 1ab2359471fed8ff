pub mod user_repo;
pub use user_repo::UserRepository;
pub mod product_repo;
pub use product_repo::{ProductRepository, ProductStore};
pub mod note_repo;
pub use note_repo::NoteRepository;
pub mod activity_repo;
pub use activity_repo::{ActivityRepository, ActivityStore};

#[cfg(test)]
pub mod memory;

/// Lowercased `LIKE` pattern matching `q` anywhere, with `\`, `%` and `_`
/// escaped so they match literally under `ESCAPE '\'`.
pub(crate) fn contains_pattern(q: &str) -> String {
    let mut pattern = String::with_capacity(q.len() + 2);
    pattern.push('%');
    for c in q.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
