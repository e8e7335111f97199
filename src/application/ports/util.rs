// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    /// Lower-case, transliterated, hyphen-separated token; may be empty.
    fn slugify(&self, input: &str) -> String;
}
